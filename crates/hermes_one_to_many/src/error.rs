use thiserror::Error;

use crate::{
    types::{EdgeId, NodeId},
    weighting::{Milliseconds, Weight},
};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read graph file: {0}")]
    ReadGraph(std::io::Error),
    #[error("Failed to parse graph file: {0}")]
    ParseGraph(serde_json::Error),
    #[error("Edge {edge} references unknown node {node}")]
    UnknownNode { edge: usize, node: NodeId },
}

/// Broken assumptions about the weighting or the graph data. These are defects, never
/// routing outcomes, and are not retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("At least one path has to be returned for {from} -> {to}")]
    EmptyPathList { from: NodeId, to: NodeId },
    #[error("Time was negative {time} for path index {index}")]
    NegativePathTime { time: Milliseconds, index: usize },
    #[error("Weighting returned negative weight {weight} for edge {edge_id}")]
    NegativeEdgeWeight { edge_id: EdgeId, weight: Weight },
    #[error("Weighting returned NaN for edge {edge_id}")]
    UndefinedEdgeWeight { edge_id: EdgeId },
    #[error("Empty paths for one-to-many route calculation not expected")]
    EmptyResponse,
    #[error("No response after {0} attempts")]
    RetriesExhausted(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Cannot find point {index}")]
    PointNotFound { index: usize },
    #[error("No path found between {from} and {to}")]
    NoPathFound { from: NodeId, to: NodeId },
    #[error("No path found due to maximum nodes exceeded {max_visited_nodes}")]
    BudgetExceeded { max_visited_nodes: usize },
    #[error("Internal error: {0}")]
    Internal(#[from] InvariantViolation),
}

impl RoutingError {
    /// Stable identifier for the kind of failure, meant for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            RoutingError::InvalidArgument(_) => "invalid_argument",
            RoutingError::PointNotFound { .. } => "point_not_found",
            RoutingError::NoPathFound { .. } => "no_path_found",
            RoutingError::BudgetExceeded { .. } => "budget_exceeded",
            RoutingError::Internal(_) => "internal_error",
        }
    }

    /// Whether a higher layer may reasonably retry, e.g. with a larger budget or other points
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RoutingError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            RoutingError::InvalidArgument(String::from("points")),
            RoutingError::PointNotFound { index: 1 },
            RoutingError::NoPathFound { from: 0, to: 1 },
            RoutingError::BudgetExceeded {
                max_visited_nodes: 10,
            },
            RoutingError::Internal(InvariantViolation::EmptyResponse),
        ];

        let mut codes: Vec<&str> = errors.iter().map(RoutingError::code).collect();
        codes.sort();
        codes.dedup();

        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn internal_errors_are_fatal() {
        let error: RoutingError = InvariantViolation::NegativePathTime { time: -1, index: 0 }.into();
        assert!(!error.is_recoverable());
        assert!(RoutingError::NoPathFound { from: 0, to: 1 }.is_recoverable());
    }
}
