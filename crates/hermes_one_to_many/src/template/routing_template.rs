use super::path_merger::PathMerger;
use crate::{
    base_graph::BaseGraph,
    edge_filter::EdgeFilter,
    error::RoutingError,
    query_graph::QueryGraph,
    routing::{
        algorithm_factory::{AlgorithmFactory, AlgorithmOptions},
        routing_path::RoutingPath,
    },
    snap::Snap,
};

/// The steps of a routing request: resolve points, compute paths, build the response.
///
/// A caller runs `lookup`, builds a query graph from the returned snaps, then runs
/// `calc_paths` and `is_ready`, up to `max_retries` times.
pub trait RoutingTemplate {
    fn lookup(
        &mut self,
        graph: &BaseGraph,
        profile: &str,
        edge_filter: &dyn EdgeFilter,
    ) -> Result<&mut [Snap], RoutingError>;

    fn calc_paths<F: AlgorithmFactory>(
        &mut self,
        query_graph: &QueryGraph,
        algorithm_factory: &F,
        options: &AlgorithmOptions,
    ) -> Result<&[RoutingPath], RoutingError>;

    /// Builds the response from the computed paths, returns whether it is complete
    fn is_ready(&mut self, path_merger: &dyn PathMerger) -> Result<bool, RoutingError>;

    fn max_retries(&self) -> usize;
}
