use crate::{
    edge_direction::EdgeDirection, graph_edge::GraphEdge, weighting::Weighting,
};

/// Restricts which edges a search or a snap may use
pub trait EdgeFilter {
    fn accept(&self, edge: &GraphEdge, direction: EdgeDirection) -> bool;

    /// Accepts edges usable in at least one direction
    fn accept_any(&self, edge: &GraphEdge) -> bool {
        self.accept(edge, EdgeDirection::Forward) || self.accept(edge, EdgeDirection::Backward)
    }
}

pub struct AllEdgesFilter;

impl EdgeFilter for AllEdgesFilter {
    fn accept(&self, _edge: &GraphEdge, _direction: EdgeDirection) -> bool {
        true
    }
}

/// Accepts the directions a weighting can travel
pub struct AccessEdgeFilter<'a> {
    weighting: &'a dyn Weighting,
}

impl<'a> AccessEdgeFilter<'a> {
    pub fn new(weighting: &'a dyn Weighting) -> Self {
        AccessEdgeFilter { weighting }
    }
}

impl EdgeFilter for AccessEdgeFilter<'_> {
    fn accept(&self, edge: &GraphEdge, direction: EdgeDirection) -> bool {
        self.weighting.calc_edge_weight(edge, direction).is_finite()
    }
}
