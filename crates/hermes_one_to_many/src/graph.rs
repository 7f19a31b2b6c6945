use crate::{
    edge_direction::EdgeDirection,
    geopoint::GeoPoint,
    graph_edge::GraphEdge,
    types::{EdgeId, NodeId},
};

pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;

    fn node_edges_iter(&self, node_id: NodeId) -> Self::EdgeIterator<'_>;

    fn edge(&self, edge_id: EdgeId) -> &GraphEdge;

    /// Full geometry of the edge, from its start node to its end node
    fn edge_geometry(&self, edge_id: EdgeId) -> &[GeoPoint];
    fn node_geometry(&self, node_id: NodeId) -> &GeoPoint;

    fn is_virtual_node(&self, _node_id: NodeId) -> bool {
        false
    }

    /// Direction of travel on `edge_id` when leaving from `start`
    fn edge_direction(&self, edge_id: EdgeId, start: NodeId) -> EdgeDirection {
        let edge = self.edge(edge_id);

        if edge.start_node() == start {
            return EdgeDirection::Forward;
        }

        debug_assert_eq!(
            edge.end_node(),
            start,
            "Node {} is neither the start nor the end of edge {}",
            start,
            edge_id
        );

        EdgeDirection::Backward
    }

    fn is_unfavored_edge(&self, _edge_id: EdgeId) -> bool {
        false
    }

    /// Identifies the current set of unfavored edges. Search state computed under one
    /// fingerprint is not valid under another.
    fn unfavored_fingerprint(&self) -> u64 {
        0
    }
}
