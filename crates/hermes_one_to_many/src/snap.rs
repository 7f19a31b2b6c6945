use crate::{
    constants::{INVALID_EDGE, INVALID_NODE},
    distance::Meters,
    geopoint::GeoPoint,
    types::{EdgeId, NodeId},
};

/// Where on the graph a point was snapped to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnappedPosition {
    /// Exactly on a graph node
    Tower,
    /// Somewhere inside the given segment of the edge geometry
    Edge { segment_index: usize },
}

#[derive(Clone, Debug)]
pub struct Snap {
    pub query_point: GeoPoint,
    pub edge_id: EdgeId,
    pub coordinates: GeoPoint,
    distance: Meters,
    position: SnappedPosition,
    closest_node: Option<NodeId>,
}

impl Snap {
    pub fn new(
        query_point: GeoPoint,
        edge_id: EdgeId,
        coordinates: GeoPoint,
        distance: Meters,
        position: SnappedPosition,
        closest_node: NodeId,
    ) -> Self {
        Snap {
            query_point,
            edge_id,
            coordinates,
            distance,
            position,
            closest_node: Some(closest_node),
        }
    }

    /// A point that could not be matched to any accessible edge
    pub fn invalid(query_point: GeoPoint) -> Self {
        Snap {
            query_point,
            edge_id: INVALID_EDGE,
            coordinates: query_point,
            distance: Meters::ZERO,
            position: SnappedPosition::Tower,
            closest_node: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.edge_id != INVALID_EDGE && self.closest_node.is_some()
    }

    pub fn closest_node(&self) -> NodeId {
        self.closest_node.unwrap_or(INVALID_NODE)
    }

    pub fn set_closest_node(&mut self, node_id: NodeId) {
        self.closest_node = Some(node_id)
    }

    /// Distance between the query point and the snapped coordinates
    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn position(&self) -> SnappedPosition {
        self.position
    }
}
