use serde::{Deserialize, Serialize};

use crate::{
    distance::Meters,
    edge_direction::EdgeDirection,
    types::{EdgeId, NodeId},
};

/// Access and speed of an edge when travelled in one direction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalProperties {
    pub access: bool,
    /// Average speed in km/h
    pub average_speed: f32,
}

impl DirectionalProperties {
    pub fn new(access: bool, average_speed: f32) -> Self {
        DirectionalProperties {
            access,
            average_speed,
        }
    }

    pub fn closed() -> Self {
        DirectionalProperties {
            access: false,
            average_speed: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeProperties {
    pub forward: DirectionalProperties,
    pub backward: DirectionalProperties,
}

impl EdgeProperties {
    pub fn bidirectional(average_speed: f32) -> Self {
        EdgeProperties {
            forward: DirectionalProperties::new(true, average_speed),
            backward: DirectionalProperties::new(true, average_speed),
        }
    }

    pub fn oneway(average_speed: f32) -> Self {
        EdgeProperties {
            forward: DirectionalProperties::new(true, average_speed),
            backward: DirectionalProperties::closed(),
        }
    }

    pub fn get(&self, direction: EdgeDirection) -> &DirectionalProperties {
        match direction {
            EdgeDirection::Forward => &self.forward,
            EdgeDirection::Backward => &self.backward,
        }
    }

    /// Properties of the same road seen from its other end
    pub fn as_reversed(&self) -> Self {
        EdgeProperties {
            forward: self.backward,
            backward: self.forward,
        }
    }
}

impl Default for EdgeProperties {
    fn default() -> Self {
        EdgeProperties::bidirectional(50.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphEdge {
    id: EdgeId,
    start_node: NodeId,
    end_node: NodeId,
    distance: Meters,
    pub properties: EdgeProperties,
}

impl GraphEdge {
    pub fn new(
        id: EdgeId,
        start_node: NodeId,
        end_node: NodeId,
        distance: Meters,
        properties: EdgeProperties,
    ) -> Self {
        GraphEdge {
            id,
            start_node,
            end_node,
            distance,
            properties,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn adj_node(&self, node: NodeId) -> NodeId {
        if self.start_node == node {
            self.end_node
        } else {
            self.start_node
        }
    }

    pub fn properties(&self) -> &EdgeProperties {
        &self.properties
    }
}
