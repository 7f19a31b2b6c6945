use serde::Serialize;

use crate::{
    distance::Meters,
    geopoint::GeoPoint,
    types::{EdgeId, NodeId},
    weighting::{Milliseconds, Weight},
};

/// One traversed edge, with its geometry in the direction of travel
#[derive(Clone, Debug, Serialize)]
pub struct RoutingPathLeg {
    edge_id: EdgeId,
    distance: Meters,
    time: Milliseconds,
    points: Vec<GeoPoint>,
}

impl RoutingPathLeg {
    pub fn new(
        edge_id: EdgeId,
        distance: Meters,
        time: Milliseconds,
        points: Vec<GeoPoint>,
    ) -> RoutingPathLeg {
        RoutingPathLeg {
            edge_id,
            distance,
            time,
            points,
        }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn time(&self) -> Milliseconds {
        self.time
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RoutingPath {
    from: NodeId,
    to: NodeId,
    nodes: Vec<NodeId>,
    legs: Vec<RoutingPathLeg>,
    distance: Meters,
    time: Milliseconds,
    weight: Weight,
}

impl RoutingPath {
    /// `nodes` lists every node from `from` to `to`, one more than there are legs
    pub fn new(
        from: NodeId,
        to: NodeId,
        nodes: Vec<NodeId>,
        legs: Vec<RoutingPathLeg>,
        weight: Weight,
    ) -> RoutingPath {
        debug_assert_eq!(nodes.len(), legs.len() + 1);

        let distance = legs.iter().map(|leg| leg.distance).sum();
        let time = legs
            .iter()
            .fold(0, |total: Milliseconds, leg| total.saturating_add(leg.time));

        RoutingPath {
            from,
            to,
            nodes,
            legs,
            distance,
            time,
            weight,
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn legs(&self) -> &[RoutingPathLeg] {
        &self.legs
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.legs.iter().map(|leg| leg.edge_id)
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn time(&self) -> Milliseconds {
        self.time
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Geometry of the whole path, without repeating the points shared by consecutive legs
    pub fn points(&self) -> Vec<GeoPoint> {
        let mut points: Vec<GeoPoint> = Vec::new();

        for leg in &self.legs {
            let skip = match (points.last(), leg.points.first()) {
                (Some(last), Some(first)) if last == first => 1,
                _ => 0,
            };
            points.extend(leg.points.iter().skip(skip));
        }

        points
    }
}
