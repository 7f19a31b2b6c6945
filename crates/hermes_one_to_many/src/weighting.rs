use crate::constants::{DISTANCE_INFLUENCE, MAX_DURATION, MAX_WEIGHT};
use crate::edge_direction::EdgeDirection;
use crate::graph_edge::GraphEdge;

pub type Weight = f64;
pub type Milliseconds = i64;

/// Cost function of a routing profile.
///
/// Implementations must be deterministic for a given edge and direction and must never return a
/// negative weight: the one-to-many search reuses settled weights across destinations. A weight
/// of [`f64::INFINITY`] means the edge cannot be travelled in that direction.
pub trait Weighting {
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight;
    fn calc_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds;

    fn can_access_edge(&self, edge: &GraphEdge) -> bool {
        self.calc_edge_weight(edge, EdgeDirection::Forward) != MAX_WEIGHT
            || self.calc_edge_weight(edge, EdgeDirection::Backward) != MAX_WEIGHT
    }

    fn name(&self) -> &str;
}

fn travel_time_ms(edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
    let properties = edge.properties().get(direction);

    if !properties.access || properties.average_speed <= 0.0 {
        return MAX_DURATION;
    }

    let speed_meters_per_second = properties.average_speed as f64 / 3.6;
    let ms = (edge.distance().value() / speed_meters_per_second) * 1000.0;

    ms.round() as Milliseconds
}

/// Prefers fast roads, with a small penalty on distance to avoid long detours for tiny gains
#[derive(Default)]
pub struct CarWeighting;

impl CarWeighting {
    pub fn new() -> Self {
        CarWeighting
    }
}

impl Weighting for CarWeighting {
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
        let ms = self.calc_edge_ms(edge, direction);

        if ms == MAX_DURATION {
            return MAX_WEIGHT;
        }

        let distance_costs = edge.distance().value() * DISTANCE_INFLUENCE;
        (ms as f64 + distance_costs).round()
    }

    fn calc_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
        travel_time_ms(edge, direction)
    }

    fn name(&self) -> &str {
        "car"
    }
}

#[derive(Default)]
pub struct ShortestWeighting;

impl ShortestWeighting {
    pub fn new() -> Self {
        ShortestWeighting
    }
}

impl Weighting for ShortestWeighting {
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
        if !edge.properties().get(direction).access {
            return MAX_WEIGHT;
        }

        edge.distance().value()
    }

    fn calc_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
        travel_time_ms(edge, direction)
    }

    fn name(&self) -> &str {
        "shortest"
    }
}
