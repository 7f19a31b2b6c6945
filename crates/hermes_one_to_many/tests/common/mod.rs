#![allow(dead_code)]

use hermes_one_to_many::{
    base_graph::BaseGraph,
    edge_direction::EdgeDirection,
    geopoint::GeoPoint,
    graph_edge::{EdgeProperties, GraphEdge},
    meters,
    weighting::{Milliseconds, Weight, Weighting},
};

/// Weight is the distance in meters, one millisecond per meter
pub struct DistanceWeighting;

impl Weighting for DistanceWeighting {
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
        if !edge.properties().get(direction).access {
            return f64::INFINITY;
        }

        edge.distance().value()
    }

    fn calc_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
        if !edge.properties().get(direction).access {
            return Milliseconds::MAX;
        }

        edge.distance().value() as Milliseconds
    }

    fn name(&self) -> &str {
        "distance"
    }
}

pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;
pub const D: usize = 3;
pub const E: usize = 4;

/// A->B (1), B->C (1), A->C (5), C->D (1), and E->F (1) unreachable from A
pub fn abcd_graph() -> BaseGraph {
    let mut graph = BaseGraph::default();

    for (lat, lng) in [
        (50.0, 4.0),
        (50.001, 4.0005),
        (50.0, 4.001),
        (50.0, 4.002),
        (50.1, 4.1),
        (50.1, 4.101),
    ] {
        graph.add_node(GeoPoint::new(lat, lng));
    }

    let oneway = EdgeProperties::oneway(50.0);
    graph.add_edge(A, B, Some(meters!(1)), oneway);
    graph.add_edge(B, C, Some(meters!(1)), oneway);
    graph.add_edge(A, C, Some(meters!(5)), oneway);
    graph.add_edge(C, D, Some(meters!(1)), oneway);
    graph.add_edge(E, 5, Some(meters!(1)), oneway);

    graph
}

/// W ---- X ---- Y along a parallel, 1000m per edge, both directions open
pub fn line_graph() -> BaseGraph {
    let mut graph = BaseGraph::default();
    let w = graph.add_node(GeoPoint::new(50.0, 4.0));
    let x = graph.add_node(GeoPoint::new(50.0, 4.01));
    let y = graph.add_node(GeoPoint::new(50.0, 4.02));

    graph.add_edge(w, x, Some(meters!(1000)), EdgeProperties::bidirectional(50.0));
    graph.add_edge(x, y, Some(meters!(1000)), EdgeProperties::bidirectional(50.0));

    graph
}

/// Square grid of `size` x `size` nodes with edges between horizontal and vertical
/// neighbours. Edge lengths are derived from `lengths`, cycling when exhausted.
pub fn grid_graph(size: usize, lengths: &[u32]) -> BaseGraph {
    let mut graph = BaseGraph::with_capacity(size * size, 2 * size * size);

    for row in 0..size {
        for column in 0..size {
            graph.add_node(GeoPoint::new(
                50.0 + row as f64 * 0.001,
                4.0 + column as f64 * 0.001,
            ));
        }
    }

    let mut lengths = lengths.iter().cycle();
    let mut next_length = || lengths.next().copied().unwrap_or(1).max(1);

    for row in 0..size {
        for column in 0..size {
            let node = row * size + column;

            if column + 1 < size {
                graph.add_edge(
                    node,
                    node + 1,
                    Some(meters!(next_length())),
                    EdgeProperties::bidirectional(50.0),
                );
            }

            if row + 1 < size {
                graph.add_edge(
                    node,
                    node + size,
                    Some(meters!(next_length())),
                    EdgeProperties::bidirectional(50.0),
                );
            }
        }
    }

    graph
}
