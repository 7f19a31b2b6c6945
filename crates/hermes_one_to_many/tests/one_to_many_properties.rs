mod common;

use common::DistanceWeighting;
use hermes_one_to_many::{
    base_graph::BaseGraph,
    error::RoutingError,
    geopoint::GeoPoint,
    graph_edge::EdgeProperties,
    meters,
    routing::{
        dijkstra::{Dijkstra, DijkstraOneToMany},
        shortest_path_algorithm::ShortestPathAlgorithm,
    },
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct RandomEdge {
    start: usize,
    end: usize,
    length: u32,
    oneway: bool,
}

fn build_graph(node_count: usize, edges: &[RandomEdge]) -> BaseGraph {
    let mut graph = BaseGraph::with_capacity(node_count, edges.len());

    for node in 0..node_count {
        graph.add_node(GeoPoint::new(
            50.0 + (node / 10) as f64 * 0.01,
            4.0 + (node % 10) as f64 * 0.01,
        ));
    }

    for edge in edges {
        let end = if edge.start == edge.end {
            (edge.end + 1) % node_count
        } else {
            edge.end
        };
        let properties = if edge.oneway {
            EdgeProperties::oneway(50.0)
        } else {
            EdgeProperties::bidirectional(50.0)
        };
        graph.add_edge(edge.start, end, Some(meters!(edge.length)), properties);
    }

    graph
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<RandomEdge>, Vec<usize>)> {
    (2..30usize).prop_flat_map(|node_count| {
        let edge = (0..node_count, 0..node_count, 1..1000u32, any::<bool>()).prop_map(
            |(start, end, length, oneway)| RandomEdge {
                start,
                end,
                length,
                oneway,
            },
        );

        (
            Just(node_count),
            prop::collection::vec(edge, 0..node_count * 3),
            prop::collection::vec(0..node_count, 1..8),
        )
    })
}

proptest! {
    #[test]
    fn one_to_many_matches_dijkstra((node_count, edges, destinations) in graph_strategy()) {
        let graph = build_graph(node_count, &edges);
        let weighting = DistanceWeighting;
        let mut one_to_many = DijkstraOneToMany::new(&graph, &weighting);

        for destination in destinations {
            let mut dijkstra = Dijkstra::new(&graph, &weighting);

            match (
                one_to_many.calc_path(0, destination),
                dijkstra.calc_path(0, destination),
            ) {
                (Ok(reused), Ok(fresh)) => {
                    prop_assert_eq!(reused.weight(), fresh.weight());
                    prop_assert_eq!(reused.distance(), fresh.distance());
                    prop_assert_eq!(reused.from(), 0);
                    prop_assert_eq!(reused.to(), destination);
                }
                (Err(reused), Err(fresh)) => {
                    prop_assert_eq!(&reused, &fresh);
                    let is_no_path_found = matches!(reused, RoutingError::NoPathFound { .. });
                    prop_assert!(is_no_path_found);
                }
                (reused, fresh) => {
                    prop_assert!(false, "one-to-many {:?} but dijkstra {:?}", reused, fresh);
                }
            }
        }
    }

    #[test]
    fn settled_weights_grow_along_a_path((node_count, edges, destinations) in graph_strategy()) {
        let graph = build_graph(node_count, &edges);
        let weighting = DistanceWeighting;
        let mut one_to_many = DijkstraOneToMany::new(&graph, &weighting);

        for destination in destinations {
            let Ok(path) = one_to_many.calc_path(0, destination) else {
                continue;
            };

            let weights: Vec<f64> = path
                .nodes()
                .iter()
                .filter_map(|node| one_to_many.settled_weight(*node))
                .collect();

            prop_assert_eq!(weights.len(), path.nodes().len());
            prop_assert!(weights.windows(2).all(|pair| pair[0] <= pair[1]));
            prop_assert_eq!(weights.last().copied(), Some(path.weight()));
        }
    }

    #[test]
    fn repeated_destination_settles_nothing_new((node_count, edges, destinations) in graph_strategy()) {
        let graph = build_graph(node_count, &edges);
        let weighting = DistanceWeighting;
        let mut one_to_many = DijkstraOneToMany::new(&graph, &weighting);

        for destination in destinations {
            let first = one_to_many.calc_path(0, destination).map(|path| path.weight());
            let visited_nodes = one_to_many.visited_nodes();

            let second = one_to_many.calc_path(0, destination).map(|path| path.weight());

            prop_assert_eq!(first, second);
            prop_assert_eq!(one_to_many.visited_nodes(), visited_nodes);
            prop_assert!(visited_nodes <= node_count);
        }
    }
}
