use serde::{Deserialize, Serialize};

use super::{
    dijkstra::{Dijkstra, DijkstraOneToMany},
    shortest_path_algorithm::ShortestPathAlgorithm,
};
use crate::{
    constants::{DEFAULT_HEADING_PENALTY, DEFAULT_MAX_VISITED_NODES},
    edge_filter::AccessEdgeFilter,
    graph::Graph,
    weighting::{Weight, Weighting},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAlgorithm {
    Dijkstra,
    #[default]
    DijkstraOneToMany,
}

impl RoutingAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            RoutingAlgorithm::Dijkstra => "dijkstra",
            RoutingAlgorithm::DijkstraOneToMany => "dijkstra_one_to_many",
        }
    }
}

pub struct AlgorithmOptions<'a> {
    pub algorithm: RoutingAlgorithm,
    pub weighting: &'a dyn Weighting,
    pub max_visited_nodes: usize,
    pub heading_penalty: Weight,
}

impl<'a> AlgorithmOptions<'a> {
    pub fn new(algorithm: RoutingAlgorithm, weighting: &'a dyn Weighting) -> Self {
        AlgorithmOptions {
            algorithm,
            weighting,
            max_visited_nodes: DEFAULT_MAX_VISITED_NODES,
            heading_penalty: DEFAULT_HEADING_PENALTY,
        }
    }

    pub fn with_max_visited_nodes(mut self, max_visited_nodes: usize) -> Self {
        self.max_visited_nodes = max_visited_nodes;
        self
    }

    pub fn with_heading_penalty(mut self, heading_penalty: Weight) -> Self {
        self.heading_penalty = heading_penalty;
        self
    }
}

pub trait AlgorithmFactory {
    fn create_algo<'a, G: Graph + 'a>(
        &self,
        graph: &'a G,
        options: &AlgorithmOptions<'a>,
    ) -> Box<dyn ShortestPathAlgorithm + 'a>;
}

/// Creates the requested Dijkstra variant, only following edges the weighting can access
pub struct DefaultAlgorithmFactory;

impl AlgorithmFactory for DefaultAlgorithmFactory {
    fn create_algo<'a, G: Graph + 'a>(
        &self,
        graph: &'a G,
        options: &AlgorithmOptions<'a>,
    ) -> Box<dyn ShortestPathAlgorithm + 'a> {
        let edge_filter = Box::new(AccessEdgeFilter::new(options.weighting));

        match options.algorithm {
            RoutingAlgorithm::Dijkstra => Box::new(
                Dijkstra::new(graph, options.weighting)
                    .with_edge_filter(edge_filter)
                    .with_max_visited_nodes(options.max_visited_nodes)
                    .with_heading_penalty(options.heading_penalty),
            ),
            RoutingAlgorithm::DijkstraOneToMany => Box::new(
                DijkstraOneToMany::new(graph, options.weighting)
                    .with_edge_filter(edge_filter)
                    .with_max_visited_nodes(options.max_visited_nodes)
                    .with_heading_penalty(options.heading_penalty),
            ),
        }
    }
}
