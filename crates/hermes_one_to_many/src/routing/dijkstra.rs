use tracing::{debug, trace};

use super::{
    destination_reuse::{DestinationReuse, SettledReuse, StatelessReuse},
    routing_path::RoutingPath,
    routing_path_builder::build_routing_path,
    search_session::SearchSession,
    shortest_path_algorithm::ShortestPathAlgorithm,
    spt_entry::EntryIndex,
};
use crate::{
    constants::{DEFAULT_HEADING_PENALTY, DEFAULT_MAX_VISITED_NODES},
    edge_filter::{AccessEdgeFilter, EdgeFilter},
    error::{InvariantViolation, RoutingError},
    graph::Graph,
    types::NodeId,
    weighting::{Weight, Weighting},
};

/// Single-source Dijkstra over a graph, weighting and edge filter bound at construction.
///
/// The reuse policy decides whether consecutive calls with the same origin resume the same
/// search. When they do, a destination that is already settled is answered without searching,
/// and any other destination continues from the current frontier.
pub struct DijkstraSearch<'a, G: Graph, R: DestinationReuse> {
    graph: &'a G,
    weighting: &'a dyn Weighting,
    edge_filter: Box<dyn EdgeFilter + 'a>,
    max_visited_nodes: usize,
    heading_penalty: Weight,

    session: SearchSession,
    reuse: R,
    visited_nodes: usize,
}

/// Searches every destination from scratch
pub type Dijkstra<'a, G> = DijkstraSearch<'a, G, StatelessReuse>;

/// Keeps the shortest path tree of an origin across destinations
pub type DijkstraOneToMany<'a, G> = DijkstraSearch<'a, G, SettledReuse>;

impl<'a, G: Graph> Dijkstra<'a, G> {
    pub fn new(graph: &'a G, weighting: &'a dyn Weighting) -> Self {
        DijkstraSearch::with_reuse(graph, weighting, StatelessReuse)
    }
}

impl<'a, G: Graph> DijkstraOneToMany<'a, G> {
    pub fn new(graph: &'a G, weighting: &'a dyn Weighting) -> Self {
        DijkstraSearch::with_reuse(graph, weighting, SettledReuse)
    }
}

impl<'a, G: Graph, R: DestinationReuse> DijkstraSearch<'a, G, R> {
    /// Uses an [`AccessEdgeFilter`] for `weighting` until another filter is set
    pub fn with_reuse(graph: &'a G, weighting: &'a dyn Weighting, reuse: R) -> Self {
        DijkstraSearch {
            graph,
            weighting,
            edge_filter: Box::new(AccessEdgeFilter::new(weighting)),
            max_visited_nodes: DEFAULT_MAX_VISITED_NODES,
            heading_penalty: DEFAULT_HEADING_PENALTY,
            session: SearchSession::default(),
            reuse,
            visited_nodes: 0,
        }
    }

    pub fn with_edge_filter(mut self, edge_filter: Box<dyn EdgeFilter + 'a>) -> Self {
        self.edge_filter = edge_filter;
        self
    }

    pub fn with_max_visited_nodes(mut self, max_visited_nodes: usize) -> Self {
        self.max_visited_nodes = max_visited_nodes;
        self
    }

    pub fn with_heading_penalty(mut self, heading_penalty: Weight) -> Self {
        self.heading_penalty = heading_penalty;
        self
    }

    /// Weight of the shortest path from the current origin to `node`, if it is settled
    pub fn settled_weight(&self, node: NodeId) -> Option<Weight> {
        self.session
            .settled_entry(node)
            .map(|index| self.session.entry(index).weight)
    }

    fn validate_node(&self, node: NodeId, name: &str) -> Result<(), RoutingError> {
        if node >= self.graph.node_count() {
            return Err(RoutingError::InvalidArgument(format!(
                "{} node {} does not exist, graph has {} nodes",
                name,
                node,
                self.graph.node_count()
            )));
        }

        Ok(())
    }

    fn prepare_session(&mut self, origin: NodeId) {
        let fingerprint = self.graph.unfavored_fingerprint();

        if !self.reuse.reuses_settled_state() || !self.session.is_valid_for(origin, fingerprint) {
            trace!(origin, fingerprint, "Starting new search session");
            self.session.reset(origin, fingerprint);
        }
    }

    /// Relaxes the edges of a settled entry
    fn expand(&mut self, index: EntryIndex) -> Result<(), RoutingError> {
        let graph = self.graph;
        let entry = *self.session.entry(index);
        let node = entry.adj_node;

        for edge_id in graph.node_edges_iter(node) {
            if edge_id == entry.edge_id {
                continue;
            }

            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node);

            if self.session.is_settled(adj_node) {
                continue;
            }

            let direction = graph.edge_direction(edge_id, node);
            if !self.edge_filter.accept(edge, direction) {
                continue;
            }

            let mut weight = self.weighting.calc_edge_weight(edge, direction);

            if weight.is_nan() {
                return Err(InvariantViolation::UndefinedEdgeWeight { edge_id }.into());
            }

            if weight < 0.0 {
                return Err(InvariantViolation::NegativeEdgeWeight { edge_id, weight }.into());
            }

            if weight.is_infinite() {
                continue;
            }

            if graph.is_unfavored_edge(edge_id) {
                weight += self.heading_penalty;
            }

            self.session
                .offer(adj_node, edge_id, entry.weight + weight, index);
        }

        Ok(())
    }

    fn extract_path(&self, index: EntryIndex) -> Result<RoutingPath, RoutingError> {
        let path = build_routing_path(self.graph, self.weighting, self.session.entries(), index);

        if path.time() < 0 {
            return Err(InvariantViolation::NegativePathTime {
                time: path.time(),
                index: 0,
            }
            .into());
        }

        Ok(path)
    }
}

impl<G: Graph, R: DestinationReuse> ShortestPathAlgorithm for DijkstraSearch<'_, G, R> {
    fn calc_path(
        &mut self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<RoutingPath, RoutingError> {
        self.validate_node(origin, "Origin")?;
        self.validate_node(destination, "Destination")?;

        self.prepare_session(origin);

        if let Some(index) = self.session.settled_entry(destination) {
            trace!(origin, destination, "Destination already settled");
            return self.extract_path(index);
        }

        loop {
            if let Some(pending) = self.session.take_pending() {
                self.expand(pending)?;
            }

            let Some(index) = self.session.settle_next() else {
                debug!(
                    origin,
                    destination,
                    settled = self.session.settled_count(),
                    "Frontier exhausted"
                );
                return Err(RoutingError::NoPathFound {
                    from: origin,
                    to: destination,
                });
            };

            self.visited_nodes += 1;

            // The budget applies to the current search, not to earlier origins
            if self.session.settled_count() > self.max_visited_nodes {
                return Err(RoutingError::BudgetExceeded {
                    max_visited_nodes: self.max_visited_nodes,
                });
            }

            if self.session.entry(index).adj_node == destination {
                return self.extract_path(index);
            }
        }
    }

    fn visited_nodes(&self) -> usize {
        self.visited_nodes
    }

    fn name(&self) -> &str {
        self.reuse.name()
    }
}
