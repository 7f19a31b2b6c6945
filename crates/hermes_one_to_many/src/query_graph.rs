use std::{cell::RefCell, collections::BTreeMap, collections::BTreeSet};

use fxhash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{
    base_graph::{BaseGraph, compute_geometry_distance},
    constants::HEADING_TOLERANCE_DEGREES,
    distance::Meters,
    geopoint::{GeoPoint, heading_delta},
    graph::Graph,
    graph_edge::GraphEdge,
    query_graph_edge_iterator::QueryGraphEdgeIterator,
    snap::{Snap, SnappedPosition},
    types::{EdgeId, NodeId},
};

/// A base graph extended with the virtual nodes and edges of a request's snaps.
///
/// A snap located inside an edge A ---- S ---- B splits the edge in A -- S and S -- B. Several
/// snaps on the same edge are chained in their order along the edge, and the split base edge is
/// no longer reachable through the query graph. Virtual edges keep the orientation of the base
/// edge they come from, so their directional properties are unchanged.
///
/// Edges can be marked as unfavored to honour headings. The marking goes through a shared
/// reference so that it can happen while a search borrows the graph.
pub struct QueryGraph<'a> {
    base_graph: &'a BaseGraph,

    virtual_node_geometry: Vec<GeoPoint>,
    virtual_edges: Vec<GraphEdge>,
    virtual_edge_geometry: Vec<Vec<GeoPoint>>,

    virtual_adjacency_list: Vec<Vec<EdgeId>>,
    virtual_adjacency_list_existing_nodes: FxHashMap<NodeId, Vec<EdgeId>>,
    hidden_edges: FxHashSet<EdgeId>,

    unfavored_edges: RefCell<BTreeSet<EdgeId>>,
}

impl<'a> QueryGraph<'a> {
    /// Builds the query graph and points every snap to the node it was resolved to
    pub fn from_base_graph(base_graph: &'a BaseGraph, snaps: &mut [Snap]) -> Self {
        let mut query_graph = QueryGraph {
            base_graph,
            virtual_node_geometry: Vec::new(),
            virtual_edges: Vec::new(),
            virtual_edge_geometry: Vec::new(),
            virtual_adjacency_list: Vec::new(),
            virtual_adjacency_list_existing_nodes: FxHashMap::default(),
            hidden_edges: FxHashSet::default(),
            unfavored_edges: RefCell::new(BTreeSet::new()),
        };

        let mut snaps_per_edge: BTreeMap<EdgeId, Vec<usize>> = BTreeMap::new();
        for (index, snap) in snaps.iter().enumerate() {
            if snap.is_valid() && matches!(snap.position(), SnappedPosition::Edge { .. }) {
                snaps_per_edge.entry(snap.edge_id).or_default().push(index);
            }
        }

        for (edge_id, snap_indices) in snaps_per_edge {
            query_graph.split_edge(edge_id, snap_indices, snaps);
        }

        debug!(
            virtual_nodes = query_graph.virtual_node_geometry.len(),
            virtual_edges = query_graph.virtual_edges.len(),
            "Created query graph"
        );

        query_graph
    }

    fn split_edge(&mut self, edge_id: EdgeId, mut snap_indices: Vec<usize>, snaps: &mut [Snap]) {
        let base_graph = self.base_graph;
        let edge = base_graph.edge(edge_id);
        let geometry = base_graph.edge_geometry(edge_id);

        let position_along_edge = |snap: &Snap| {
            let segment_index = match snap.position() {
                SnappedPosition::Edge { segment_index } => segment_index,
                SnappedPosition::Tower => 0,
            };
            let offset = geometry[segment_index]
                .haversine_distance(&snap.coordinates)
                .value();
            (segment_index, offset)
        };

        snap_indices.sort_by(|a, b| {
            let (segment_a, offset_a) = position_along_edge(&snaps[*a]);
            let (segment_b, offset_b) = position_along_edge(&snaps[*b]);
            segment_a
                .cmp(&segment_b)
                .then(offset_a.total_cmp(&offset_b))
        });

        let geometry_distance = compute_geometry_distance(geometry).value();
        let distance_ratio = if geometry_distance > 0.0 {
            edge.distance().value() / geometry_distance
        } else {
            0.0
        };

        let start_node = edge.start_node();
        let end_node = edge.end_node();
        let properties = *edge.properties();

        let mut previous_node = start_node;
        let mut previous_coordinates: Option<GeoPoint> = None;
        let mut current_geometry = vec![geometry[0]];
        let mut next_point = 1;
        let mut pieces: Vec<(NodeId, NodeId, Vec<GeoPoint>)> = Vec::new();

        for index in snap_indices {
            let coordinates = snaps[index].coordinates;
            let (segment_index, _) = position_along_edge(&snaps[index]);

            if previous_coordinates == Some(coordinates) {
                snaps[index].set_closest_node(previous_node);
                continue;
            }

            while next_point <= segment_index {
                push_distinct(&mut current_geometry, geometry[next_point]);
                next_point += 1;
            }
            push_distinct(&mut current_geometry, coordinates);

            let virtual_node = self.add_virtual_node(coordinates);
            pieces.push((
                previous_node,
                virtual_node,
                std::mem::replace(&mut current_geometry, vec![coordinates]),
            ));

            snaps[index].set_closest_node(virtual_node);
            previous_node = virtual_node;
            previous_coordinates = Some(coordinates);
        }

        for point in &geometry[next_point..] {
            push_distinct(&mut current_geometry, *point);
        }
        pieces.push((previous_node, end_node, current_geometry));

        for (start, end, piece_geometry) in pieces {
            let distance =
                Meters::new(compute_geometry_distance(&piece_geometry).value() * distance_ratio);
            let virtual_edge_id = self.edge_count();

            self.virtual_edges.push(GraphEdge::new(
                virtual_edge_id,
                start,
                end,
                distance,
                properties,
            ));
            self.virtual_edge_geometry.push(piece_geometry);

            self.connect_edge(virtual_edge_id, start);
            if end != start {
                self.connect_edge(virtual_edge_id, end);
            }

            trace!(virtual_edge_id, base_edge_id = edge_id, "Added virtual edge");
        }

        self.hidden_edges.insert(edge_id);
    }

    fn add_virtual_node(&mut self, coordinates: GeoPoint) -> NodeId {
        let node_id = self.node_count();
        self.virtual_node_geometry.push(coordinates);
        self.virtual_adjacency_list.push(Vec::new());
        node_id
    }

    fn connect_edge(&mut self, edge_id: EdgeId, node_id: NodeId) {
        if self.is_virtual_node(node_id) {
            let virtual_node_id = self.virtual_node_id(node_id);
            self.virtual_adjacency_list[virtual_node_id].push(edge_id);
        } else {
            self.virtual_adjacency_list_existing_nodes
                .entry(node_id)
                .or_default()
                .push(edge_id);
        }
    }

    fn is_virtual_edge(&self, edge_id: EdgeId) -> bool {
        edge_id >= self.base_graph.edge_count()
    }

    // Assumes node_id is a virtual node
    fn virtual_node_id(&self, node_id: NodeId) -> usize {
        node_id - self.base_graph.node_count()
    }

    // Assumes edge_id is a virtual edge
    fn virtual_edge_id(&self, edge_id: EdgeId) -> usize {
        edge_id - self.base_graph.edge_count()
    }

    pub fn virtual_node_count(&self) -> usize {
        self.virtual_node_geometry.len()
    }

    pub fn unfavor_edge(&self, edge_id: EdgeId) {
        self.unfavored_edges.borrow_mut().insert(edge_id);
    }

    /// Marks the edges of `node_id` that do not match `heading` as unfavored.
    ///
    /// With `incoming` the heading is the direction in which the node is reached, otherwise the
    /// direction in which it is left. Returns the number of newly unfavored edges.
    pub fn enforce_heading(&self, node_id: NodeId, heading: f64, incoming: bool) -> usize {
        if !heading.is_finite() {
            return 0;
        }

        let mut unfavored = 0;

        for edge_id in self.node_edges_iter(node_id) {
            let Some(bearing) = self.edge_bearing(edge_id, node_id, incoming) else {
                continue;
            };

            if heading_delta(bearing, heading) > HEADING_TOLERANCE_DEGREES
                && self.unfavored_edges.borrow_mut().insert(edge_id)
            {
                unfavored += 1;
            }
        }

        trace!(node_id, heading, incoming, unfavored, "Enforced heading");
        unfavored
    }

    /// Bearing of travel on `edge_id`, when leaving `node_id` or when arriving at it
    fn edge_bearing(&self, edge_id: EdgeId, node_id: NodeId, incoming: bool) -> Option<f64> {
        let edge = self.edge(edge_id);
        let geometry = self.edge_geometry(edge_id);

        if geometry.len() < 2 {
            return None;
        }

        let last = geometry.len() - 1;
        let (from, to) = match (incoming, edge.start_node() == node_id) {
            (false, true) => (geometry[0], geometry[1]),
            (false, false) => (geometry[last], geometry[last - 1]),
            (true, false) => (geometry[last - 1], geometry[last]),
            (true, true) => (geometry[1], geometry[0]),
        };

        if from == to {
            return None;
        }

        Some(from.bearing_to(&to))
    }

    pub fn clear_unfavored_status(&self) {
        self.unfavored_edges.borrow_mut().clear();
    }

    pub fn unfavored_edges(&self) -> Vec<EdgeId> {
        self.unfavored_edges.borrow().iter().copied().collect()
    }
}

fn push_distinct(geometry: &mut Vec<GeoPoint>, point: GeoPoint) {
    if geometry.last() != Some(&point) {
        geometry.push(point);
    }
}

impl Graph for QueryGraph<'_> {
    type EdgeIterator<'b>
        = QueryGraphEdgeIterator<'b>
    where
        Self: 'b;

    fn node_count(&self) -> usize {
        self.base_graph.node_count() + self.virtual_node_geometry.len()
    }

    fn edge_count(&self) -> usize {
        self.base_graph.edge_count() + self.virtual_edges.len()
    }

    fn node_edges_iter(&self, node_id: NodeId) -> Self::EdgeIterator<'_> {
        if self.is_virtual_node(node_id) {
            return QueryGraphEdgeIterator::new(
                &[],
                &self.virtual_adjacency_list[self.virtual_node_id(node_id)],
                &self.hidden_edges,
            );
        }

        let virtual_edges = match self.virtual_adjacency_list_existing_nodes.get(&node_id) {
            Some(edges) => edges.as_slice(),
            None => &[],
        };

        QueryGraphEdgeIterator::new(
            self.base_graph.node_edges(node_id),
            virtual_edges,
            &self.hidden_edges,
        )
    }

    fn edge(&self, edge_id: EdgeId) -> &GraphEdge {
        if self.is_virtual_edge(edge_id) {
            &self.virtual_edges[self.virtual_edge_id(edge_id)]
        } else {
            self.base_graph.edge(edge_id)
        }
    }

    fn edge_geometry(&self, edge_id: EdgeId) -> &[GeoPoint] {
        if self.is_virtual_edge(edge_id) {
            &self.virtual_edge_geometry[self.virtual_edge_id(edge_id)]
        } else {
            self.base_graph.edge_geometry(edge_id)
        }
    }

    fn node_geometry(&self, node_id: NodeId) -> &GeoPoint {
        if self.is_virtual_node(node_id) {
            &self.virtual_node_geometry[self.virtual_node_id(node_id)]
        } else {
            self.base_graph.node_geometry(node_id)
        }
    }

    fn is_virtual_node(&self, node_id: NodeId) -> bool {
        node_id >= self.base_graph.node_count()
    }

    fn is_unfavored_edge(&self, edge_id: EdgeId) -> bool {
        self.unfavored_edges.borrow().contains(&edge_id)
    }

    fn unfavored_fingerprint(&self) -> u64 {
        let unfavored_edges = self.unfavored_edges.borrow();
        if unfavored_edges.is_empty() {
            0
        } else {
            fxhash::hash64(&*unfavored_edges)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph_edge::EdgeProperties, meters};

    // A(50.0, 4.0) ---- B(50.0, 4.02), 1000m
    fn graph() -> BaseGraph {
        let mut graph = BaseGraph::default();
        let a = graph.add_node(GeoPoint::new(50.0, 4.0));
        let b = graph.add_node(GeoPoint::new(50.0, 4.02));
        graph.add_edge(a, b, Some(meters!(1000)), EdgeProperties::oneway(50.0));
        graph
    }

    fn edge_snap(lng: f64) -> Snap {
        let coordinates = GeoPoint::new(50.0, lng);
        Snap::new(
            coordinates,
            0,
            coordinates,
            Meters::ZERO,
            SnappedPosition::Edge { segment_index: 0 },
            0,
        )
    }

    #[test]
    fn splits_edge_at_snap() {
        let base_graph = graph();
        let mut snaps = vec![edge_snap(4.005)];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);

        assert_eq!(query_graph.node_count(), 3);
        assert_eq!(query_graph.edge_count(), 3);
        assert_eq!(snaps[0].closest_node(), 2);
        assert!(query_graph.is_virtual_node(2));

        // Base edge 0 is replaced by the virtual edge 1 at node A
        assert_eq!(query_graph.node_edges_iter(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(query_graph.node_edges_iter(2).collect::<Vec<_>>(), vec![1, 2]);

        let first = query_graph.edge(1);
        let second = query_graph.edge(2);
        assert_eq!((first.start_node(), first.end_node()), (0, 2));
        assert_eq!((second.start_node(), second.end_node()), (2, 1));
        assert!((first.distance().value() - 250.0).abs() < 1.0);
        assert!((first.distance().value() + second.distance().value() - 1000.0).abs() < 1e-6);

        // Oneway properties are kept along the base orientation
        assert_eq!(second.properties(), base_graph.edge(0).properties());
    }

    #[test]
    fn chains_snaps_on_the_same_edge_in_order() {
        let base_graph = graph();
        let mut snaps = vec![edge_snap(4.015), edge_snap(4.005)];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);

        assert_eq!(query_graph.node_count(), 4);
        // The snap closest to A is split first
        assert_eq!(snaps[1].closest_node(), 2);
        assert_eq!(snaps[0].closest_node(), 3);

        let middle = query_graph.edge(2);
        assert_eq!((middle.start_node(), middle.end_node()), (2, 3));
        assert!((middle.distance().value() - 500.0).abs() < 1.0);
    }

    #[test]
    fn identical_snaps_share_a_virtual_node() {
        let base_graph = graph();
        let mut snaps = vec![edge_snap(4.005), edge_snap(4.005)];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);

        assert_eq!(query_graph.virtual_node_count(), 1);
        assert_eq!(snaps[0].closest_node(), snaps[1].closest_node());
    }

    #[test]
    fn headings_unfavor_edges_going_the_other_way() {
        let base_graph = graph();
        let mut snaps = vec![edge_snap(4.005)];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);
        let node = snaps[0].closest_node();

        assert_eq!(query_graph.unfavored_fingerprint(), 0);

        // Leaving towards the east, edge 1 goes west from the virtual node
        assert_eq!(query_graph.enforce_heading(node, 90.0, false), 1);
        assert!(query_graph.is_unfavored_edge(1));
        assert!(!query_graph.is_unfavored_edge(2));
        assert_ne!(query_graph.unfavored_fingerprint(), 0);

        query_graph.clear_unfavored_status();
        assert!(query_graph.unfavored_edges().is_empty());
        assert_eq!(query_graph.unfavored_fingerprint(), 0);

        // Arriving from the west, edge 2 can only arrive from the east
        assert_eq!(query_graph.enforce_heading(node, 90.0, true), 1);
        assert!(query_graph.is_unfavored_edge(2));
    }

    #[test]
    fn fingerprint_follows_the_unfavored_set() {
        let base_graph = graph();
        let mut snaps = vec![edge_snap(4.005)];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);

        query_graph.unfavor_edge(1);
        let first = query_graph.unfavored_fingerprint();
        query_graph.unfavor_edge(1);
        assert_eq!(query_graph.unfavored_fingerprint(), first);

        query_graph.unfavor_edge(2);
        assert_ne!(query_graph.unfavored_fingerprint(), first);
        assert_eq!(query_graph.unfavored_edges(), vec![1, 2]);
    }

    #[test]
    fn tower_snaps_do_not_create_virtual_nodes() {
        let base_graph = graph();
        let coordinates = GeoPoint::new(50.0, 4.0);
        let mut snaps = vec![Snap::new(
            coordinates,
            0,
            coordinates,
            Meters::ZERO,
            SnappedPosition::Tower,
            0,
        )];
        let query_graph = QueryGraph::from_base_graph(&base_graph, &mut snaps);

        assert_eq!(query_graph.virtual_node_count(), 0);
        assert_eq!(snaps[0].closest_node(), 0);
    }
}
