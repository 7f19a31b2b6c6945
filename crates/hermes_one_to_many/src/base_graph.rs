use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{
    distance::Meters,
    error::ImportError,
    geopoint::GeoPoint,
    graph::Graph,
    graph_edge::{EdgeProperties, GraphEdge},
    types::{EdgeId, NodeId},
};

/// Road network loaded in memory, with an adjacency list per node.
///
/// Every edge can be traversed in both directions as far as the graph is concerned; whether a
/// direction is actually allowed is decided by the weighting from the edge properties.
#[derive(Default)]
pub struct BaseGraph {
    nodes: Vec<GeoPoint>,
    edges: Vec<GraphEdge>,
    geometry: Vec<Vec<GeoPoint>>,
    adjacency_list: Vec<Vec<EdgeId>>,
}

#[derive(Deserialize)]
struct GraphFile {
    nodes: Vec<GeoPoint>,
    edges: Vec<GraphFileEdge>,
}

#[derive(Deserialize)]
struct GraphFileEdge {
    start: NodeId,
    end: NodeId,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    properties: EdgeProperties,
    /// Intermediate points between the start and end nodes
    #[serde(default)]
    geometry: Vec<GeoPoint>,
}

impl BaseGraph {
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        BaseGraph {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            geometry: Vec::with_capacity(edges),
            adjacency_list: Vec::with_capacity(nodes),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BaseGraph, ImportError> {
        let path = path.as_ref();
        info!("Reading graph from {}", path.display());

        let file = File::open(path).map_err(ImportError::ReadGraph)?;
        let graph_file: GraphFile =
            serde_json::from_reader(BufReader::new(file)).map_err(ImportError::ParseGraph)?;

        let graph = Self::from_graph_file(graph_file)?;
        info!(
            "Loaded graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    pub fn from_json_str(json: &str) -> Result<BaseGraph, ImportError> {
        let graph_file: GraphFile = serde_json::from_str(json).map_err(ImportError::ParseGraph)?;
        Self::from_graph_file(graph_file)
    }

    fn from_graph_file(graph_file: GraphFile) -> Result<BaseGraph, ImportError> {
        let mut graph = BaseGraph::with_capacity(graph_file.nodes.len(), graph_file.edges.len());

        for node in graph_file.nodes {
            graph.add_node(node);
        }

        for (index, edge) in graph_file.edges.into_iter().enumerate() {
            for node in [edge.start, edge.end] {
                if node >= graph.node_count() {
                    return Err(ImportError::UnknownNode { edge: index, node });
                }
            }

            graph.add_edge_with_geometry(
                edge.start,
                edge.end,
                edge.distance.map(Meters::new),
                edge.properties,
                edge.geometry,
            );
        }

        Ok(graph)
    }

    pub fn add_node(&mut self, coordinates: GeoPoint) -> NodeId {
        let node_id = self.nodes.len();
        self.nodes.push(coordinates);
        self.adjacency_list.push(vec![]);
        node_id
    }

    /// Adds a straight edge between two nodes, its distance is computed from the coordinates
    /// unless given.
    pub fn add_edge(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        distance: Option<Meters>,
        properties: EdgeProperties,
    ) -> EdgeId {
        self.add_edge_with_geometry(start_node, end_node, distance, properties, vec![])
    }

    pub fn add_edge_with_geometry(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        distance: Option<Meters>,
        properties: EdgeProperties,
        pillars: Vec<GeoPoint>,
    ) -> EdgeId {
        let mut geometry = Vec::with_capacity(pillars.len() + 2);
        geometry.push(self.nodes[start_node]);
        geometry.extend(pillars);
        geometry.push(self.nodes[end_node]);

        let distance = distance.unwrap_or_else(|| compute_geometry_distance(&geometry));

        let edge_id = self.edges.len();
        self.edges.push(GraphEdge::new(
            edge_id,
            start_node,
            end_node,
            distance,
            properties,
        ));
        self.geometry.push(geometry);

        self.adjacency_list[start_node].push(edge_id);
        if end_node != start_node {
            self.adjacency_list[end_node].push(edge_id);
        }

        edge_id
    }

    pub fn node_edges(&self, node_id: NodeId) -> &[EdgeId] {
        &self.adjacency_list[node_id]
    }
}

impl Graph for BaseGraph {
    type EdgeIterator<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_edges_iter(&self, node_id: NodeId) -> Self::EdgeIterator<'_> {
        self.adjacency_list[node_id].iter().copied()
    }

    fn edge(&self, edge_id: EdgeId) -> &GraphEdge {
        &self.edges[edge_id]
    }

    fn edge_geometry(&self, edge_id: EdgeId) -> &[GeoPoint] {
        &self.geometry[edge_id]
    }

    fn node_geometry(&self, node_id: NodeId) -> &GeoPoint {
        &self.nodes[node_id]
    }
}

pub fn compute_geometry_distance(geometry: &[GeoPoint]) -> Meters {
    geometry
        .windows(2)
        .map(|pair| pair[0].haversine_distance(&pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_direction::EdgeDirection;
    use crate::meters;

    const GRAPH_JSON: &str = r#"{
        "nodes": [
            { "lat": 50.0, "lng": 4.0 },
            { "lat": 50.0, "lng": 4.01 },
            { "lat": 50.01, "lng": 4.01 }
        ],
        "edges": [
            { "start": 0, "end": 1, "distance": 715.0 },
            {
                "start": 1,
                "end": 2,
                "properties": {
                    "forward": { "access": true, "average_speed": 30.0 },
                    "backward": { "access": false, "average_speed": 0.0 }
                },
                "geometry": [{ "lat": 50.005, "lng": 4.011 }]
            }
        ]
    }"#;

    #[test]
    fn parses_graph_from_json() {
        let graph = BaseGraph::from_json_str(GRAPH_JSON).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge(0).distance(), meters!(715));
        assert_eq!(graph.edge_geometry(1).len(), 3);
        assert_eq!(graph.node_edges(1), &[0, 1]);
        assert!(!graph.edge(1).properties().get(EdgeDirection::Backward).access);
    }

    #[test]
    fn computes_missing_distance_from_geometry() {
        let graph = BaseGraph::from_json_str(GRAPH_JSON).unwrap();
        let distance = graph.edge(1).distance().value();

        // ~1.11km north with a small detour through the pillar node
        assert!(distance > 1100.0 && distance < 1200.0, "distance {}", distance);
    }

    #[test]
    fn rejects_edges_to_unknown_nodes() {
        let result = BaseGraph::from_json_str(
            r#"{ "nodes": [{ "lat": 0.0, "lng": 0.0 }], "edges": [{ "start": 0, "end": 4 }] }"#,
        );

        assert!(matches!(
            result,
            Err(ImportError::UnknownNode { edge: 0, node: 4 })
        ));
    }

    #[test]
    fn edge_direction_depends_on_start_node() {
        let graph = BaseGraph::from_json_str(GRAPH_JSON).unwrap();
        assert_eq!(graph.edge_direction(0, 0), EdgeDirection::Forward);
        assert_eq!(graph.edge_direction(0, 1), EdgeDirection::Backward);
    }
}
