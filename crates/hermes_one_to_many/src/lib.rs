pub mod base_graph;
pub mod config;
pub(crate) mod constants;
pub mod distance;
pub mod edge_direction;
pub mod edge_filter;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod graph_edge;
pub mod hermes;
pub mod location_index;
pub mod query_graph;
mod query_graph_edge_iterator;
pub mod routing;
pub mod snap;
pub mod snap_cache;
pub mod stopwatch;
pub mod template;
pub mod types;
pub mod weighting;

mod test_graph_utils;
