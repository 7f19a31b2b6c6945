pub mod algorithm_factory;
pub mod destination_reuse;
pub mod dijkstra;
pub mod frontier;
pub mod routing_path;
pub mod routing_path_builder;
pub mod routing_request;
pub mod search_session;
pub mod settled_cache;
pub mod shortest_path_algorithm;
pub mod spt_entry;
