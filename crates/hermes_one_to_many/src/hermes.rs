use std::path::Path;

use fxhash::FxHashMap;
use tracing::{debug, info};

use crate::{
    base_graph::BaseGraph,
    config::RoutingConfig,
    edge_filter::AccessEdgeFilter,
    error::{ImportError, InvariantViolation, RoutingError},
    geopoint::GeoPoint,
    location_index::LocationIndex,
    query_graph::QueryGraph,
    routing::{
        algorithm_factory::{AlgorithmOptions, DefaultAlgorithmFactory},
        routing_request::OneToManyRequest,
    },
    snap::Snap,
    snap_cache::SnapCache,
    stopwatch::Stopwatch,
    template::{
        one_to_many::OneToManyRoutingTemplate, path_merger::DefaultPathMerger,
        routing_response::RoutingResponse, routing_template::RoutingTemplate,
    },
    weighting::{CarWeighting, ShortestWeighting, Weighting},
};

/// Entry point for routing requests: owns the graph, its spatial index, the routing profiles
/// and the snap cache shared by all requests.
pub struct Hermes {
    graph: BaseGraph,
    index: LocationIndex,
    profiles: FxHashMap<String, Box<dyn Weighting + Send + Sync>>,
    snap_cache: SnapCache,
    config: RoutingConfig,
}

impl Hermes {
    pub fn new(graph: BaseGraph, config: RoutingConfig) -> Hermes {
        let index = LocationIndex::build(&graph).with_max_snap_distance(config.max_snap_distance);

        let mut profiles: FxHashMap<String, Box<dyn Weighting + Send + Sync>> =
            FxHashMap::default();
        profiles.insert(String::from("car"), Box::new(CarWeighting::new()));
        profiles.insert(String::from("shortest"), Box::new(ShortestWeighting::new()));

        Hermes {
            graph,
            index,
            profiles,
            snap_cache: SnapCache::new(config.snap_cache_capacity),
            config,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P, config: RoutingConfig) -> Result<Hermes, ImportError> {
        let graph = BaseGraph::from_file(path)?;
        Ok(Hermes::new(graph, config))
    }

    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn snap_cache(&self) -> &SnapCache {
        &self.snap_cache
    }

    pub fn add_profile(
        &mut self,
        name: impl Into<String>,
        weighting: Box<dyn Weighting + Send + Sync>,
    ) {
        self.profiles.insert(name.into(), weighting);
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Swaps the graph, snaps computed on the previous one are dropped
    pub fn replace_graph(&mut self, graph: BaseGraph) {
        self.index =
            LocationIndex::build(&graph).with_max_snap_distance(self.config.max_snap_distance);
        self.graph = graph;
        self.snap_cache.invalidate_all();
        info!("Replaced graph, snap cache invalidated");
    }

    fn weighting(&self, profile: &str) -> Result<&dyn Weighting, RoutingError> {
        match self.profiles.get(profile) {
            Some(weighting) => {
                let weighting: &dyn Weighting = &**weighting;
                Ok(weighting)
            }
            None => Err(RoutingError::InvalidArgument(format!(
                "No profile found for {}",
                profile
            ))),
        }
    }

    /// Closest accessible location for a profile, bypassing the snap cache
    pub fn snap(&self, profile: &str, point: &GeoPoint) -> Result<Snap, RoutingError> {
        let weighting = self.weighting(profile)?;
        Ok(self
            .index
            .find_closest(&self.graph, point, &AccessEdgeFilter::new(weighting)))
    }

    pub fn route_one_to_many(
        &self,
        request: &OneToManyRequest,
    ) -> Result<RoutingResponse, RoutingError> {
        let profile = request
            .profile
            .as_deref()
            .unwrap_or(&self.config.default_profile);
        let weighting = self.weighting(profile)?;
        let edge_filter = AccessEdgeFilter::new(weighting);

        let options = AlgorithmOptions::new(
            request.algorithm.unwrap_or(self.config.algorithm),
            weighting,
        )
        .with_max_visited_nodes(
            request
                .max_visited_nodes
                .unwrap_or(self.config.max_visited_nodes),
        )
        .with_heading_penalty(self.config.heading_penalty);

        let mut template = OneToManyRoutingTemplate::new(request, &self.index, &self.snap_cache)
            .with_invalid_point_policy(self.config.invalid_point_policy)
            .with_waypoints(self.config.include_waypoints);

        let max_retries = template.max_retries();

        for attempt in 0..max_retries {
            let snaps = template.lookup(&self.graph, profile, &edge_filter)?;

            let stopwatch = Stopwatch::new("query_graph/build");
            let query_graph = QueryGraph::from_base_graph(&self.graph, snaps);
            stopwatch.report();

            template.calc_paths(&query_graph, &DefaultAlgorithmFactory, &options)?;

            if template.is_ready(&DefaultPathMerger)? {
                return Ok(template.into_response());
            }

            debug!(attempt, "Response is not ready");
        }

        Err(InvariantViolation::RetriesExhausted(max_retries).into())
    }
}
