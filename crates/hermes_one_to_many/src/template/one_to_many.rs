use tracing::{debug, instrument, warn};

use super::{
    path_merger::PathMerger,
    routing_response::{ResponsePath, RoutingResponse},
    routing_template::RoutingTemplate,
};
use crate::{
    base_graph::BaseGraph,
    config::InvalidPointPolicy,
    edge_filter::EdgeFilter,
    error::{InvariantViolation, RoutingError},
    geopoint::GeoPoint,
    location_index::LocationIndex,
    query_graph::QueryGraph,
    routing::{
        algorithm_factory::{AlgorithmFactory, AlgorithmOptions},
        routing_path::RoutingPath,
        routing_request::OneToManyRequest,
        shortest_path_algorithm::ShortestPathAlgorithm,
    },
    snap::Snap,
    snap_cache::SnapCache,
    stopwatch::Stopwatch,
    timer,
};

/// Routes from the first point of a request to every other point.
///
/// A single search engine serves all destinations, so with a reusing algorithm every node is
/// settled at most once per request. Destinations are processed in request order and heading
/// markings on the query graph never outlive the destination they were applied for.
pub struct OneToManyRoutingTemplate<'a> {
    request: &'a OneToManyRequest,
    location_index: &'a LocationIndex,
    snap_cache: &'a SnapCache,
    invalid_point_policy: InvalidPointPolicy,
    include_waypoints: bool,

    snaps: Vec<Snap>,
    paths: Vec<RoutingPath>,
    response: RoutingResponse,
}

impl<'a> OneToManyRoutingTemplate<'a> {
    pub fn new(
        request: &'a OneToManyRequest,
        location_index: &'a LocationIndex,
        snap_cache: &'a SnapCache,
    ) -> Self {
        OneToManyRoutingTemplate {
            request,
            location_index,
            snap_cache,
            invalid_point_policy: InvalidPointPolicy::default(),
            include_waypoints: false,
            snaps: Vec::new(),
            paths: Vec::new(),
            response: RoutingResponse::default(),
        }
    }

    pub fn with_invalid_point_policy(mut self, invalid_point_policy: InvalidPointPolicy) -> Self {
        self.invalid_point_policy = invalid_point_policy;
        self
    }

    pub fn with_waypoints(mut self, include_waypoints: bool) -> Self {
        self.include_waypoints = include_waypoints;
        self
    }

    pub fn snaps(&self) -> &[Snap] {
        &self.snaps
    }

    pub fn paths(&self) -> &[RoutingPath] {
        &self.paths
    }

    /// Response built so far. Hints are up to date even when `calc_paths` failed.
    pub fn response(&self) -> &RoutingResponse {
        &self.response
    }

    pub fn into_response(self) -> RoutingResponse {
        self.response
    }

    fn record_visited_nodes(&mut self, visited_nodes: usize) {
        let destinations = self.request.points.len().saturating_sub(1).max(1);

        self.response.hints.visited_nodes_sum = visited_nodes;
        self.response.hints.visited_nodes_average = visited_nodes as f64 / destinations as f64;
    }

    fn waypoints(&self) -> Option<Vec<GeoPoint>> {
        self.include_waypoints.then(|| {
            self.snaps
                .iter()
                .filter(|snap| snap.is_valid())
                .map(|snap| snap.coordinates)
                .collect()
        })
    }
}

impl RoutingTemplate for OneToManyRoutingTemplate<'_> {
    #[instrument(skip_all, level = "debug")]
    fn lookup(
        &mut self,
        graph: &BaseGraph,
        profile: &str,
        edge_filter: &dyn EdgeFilter,
    ) -> Result<&mut [Snap], RoutingError> {
        self.request.validate()?;

        let stopwatch = Stopwatch::new("one_to_many/lookup");

        self.snaps = self
            .request
            .points
            .iter()
            .map(|point| {
                self.snap_cache.get_or_insert_with(profile, point, || {
                    self.location_index.find_closest(graph, point, edge_filter)
                })
            })
            .collect();

        stopwatch.report();

        Ok(&mut self.snaps)
    }

    #[instrument(skip_all, level = "debug")]
    fn calc_paths<F: AlgorithmFactory>(
        &mut self,
        query_graph: &QueryGraph,
        algorithm_factory: &F,
        options: &AlgorithmOptions,
    ) -> Result<&[RoutingPath], RoutingError> {
        let point_count = self.request.points.len();
        if self.snaps.len() != point_count || point_count < 2 {
            return Err(RoutingError::InvalidArgument(format!(
                "Expected {} resolved points, lookup returned {}",
                point_count,
                self.snaps.len()
            )));
        }

        self.paths = Vec::with_capacity(point_count - 1);

        let origin_snap = &self.snaps[0];
        if !origin_snap.is_valid() {
            return Err(RoutingError::PointNotFound { index: 0 });
        }
        let origin = origin_snap.closest_node();

        let mut algo = algorithm_factory.create_algo(query_graph, options);
        self.response.hints.algorithm = Some(algo.name().to_string());

        let mut stopwatch = Stopwatch::stopped("one_to_many/calc_paths");

        for place_index in 1..point_count {
            let destination_snap = &self.snaps[place_index];

            if !destination_snap.is_valid() {
                match self.invalid_point_policy {
                    InvalidPointPolicy::Skip => {
                        warn!(place_index, "Skipping point that could not be snapped");
                        continue;
                    }
                    InvalidPointPolicy::Fail => {
                        return Err(RoutingError::PointNotFound { index: place_index });
                    }
                }
            }

            let destination = destination_snap.closest_node();

            if let Some(heading) = self.request.heading(0) {
                query_graph.enforce_heading(origin, heading, false);
            }
            if let Some(heading) = self.request.heading(place_index) {
                query_graph.enforce_heading(destination, heading, true);
            }

            let result = timer!(stopwatch, algo.calc_paths(origin, destination));

            // Headings of this destination must not influence the next one
            query_graph.clear_unfavored_status();
            self.record_visited_nodes(algo.visited_nodes());

            let paths = result?;

            if paths.is_empty() {
                return Err(InvariantViolation::EmptyPathList {
                    from: origin,
                    to: destination,
                }
                .into());
            }

            for (index, path) in paths.into_iter().enumerate() {
                if path.time() < 0 {
                    return Err(InvariantViolation::NegativePathTime {
                        time: path.time(),
                        index,
                    }
                    .into());
                }

                self.paths.push(path);
            }

            if algo.visited_nodes() >= options.max_visited_nodes {
                return Err(RoutingError::BudgetExceeded {
                    max_visited_nodes: options.max_visited_nodes,
                });
            }
        }

        debug!(
            paths = self.paths.len(),
            visited_nodes = self.response.hints.visited_nodes_sum,
            "Calculated one-to-many paths"
        );
        stopwatch.report();

        Ok(&self.paths)
    }

    fn is_ready(&mut self, path_merger: &dyn PathMerger) -> Result<bool, RoutingError> {
        if self.paths.is_empty() {
            return Err(InvariantViolation::EmptyResponse.into());
        }

        let waypoints = self.waypoints();

        self.response.paths = self
            .paths
            .iter()
            .map(|path| -> ResponsePath {
                path_merger.do_work(std::slice::from_ref(path), waypoints.as_deref())
            })
            .collect();

        Ok(true)
    }

    fn max_retries(&self) -> usize {
        1
    }
}
