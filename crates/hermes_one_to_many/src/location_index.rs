use rstar::primitives::GeomWithData;
use rstar::{AABB, PointDistance, RStarInsertionStrategy, RTree, RTreeObject, RTreeParams};
use tracing::{debug, info};

use crate::{
    distance::Meters,
    edge_filter::EdgeFilter,
    geopoint::GeoPoint,
    graph::Graph,
    snap::{Snap, SnappedPosition},
    stopwatch::Stopwatch,
    types::EdgeId,
};

/// One straight piece of an edge geometry, in [lng, lat] space
struct IndexedSegment {
    start: [f64; 2],
    end: [f64; 2],
}

impl IndexedSegment {
    fn new(start: &GeoPoint, end: &GeoPoint) -> Self {
        IndexedSegment {
            start: start.as_xy(),
            end: end.as_xy(),
        }
    }

    /// Position of the projection of `point` on the segment, clamped to [0, 1]
    fn project(&self, point: &[f64; 2], x_scale: f64) -> f64 {
        let dx = (self.end[0] - self.start[0]) * x_scale;
        let dy = self.end[1] - self.start[1];
        let length_2 = dx * dx + dy * dy;

        if length_2 == 0.0 {
            return 0.0;
        }

        let px = (point[0] - self.start[0]) * x_scale;
        let py = point[1] - self.start[1];

        ((px * dx + py * dy) / length_2).clamp(0.0, 1.0)
    }

    fn interpolate(&self, t: f64) -> [f64; 2] {
        [
            self.start[0] + (self.end[0] - self.start[0]) * t,
            self.start[1] + (self.end[1] - self.start[1]) * t,
        ]
    }
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.start, self.end)
    }
}

impl PointDistance for IndexedSegment {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let closest = self.interpolate(self.project(point, 1.0));
        let dx = point[0] - closest[0];
        let dy = point[1] - closest[1];
        dx * dx + dy * dy
    }
}

struct SegmentData {
    edge_id: EdgeId,
    segment_index: usize,
}

type LocationIndexObject = GeomWithData<IndexedSegment, SegmentData>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Spatial index over every segment of every edge of a graph
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
    max_snap_distance: Option<Meters>,
}

impl LocationIndex {
    pub fn build<G: Graph>(graph: &G) -> LocationIndex {
        let stopwatch = Stopwatch::new("location_index/build");

        let segments: Vec<LocationIndexObject> = (0..graph.edge_count())
            .flat_map(|edge_id| {
                graph
                    .edge_geometry(edge_id)
                    .windows(2)
                    .enumerate()
                    .map(move |(segment_index, pair)| {
                        LocationIndexObject::new(
                            IndexedSegment::new(&pair[0], &pair[1]),
                            SegmentData {
                                edge_id,
                                segment_index,
                            },
                        )
                    })
            })
            .collect();

        let segment_count = segments.len();
        let tree = RTree::bulk_load_with_params(segments);

        info!(segments = segment_count, "Built location index");
        stopwatch.report();

        LocationIndex {
            tree,
            max_snap_distance: None,
        }
    }

    /// Snaps further than this from the query point are reported as not found
    pub fn with_max_snap_distance(mut self, max_snap_distance: Option<Meters>) -> Self {
        self.max_snap_distance = max_snap_distance;
        self
    }

    /// Finds the closest point on an edge accepted by `edge_filter`.
    ///
    /// Returns an invalid snap when there is no such edge, or when it is further than the
    /// configured maximum snap distance.
    pub fn find_closest<G: Graph>(
        &self,
        graph: &G,
        point: &GeoPoint,
        edge_filter: &dyn EdgeFilter,
    ) -> Snap {
        if !point.is_valid() {
            return Snap::invalid(*point);
        }

        let query = point.as_xy();
        let x_scale = point.lat().to_radians().cos();

        let nearest = self
            .tree
            .nearest_neighbor_iter(&query)
            .find(|candidate| edge_filter.accept_any(graph.edge(candidate.data.edge_id)));

        let Some(nearest) = nearest else {
            debug!(?point, "No accessible edge near point");
            return Snap::invalid(*point);
        };

        let edge_id = nearest.data.edge_id;
        let edge = graph.edge(edge_id);
        let segment_count = graph.edge_geometry(edge_id).len() - 1;

        let segment = nearest.geom();
        let t = segment.project(&query, x_scale);
        let coordinates = GeoPoint::from_xy(segment.interpolate(t));
        let distance = point.haversine_distance(&coordinates);

        if let Some(max_snap_distance) = self.max_snap_distance {
            if distance > max_snap_distance {
                debug!(?point, %distance, "Closest edge is too far away");
                return Snap::invalid(*point);
            }
        }

        let segment_index = nearest.data.segment_index;

        if t <= 0.0 && segment_index == 0 {
            return Snap::new(
                *point,
                edge_id,
                *graph.node_geometry(edge.start_node()),
                distance,
                SnappedPosition::Tower,
                edge.start_node(),
            );
        }

        if t >= 1.0 && segment_index == segment_count - 1 {
            return Snap::new(
                *point,
                edge_id,
                *graph.node_geometry(edge.end_node()),
                distance,
                SnappedPosition::Tower,
                edge.end_node(),
            );
        }

        // A projection on the end of an inner segment is the start of the next one
        let segment_index = if t >= 1.0 {
            segment_index + 1
        } else {
            segment_index
        };

        let closest_tower = if point.haversine_distance(graph.node_geometry(edge.start_node()))
            <= point.haversine_distance(graph.node_geometry(edge.end_node()))
        {
            edge.start_node()
        } else {
            edge.end_node()
        };

        Snap::new(
            *point,
            edge_id,
            coordinates,
            distance,
            SnappedPosition::Edge { segment_index },
            closest_tower,
        )
    }
}
