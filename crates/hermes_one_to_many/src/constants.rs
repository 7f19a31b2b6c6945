use crate::weighting::{Milliseconds, Weight};

pub(crate) const INVALID_NODE: usize = usize::MAX;
pub(crate) const INVALID_EDGE: usize = usize::MAX;
pub(crate) const MAX_WEIGHT: Weight = f64::INFINITY;
pub(crate) const MAX_DURATION: Milliseconds = i64::MAX;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub(crate) const DISTANCE_INFLUENCE: f64 = 50.0;

/// Headings further apart than this are considered to be going the other way
pub(crate) const HEADING_TOLERANCE_DEGREES: f64 = 100.0;

/// Extra weight for traversing an edge that goes against a requested heading
pub(crate) const DEFAULT_HEADING_PENALTY: Weight = 300_000.0;
pub(crate) const DEFAULT_MAX_VISITED_NODES: usize = usize::MAX;
