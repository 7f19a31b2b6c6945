use serde::{Deserialize, Serialize};

use super::algorithm_factory::RoutingAlgorithm;
use crate::{error::RoutingError, geopoint::GeoPoint};

/// One origin followed by one or more destinations
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OneToManyRequest {
    pub points: Vec<GeoPoint>,

    /// Falls back to the configured default profile
    #[serde(default)]
    pub profile: Option<String>,

    /// Either empty, a single heading for the origin, or one per point.
    /// In degrees clockwise from north.
    #[serde(default)]
    pub headings: Vec<Option<f64>>,

    #[serde(default)]
    pub max_visited_nodes: Option<usize>,

    #[serde(default)]
    pub algorithm: Option<RoutingAlgorithm>,
}

impl OneToManyRequest {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        OneToManyRequest {
            points,
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_headings(mut self, headings: Vec<Option<f64>>) -> Self {
        self.headings = headings;
        self
    }

    pub fn with_max_visited_nodes(mut self, max_visited_nodes: usize) -> Self {
        self.max_visited_nodes = Some(max_visited_nodes);
        self
    }

    pub fn with_algorithm(mut self, algorithm: RoutingAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn heading(&self, point_index: usize) -> Option<f64> {
        self.headings.get(point_index).copied().flatten()
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.points.len() < 2 {
            return Err(RoutingError::InvalidArgument(format!(
                "At least 2 points have to be specified, but was: {}",
                self.points.len()
            )));
        }

        if self.headings.len() > 1 && self.headings.len() != self.points.len() {
            return Err(RoutingError::InvalidArgument(format!(
                "The number of headings ({}) must be 0, 1 or equal to the number of points ({})",
                self.headings.len(),
                self.points.len()
            )));
        }

        for heading in self.headings.iter().flatten() {
            if !heading.is_finite() || !(0.0..360.0).contains(heading) {
                return Err(RoutingError::InvalidArgument(format!(
                    "Heading {} must be in [0, 360)",
                    heading
                )));
            }
        }

        Ok(())
    }
}
