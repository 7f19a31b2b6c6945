use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    constants::{DEFAULT_HEADING_PENALTY, DEFAULT_MAX_VISITED_NODES},
    distance::Meters,
    routing::algorithm_factory::RoutingAlgorithm,
    weighting::Weight,
};

const ENV_PREFIX: &str = "HERMES_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(serde_json::Error),
    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: String, value: String },
    #[error("Invalid config value for {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
}

/// What to do with a destination that cannot be snapped to the graph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPointPolicy {
    /// Leave the destination out of the response
    #[default]
    Skip,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Maximum number of settled nodes per request
    pub max_visited_nodes: usize,
    pub invalid_point_policy: InvalidPointPolicy,
    pub snap_cache_capacity: u64,
    pub max_snap_distance: Option<Meters>,
    /// Added to the weight of edges that go against a requested heading
    pub heading_penalty: Weight,
    pub include_waypoints: bool,
    pub default_profile: String,
    pub algorithm: RoutingAlgorithm,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            max_visited_nodes: DEFAULT_MAX_VISITED_NODES,
            invalid_point_policy: InvalidPointPolicy::default(),
            snap_cache_capacity: 10_000,
            max_snap_distance: None,
            heading_penalty: DEFAULT_HEADING_PENALTY,
            include_waypoints: false,
            default_profile: String::from("car"),
            algorithm: RoutingAlgorithm::default(),
        }
    }
}

impl RoutingConfig {
    /// Defaults, then the config file if any, then `HERMES_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Reading config from {}", path.display());

        let file = File::open(path).map_err(ConfigError::Read)?;
        serde_json::from_reader(BufReader::new(file)).map_err(ConfigError::Parse)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Overrides fields from prefixed variables, e.g. `HERMES_MAX_VISITED_NODES`
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = var("MAX_VISITED_NODES") {
            self.max_visited_nodes = parse_value(key, value)?;
        }
        if let Some((key, value)) = var("INVALID_POINT_POLICY") {
            self.invalid_point_policy = parse_variant(key, value)?;
        }
        if let Some((key, value)) = var("SNAP_CACHE_CAPACITY") {
            self.snap_cache_capacity = parse_value(key, value)?;
        }
        if let Some((key, value)) = var("MAX_SNAP_DISTANCE") {
            self.max_snap_distance = Some(Meters::new(parse_value(key, value)?));
        }
        if let Some((key, value)) = var("HEADING_PENALTY") {
            self.heading_penalty = parse_value(key, value)?;
        }
        if let Some((key, value)) = var("INCLUDE_WAYPOINTS") {
            self.include_waypoints = parse_value(key, value)?;
        }
        if let Some((_, value)) = var("DEFAULT_PROFILE") {
            self.default_profile = value;
        }
        if let Some((key, value)) = var("ALGORITHM") {
            self.algorithm = parse_variant(key, value)?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visited_nodes == 0 {
            return Err(ConfigError::Validation {
                field: "max_visited_nodes",
                message: "must be greater than 0",
            });
        }

        if self.snap_cache_capacity == 0 {
            return Err(ConfigError::Validation {
                field: "snap_cache_capacity",
                message: "must be greater than 0",
            });
        }

        if !self.heading_penalty.is_finite() || self.heading_penalty < 0.0 {
            return Err(ConfigError::Validation {
                field: "heading_penalty",
                message: "must be a finite, non-negative weight",
            });
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: String, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}

/// Parses a unit variant from its serialized name
fn parse_variant<T: DeserializeOwned>(key: String, value: String) -> Result<T, ConfigError> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
