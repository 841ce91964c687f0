pub mod app_config;
pub mod config;
pub mod places;

pub use app_config::{AppConfig, ResolverConfig, DEFAULT_ALLOWED_HOSTS};
pub use config::{load_app_config, load_app_config_from_env};
pub use places::{
    format_coordinate, Coordinates, LinkRecord, NameSource, PlaceCandidate, PlaceResult, UNAVAILABLE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
