//! Core domain types and configuration for the trendwatch engine.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod normalize;
pub mod types;

use thiserror::Error;

pub use app_config::AppConfig;
pub use categories::{load_categories, CategoryCatalog, CategoryConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::normalize_topic_key;
pub use types::{
    CompetitionLevel, LifecyclePrediction, LifecycleStage, Niche, RawTrend, SocialSignal,
    StageHint, Trend, TrendDirection, VolumeSample,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
