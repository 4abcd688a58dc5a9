//! Shared domain types for cinesent.
//!
//! Holds the sentiment label, the per-session review history, the movie
//! catalog, and application configuration loaded from the environment.

pub mod app_config;
pub mod config;
pub mod history;
pub mod movies;
pub mod sentiment;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use history::{Feedback, FeedbackVerdict, HistoryError, ReviewRecord, SessionHistory};
pub use movies::{load_catalog, parse_catalog, Category, Movie, MovieCatalog};
pub use sentiment::Sentiment;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read movie catalog at {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse movie catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
