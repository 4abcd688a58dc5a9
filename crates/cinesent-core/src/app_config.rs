use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Trained classifier artifact (JSON).
    pub model_path: PathBuf,
    /// Fitted vectorizer artifact (JSON).
    pub vectorizer_path: PathBuf,
    /// Replacement stopword corpus. `None` uses the embedded English list.
    pub stopwords_path: Option<PathBuf>,
    pub movies_path: PathBuf,
    /// Maximum number of history records kept per session. `None` is unbounded.
    pub history_limit: Option<NonZeroUsize>,
    pub rate_limit_per_minute: NonZeroUsize,
}
