use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Lookup failed: the file could not be read, or it was read but empty.
    #[error(
        "error fetching configuration for cluster ID ({cluster_id}). ({})",
        describe_cause(.source)
    )]
    Unavailable {
        cluster_id: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("invalid {field} ({value}): must be a single path segment")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("requested user ({user}) not found in cluster configuration of ({cluster_id})")]
    UserNotFound { user: String, cluster_id: String },

    #[error("unsupported configuration backend: {0}")]
    UnsupportedBackend(String),

    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization Error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

fn describe_cause(source: &Option<io::Error>) -> String {
    match source {
        Some(err) => err.to_string(),
        None => "empty content".to_string(),
    }
}
