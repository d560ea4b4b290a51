//! Error types for inventory parsing and documentation lookups

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("invalid objects.inv file: {0}")]
    InvalidFormat(&'static str),

    #[error("corrupt compressed inventory stream: {0}")]
    Decompression(#[from] flate2::DecompressError),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown documentation source '{0}'")]
    UnknownSource(String),

    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse inventory for '{source_id}': {source}")]
    Inventory {
        source_id: String,
        #[source]
        source: InventoryError,
    },
}

impl LookupError {
    /// Short message safe to show to whoever issued the query
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::UnknownSource(_) => "Unknown documentation source",
            LookupError::Transport { .. }
            | LookupError::Status { .. }
            | LookupError::Inventory { .. } => "Cannot build doc lookup table, try again later.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {path}: {message}")]
    Invalid { path: String, message: &'static str },
}
