use std::path::PathBuf;

use floodrisk_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("unknown preset: {0}")]
    Unknown(String),

    #[error("failed to read preset file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preset {name} is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("preset {name} is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ConfigError,
    },
}
