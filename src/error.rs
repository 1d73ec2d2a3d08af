use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {name} mapping at {path}: {source}")]
    Read {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {name} mapping at {path}: {source}")]
    MalformedJson {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected shape in {name} mapping at {path}: {source}")]
    Schema {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
