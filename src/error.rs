//! Errors at the crate's I/O edges. The transforms themselves never fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid input JSON: {0}")]
    Input(#[from] serde_json::Error),

    #[error("cannot render output JSON: {0}")]
    Output(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
