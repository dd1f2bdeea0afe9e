pub mod commentary;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod metadata;
pub mod proxy;
pub mod tags;
pub mod types;

use config::Config;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

pub use error::{Error, Result};
pub use metadata::normalize;
pub use types::{NormalizedMetadata, ParsedUrlHint, PostSnapshot};

/// One normalization request: what the URL classifier saw, plus the post if
/// it could be fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
    pub hint: ParsedUrlHint,
    #[serde(default)]
    pub snapshot: Option<PostSnapshot>,
}

impl Input {
    pub fn from_json(text: &str) -> Result<Input> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a request from `path`, or from stdin when `path` is `-`.
    pub fn from_path(path: &Path) -> Result<Input> {
        let read_err = |source: std::io::Error| Error::Read {
            path: path.to_path_buf(),
            source,
        };
        let text = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(read_err)?
        };
        Input::from_json(&text)
    }

    pub fn normalize(&self, config: &Config) -> NormalizedMetadata {
        normalize(&self.hint, self.snapshot.as_ref(), config)
    }
}
