use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_full_size")]
    pub full_size: String,

    #[serde(default = "default_preview_size")]
    pub preview_size: String,
}

fn default_site_url() -> String {
    "https://twitter.com".to_string()
}
fn default_full_size() -> String {
    "orig".to_string()
}
fn default_preview_size() -> String {
    "small".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            site_url: default_site_url(),
            full_size: default_full_size(),
            preview_size: default_preview_size(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Site base without a trailing slash.
    pub fn site(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn profile_url(&self, handle: &str) -> String {
        format!("{}/{}", self.site(), handle)
    }

    pub fn hashtag_url(&self, tag: &str) -> String {
        format!("{}/hashtag/{}", self.site(), tag)
    }
}
