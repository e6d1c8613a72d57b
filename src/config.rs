//! Settings read from the environment once at startup.
//!
//! A `.env` file in the working directory is loaded first when present.
//!
//! - `API_BASE_URL`: base of the destinations API (required)
//! - `IMAGE_HOST_URL`, `IMAGE_HOST_KEY`: image host endpoint and key; when
//!   either is missing images are embedded as data URIs
//! - `RUST_LOG`: log filter (default `info`)

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostConfig {
    pub upload_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub image_host: Option<ImageHostConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = get("API_BASE_URL")
            .context("API_BASE_URL must be set to the destinations API base URL")?
            .trim_end_matches('/')
            .to_string();

        let image_host = match (get("IMAGE_HOST_URL"), get("IMAGE_HOST_KEY")) {
            (Some(upload_url), Some(api_key)) => Some(ImageHostConfig {
                upload_url,
                api_key,
            }),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            image_host,
        })
    }
}
