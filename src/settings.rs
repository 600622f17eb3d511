use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://www.floatmissouri.com";
const DEFAULT_INDEX_PATH: &str = "/plan/missouri-rivers/";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Runtime settings: built-in defaults, overridden by `FLOAT_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub index_path: String,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("FLOAT").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("index_path", DEFAULT_INDEX_PATH)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("request_delay_ms", 1000)?
            .set_default("timeout_secs", 30)?
            .set_default("output_dir", ".")?
            .add_source(env)
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Invalid FLOAT_* settings")
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}
