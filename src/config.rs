//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file named by
//! `POKEVIEW_CONFIG`, then `POKEVIEW_*` environment variables (a `.env` file is
//! honoured). Binaries apply their command-line flags on top.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Spacing between per-creature detail requests.
    pub request_delay_ms: u64,
    /// Page size used by the console browser.
    pub page_size: u32,
    /// Default page size for the web API (12 fits the grid layout).
    pub web_page_size: u32,
    pub max_page_size: u32,
    /// Upper bound on in-flight detail requests.
    pub concurrency: usize,
    /// Language tag used to pick the flavor-text description.
    pub locale: String,
    pub moves_per_combatant: usize,
    /// How many names `/api/pokemon-list` offers for battle selection.
    pub battle_roster_size: u32,
    pub host: String,
    pub port: u16,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            request_delay_ms: 100,
            page_size: 10,
            web_page_size: 12,
            max_page_size: 50,
            concurrency: 4,
            locale: "en".to_string(),
            moves_per_combatant: 4,
            battle_roster_size: 151,
            host: "0.0.0.0".to_string(),
            port: 5000,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional YAML file, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = match env::var("POKEVIEW_CONFIG") {
            Ok(path) => Self::from_yaml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Overlays `POKEVIEW_*` variables fetched through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("POKEVIEW_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("POKEVIEW_TIMEOUT_SECS") {
            self.timeout_secs = parse_var("POKEVIEW_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("POKEVIEW_REQUEST_DELAY_MS") {
            self.request_delay_ms = parse_var("POKEVIEW_REQUEST_DELAY_MS", &v)?;
        }
        if let Some(v) = lookup("POKEVIEW_PAGE_SIZE") {
            self.page_size = parse_var("POKEVIEW_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("POKEVIEW_CONCURRENCY") {
            self.concurrency = parse_var("POKEVIEW_CONCURRENCY", &v)?;
        }
        if let Some(v) = lookup("POKEVIEW_LOCALE") {
            self.locale = v;
        }
        if let Some(v) = lookup("POKEVIEW_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("POKEVIEW_PORT") {
            self.port = parse_var("POKEVIEW_PORT", &v)?;
        }
        if let Some(v) = lookup("POKEVIEW_SEED") {
            self.seed = Some(parse_var("POKEVIEW_SEED", &v)?);
        }
        Ok(())
    }

    /// Rejects zero sizes and clamps page sizes to `max_page_size`.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid("max_page_size must be positive".into()));
        }
        if self.page_size == 0 || self.web_page_size == 0 {
            return Err(ConfigError::Invalid("page size must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be positive".into()));
        }
        self.page_size = self.page_size.min(self.max_page_size);
        self.web_page_size = self.web_page_size.min(self.max_page_size);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Clamps a caller-requested page size into `[1, max_page_size]`.
    pub fn clamp_limit(&self, limit: u32) -> u32 {
        limit.clamp(1, self.max_page_size)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} has an invalid value: {:?}", key, value)))
}
