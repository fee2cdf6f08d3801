//! Handles settings for the application.
//!
//! Settings are read from `config/settings.toml` (optional) and then from
//! `EXTRATO_*` environment variables, nested keys separated by `__`
//! (e.g. `EXTRATO_SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use engine::{CategoryCatalog, ExtractorRules};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Token expected in the webhook subscription handshake.
    pub verify_token: Option<String>,
    /// Cap on transactions kept in memory. Unset means unbounded.
    pub max_transactions: Option<usize>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 3000,
            verify_token: None,
            max_transactions: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    #[serde(default = "CategoryCatalog::default_seed")]
    pub categories: CategoryCatalog,
    #[serde(default)]
    pub rules: ExtractorRules,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("EXTRATO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
