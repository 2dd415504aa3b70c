use aerodesk_catalog::PricingConfig;
use aerodesk_wizard::WizardConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    pub redis_url: Option<String>,
}

fn default_key_prefix() -> String { "aerodesk".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            key_prefix: default_key_prefix(),
            redis_url: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `AERODESK_PRICING__TAX_RATE=0.1`
            .add_source(config::Environment::with_prefix("AERODESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
