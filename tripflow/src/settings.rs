use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Which guided-entry flow the add-trip-point screen uses.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowVariant {
    #[default]
    Wizard,
    Accordion,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub flow_variant: FlowVariant,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TRIPFLOW_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("TRIPFLOW").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.api_url {
            if !url.starts_with("http") {
                return Err("api_url must be a valid HTTP(S) URL".to_string());
            }
        }
        Ok(())
    }
}
