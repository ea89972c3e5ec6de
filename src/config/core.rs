use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::Serialize;

use super::overrides::without_nulls;
use super::smart_load;
use super::Settings;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct KeysweepConfig {
    figment: Figment,
}

impl KeysweepConfig {
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))                   // 1. Defaults (lowest)
            .merge(smart_load::auto(Self::user_config_path()))     // 2. User config
            .merge(smart_load::auto("keysweep.toml"))              // 3. Working directory config
            .merge(smart_load::auto("keysweep.json"));

        if let Some(path) = custom_config {
            if !std::path::Path::new(path).exists() {
                anyhow::bail!("Configuration file not found: {}", path);
            }
            figment = figment.merge(smart_load::auto(path));        // 4. Explicit --config
        }

        // 5. Environment variables, "__" separates section and key
        figment = figment.merge(Env::prefixed("KEYSWEEP_").split("__"));

        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(without_nulls(cli))); // 6. CLI (highest)
        }

        Ok(KeysweepConfig { figment })
    }

    /// Typed view of the merged configuration
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("configuration error: cannot read settings")?;
        settings.validate().context("configuration error")?;
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/keysweep/config.toml", home),
            Err(_) => "~/.config/keysweep/config.toml".to_string(),
        }
    }
}
