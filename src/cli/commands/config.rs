use anyhow::{Result, anyhow};
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::Output;
use crate::config::KeysweepConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Get a configuration value or section
    Get { key: String },
    /// Validate the merged configuration
    Validate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = KeysweepConfig::load(custom_config, None::<&()>)?;

    match args.command {
        ConfigCommand::Show { format } => {
            // Round-trip through the typed settings so defaults are filled in
            let settings = config.settings()?;
            println!("{}", render(&settings, format)?);
        }
        ConfigCommand::Get { key } => {
            let value = config
                .get_section(&key)
                .map_err(|_| anyhow!("Configuration key '{}' not found", key))?;
            match value {
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    println!("{}", serde_json::to_string_pretty(&value)?)
                }
                serde_json::Value::String(s) => println!("{}", s),
                other => println!("{}", other),
            }
        }
        ConfigCommand::Validate => {
            config.settings()?;
            output.success("Configuration is valid");
        }
    }

    Ok(())
}

fn render<T: serde::Serialize>(value: &T, format: ConfigFormat) -> Result<String> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(value)?,
        ConfigFormat::Json => serde_json::to_string_pretty(value)?,
    })
}
