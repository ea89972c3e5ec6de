//! Configuration management for keysweep
//!
//! Settings are layered with figment: the embedded `default-config.toml`,
//! the user config in `~/.config/keysweep/`, `keysweep.toml` (or `.json`) in
//! the working directory, an explicit `--config` file, `KEYSWEEP_*`
//! environment variables and finally command-line flags.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::keyspace::{Alphabet, DEFAULT_ALPHABET};
use crate::search::SearchConfig;

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use self::core::KeysweepConfig;

/// Longest candidate length any configuration may allow
pub const LENGTH_CEILING: usize = 20;

/// Fully merged keysweep settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Symbols candidates are built from, in enumeration order
    pub alphabet: String,

    /// Longest candidate length accepted for a run
    pub max_length: usize,

    pub search: SearchConfig,

    pub output: OutputSettings,
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Draw a progress bar while searching
    pub progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_length: LENGTH_CEILING,
            search: SearchConfig::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { progress: true }
    }
}

impl Settings {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 || self.max_length > LENGTH_CEILING {
            bail!("max_length must be between 1 and {LENGTH_CEILING}, got {}", self.max_length);
        }
        if self.search.thread_percentage == 0 || self.search.thread_percentage > 100 {
            bail!(
                "search.thread_percentage must be between 1 and 100, got {}",
                self.search.thread_percentage
            );
        }
        self.alphabet()?;
        self.search.validate()?;
        Ok(())
    }

    /// Parsed alphabet
    pub fn alphabet(&self) -> Result<Alphabet> {
        Ok(Alphabet::new(&self.alphabet)?)
    }

    /// Check a requested candidate length against `max_length`
    pub fn check_length(&self, length: usize) -> Result<()> {
        if length == 0 || length > self.max_length {
            bail!("length must be between 1 and {}, got {length}", self.max_length);
        }
        Ok(())
    }
}
