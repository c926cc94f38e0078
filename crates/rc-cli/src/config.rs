//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use rc_core::CalcConfig;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the memory register is kept between runs.
    pub memory_path: PathBuf,
    /// Separators, date order, clock convention, and display limits.
    #[serde(default)]
    pub calculator: CalcConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("memory_path", &self.memory_path)
            .field("calculator", &self.calculator)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            memory_path: data_dir.join("memory.json"),
            calculator: CalcConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // RETROCALC_CALCULATOR__DATE_ORDER=DMY sets calculator.date_order
        figment = figment.merge(Env::prefixed("RETROCALC_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for retrocalc.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("retrocalc"))
}

/// Returns the platform-specific data directory for retrocalc.
///
/// On Linux: `~/.local/share/retrocalc`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("retrocalc"))
}
