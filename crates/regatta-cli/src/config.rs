//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use regatta_core::{FEDERATION_POINTS_SCALE, PointsCalculator, PointsTable, RaceCodeRules};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default points per finish position, first place first.
    pub points_scale: Vec<u32>,

    /// Race code generation tables.
    pub race_code: RaceCodeRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            points_scale: FEDERATION_POINTS_SCALE.to_vec(),
            race_code: RaceCodeRules::default(),
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

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (REGATTA_*, nested keys split on "__")
        figment = figment.merge(Env::prefixed("REGATTA_").split("__"));

        figment.extract()
    }

    /// Points calculator backed by the configured default scale.
    pub fn points_calculator(&self) -> PointsCalculator {
        PointsCalculator::new(PointsTable::from_scale(&self.points_scale))
    }
}

/// Returns the platform-specific config directory for regatta.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("regatta"))
}
