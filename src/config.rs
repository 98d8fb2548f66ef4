use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::materialize::MaterializeOptions;
use crate::notebook::SplitLevel;

/// User defaults for nbsplit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Heading level used when none is given on the command line
    pub default_split_level: u8,
    /// Directory that receives the split notebooks
    pub output_dir: PathBuf,
    /// Extension of the written notebooks
    pub output_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_split_level: 1,
            output_dir: PathBuf::from("split_notebooks"),
            output_extension: "ipynb".to_string(),
        }
    }
}

impl Config {
    /// Load config from the config directory
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        // Return defaults if no config found
        Ok(Config::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(Some(config_path))
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nbsplit").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }

    /// Configured split level, falling back to H1 when out of range
    pub fn split_level(&self) -> SplitLevel {
        SplitLevel::new(self.default_split_level).unwrap_or_default()
    }

    pub fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions {
            extension: self.output_extension.clone(),
        }
    }
}
