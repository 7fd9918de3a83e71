use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::simulator::SimulationConfig;
use super::thresholds::ThresholdSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdSet,
    /// Defaults for the simulated demo page
    #[serde(default)]
    pub demo: SimulationConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing or empty file yields the
    /// defaults, an unparseable one is ignored with a warning. Invalid
    /// thresholds or demo settings are an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        Self::read(config_path, false)
    }

    /// Load a config that is about to be modified and saved back.
    ///
    /// An unparseable file is an error here, so it is never replaced by
    /// defaults.
    pub fn load_for_update(config_path: &Path) -> Result<Self> {
        Self::read(config_path, true)
    }

    fn read(config_path: &Path, strict: bool) -> Result<Self> {
        let config = if !config_path.exists() {
            Config::default()
        } else {
            let data = fs::read(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            if data.is_empty() {
                Config::default()
            } else {
                match serde_json::from_slice(&data) {
                    Ok(config) => config,
                    Err(e) if strict => {
                        return Err(e).with_context(|| {
                            format!("Refusing to overwrite unreadable config file {:?}", config_path)
                        });
                    }
                    Err(e) => {
                        log::warn!("Ignoring unreadable config file {:?}: {}", config_path, e);
                        Config::default()
                    }
                }
            }
        };

        config
            .thresholds
            .validate()
            .with_context(|| format!("Invalid thresholds in {:?}", config_path))?;
        config
            .demo
            .validate()
            .with_context(|| format!("Invalid demo settings in {:?}", config_path))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        log::debug!("Config written to {:?}", config_path);
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("vitals").join("config.json"))
    }

    /// Restore default thresholds, keeping demo settings
    pub fn reset_thresholds(&mut self) {
        self.thresholds = ThresholdSet::default();
    }
}
