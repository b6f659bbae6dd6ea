use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    client::ClientConfig,
    model::{AshraeVersion, UnitSystem},
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_version = "2017"
/// units = "SI"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Service root, e.g. "https://ashrae-meteo.info/v2.0".
    pub base_url: Option<String>,

    /// One of "2009", "2013", "2017", "2021".
    pub default_version: Option<String>,

    /// "SI" or "IP".
    pub units: Option<String>,
}

impl Config {
    /// Stored default version, or the newest edition when none is set.
    pub fn default_version(&self) -> Result<AshraeVersion> {
        match &self.default_version {
            None => Ok(AshraeVersion::default()),
            Some(s) => AshraeVersion::try_from(s.as_str()).context(
                "Invalid default_version in config.\n\
                 Hint: run `ashrae configure --revision <year>` to fix it.",
            ),
        }
    }

    pub fn units(&self) -> Result<UnitSystem> {
        match &self.units {
            None => Ok(UnitSystem::default()),
            Some(s) => UnitSystem::try_from(s.as_str()).context(
                "Invalid units in config.\n\
                 Hint: run `ashrae configure --units SI` to fix it.",
            ),
        }
    }

    pub fn set_default_version(&mut self, version: AshraeVersion) {
        self.default_version = Some(version.as_str().to_string());
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = Some(units.as_str().to_string());
    }

    /// Build the client settings described by this config.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut client = ClientConfig::default().with_units(self.units()?);
        if let Some(url) = &self.base_url {
            client = client.with_base_url(url.as_str());
        }
        Ok(client)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "ashrae-design-data", "ashrae-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
