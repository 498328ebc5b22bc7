use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::keys::IdentityKeyHost;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: i32,
    pub window_height: i32,
    /// Overrides where the identity key is kept.
    pub key_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 640,
            key_path: None,
        }
    }
}

impl AppConfig {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("carapace.toml"))
    }

    /// Config from the user's config dir, or defaults when it is missing or broken.
    pub fn load() -> Self {
        let Some(path) = Self::toml_path() else {
            log::warn!("no config directory, using defaults");
            return Self::default();
        };
        Self::load_or_default(&path)
    }

    /// Config at `path`; defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::toml_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn key_host(&self) -> Result<IdentityKeyHost> {
        let path = match &self.key_path {
            Some(path) => path.clone(),
            None => IdentityKeyHost::default_path()?,
        };
        Ok(IdentityKeyHost::new(path))
    }
}
