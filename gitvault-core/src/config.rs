//! # Configuration Management
//!
//! Locates the helper's configuration and data directories (XDG-aware) and
//! loads the optional `config.toml` with the store location and the default
//! store prefix.

use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the filesystem root of the secret store.
/// Takes precedence over `store_dir` from the configuration file.
pub const STORE_DIR_ENV: &str = "GITVAULT_STORE_DIR";

/// Represents the configuration directories for the helper
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "gitvault").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the path to the settings file
  pub fn settings_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// The store root used when neither the environment nor the settings
  /// file name one
  pub fn default_store_dir(&self) -> PathBuf {
    self.data_dir.join("store")
  }

  /// Load settings from file or return defaults
  pub fn load_settings(&self) -> Result<Settings> {
    let settings_path = self.settings_path();

    if settings_path.exists() {
      let content = fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read settings from {}", settings_path.display()))?;

      let settings: Settings =
        toml::from_str(&content).with_context(|| format!("Failed to parse settings from {}", settings_path.display()))?;

      Ok(settings)
    } else {
      Ok(Settings::default())
    }
  }

  /// Save settings to file
  pub fn save_settings(&self, settings: &Settings) -> Result<()> {
    let settings_path = self.settings_path();

    if let Some(parent) = settings_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(&settings_path, content)
      .with_context(|| format!("Failed to write settings to {}", settings_path.display()))?;

    Ok(())
  }
}

/// Persistent helper settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
  /// Filesystem root of the secret store
  #[serde(default)]
  pub store_dir: Option<PathBuf>,

  /// Store prefix applied when no `--store` flag is given
  #[serde(default)]
  pub store: Option<String>,
}

/// Resolve the store root directory.
///
/// Precedence: the `GITVAULT_STORE_DIR` environment variable, then
/// `store_dir` from the settings file, then the default below the data
/// directory.
pub fn resolve_store_dir(settings: &Settings, dirs: &ConfigDirs) -> PathBuf {
  if let Ok(dir) = env::var(STORE_DIR_ENV)
    && !dir.is_empty()
  {
    return PathBuf::from(dir);
  }

  settings
    .store_dir
    .clone()
    .unwrap_or_else(|| dirs.default_store_dir())
}

#[cfg(test)]
mod tests {
  use gitvault_test_utils::EnvTestGuard;

  use super::*;

  // The process environment is shared across test threads, so everything
  // that touches it runs inside a single test under one guard.
  #[test]
  fn test_settings_and_store_dir_resolution() {
    let env_guard = EnvTestGuard::new();
    let dirs = ConfigDirs::new().unwrap();

    // Defaults when no settings file exists
    assert_eq!(dirs.load_settings().unwrap(), Settings::default());
    assert_eq!(resolve_store_dir(&Settings::default(), &dirs), dirs.default_store_dir());

    // Save and load round trip
    let settings = Settings {
      store_dir: Some(PathBuf::from("/srv/secrets")),
      store: Some("work".to_string()),
    };
    dirs.save_settings(&settings).unwrap();
    assert_eq!(dirs.load_settings().unwrap(), settings);

    // The settings file names the store root
    assert_eq!(resolve_store_dir(&settings, &dirs), PathBuf::from("/srv/secrets"));

    // The environment override wins over the settings file
    env_guard.set_store_dir("/tmp/env-store");
    assert_eq!(resolve_store_dir(&settings, &dirs), PathBuf::from("/tmp/env-store"));
  }
}
