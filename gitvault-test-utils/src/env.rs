//! Environment variable management for testing
//!
//! This module provides utilities for managing the XDG directory variables
//! and the store-location override during testing so tests don't interfere
//! with each other or with the developer's real configuration.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment that points the XDG directories and the store root
/// at a per-test temporary directory
pub struct EnvTestGuard {
  /// The temporary directory backing the overridden locations
  pub temp_dir: TempDir,
  /// The original XDG_CONFIG_HOME value, if any
  original_config_home: Option<String>,
  /// The original XDG_DATA_HOME value, if any
  original_data_home: Option<String>,
  /// The original GITVAULT_STORE_DIR value, if any
  original_store_dir: Option<String>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// Environment variable names managed by this guard
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const STORE_DIR: &'static str = "GITVAULT_STORE_DIR";

  /// Create a new test environment with overridden directories.
  ///
  /// `GITVAULT_STORE_DIR` is cleared so the configured precedence is
  /// exercised from a clean slate; use [`EnvTestGuard::set_store_dir`] to
  /// point it somewhere.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    // Save the original environment
    let original_config_home = env::var(Self::XDG_CONFIG_HOME).ok();
    let original_data_home = env::var(Self::XDG_DATA_HOME).ok();
    let original_store_dir = env::var(Self::STORE_DIR).ok();

    // Override the XDG directories to use the temporary directory
    let temp_path = temp_dir.path().to_path_buf();
    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, temp_path.join("config"));
      env::set_var(Self::XDG_DATA_HOME, temp_path.join("data"));
      env::remove_var(Self::STORE_DIR);
    }

    std::fs::create_dir_all(temp_path.join("config")).expect("Failed to create config directory");
    std::fs::create_dir_all(temp_path.join("data")).expect("Failed to create data directory");

    Self {
      temp_dir,
      original_config_home,
      original_data_home,
      original_store_dir,
    }
  }

  /// Get the path to the overridden XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the overridden XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Point `GITVAULT_STORE_DIR` at the given path for the guard's lifetime
  pub fn set_store_dir(&self, dir: &str) {
    unsafe {
      env::set_var(Self::STORE_DIR, dir);
    }
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    // Restore the original environment
    restore_var(Self::XDG_CONFIG_HOME, self.original_config_home.as_deref());
    restore_var(Self::XDG_DATA_HOME, self.original_data_home.as_deref());
    restore_var(Self::STORE_DIR, self.original_store_dir.as_deref());
  }
}

fn restore_var(name: &str, value: Option<&str>) {
  match value {
    Some(value) => unsafe {
      env::set_var(name, value);
    },
    None => unsafe {
      env::remove_var(name);
    },
  }
}
