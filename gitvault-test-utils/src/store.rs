//! On-disk secret store fixtures
//!
//! Builds a temporary directory-backed store laid out the way the helper
//! expects it: one file per entry, first line the password, `key: value`
//! attribute lines after it.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary secret store directory seeded with entries
pub struct StoreFixture {
  temp_dir: TempDir,
}

impl Default for StoreFixture {
  fn default() -> Self {
    Self::new()
  }
}

impl StoreFixture {
  /// Create an empty store fixture
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    Self { temp_dir }
  }

  /// The root directory to hand to the helper as its store location
  pub fn root(&self) -> PathBuf {
    self.temp_dir.path().join("store")
  }

  /// Seed an entry under the given store key
  pub fn with_entry(self, key: &str, password: &str, attributes: &[(&str, &str)]) -> Self {
    let path = self.entry_path(key);
    let parent = path.parent().expect("Entry key must have a parent directory");
    fs::create_dir_all(parent).expect("Failed to create entry directories");

    let mut content = format!("{password}\n");
    for (name, value) in attributes {
      content.push_str(&format!("{name}: {value}\n"));
    }

    fs::write(&path, content).expect("Failed to write store entry");
    self
  }

  /// The on-disk path of the entry stored at `key`
  pub fn entry_path(&self, key: &str) -> PathBuf {
    let mut path = self.root();
    for segment in key.split('/') {
      path.push(segment);
    }
    path
  }

  /// Whether an entry file exists at `key`
  pub fn has_entry(&self, key: &str) -> bool {
    self.entry_path(key).is_file()
  }

  /// Read the raw text of the entry stored at `key`
  pub fn read_entry(&self, key: &str) -> String {
    fs::read_to_string(self.entry_path(key)).expect("Failed to read store entry")
  }
}
