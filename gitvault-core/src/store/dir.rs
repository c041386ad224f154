//! Directory-backed secret store.
//!
//! Each entry is a plain file below a root directory; the store key is the
//! `/`-joined path of the file relative to the root. Secrets are kept in
//! their text representation and written with owner-only permissions on
//! Unix.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Secret, SecretStore, StoreError};

/// A secret store rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DirStore {
  root: PathBuf,
}

impl DirStore {
  /// Open a store rooted at `root`.
  ///
  /// The directory does not have to exist yet; it is created on the first
  /// write.
  pub fn open(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// The root directory of the store
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Resolve a store key to its file path, rejecting keys that would
  /// escape the root directory.
  fn entry_path(&self, key: &str) -> Result<PathBuf, std::io::Error> {
    if key.is_empty() {
      return Err(invalid_key(key));
    }

    let mut path = self.root.clone();
    for segment in key.split('/') {
      if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(invalid_key(key));
      }
      path.push(segment);
    }

    Ok(path)
  }
}

fn invalid_key(key: &str) -> std::io::Error {
  std::io::Error::new(ErrorKind::InvalidInput, format!("invalid store key '{key}'"))
}

#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> std::io::Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let mut perms = fs::metadata(path)?.permissions();
  perms.set_mode(0o600); // Owner read/write only
  fs::set_permissions(path, perms)
}

impl SecretStore for DirStore {
  fn get(&self, path: &str) -> Result<Secret, StoreError> {
    let file = self.entry_path(path).map_err(|source| StoreError::Read {
      path: path.to_string(),
      source,
    })?;

    // A directory is a key prefix with entries below it, not an entry
    if file.is_dir() {
      return Err(StoreError::NotFound {
        path: path.to_string(),
      });
    }

    match fs::read_to_string(&file) {
      Ok(text) => Ok(Secret::from_text(&text)),
      Err(source) if source.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
        path: path.to_string(),
      }),
      Err(source) => Err(StoreError::Read {
        path: path.to_string(),
        source,
      }),
    }
  }

  fn list(&self) -> Result<Vec<String>, StoreError> {
    let mut keys = Vec::new();
    if self.root.is_dir() {
      collect_keys(&self.root, String::new(), &mut keys).map_err(StoreError::List)?;
    }

    keys.sort();
    Ok(keys)
  }

  fn set(&self, path: &str, secret: &Secret) -> Result<(), StoreError> {
    let write_error = |source| StoreError::Write {
      path: path.to_string(),
      source,
    };

    let file = self.entry_path(path).map_err(write_error)?;
    if let Some(parent) = file.parent() {
      fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(&file, secret.to_text()).map_err(write_error)?;

    #[cfg(unix)]
    set_secure_permissions(&file).map_err(write_error)?;

    Ok(())
  }

  fn remove(&self, path: &str) -> Result<(), StoreError> {
    let file = self.entry_path(path).map_err(|source| StoreError::Write {
      path: path.to_string(),
      source,
    })?;

    match fs::remove_file(&file) {
      Ok(()) => Ok(()),
      Err(source) if source.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
        path: path.to_string(),
      }),
      Err(source) => Err(StoreError::Write {
        path: path.to_string(),
        source,
      }),
    }
  }
}

/// Recursively gather the relative keys of all entry files under `dir`
fn collect_keys(dir: &Path, prefix: String, keys: &mut Vec<String>) -> std::io::Result<()> {
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let name = entry.file_name().to_string_lossy().into_owned();
    let key = if prefix.is_empty() {
      name
    } else {
      format!("{prefix}/{name}")
    };

    if entry.file_type()?.is_dir() {
      collect_keys(&entry.path(), key, keys)?;
    } else {
      keys.push(key);
    }
  }

  Ok(())
}
