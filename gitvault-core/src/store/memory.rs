//! In-memory secret store used by tests and ephemeral setups.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{Secret, SecretStore, StoreError};

/// A secret store holding entries in process memory.
///
/// Entries are kept in a `BTreeMap` so `list` returns keys in a stable
/// order. Interior mutability lets the store be shared behind `&self` like
/// the other backends.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<BTreeMap<String, Secret>>,
}

impl MemoryStore {
  /// Create an empty store
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Secret>> {
    // A poisoned lock only happens when another holder panicked; the map
    // itself is still coherent for test purposes.
    self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
  }
}

impl SecretStore for MemoryStore {
  fn get(&self, path: &str) -> Result<Secret, StoreError> {
    self.lock().get(path).cloned().ok_or_else(|| StoreError::NotFound {
      path: path.to_string(),
    })
  }

  fn list(&self) -> Result<Vec<String>, StoreError> {
    Ok(self.lock().keys().cloned().collect())
  }

  fn set(&self, path: &str, secret: &Secret) -> Result<(), StoreError> {
    self.lock().insert(path.to_string(), secret.clone());
    Ok(())
  }

  fn remove(&self, path: &str) -> Result<(), StoreError> {
    match self.lock().remove(path) {
      Some(_) => Ok(()),
      None => Err(StoreError::NotFound {
        path: path.to_string(),
      }),
    }
  }
}
