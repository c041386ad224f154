//! # Secret Store
//!
//! The store abstraction the credential operations run against, plus the
//! bundled backends: an in-memory store for tests and ephemeral use, and a
//! directory-backed store for production.

pub mod dir;
pub mod memory;

use thiserror::Error;

pub use self::dir::DirStore;
pub use self::memory::MemoryStore;

/// Errors reported by secret store backends
#[derive(Debug, Error)]
pub enum StoreError {
  /// No entry exists at the requested key
  #[error("no secret store entry at '{path}'")]
  NotFound { path: String },
  /// Reading an entry failed for a reason other than absence
  #[error("failed to read '{path}' from the secret store")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },
  /// Writing or removing an entry failed
  #[error("failed to write '{path}' to the secret store")]
  Write {
    path: String,
    #[source]
    source: std::io::Error,
  },
  /// Enumerating the store keys failed
  #[error("failed to list the secret store")]
  List(#[source] std::io::Error),
}

/// A stored secret: a primary password plus named string attributes.
///
/// Attributes keep their insertion order so a secret renders back to disk
/// the way it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
  password: String,
  attributes: Vec<(String, String)>,
}

impl Secret {
  /// Create a secret holding the given password and no attributes
  pub fn new(password: impl Into<String>) -> Self {
    Self {
      password: password.into(),
      attributes: Vec::new(),
    }
  }

  /// The primary password payload
  pub fn password(&self) -> &str {
    &self.password
  }

  /// Replace the primary password payload
  pub fn set_password(&mut self, password: impl Into<String>) {
    self.password = password.into();
  }

  /// Look up a named attribute
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(name, _)| name == key)
      .map(|(_, value)| value.as_str())
  }

  /// Set a named attribute, replacing an existing value in place
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();
    match self.attributes.iter_mut().find(|(name, _)| *name == key) {
      Some(entry) => entry.1 = value,
      None => self.attributes.push((key, value)),
    }
  }

  /// Parses a secret from its text representation.
  ///
  /// The first line is the password; every following `key: value` line is an
  /// attribute. Lines without a `: ` separator carry no attribute and are
  /// dropped.
  pub fn from_text(text: &str) -> Self {
    let mut lines = text.lines();
    let password = lines.next().unwrap_or_default().to_string();

    let mut secret = Self::new(password);
    for line in lines {
      if let Some((key, value)) = line.split_once(": ") {
        secret.set(key, value);
      }
    }

    secret
  }

  /// Renders the secret to its text representation
  pub fn to_text(&self) -> String {
    let mut text = String::new();
    text.push_str(&self.password);
    text.push('\n');

    for (key, value) in &self.attributes {
      text.push_str(key);
      text.push_str(": ");
      text.push_str(value);
      text.push('\n');
    }

    text
  }
}

/// A key-addressed secret store.
///
/// Implementations are synchronous and provide their own internal
/// consistency; the credential operations call at most a handful of these
/// methods per invocation and never hold state between calls.
pub trait SecretStore {
  /// Fetch the secret stored at exactly `path`
  ///
  /// # Errors
  ///
  /// [`StoreError::NotFound`] when no entry exists at `path`;
  /// [`StoreError::Read`] for any other retrieval failure.
  fn get(&self, path: &str) -> Result<Secret, StoreError>;

  /// Enumerate every key in the store
  ///
  /// # Errors
  ///
  /// [`StoreError::List`] when the store cannot be enumerated.
  fn list(&self) -> Result<Vec<String>, StoreError>;

  /// Store a secret at `path`, replacing any existing entry
  ///
  /// # Errors
  ///
  /// [`StoreError::Write`] when the entry cannot be persisted.
  fn set(&self, path: &str, secret: &Secret) -> Result<(), StoreError>;

  /// Remove the entry at `path`
  ///
  /// # Errors
  ///
  /// [`StoreError::NotFound`] when no entry exists at `path`;
  /// [`StoreError::Write`] for any other removal failure.
  fn remove(&self, path: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_secret_text_round_trip() {
    let mut secret = Secret::new("hunter2");
    secret.set("login", "alice");
    secret.set("password_expiry_utc", "1758000000");
    secret.set("oauth_refresh_token", "refresh-me");

    let text = secret.to_text();
    assert_eq!(
      text,
      "hunter2\nlogin: alice\npassword_expiry_utc: 1758000000\noauth_refresh_token: refresh-me\n"
    );

    assert_eq!(Secret::from_text(&text), secret);
  }

  #[test]
  fn test_from_text_empty_input() {
    let secret = Secret::from_text("");
    assert_eq!(secret.password(), "");
    assert_eq!(secret.get("login"), None);
  }

  #[test]
  fn test_from_text_ignores_lines_without_separator() {
    let secret = Secret::from_text("pass\nlogin: bob\nnot an attribute\n");
    assert_eq!(secret.password(), "pass");
    assert_eq!(secret.get("login"), Some("bob"));
  }

  #[test]
  fn test_set_replaces_existing_attribute_in_place() {
    let mut secret = Secret::new("pass");
    secret.set("login", "old");
    secret.set("other", "kept");
    secret.set("login", "new");

    assert_eq!(secret.get("login"), Some("new"));
    assert_eq!(secret.to_text(), "pass\nlogin: new\nother: kept\n");
  }

  #[test]
  fn test_attribute_value_may_contain_separator() {
    let secret = Secret::from_text("pass\nnote: a: b\n");
    assert_eq!(secret.get("note"), Some("a: b"));
  }
}
