//! # Credential Operations
//!
//! The get, store, and erase request cycles that git drives through the
//! credential helper protocol. Each operation parses one request record from
//! its input, resolves the store key, talks to the secret store, and (for
//! get) writes one response record to its output.
//!
//! Diagnostics never go to the protocol output stream: git reserves it for
//! credential data, so non-fatal conditions surface on stderr instead.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::output::{print_error, print_warning};
use crate::record::Credential;
use crate::resolve::store_path;
use crate::store::{Secret, SecretStore, StoreError};

/// Answers a `get` request.
///
/// The request is resolved to a store key and looked up exactly. When the
/// exact key is absent, the store listing is filtered to keys starting with
/// the resolved key: a single match is taken as the answer (the common case
/// of one user per host when the request carries no username), while zero or
/// several matches produce no output, which git reads as "no credential
/// available".
///
/// On a hit, the password always comes from the store. The username is only
/// replaced when the entry carries a non-empty `login` attribute; a
/// caller-supplied username is never blanked out. Expiry and refresh token
/// attributes are copied when present.
///
/// # Errors
///
/// Fails on a malformed request record, on store read or list failures other
/// than absence, and on failure to write the response.
pub fn get<R: BufRead, W: Write>(store: &dyn SecretStore, prefix: &str, input: &mut R, output: &mut W) -> Result<()> {
  let mut credential = Credential::parse(input).context("while parsing the git credential request")?;
  let path = store_path(prefix, &credential);

  let secret = match store.get(&path) {
    Ok(secret) => secret,
    Err(StoreError::NotFound { .. }) => {
      let keys = store.list().context("while listing the secret store")?;
      let mut matches = keys.into_iter().filter(|key| key.starts_with(&path));

      let Some(first) = matches.next() else {
        debug!(%path, "no matching store entry");
        return Ok(());
      };

      if matches.next().is_some() {
        print_warning(&format!("multiple store entries match '{path}', not answering"));
        return Ok(());
      }

      store
        .get(&first)
        .with_context(|| format!("while reading '{first}' from the secret store"))?
    }
    Err(err) => return Err(err).context("while reading from the secret store"),
  };

  credential.password = secret.password().to_string();
  if let Some(login) = secret.get("login").filter(|login| !login.is_empty()) {
    credential.username = login.to_string();
  }
  if let Some(expiry) = secret.get("password_expiry_utc").filter(|expiry| !expiry.is_empty()) {
    credential.password_expiry_utc = expiry.to_string();
  }
  if let Some(token) = secret.get("oauth_refresh_token").filter(|token| !token.is_empty()) {
    credential.oauth_refresh_token = token.to_string();
  }

  credential
    .write_to(output)
    .context("could not write the credential response")?;

  Ok(())
}

/// Handles a `store` request.
///
/// An entry already present at the resolved key is left untouched: git
/// erases credentials it has found to be invalid before storing fresh ones,
/// so a surviving entry is treated as still valid. A store write failure is
/// reported on stderr but does not fail the operation, since the helper
/// protocol has no error channel back to git.
///
/// # Errors
///
/// Fails on a malformed request record or on an existence probe failure
/// other than absence.
pub fn store<R: BufRead>(store: &dyn SecretStore, prefix: &str, input: &mut R) -> Result<()> {
  let credential = Credential::parse(input).context("while parsing the git credential request")?;
  let path = store_path(prefix, &credential);

  match store.get(&path) {
    Ok(_) => {
      debug!(%path, "not storing: an entry already exists, erase it first to replace it");
      return Ok(());
    }
    Err(StoreError::NotFound { .. }) => {}
    Err(err) => return Err(err).context("while checking for an existing store entry"),
  }

  let mut secret = Secret::new(credential.password.as_str());
  if !credential.username.is_empty() {
    secret.set("login", credential.username.as_str());
  }
  if !credential.password_expiry_utc.is_empty() {
    secret.set("password_expiry_utc", credential.password_expiry_utc.as_str());
  }
  if !credential.oauth_refresh_token.is_empty() {
    secret.set("oauth_refresh_token", credential.oauth_refresh_token.as_str());
  }

  if let Err(err) = store.set(&path, &secret) {
    print_error(&format!("error while writing to the store: {err}"));
  }

  Ok(())
}

/// Handles an `erase` request.
///
/// Erasing a credential that is not stored is not an error; any other
/// removal failure is reported on stderr without failing the operation.
///
/// # Errors
///
/// Fails on a malformed request record.
pub fn erase<R: BufRead>(store: &dyn SecretStore, prefix: &str, input: &mut R) -> Result<()> {
  let credential = Credential::parse(input).context("while parsing the git credential request")?;
  let path = store_path(prefix, &credential);

  match store.remove(&path) {
    Ok(()) => {}
    Err(StoreError::NotFound { .. }) => debug!(%path, "nothing to erase"),
    Err(err) => print_error(&format!("error while removing from the store: {err}")),
  }

  Ok(())
}
