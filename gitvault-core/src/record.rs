//! # Credential Wire Codec
//!
//! Parsing and serialization of the line-oriented `key=value` records that
//! git exchanges with credential helpers on stdin and stdout.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors that can occur while reading a credential record
#[derive(Debug, Error)]
pub enum ParseError {
  /// The input ended in the middle of a key or value
  #[error("unexpected end of input in credential record")]
  UnexpectedEof,
  /// The underlying reader failed
  #[error("failed to read credential record")]
  Io(#[from] std::io::Error),
}

/// A credential description exchanged with git.
///
/// Every field is a plain string; an empty string means the field is unset
/// and is never written back on the wire. `password_expiry_utc` and
/// `oauth_refresh_token` are carried verbatim and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
  pub protocol: String,
  pub host: String,
  pub path: String,
  pub username: String,
  pub password: String,
  pub password_expiry_utc: String,
  pub oauth_refresh_token: String,
}

impl Credential {
  /// Parses a credential record from the reader.
  ///
  /// The record is a sequence of `key=value` lines, each terminated by a
  /// newline, ending at end-of-input. Unrecognized keys are consumed and
  /// ignored so that newer git versions can add fields without breaking the
  /// helper. Only the first `=` on a line separates key from value; any
  /// further `=` bytes belong to the value.
  ///
  /// An empty input yields an empty record.
  ///
  /// # Errors
  ///
  /// Returns [`ParseError::UnexpectedEof`] when the input ends in the middle
  /// of a key (no `=` reached) or of a value (no newline reached), and
  /// [`ParseError::Io`] when the reader itself fails.
  pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
    let mut credential = Self::default();

    while let Some(key) = read_key(reader)? {
      let value = read_value(reader)?;
      credential.assign(&key, value);
    }

    Ok(credential)
  }

  /// Writes the record to the writer in the git credential wire format.
  ///
  /// Fields are emitted as `key=value\n` in a fixed order, skipping unset
  /// fields. Each field line is written with a single call so a failure
  /// never leaves a partially written line behind it.
  ///
  /// Returns the total number of bytes written.
  ///
  /// # Errors
  ///
  /// Propagates the first write error from the underlying writer.
  pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
    let fields = [
      ("protocol", self.protocol.as_str()),
      ("host", self.host.as_str()),
      ("path", self.path.as_str()),
      ("username", self.username.as_str()),
      ("password", self.password.as_str()),
      ("password_expiry_utc", self.password_expiry_utc.as_str()),
      ("oauth_refresh_token", self.oauth_refresh_token.as_str()),
    ];

    let mut written = 0;
    for (key, value) in fields {
      if value.is_empty() {
        continue;
      }

      let line = format!("{key}={value}\n");
      writer.write_all(line.as_bytes())?;
      written += line.len();
    }

    Ok(written)
  }

  /// Assign a parsed value to the matching field, dropping unknown keys.
  fn assign(&mut self, key: &str, value: String) {
    match key {
      "protocol" => self.protocol = value,
      "host" => self.host = value,
      "path" => self.path = value,
      "username" => self.username = value,
      "password" => self.password = value,
      "password_expiry_utc" => self.password_expiry_utc = value,
      "oauth_refresh_token" => self.oauth_refresh_token = value,
      _ => {}
    }
  }
}

/// Read the next key, consuming up to and including its `=` terminator.
///
/// Returns `Ok(None)` when the input is cleanly exhausted before any key
/// byte is read. Input that ends after a partial key is an error.
fn read_key<R: BufRead>(reader: &mut R) -> Result<Option<String>, ParseError> {
  let mut buf = Vec::new();
  let n = reader.read_until(b'=', &mut buf)?;
  if n == 0 {
    return Ok(None);
  }

  if buf.last() != Some(&b'=') {
    return Err(ParseError::UnexpectedEof);
  }

  buf.pop();
  Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read the next value, consuming up to and including its newline.
fn read_value<R: BufRead>(reader: &mut R) -> Result<String, ParseError> {
  let mut buf = Vec::new();
  reader.read_until(b'\n', &mut buf)?;
  if buf.last() != Some(&b'\n') {
    return Err(ParseError::UnexpectedEof);
  }

  buf.pop();
  Ok(String::from_utf8_lossy(&buf).into_owned())
}
