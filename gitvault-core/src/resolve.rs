//! # Store Path Resolution
//!
//! Maps a partial credential description to the store key that addresses its
//! secret. The mapping is deterministic so that `get`, `store`, and `erase`
//! all land on the same entry for the same request.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Credential;

// Characters outside this set could collide with the key separator or be
// rejected by a filesystem-backed store, so they are flattened to '_'.
static UNSAFE_SEGMENT_CHARS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^A-Za-z0-9@._+-]").expect("Failed to compile store segment regex"));

/// Replaces every character that is unsafe in a store key segment with `_`.
pub fn clean_segment(raw: &str) -> String {
  UNSAFE_SEGMENT_CHARS.replace_all(raw, "_").into_owned()
}

/// Derives the store key for a credential description.
///
/// The key is built from the configured store prefix (if any), a literal
/// `git` segment, the sanitized host, the first segment of the repository
/// path (if git was configured to send one), and the sanitized username.
/// Empty segments are skipped, so a request without a username resolves to
/// the key ending at the host or repository segment.
///
/// Only the first repository path segment is kept. It conventionally names
/// the organization or owner, and folding deeper segments away keeps one
/// credential per (host, owner, user) instead of one per repository. The
/// segment is assumed to already be a safe identifier and is not sanitized.
///
/// This is a pure function of its inputs; it performs no I/O.
pub fn store_path(prefix: &str, credential: &Credential) -> String {
  let mut segments: Vec<String> = Vec::new();

  if !prefix.is_empty() {
    segments.extend(prefix.split('/').map(str::to_owned));
  }

  segments.push("git".to_string());
  segments.push(clean_segment(&credential.host));

  if let Some(owner) = credential.path.split('/').find(|segment| !segment.is_empty()) {
    segments.push(owner.to_string());
  }

  segments.push(clean_segment(&credential.username));

  segments.retain(|segment| !segment.is_empty());
  segments.join("/")
}
