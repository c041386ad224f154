//! # Gitvault CLI Library
//!
//! Command-line modules for the `git-credential-gitvault` helper: the clap
//! command definitions, the configure verb that registers the helper with
//! git, and shell completion generation.

pub mod cli;
pub mod completion;
