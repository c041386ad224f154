//! # Gitvault Core Library
//!
//! The credential protocol engine behind the `git-credential-gitvault`
//! helper: the wire codec for git's `key=value` credential records, the
//! deterministic mapping from a credential description to a secret store
//! key, the get/store/erase operations, and the bundled store backends.

pub mod config;
pub mod ops;
pub mod output;
pub mod record;
pub mod resolve;
pub mod store;

// Re-export the main types for helper frontends
pub use config::{ConfigDirs, Settings, resolve_store_dir};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use record::{Credential, ParseError};
pub use resolve::store_path;
pub use store::{DirStore, MemoryStore, Secret, SecretStore, StoreError};
