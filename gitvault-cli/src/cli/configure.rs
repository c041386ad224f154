//! # Configure Command
//!
//! Registers the helper as git's `credential.helper` by writing to the
//! chosen git configuration file through libgit2.

use anyhow::{Context, Result};
use clap::Args;
use git2::{Config, ConfigLevel, Repository};
use gitvault_core::output::{format_command, print_info, print_success};

/// Command for registering the helper in git configuration
#[derive(Args)]
pub struct ConfigureArgs {
  /// Write to the configuration of the current repository
  #[arg(long, group = "scope")]
  pub local: bool,

  /// Write to the per-user git configuration (the default)
  #[arg(long, group = "scope")]
  pub global: bool,

  /// Write to the system-wide git configuration
  #[arg(long, group = "scope")]
  pub system: bool,
}

/// Installation target for the credential.helper setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigScope {
  Local,
  Global,
  System,
}

impl ConfigScope {
  const fn flag(self) -> &'static str {
    match self {
      Self::Local => "--local",
      Self::Global => "--global",
      Self::System => "--system",
    }
  }
}

impl ConfigureArgs {
  fn scope(&self) -> ConfigScope {
    if self.local {
      ConfigScope::Local
    } else if self.system {
      ConfigScope::System
    } else {
      ConfigScope::Global
    }
  }
}

/// Handle the configure command
///
/// Writes `credential.helper` into the selected git configuration file so
/// that git starts invoking this helper. The scope flags are mutually
/// exclusive; with none given the per-user configuration is used.
pub(crate) fn handle_configure_command(configure: ConfigureArgs, store: Option<&str>) -> Result<()> {
  if !(configure.local || configure.global || configure.system) {
    print_info("No installation target given, assuming --global.");
  }

  let scope = configure.scope();
  let value = helper_value(store);

  let mut config = open_scope_config(scope)?;
  config
    .set_str("credential.helper", &value)
    .context("Failed to update the git configuration")?;

  print_success(&format!("Registered '{value}' as git's credential helper."));
  print_info(&format!(
    "Undo with {}",
    format_command(&format!("git config {} --unset credential.helper", scope.flag()))
  ));

  Ok(())
}

/// The credential.helper value git needs to invoke this helper.
///
/// git resolves a bare helper name by prepending `git-credential-`, so the
/// value stays `gitvault` with the store prefix appended as a flag when one
/// was requested.
fn helper_value(store: Option<&str>) -> String {
  match store {
    Some(prefix) if !prefix.is_empty() => format!("gitvault --store={prefix}"),
    _ => "gitvault".to_string(),
  }
}

/// Open the git configuration file for the requested scope
fn open_scope_config(scope: ConfigScope) -> Result<Config> {
  match scope {
    ConfigScope::Local => {
      let repo = Repository::open_from_env().context("--local requires running inside a git repository")?;
      repo.config().context("Failed to open the repository git configuration")
    }
    ConfigScope::Global => Config::open_default()
      .context("Failed to open the git configuration")?
      .open_level(ConfigLevel::Global)
      .context("Failed to open the per-user git configuration"),
    ConfigScope::System => Config::open_default()
      .context("Failed to open the git configuration")?
      .open_level(ConfigLevel::System)
      .context("Failed to open the system git configuration"),
  }
}
