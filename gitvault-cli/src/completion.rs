//! # Shell Completion
//!
//! Generates shell completion scripts for various shells (bash, zsh, fish,
//! PowerShell) to provide tab completion for the helper's commands and
//! arguments.

use std::io;

use anyhow::{Result, bail};
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::Cli;

/// Map a shell name to the clap_complete generator for it
pub fn parse_shell(name: &str) -> Result<clap_complete::Shell> {
  match name {
    "bash" => Ok(clap_complete::Shell::Bash),
    "zsh" => Ok(clap_complete::Shell::Zsh),
    "fish" => Ok(clap_complete::Shell::Fish),
    "powershell" => Ok(clap_complete::Shell::PowerShell),
    other => bail!("Unsupported shell: {other}"),
  }
}

/// Generate shell completions for the specified shell
pub fn generate_completions(shell: clap_complete::Shell) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, &mut io::stdout());

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap_complete::Shell;

  use super::{generate_completions, parse_shell};

  #[test]
  fn test_parse_shell_accepts_supported_shells() {
    assert_eq!(parse_shell("bash").unwrap(), Shell::Bash);
    assert_eq!(parse_shell("zsh").unwrap(), Shell::Zsh);
    assert_eq!(parse_shell("fish").unwrap(), Shell::Fish);
    assert_eq!(parse_shell("powershell").unwrap(), Shell::PowerShell);
    assert!(parse_shell("csh").is_err());
  }

  #[test]
  fn test_generate_completions_succeeds() {
    // Test that generating completions for each shell doesn't panic
    let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    for shell in shells {
      let result = generate_completions(shell);
      assert!(result.is_ok(), "Failed to generate completions for {:?}", shell);
    }
  }
}
