//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the credential
//! helper: the three protocol verbs git invokes, plus the configure and
//! completion commands for setting the helper up.

mod completion;
mod configure;

use std::io::{self, IsTerminal};

use anyhow::{Result, bail};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use gitvault_core::output::ColorMode;
use gitvault_core::{ConfigDirs, DirStore, ops, resolve_store_dir};

/// Top-level CLI command for the credential helper
#[derive(Parser)]
#[command(name = "git-credential-gitvault")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "A git credential helper backed by a key-addressed secret store")]
#[command(
  long_about = "git-credential-gitvault answers git's credential protocol out of a local\n\
        secret store. git invokes the get, store, and erase verbs with a credential\n\
        description on stdin; the helper maps the description to a store key and\n\
        returns, saves, or drops the matching secret."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Store prefix to keep credentials under
  #[arg(
    long,
    global = true,
    value_name = "PREFIX",
    long_help = "Store prefix to keep credentials under.\n\n\
             Credentials are addressed as <prefix>/git/<host>/... inside the secret\n\
             store, so different prefixes keep independent sets of credentials.\n\
             Defaults to the 'store' value from the configuration file, or no prefix."
  )]
  pub store: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the credential helper
#[derive(Subcommand)]
pub enum Commands {
  /// Look up a credential for the description read from stdin
  #[command(long_about = "Look up a credential for the description read from stdin.\n\n\
            Prints the completed credential record on stdout when a matching store\n\
            entry exists, and nothing at all when it does not. git invokes this verb\n\
            whenever it needs a password for a remote.")]
  Get,

  /// Save the credential read from stdin to the secret store
  #[command(long_about = "Save the credential read from stdin to the secret store.\n\n\
            An entry that already exists for the same host and user is left in place;\n\
            git erases credentials it has rejected before storing replacements.")]
  Store,

  /// Remove the credential matching the description read from stdin
  #[command(long_about = "Remove the credential matching the description read from stdin.\n\n\
            git invokes this verb when a credential was rejected by the remote.\n\
            Erasing a credential that is not stored is not an error.")]
  Erase,

  /// Register this helper in git configuration
  #[command(long_about = "Register this helper in git configuration.\n\n\
            Sets credential.helper so that git starts routing credential requests to\n\
            this helper. Use --local, --global, or --system to pick the configuration\n\
            file to write to; the default is --global.")]
  Configure(configure::ConfigureArgs),

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for the helper.\n\n\
            This command generates completion scripts that provide tab completion\n\
            for commands and options in your shell. Supported shells include bash,\n\
            zsh, and fish.")]
  Completion(completion::CompletionArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {
      // Let owo_colors use its default auto-detection
      // Don't call set_override, allowing it to detect terminal automatically
    }
  }

  match cli.command {
    Commands::Get => {
      let (store, prefix) = protocol_context(cli.store.as_deref())?;
      require_piped_stdin()?;
      let stdin = io::stdin();
      let stdout = io::stdout();
      ops::get(&store, &prefix, &mut stdin.lock(), &mut stdout.lock())
    }
    Commands::Store => {
      let (store, prefix) = protocol_context(cli.store.as_deref())?;
      require_piped_stdin()?;
      let stdin = io::stdin();
      ops::store(&store, &prefix, &mut stdin.lock())
    }
    Commands::Erase => {
      let (store, prefix) = protocol_context(cli.store.as_deref())?;
      require_piped_stdin()?;
      let stdin = io::stdin();
      ops::erase(&store, &prefix, &mut stdin.lock())
    }
    Commands::Configure(configure) => configure::handle_configure_command(configure, cli.store.as_deref()),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
  }
}

/// Open the configured store and resolve the prefix for a protocol verb
fn protocol_context(store_flag: Option<&str>) -> Result<(DirStore, String)> {
  let dirs = ConfigDirs::new()?;
  let settings = dirs.load_settings()?;

  let prefix = store_flag
    .map(str::to_owned)
    .or_else(|| settings.store.clone())
    .unwrap_or_default();

  let store = DirStore::open(resolve_store_dir(&settings, &dirs));
  Ok((store, prefix))
}

/// The protocol verbs are only ever driven by git over a pipe
fn require_piped_stdin() -> Result<()> {
  if io::stdin().is_terminal() {
    bail!("missing stdin from git");
  }

  Ok(())
}
