//! Command line interface for turning arXiv papers into markdown notes.
//!
//! This crate drives the `papernotes` library from a terminal. It supports:
//! - Writing a default configuration file
//! - Adding a paper as a note (and optionally its PDF) to a vault directory
//! - Previewing the rendered note without writing anything
//! - Showing and changing individual settings
//!
//! # Usage
//!
//! ```bash
//! # Write the default configuration
//! papernotes init
//!
//! # Add a paper to the vault in the current directory
//! papernotes add 2301.07041
//!
//! # Add a paper from a copied URL into another vault, skipping the PDF
//! papernotes --vault ~/notes add https://arxiv.org/abs/2301.07041 --no-pdf
//!
//! # Look at the rendered note first
//! papernotes preview 2301.07041
//!
//! # Name notes by identifier from now on
//! papernotes config set file_name_format id
//! ```
//!
//! Logging goes to stderr and is controlled by `-v` (repeatable) or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use papernotes::{
  catalog::Catalog,
  config::{Config, ConfigStore},
  pipeline::{DocumentStatus, NoteOutcome, PaperNotes, PreparedNote},
  template::unresolved_placeholders,
  vault::{FsVault, Vault},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Turn arXiv papers into templated markdown notes")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Vault directory notes and PDFs are written into. Defaults to the current directory.
  #[arg(long, global = true)]
  vault: Option<PathBuf>,

  /// Base URL of the paper catalog (mostly for testing)
  #[arg(long, hide = true, global = true)]
  catalog_url: Option<String>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

impl Cli {
  /// Opens the configuration store selected on the command line.
  fn config_store(&self) -> Result<ConfigStore> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    debug!("Using configuration at {}", path.display());
    Ok(ConfigStore::open(path)?)
  }

  /// Builds the pipeline for the selected vault and catalog.
  fn paper_notes(&self) -> Result<PaperNotes<FsVault>> {
    let root = self.vault.clone().unwrap_or_else(|| PathBuf::from("."));
    let notes = PaperNotes::new(FsVault::new(root));
    Ok(match &self.catalog_url {
      Some(url) => notes.with_catalog(Catalog::with_base_url(url)?),
      None => notes,
    })
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the papernotes CLI application
///
/// # Errors
///
/// Returns [`PaperNotesCliError`] when fetching, writing, the configuration or a prompt fails.
/// The error is also printed in a readable form before exiting.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let terminal = Terminal::new(cli.accept_defaults);
  let result = match &cli.command {
    Commands::Init(init_args) => init(&cli, &terminal, init_args).await,
    Commands::Add(add_args) => add(&cli, &terminal, add_args).await,
    Commands::Preview(preview_args) => preview(&cli, &terminal, preview_args).await,
    Commands::Config(config_command) => config(&cli, &terminal, config_command).await,
  };

  if let Err(e) = &result {
    terminal.reply(ResponseContent::Error(e))?;
  }
  result
}
