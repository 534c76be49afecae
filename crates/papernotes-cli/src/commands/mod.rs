//! Subcommands of the CLI.

use super::*;

pub mod add;
pub mod config;
pub mod init;
pub mod preview;

pub use add::add;
pub use config::config;
pub use init::init;
pub use preview::preview;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a default configuration file
  Init(init::InitArgs),

  /// Turn a paper into a note in the vault
  Add(add::AddArgs),

  /// Print the note for a paper without writing anything
  Preview(preview::PreviewArgs),

  /// Show or change settings
  #[command(subcommand)]
  Config(config::ConfigCommands),
}
