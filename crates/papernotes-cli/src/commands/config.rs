//! Module for showing and changing settings.

use super::*;

/// Subcommands of [`Commands::Config`]
#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
  /// Print every setting
  Show,

  /// Change one setting and save it
  Set {
    /// One of: template, authors_as_link, file_name_format, folder, pdf_folder, download_pdf
    key:   String,
    /// New value; an empty folder name restores its default
    value: String,
  },
}

/// Function for the [`Commands::Config`] in the CLI.
pub async fn config<I: UserInteraction>(
  cli: &Cli,
  interaction: &I,
  config_command: &ConfigCommands,
) -> Result<()> {
  let mut store = cli.config_store()?;
  match config_command {
    ConfigCommands::Show => interaction.reply(ResponseContent::Config(&store)),
    ConfigCommands::Set { key, value } => {
      store.set(key, value)?;
      interaction.reply(ResponseContent::Success(&format!("Saved {key} to {}", store.path().display())))?;
      interaction.reply(ResponseContent::Config(&store))
    },
  }
}
