//! Module for writing a fresh configuration file.

use super::*;

/// Arguments that can be used for the [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitArgs {
  /// Also create the notes folder in the vault
  #[arg(long)]
  pub create_folder: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(cli: &Cli, interaction: &I, init_args: &InitArgs) -> Result<()> {
  let mut store = cli.config_store()?;

  if store.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}. Overwrite it with the defaults?",
      store.path().display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(());
  }

  store.replace(Config::default())?;
  interaction.reply(ResponseContent::Success(&format!(
    "Wrote default configuration to {}",
    store.path().display()
  )))?;

  if init_args.create_folder {
    let notes = cli.paper_notes()?;
    let folder = &store.config().folder;
    if !notes.vault().exists(folder).await? {
      notes.vault().create_folder(folder).await?;
    }
    interaction.reply(ResponseContent::Info(&format!(
      "Notes folder ready at {}",
      notes.vault().resolve(folder)?.display()
    )))?;
  }
  Ok(())
}
