//! Module for rendering a note without writing it.

use super::*;

/// Arguments that can be used for the [`Commands::Preview`]
#[derive(Args, Clone)]
pub struct PreviewArgs {
  /// arXiv identifier or a copied abstract/PDF URL
  pub identifier: String,
}

/// Function for the [`Commands::Preview`] in the CLI.
pub async fn preview<I: UserInteraction>(
  cli: &Cli,
  interaction: &I,
  preview_args: &PreviewArgs,
) -> Result<()> {
  let config = cli.config_store()?.config().clone();
  let prepared = cli.paper_notes()?.preview(&preview_args.identifier, &config).await?;
  if prepared.missing_section {
    interaction.reply(ResponseContent::Warning("No abstract section found on the page"))?;
  }
  interaction.reply(ResponseContent::Preview(&prepared))
}
