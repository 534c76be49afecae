//! Module for adding a paper to the vault.

use super::*;

/// Arguments that can be used for the [`Commands::Add`]
#[derive(Args, Clone)]
pub struct AddArgs {
  /// arXiv identifier or a copied abstract/PDF URL
  /// Examples: "2301.07041", "https://arxiv.org/abs/2301.07041"
  pub identifier: String,

  /// Download the PDF regardless of the configuration
  #[arg(long, group = "pdf_behavior")]
  pub pdf: bool,

  /// Skip the PDF regardless of the configuration
  #[arg(long, group = "pdf_behavior")]
  pub no_pdf: bool,
}

/// Function for the [`Commands::Add`] in the CLI.
pub async fn add<I: UserInteraction>(cli: &Cli, interaction: &I, add_args: &AddArgs) -> Result<()> {
  let AddArgs { identifier, pdf, no_pdf } = add_args;

  let config = cli.config_store()?.config().clone();
  let config = match (*pdf, *no_pdf) {
    (true, _) => config.with_download_pdf(true),
    (_, true) => config.with_download_pdf(false),
    _ => config,
  };

  let notes = cli.paper_notes()?;
  interaction.reply(ResponseContent::Info(&format!("Fetching paper: {identifier}")))?;
  let outcome = notes.render_paper_note(identifier, &config).await?;
  interaction.reply(ResponseContent::Outcome(&outcome))
}
