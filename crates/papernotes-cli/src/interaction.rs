//! Terminal output and prompts.

use console::{style, StyledObject, Term};
use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for list items
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last list item
pub static LAST_ITEM_PREFIX: &str = "└─";

/// Everything a command can show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Result of adding a paper
  Outcome(&'a NoteOutcome),
  /// A rendered note that was not written
  Preview(&'a PreparedNote),
  /// The active configuration and where it lives
  Config(&'a ConfigStore),
  /// Something worked
  Success(&'a str),
  /// Something worth knowing
  Info(&'a str),
  /// Something that did not go as planned but is not fatal
  Warning(&'a str),
  /// Something failed
  Error(&'a PaperNotesCliError),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interactive terminal on stdout/stderr.
pub struct Terminal {
  /// Answer every prompt with its default instead of asking
  accept_defaults: bool,
  /// Standard output
  out:             Term,
  /// Standard error
  err:             Term,
}

impl Terminal {
  /// Creates a terminal, optionally answering every prompt with "yes".
  pub fn new(accept_defaults: bool) -> Self {
    Self { accept_defaults, out: Term::stdout(), err: Term::stderr() }
  }

  /// Prints the result of adding a paper.
  fn outcome(&self, outcome: &NoteOutcome) -> Result<()> {
    match outcome {
      NoteOutcome::Created { note, document, opened, missing_section } => {
        self.document(document)?;
        if *missing_section {
          self.warning("No abstract section found on the page; the note has placeholders left")?;
        } else {
          let unresolved = unresolved_placeholders(&note.content);
          if !unresolved.is_empty() {
            self.warning(&format!("Unfilled placeholders: {}", unresolved.join(", ")))?;
          }
        }
        self.success(&format!("Created note {}", style(&note.path).cyan()))?;
        if *opened {
          self.info("Opened note")?;
        }
      },
      NoteOutcome::Duplicate { path, document } => {
        self.document(document)?;
        self.warning(&format!("File already exists: {}", style(path).cyan()))?;
      },
    }
    Ok(())
  }

  /// Prints what happened to the PDF.
  fn document(&self, document: &DocumentStatus) -> Result<()> {
    match document {
      DocumentStatus::Disabled => Ok(()),
      DocumentStatus::Downloaded(_) => self.success(&document.to_string()),
      DocumentStatus::Duplicate(_) => self.warning(&document.to_string()),
    }
  }

  /// Prints a rendered note with a short header.
  fn preview(&self, prepared: &PreparedNote) -> Result<()> {
    self.info(&format!("Preview of {}", style(&prepared.id).cyan()))?;
    self.out.write_line("")?;
    self.out.write_line(&prepared.content)?;
    Ok(())
  }

  /// Prints every setting as a tree.
  fn config(&self, store: &ConfigStore) -> Result<()> {
    let config = store.config();
    let source = if store.exists() { "" } else { " (not written yet, showing defaults)" };
    self.info(&format!("Configuration at {}{source}", store.path().display()))?;

    let entries = [
      ("template", format!("{:?}", config.template.as_str())),
      ("authors_as_link", config.authors_as_link.to_string()),
      ("file_name_format", config.file_name_format.to_string()),
      ("folder", config.folder.clone()),
      ("pdf_folder", config.pdf_folder.clone()),
      ("download_pdf", config.download_pdf.to_string()),
    ];
    for (index, (key, value)) in entries.iter().enumerate() {
      let prefix = if index + 1 == entries.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      self.out.write_line(&format!("{} {}: {}", style(prefix).dim(), style(key).bold(), value))?;
    }
    Ok(())
  }

  /// Prints a success message to stdout.
  fn success(&self, message: &str) -> Result<()> {
    self.write(&self.out, style(SUCCESS_PREFIX).green().bold(), message)
  }

  /// Prints an informational message to stdout.
  fn info(&self, message: &str) -> Result<()> {
    self.write(&self.out, style(INFO_PREFIX).blue().bold(), message)
  }

  /// Prints a warning to stderr.
  fn warning(&self, message: &str) -> Result<()> {
    self.write(&self.err, style(WARNING_PREFIX).yellow().bold(), message)
  }

  /// Prints an error to stderr.
  fn error(&self, message: &str) -> Result<()> {
    self.write(&self.err, style(ERROR_PREFIX).red().bold(), message)
  }

  /// Writes one prefixed line.
  fn write(&self, term: &Term, prefix: StyledObject<&str>, message: &str) -> Result<()> {
    term.write_line(&format!("{prefix}{message}"))?;
    Ok(())
  }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(false)
        .interact()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Outcome(outcome) => self.outcome(outcome),
      ResponseContent::Preview(prepared) => self.preview(prepared),
      ResponseContent::Config(store) => self.config(store),
      ResponseContent::Success(message) => self.success(message),
      ResponseContent::Info(message) => self.info(message),
      ResponseContent::Warning(message) => self.warning(message),
      ResponseContent::Error(error) => self.error(&error.to_string()),
    }
  }
}
