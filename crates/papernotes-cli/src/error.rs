//! Error types for the papernotes CLI.

use thiserror::Error;

/// Result alias for the CLI.
pub type Result<T> = core::result::Result<T, PaperNotesCliError>;

/// Errors surfaced to the user by the CLI.
#[derive(Error, Debug)]
pub enum PaperNotesCliError {
  /// Anything the library reports.
  #[error(transparent)]
  PaperNotes(#[from] papernotes::error::PaperNotesError),

  /// Reading from or writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),
}
