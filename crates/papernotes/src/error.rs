//! Error types for the papernotes library.
//!
//! Only genuine failures live here. A missing abstract section degrades into a note with
//! unresolved placeholders, and an already existing PDF or note is reported through
//! [`DocumentStatus`](crate::pipeline::DocumentStatus) and
//! [`NoteOutcome`](crate::pipeline::NoteOutcome) instead of an error.
//!
//! # Examples
//!
//! ```no_run
//! use papernotes::{config::Config, error::PaperNotesError, pipeline::PaperNotes, vault::FsVault};
//!
//! # async fn example() -> Result<(), PaperNotesError> {
//! let notes = PaperNotes::new(FsVault::new("."));
//! match notes.render_paper_note("2301.07041", &Config::default()).await {
//!   Err(PaperNotesError::Network(e)) => println!("Could not reach arXiv: {e}"),
//!   Err(PaperNotesError::Storage(e)) => println!("Could not write the note: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(outcome) => println!("{outcome}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`papernotes`](crate) crate.
pub type Result<T> = core::result::Result<T, PaperNotesError>;

/// Errors that can occur while turning a paper into a note.
#[derive(Error, Debug)]
pub enum PaperNotesError {
  /// A network request to the catalog failed.
  ///
  /// This covers:
  /// - The network or server being unreachable
  /// - TLS errors
  /// - Non-success HTTP status codes (e.g. 404 for an unknown identifier)
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The catalog answered with an empty body.
  ///
  /// The string parameter is the URL that was requested.
  #[error("Empty response from {0}")]
  EmptyResponse(String),

  /// The catalog base URL is not an absolute URL.
  #[error("Invalid catalog URL: {0}")]
  InvalidCatalogUrl(String),

  /// A storage operation failed.
  ///
  /// This occurs when:
  /// - Creating a folder inside the vault fails
  /// - Writing the PDF or the note fails
  /// - Reading or writing the configuration file fails
  #[error(transparent)]
  Storage(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value was rejected.
  #[error("{0}")]
  Config(String),

  /// A CSS selector used by the extractor failed to compile.
  #[error("Invalid selector: {0}")]
  Selector(String),
}
