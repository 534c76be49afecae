//! Templated markdown notes for academic papers.
//!
//! `papernotes` takes an arXiv identifier (or a URL copied from the browser), fetches the
//! paper's abstract page, pulls the title, authors and abstract out of the markup and renders
//! them into a user-defined note template. The resulting note, and optionally the paper's PDF,
//! are written into a vault of markdown files.
//!
//! # Pipeline
//!
//! Each invocation runs one strictly sequential chain:
//!
//! 1. [`identifier`]: strip URL prefixes and extensions down to a bare [`PaperId`]
//! 2. [`catalog`]: fetch the abstract page (and later the PDF) over HTTP
//! 3. [`extract`]: locate the abstract section and read the raw fields
//! 4. [`normalize`]: clean labels and whitespace, optionally link authors
//! 5. [`template`]: substitute the fields into the configured template
//! 6. [`pipeline`]: write the PDF and the note into the [`vault`], skipping duplicates
//!
//! # Getting Started
//!
//! ```no_run
//! use papernotes::{config::Config, pipeline::PaperNotes, vault::FsVault};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::default();
//!   let notes = PaperNotes::new(FsVault::new("my-vault"));
//!
//!   let outcome = notes.render_paper_note("https://arxiv.org/abs/2301.07041", &config).await?;
//!   println!("{outcome}");
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`config`]: Render configuration and its on-disk store
//! - [`catalog`]: HTTP access to the arXiv abstract and PDF endpoints
//! - [`error`]: Error type shared by every stage
//! - [`vault`]: Storage abstraction the notes are written through
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod identifier;
pub mod normalize;
pub mod pipeline;
pub mod template;
pub mod vault;

use crate::{
  catalog::*, config::*, error::*, extract::*, identifier::*, normalize::*, template::*, vault::*,
};

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use papernotes::{config::Config, pipeline::PaperNotes, prelude::*, vault::FsVault};
///
/// async fn example() -> Result<(), PaperNotesError> {
///   let notes = PaperNotes::new(FsVault::new("."));
///   notes.render_paper_note("2301.07041", &Config::default()).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::PaperNotesError, vault::Vault};
}
