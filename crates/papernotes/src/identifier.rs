//! Reduction of user input to a bare catalog identifier.
//!
//! People paste whatever their browser shows: the abstract page, the PDF link, with or
//! without the `.pdf` suffix. All of these reduce to the same [`PaperId`]:
//!
//! ```
//! use papernotes::identifier::PaperId;
//!
//! for input in [
//!   "2301.07041",
//!   "https://arxiv.org/abs/2301.07041",
//!   "https://arxiv.org/pdf/2301.07041",
//!   "https://arxiv.org/pdf/2301.07041.pdf",
//! ] {
//!   assert_eq!(PaperId::new(input).as_str(), "2301.07041");
//! }
//! ```
//!
//! The shape of the remaining token is not validated. An identifier the catalog does not know
//! fails at fetch time instead.

use super::*;

/// Base URL of the arXiv catalog, with trailing slash.
pub const ARXIV_BASE_URL: &str = "https://arxiv.org/";

/// A bare catalog identifier such as `2301.07041` or `math.AG/0601001`.
///
/// Never carries a URL scheme, an `abs/`/`pdf/` path prefix or a `.pdf`/`.html` extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperId(String);

impl PaperId {
  /// Normalizes raw input against the arXiv catalog URLs.
  pub fn new(input: &str) -> Self { Self::with_base(input, ARXIV_BASE_URL) }

  /// Normalizes raw input against the URLs of the catalog rooted at `base_url`.
  ///
  /// Strips `{base_url}abs/` or `{base_url}pdf/`, then a trailing `.pdf`, then a trailing
  /// `.html`. Surrounding whitespace is dropped first.
  pub fn with_base(input: &str, base_url: &str) -> Self {
    let base = base_url.trim_end_matches('/');
    let abs_prefix = format!("{base}/abs/");
    let pdf_prefix = format!("{base}/pdf/");

    let input = input.trim();
    let id = input
      .strip_prefix(abs_prefix.as_str())
      .or_else(|| input.strip_prefix(pdf_prefix.as_str()))
      .unwrap_or(input);
    let id = id.strip_suffix(".pdf").unwrap_or(id);
    let id = id.strip_suffix(".html").unwrap_or(id);

    trace!("Normalized {input:?} to identifier {id:?}");
    Self(id.to_string())
  }

  /// The identifier as a string slice.
  pub fn as_str(&self) -> &str { &self.0 }

  /// File name of the paper's PDF, e.g. `2301.07041.pdf`.
  pub fn document_file_name(&self) -> String { format!("{}.pdf", self.0) }
}

impl Display for PaperId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for PaperId {
  fn as_ref(&self) -> &str { &self.0 }
}
