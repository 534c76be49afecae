//! Cleanup of extracted fields before rendering.
//!
//! The rules are plain string operations:
//!
//! - title: the first `Title:` label is removed, nothing else
//! - abstract: the first `Abstract:` label is removed, newlines become spaces, the *first*
//!   double space is collapsed once, tabs are dropped and the ends are trimmed
//! - authors: optionally split on `", "` and wrapped as `[[Name]]` wiki links
//!
//! The abstract rule does a single collapse pass, so `"a  b  c"` becomes `"a b  c"`.

use super::*;

/// Label arXiv puts in front of the title.
pub const TITLE_LABEL: &str = "Title:";
/// Label arXiv puts in front of the author list.
pub const AUTHORS_LABEL: &str = "Authors:";
/// Label arXiv puts in front of the abstract.
pub const ABSTRACT_LABEL: &str = "Abstract:";
/// Separator between author names, both when splitting and joining.
pub const AUTHOR_DELIMITER: &str = ", ";

/// Fields ready to be substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
  /// Title without its label
  pub title:         String,
  /// Authors, raw or as `[[Name]]` links
  pub authors:       Option<String>,
  /// Single-line abstract
  pub abstract_text: Option<String>,
}

impl NormalizedFields {
  /// Applies every field rule to `fields`.
  ///
  /// Authors are linked only when `authors_as_link` is set; otherwise they pass through
  /// exactly as extracted, label included.
  pub fn from_extracted(fields: &ExtractedFields, authors_as_link: bool) -> Self {
    let authors = match &fields.authors {
      Some(authors) if authors_as_link && !authors.is_empty() => Some(link_authors(authors)),
      authors => authors.clone(),
    };

    Self {
      title: normalize_title(&fields.title),
      authors,
      abstract_text: fields.abstract_text.as_deref().map(normalize_abstract),
    }
  }
}

/// Removes the first `Title:` label.
pub fn normalize_title(title: &str) -> String { title.replacen(TITLE_LABEL, "", 1) }

/// Flattens the abstract onto a single line.
///
/// # Examples
///
/// ```
/// use papernotes::normalize::normalize_abstract;
///
/// assert_eq!(normalize_abstract("Abstract:\nHello  World\t"), "Hello World");
/// assert_eq!(normalize_abstract("a  b  c"), "a b  c");
/// ```
pub fn normalize_abstract(text: &str) -> String {
  let text = text
    .replacen(ABSTRACT_LABEL, "", 1)
    .replace('\n', " ")
    .replacen("  ", " ", 1)
    .replace('\t', "");
  text.trim().to_string()
}

/// Wraps every author in `[[...]]`, dropping the `Authors:` label from the first one.
///
/// # Examples
///
/// ```
/// use papernotes::normalize::link_authors;
///
/// assert_eq!(link_authors("Authors:Alice, Bob"), "[[Alice]], [[Bob]]");
/// ```
pub fn link_authors(authors: &str) -> String {
  authors
    .split(AUTHOR_DELIMITER)
    .enumerate()
    .map(|(index, name)| {
      if index == 0 {
        format!("[[{}]]", name.replacen(AUTHORS_LABEL, "", 1))
      } else {
        format!("[[{name}]]")
      }
    })
    .collect::<Vec<_>>()
    .join(AUTHOR_DELIMITER)
}
