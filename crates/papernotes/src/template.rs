//! Placeholder substitution for note templates.
//!
//! A template is plain text with up to four recognized placeholders:
//!
//! | Placeholder    | Value                                        |
//! |----------------|----------------------------------------------|
//! | `{{title}}`    | normalized title                             |
//! | `{{authors}}`  | author list, linked or raw                   |
//! | `{{abstract}}` | single-line abstract                         |
//! | `{{pdf_file}}` | vault path of the PDF, whether downloaded or not |
//!
//! Only the first occurrence of each placeholder is replaced, and a placeholder whose field is
//! absent or empty is left in the note as-is. Leftovers can be listed with
//! [`unresolved_placeholders`].

use super::*;

/// Placeholder for the paper title.
pub const TITLE_PLACEHOLDER: &str = "{{title}}";
/// Placeholder for the author list.
pub const AUTHORS_PLACEHOLDER: &str = "{{authors}}";
/// Placeholder for the abstract.
pub const ABSTRACT_PLACEHOLDER: &str = "{{abstract}}";
/// Placeholder for the PDF path inside the vault.
pub const PDF_FILE_PLACEHOLDER: &str = "{{pdf_file}}";

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str =
  "# {{title}}\nAuthors: {{authors}}\nLink: [PDF]({{pdf_file}})\n\n## Abstract\n{{abstract}}";

lazy_static! {
  /// Matches any recognized placeholder token.
  static ref PLACEHOLDER: Regex = Regex::new(r"\{\{(title|authors|abstract|pdf_file)\}\}").unwrap();
}

/// User-defined note template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteTemplate(String);

impl Default for NoteTemplate {
  fn default() -> Self { Self(DEFAULT_TEMPLATE.to_string()) }
}

impl Display for NoteTemplate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for NoteTemplate {
  fn from(text: &str) -> Self { Self(text.to_string()) }
}

impl From<String> for NoteTemplate {
  fn from(text: String) -> Self { Self(text) }
}

impl NoteTemplate {
  /// Raw template text.
  pub fn as_str(&self) -> &str { &self.0 }

  /// Renders the note text.
  ///
  /// Substitution runs title, authors, abstract, then `pdf_file`, each replacing only the first
  /// occurrence of its placeholder. Values are inserted literally. `pdf_file` is always
  /// substituted.
  ///
  /// # Examples
  ///
  /// ```
  /// use papernotes::{normalize::NormalizedFields, template::NoteTemplate};
  ///
  /// let fields = NormalizedFields {
  ///   title:         "Foo".to_string(),
  ///   authors:       None,
  ///   abstract_text: Some("Hello World".to_string()),
  /// };
  /// let template = NoteTemplate::from("{{title}} / {{title}} / {{authors}} / {{abstract}}");
  /// assert_eq!(
  ///   template.render(&fields, "papers/_pdfs/2301.00001.pdf"),
  ///   "Foo / {{title}} / {{authors}} / Hello World"
  /// );
  /// ```
  #[tracing::instrument(skip(self, fields), level = "debug")]
  pub fn render(&self, fields: &NormalizedFields, pdf_file: &str) -> String {
    let substitutions = [
      (TITLE_PLACEHOLDER, Some(fields.title.as_str())),
      (AUTHORS_PLACEHOLDER, fields.authors.as_deref()),
      (ABSTRACT_PLACEHOLDER, fields.abstract_text.as_deref()),
      (PDF_FILE_PLACEHOLDER, Some(pdf_file)),
    ];

    let mut note = self.0.clone();
    for (placeholder, value) in substitutions {
      match value {
        Some(value) if !value.is_empty() || placeholder == PDF_FILE_PLACEHOLDER =>
          note = note.replacen(placeholder, value, 1),
        _ => trace!("No value for {placeholder}, leaving it in place"),
      }
    }

    let unresolved = unresolved_placeholders(&note);
    if !unresolved.is_empty() {
      warn!(?unresolved, "Rendered note still contains placeholders");
    }
    note
  }
}

/// Lists the recognized placeholders still present in `note`, in order of appearance.
///
/// Unknown tokens such as `{{date}}` are not reported.
pub fn unresolved_placeholders(note: &str) -> Vec<&str> {
  PLACEHOLDER.find_iter(note).map(|m| m.as_str()).collect()
}
