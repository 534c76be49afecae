//! Extraction of raw metadata from an arXiv abstract page.
//!
//! The abstract page wraps everything of interest in a single container:
//!
//! ```html
//! <div id="abs">
//!   <h1 class="title mathjax"><span class="descriptor">Title:</span>Foo</h1>
//!   <div class="authors"><span class="descriptor">Authors:</span><a>Alice</a>, <a>Bob</a></div>
//!   <blockquote class="abstract mathjax"><span class="descriptor">Abstract:</span>...</blockquote>
//! </div>
//! ```
//!
//! Fields are taken as the text content of the first matching element inside the container,
//! labels included. Cleaning them up is the job of [`normalize`](crate::normalize).

use scraper::{Html, Selector};

use super::*;

/// Title used when the page has no title text at all.
pub const NO_TITLE: &str = "No title";

/// Selector for the abstract container.
const SECTION_SELECTOR: &str = "#abs";
/// Selector for the title inside the container.
const TITLE_SELECTOR: &str = ".title";
/// Selector for the author list inside the container.
const AUTHORS_SELECTOR: &str = ".authors";
/// Selector for the abstract inside the container.
const ABSTRACT_SELECTOR: &str = ".abstract";

/// Raw fields read from the abstract page.
///
/// The title is always set, falling back to [`NO_TITLE`]. Authors and abstract stay `None` when
/// their element is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
  /// Title text, still carrying its `Title:` label
  pub title:           String,
  /// Comma separated author names, still carrying the `Authors:` label
  pub authors:         Option<String>,
  /// Abstract text with its label and whitespace untouched
  pub abstract_text:   Option<String>,
  /// Whether the abstract container was absent from the markup
  pub missing_section: bool,
}

impl Default for ExtractedFields {
  fn default() -> Self {
    Self { title: NO_TITLE.to_string(), authors: None, abstract_text: None, missing_section: true }
  }
}

/// Parses `html` and reads the title, authors and abstract out of the abstract container.
///
/// A page without the container is not an error: every field except the title fallback is
/// absent and [`ExtractedFields::missing_section`] is set.
///
/// # Examples
///
/// ```
/// use papernotes::extract::extract_fields;
///
/// let html = r#"<div id="abs"><h1 class="title">Title:Foo</h1></div>"#;
/// let fields = extract_fields(html)?;
/// assert_eq!(fields.title, "Title:Foo");
/// assert_eq!(fields.authors, None);
/// # Ok::<(), papernotes::error::PaperNotesError>(())
/// ```
pub fn extract_fields(html: &str) -> Result<ExtractedFields> {
  let section_selector = parse_selector(SECTION_SELECTOR)?;
  let title_selector = parse_selector(TITLE_SELECTOR)?;
  let authors_selector = parse_selector(AUTHORS_SELECTOR)?;
  let abstract_selector = parse_selector(ABSTRACT_SELECTOR)?;

  let document = Html::parse_document(html);

  let Some(section) = document.select(&section_selector).next() else {
    warn!("No abstract section ({SECTION_SELECTOR}) found in markup");
    return Ok(ExtractedFields::default());
  };

  let text_of = |selector: &Selector| {
    section.select(selector).next().map(|element| element.text().collect::<String>())
  };

  let title = text_of(&title_selector)
    .filter(|title| !title.is_empty())
    .unwrap_or_else(|| NO_TITLE.to_string());
  let authors = text_of(&authors_selector);
  let abstract_text = text_of(&abstract_selector);

  debug!(
    title = %title,
    has_authors = authors.is_some(),
    has_abstract = abstract_text.is_some(),
    "Extracted fields from abstract section"
  );

  Ok(ExtractedFields { title, authors, abstract_text, missing_section: false })
}

/// Compiles a CSS selector, mapping failures into [`PaperNotesError::Selector`].
fn parse_selector(input: &str) -> Result<Selector> {
  Selector::parse(input).map_err(|e| PaperNotesError::Selector(format!("{input}: {e}")))
}
