//! From raw user input to a note in the vault.
//!
//! [`PaperNotes::render_paper_note`] runs the whole chain for one paper:
//!
//! 1. normalize the input into a [`PaperId`]
//! 2. fetch the abstract page from the [`Catalog`]
//! 3. extract, normalize and render the fields ([`prepare_note`])
//! 4. if enabled, make sure the PDF folder exists and download the PDF unless it is already
//!    there
//! 5. name the note, stop if a note already exists at that path
//! 6. make sure the notes folder exists, write the note and open it
//!
//! Every step waits for the previous one; the first failure stops the chain and whatever was
//! already written stays in place. An existing PDF or note is an expected outcome, reported in
//! [`DocumentStatus`] and [`NoteOutcome`] rather than as an error.

use super::*;

/// A note that was written to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteArtifact {
  /// Vault path, `{folder}/{file name}.md`
  pub path:    String,
  /// Rendered note text
  pub content: String,
}

/// A PDF that was written to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
  /// Vault path, `{folder}/{pdf_folder}/{id}.pdf`
  pub path: String,
  /// Number of bytes written
  pub size: usize,
}

/// What happened to the PDF during an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
  /// PDF downloads are turned off
  Disabled,
  /// The PDF was downloaded and written
  Downloaded(DocumentArtifact),
  /// A PDF already existed at this vault path and was left untouched
  Duplicate(String),
}

/// Result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
  /// A new note was written.
  Created {
    /// The written note
    note:            NoteArtifact,
    /// What happened to the PDF
    document:        DocumentStatus,
    /// Whether a view picked up the new note
    opened:          bool,
    /// Whether the abstract section was missing from the page
    missing_section: bool,
  },
  /// A note already existed at the target path; nothing was written.
  Duplicate {
    /// Vault path of the existing note
    path:     String,
    /// What happened to the PDF before the duplicate was found
    document: DocumentStatus,
  },
}

impl Display for DocumentStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DocumentStatus::Disabled => write!(f, "PDF download disabled"),
      DocumentStatus::Downloaded(document) =>
        write!(f, "Downloaded PDF to {} ({} bytes)", document.path, document.size),
      DocumentStatus::Duplicate(path) => write!(f, "PDF already exists: {path}"),
    }
  }
}

impl Display for NoteOutcome {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      NoteOutcome::Created { note, .. } => write!(f, "Created note {}", note.path),
      NoteOutcome::Duplicate { path, .. } => write!(f, "File already exists: {path}"),
    }
  }
}

/// A rendered note that has not been written anywhere yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedNote {
  /// Identifier the note belongs to
  pub id:              PaperId,
  /// Fields that went into the template
  pub fields:          NormalizedFields,
  /// Rendered note text
  pub content:         String,
  /// Whether the abstract section was missing from the page
  pub missing_section: bool,
}

/// Extracts, normalizes and renders the abstract page `html` for `id`.
///
/// This is the pure part of the pipeline; nothing is fetched or written.
pub fn prepare_note(id: &PaperId, html: &str, config: &Config) -> Result<PreparedNote> {
  let extracted = extract_fields(html)?;
  let fields = NormalizedFields::from_extracted(&extracted, config.authors_as_link);
  let content = config.template.render(&fields, &config.document_path(id));
  Ok(PreparedNote { id: id.clone(), fields, content, missing_section: extracted.missing_section })
}

/// File name (without `.md`) of the note for a paper.
///
/// # Examples
///
/// ```
/// use papernotes::{config::FileNameFormat, identifier::PaperId, pipeline::note_file_name};
///
/// let id = PaperId::new("2301.00001");
/// assert_eq!(note_file_name(FileNameFormat::Title, "Attention: A Survey", &id), "Attention- A Survey");
/// assert_eq!(note_file_name(FileNameFormat::Id, "Attention: A Survey", &id), "2301.00001");
/// ```
pub fn note_file_name(format: FileNameFormat, title: &str, id: &PaperId) -> String {
  match format {
    FileNameFormat::Title => title.replacen(':', "-", 1),
    FileNameFormat::Id => id.to_string(),
  }
}

/// Vault path of the note for a paper, `{folder}/{file name}.md`.
pub fn note_path(config: &Config, title: &str, id: &PaperId) -> String {
  format!("{}/{}.md", config.folder, note_file_name(config.file_name_format, title, id))
}

/// Entry point tying a [`Catalog`] to a [`Vault`].
///
/// # Examples
///
/// ```no_run
/// use papernotes::{config::Config, pipeline::{NoteOutcome, PaperNotes}, vault::FsVault};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let notes = PaperNotes::new(FsVault::new("vault"));
/// match notes.render_paper_note("2301.07041", &Config::default()).await? {
///   NoteOutcome::Created { note, .. } => println!("Wrote {}", note.path),
///   NoteOutcome::Duplicate { path, .. } => println!("Already have {path}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PaperNotes<V> {
  /// Where metadata and PDFs come from
  catalog: Catalog,
  /// Where notes and PDFs go
  vault:   V,
}

impl<V: Vault> PaperNotes<V> {
  /// Uses the arXiv catalog and the given vault.
  pub fn new(vault: V) -> Self { Self { catalog: Catalog::new(), vault } }

  /// Replaces the catalog, e.g. with a mirror.
  pub fn with_catalog(mut self, catalog: Catalog) -> Self {
    self.catalog = catalog;
    self
  }

  /// The catalog in use.
  pub fn catalog(&self) -> &Catalog { &self.catalog }

  /// The vault in use.
  pub fn vault(&self) -> &V { &self.vault }

  /// Fetches and renders the note for `input` without touching the vault.
  pub async fn preview(&self, input: &str, config: &Config) -> Result<PreparedNote> {
    let id = self.catalog.identifier(input);
    let html = self.catalog.fetch_abstract_page(&id).await?;
    prepare_note(&id, &html, config)
  }

  /// Turns `input` (an identifier or a catalog URL) into a note in the vault.
  ///
  /// # Errors
  ///
  /// Network failures, empty responses and storage failures stop the pipeline and are
  /// returned as-is. Existing PDFs and notes are not errors; see [`NoteOutcome`].
  pub async fn render_paper_note(&self, input: &str, config: &Config) -> Result<NoteOutcome> {
    let prepared = self.preview(input, config).await?;
    info!("Rendered note for {}", prepared.id);
    self.persist(&prepared, config).await
  }

  /// Writes a prepared note, and the PDF if enabled, into the vault.
  pub async fn persist(&self, prepared: &PreparedNote, config: &Config) -> Result<NoteOutcome> {
    let document = self.store_document(&prepared.id, config).await?;

    let path = note_path(config, &prepared.fields.title, &prepared.id);
    if self.vault.exists(&path).await? {
      warn!("File already exists: {path}");
      return Ok(NoteOutcome::Duplicate { path, document });
    }

    self.ensure_folder(&config.folder).await?;
    self.vault.create(&path, &prepared.content).await?;
    info!("Created note {path}");

    let opened = self.vault.open_recent(&path).await?;

    Ok(NoteOutcome::Created {
      note: NoteArtifact { path, content: prepared.content.clone() },
      document,
      opened,
      missing_section: prepared.missing_section,
    })
  }

  /// Downloads the PDF into the vault unless disabled or already present.
  async fn store_document(&self, id: &PaperId, config: &Config) -> Result<DocumentStatus> {
    if !config.download_pdf {
      return Ok(DocumentStatus::Disabled);
    }

    self.ensure_folder(&config.document_folder()).await?;

    let path = config.document_path(id);
    if self.vault.exists(&path).await? {
      warn!("PDF already exists: {id}");
      return Ok(DocumentStatus::Duplicate(path));
    }

    let data = self.catalog.fetch_document(id).await?;
    self.vault.create_binary(&path, &data).await?;
    info!("Saved PDF to {path}");
    Ok(DocumentStatus::Downloaded(DocumentArtifact { path, size: data.len() }))
  }

  /// Creates the folder at `path` unless something already exists there.
  async fn ensure_folder(&self, path: &str) -> Result<()> {
    if !self.vault.exists(path).await? {
      self.vault.create_folder(path).await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::BTreeMap, sync::Mutex};

  use mockito::{Server, ServerGuard};

  use super::*;

  const PAGE: &str = "<html><body><div id=\"abs\">\
                      <h1 class=\"title mathjax\">Title:Foo</h1>\
                      <div class=\"authors\">Authors:Alice, Bob</div>\
                      <blockquote class=\"abstract mathjax\">Abstract:\nHello  World\t</blockquote>\
                      </div></body></html>";

  const EXPECTED_NOTE: &str =
    "# Foo\nAuthors: [[Alice]], [[Bob]]\nLink: [PDF](papers/_pdfs/2301.00001.pdf)\n\n## Abstract\nHello World";

  /// In-memory vault that records every call in order.
  #[derive(Default)]
  struct RecordingVault {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
    calls:   Mutex<Vec<String>>,
  }

  impl RecordingVault {
    fn with_entry(self, path: &str, data: &[u8]) -> Self {
      self.entries.lock().unwrap().insert(path.to_string(), data.to_vec());
      self
    }

    fn record(&self, call: String) { self.calls.lock().unwrap().push(call); }

    fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

    fn entry(&self, path: &str) -> Option<Vec<u8>> { self.entries.lock().unwrap().get(path).cloned() }
  }

  #[async_trait]
  impl Vault for RecordingVault {
    async fn exists(&self, path: &str) -> Result<bool> {
      self.record(format!("exists {path}"));
      Ok(self.entries.lock().unwrap().contains_key(path))
    }

    async fn create_folder(&self, path: &str) -> Result<()> {
      self.record(format!("create_folder {path}"));
      self.entries.lock().unwrap().insert(path.to_string(), Vec::new());
      Ok(())
    }

    async fn create_binary(&self, path: &str, data: &[u8]) -> Result<()> {
      self.record(format!("create_binary {path}"));
      self.entries.lock().unwrap().insert(path.to_string(), data.to_vec());
      Ok(())
    }

    async fn create(&self, path: &str, content: &str) -> Result<()> {
      self.record(format!("create {path}"));
      let mut entries = self.entries.lock().unwrap();
      if entries.contains_key(path) {
        return Err(std::io::Error::new(std::io::ErrorKind::AlreadyExists, path.to_string()).into());
      }
      entries.insert(path.to_string(), content.as_bytes().to_vec());
      Ok(())
    }

    async fn open_recent(&self, path: &str) -> Result<bool> {
      self.record(format!("open_recent {path}"));
      Ok(true)
    }
  }

  async fn serve_page(body: &str) -> ServerGuard {
    let mut server = Server::new_async().await;
    server
      .mock("GET", "/abs/2301.00001")
      .with_status(200)
      .with_header("content-type", "text/html")
      .with_body(body)
      .create_async()
      .await;
    server
  }

  fn notes_for(server: &ServerGuard, vault: RecordingVault) -> PaperNotes<RecordingVault> {
    PaperNotes::new(vault).with_catalog(Catalog::with_base_url(&server.url()).unwrap())
  }

  #[traced_test]
  #[test]
  fn test_prepare_note_end_to_end_fields() {
    let config = Config::default().with_download_pdf(false);
    let prepared = prepare_note(&PaperId::new("2301.00001"), PAGE, &config).unwrap();
    assert_eq!(prepared.fields.title, "Foo");
    assert_eq!(prepared.fields.authors.as_deref(), Some("[[Alice]], [[Bob]]"));
    assert_eq!(prepared.fields.abstract_text.as_deref(), Some("Hello World"));
    assert_eq!(prepared.content, EXPECTED_NOTE);
    assert!(!prepared.missing_section);
  }

  #[test]
  fn test_note_path() {
    let id = PaperId::new("2301.00001");
    let config = Config::default();
    assert_eq!(note_path(&config, "Attention: A Survey: Part 2", &id), "papers/Attention- A Survey: Part 2.md");

    let config = config.with_file_name_format(FileNameFormat::Id).with_folder("reading");
    assert_eq!(note_path(&config, "Attention: A Survey", &id), "reading/2301.00001.md");
  }

  #[traced_test]
  #[tokio::test]
  async fn test_note_without_download() {
    let mut server = serve_page(PAGE).await;
    let pdf = server.mock("GET", "/pdf/2301.00001.pdf").expect(0).create_async().await;
    let notes = notes_for(&server, RecordingVault::default());
    let config = Config::default().with_download_pdf(false);

    let outcome = notes.render_paper_note("2301.00001", &config).await.unwrap();

    assert_eq!(outcome, NoteOutcome::Created {
      note:            NoteArtifact {
        path:    "papers/Foo.md".to_string(),
        content: EXPECTED_NOTE.to_string(),
      },
      document:        DocumentStatus::Disabled,
      opened:          true,
      missing_section: false,
    });
    assert_eq!(notes.vault().calls(), vec![
      "exists papers/Foo.md",
      "exists papers",
      "create_folder papers",
      "create papers/Foo.md",
      "open_recent papers/Foo.md",
    ]);
    pdf.assert_async().await;
  }

  #[traced_test]
  #[tokio::test]
  async fn test_existing_notes_folder_is_not_created_again() {
    let server = serve_page(PAGE).await;
    let notes = notes_for(&server, RecordingVault::default().with_entry("papers", b""));
    let config = Config::default().with_download_pdf(false);

    notes.render_paper_note("2301.00001", &config).await.unwrap();

    assert_eq!(notes.vault().calls(), vec![
      "exists papers/Foo.md",
      "exists papers",
      "create papers/Foo.md",
      "open_recent papers/Foo.md",
    ]);
  }

  #[traced_test]
  #[tokio::test]
  async fn test_document_downloaded_before_note() {
    let mut server = serve_page(PAGE).await;
    let pdf = server
      .mock("GET", "/pdf/2301.00001.pdf")
      .with_status(200)
      .with_body(b"%PDF-1.5".to_vec())
      .expect(1)
      .create_async()
      .await;
    let notes = notes_for(&server, RecordingVault::default());
    let config = Config::default().with_file_name_format(FileNameFormat::Id);

    let url = format!("{}/pdf/2301.00001.pdf", server.url());
    let outcome = notes.render_paper_note(&url, &config).await.unwrap();
    let NoteOutcome::Created { note, document, .. } = outcome else {
      panic!("expected a created note, got {outcome:?}");
    };
    assert_eq!(note.path, "papers/2301.00001.md");
    assert_eq!(
      document,
      DocumentStatus::Downloaded(DocumentArtifact {
        path: "papers/_pdfs/2301.00001.pdf".to_string(),
        size: 8,
      })
    );
    assert_eq!(notes.vault().entry("papers/_pdfs/2301.00001.pdf").unwrap(), b"%PDF-1.5");

    let calls = notes.vault().calls();
    let position = |call: &str| calls.iter().position(|c| c == call).unwrap();
    assert!(position("create_folder papers/_pdfs") < position("create_binary papers/_pdfs/2301.00001.pdf"));
    assert!(position("create_binary papers/_pdfs/2301.00001.pdf") < position("exists papers/2301.00001.md"));
    assert!(position("exists papers/2301.00001.md") < position("create papers/2301.00001.md"));
    pdf.assert_async().await;
  }

  #[traced_test]
  #[tokio::test]
  async fn test_existing_document_is_not_downloaded_again() {
    let mut server = serve_page(PAGE).await;
    let pdf = server.mock("GET", "/pdf/2301.00001.pdf").expect(0).create_async().await;
    let vault = RecordingVault::default()
      .with_entry("papers/_pdfs", b"")
      .with_entry("papers/_pdfs/2301.00001.pdf", b"old");
    let notes = notes_for(&server, vault);

    let outcome = notes.render_paper_note("2301.00001", &Config::default()).await.unwrap();

    let NoteOutcome::Created { document, .. } = outcome else {
      panic!("expected a created note, got {outcome:?}");
    };
    assert_eq!(document, DocumentStatus::Duplicate("papers/_pdfs/2301.00001.pdf".to_string()));
    assert_eq!(notes.vault().entry("papers/_pdfs/2301.00001.pdf").unwrap(), b"old");
    let calls = notes.vault().calls();
    assert!(calls.contains(&"exists papers/_pdfs".to_string()));
    assert!(!calls.contains(&"create_folder papers/_pdfs".to_string()));
    assert!(logs_contain("PDF already exists"));
    pdf.assert_async().await;
  }

  #[traced_test]
  #[tokio::test]
  async fn test_second_invocation_reports_duplicate_note() {
    let server = serve_page(PAGE).await;
    let notes = notes_for(&server, RecordingVault::default());
    let config = Config::default().with_download_pdf(false);

    let first = notes.render_paper_note("2301.00001", &config).await.unwrap();
    assert!(matches!(first, NoteOutcome::Created { .. }));

    let second = notes.render_paper_note("2301.00001", &config).await.unwrap();
    assert_eq!(second, NoteOutcome::Duplicate {
      path:     "papers/Foo.md".to_string(),
      document: DocumentStatus::Disabled,
    });
    let creates = notes.vault().calls().iter().filter(|c| c.starts_with("create ")).count();
    assert_eq!(creates, 1);
    assert!(logs_contain("File already exists"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_fetch_failure_leaves_vault_untouched() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/abs/2301.00001").with_status(503).create_async().await;
    let notes = notes_for(&server, RecordingVault::default());

    let result = notes.render_paper_note("2301.00001", &Config::default()).await;
    assert!(matches!(result, Err(PaperNotesError::Network(_))));
    assert!(notes.vault().calls().is_empty());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_missing_section_still_writes_note() {
    let server = serve_page("<html><body><p>Nothing here</p></body></html>").await;
    let notes = notes_for(&server, RecordingVault::default());
    let config = Config::default().with_download_pdf(false);

    let outcome = notes.render_paper_note("2301.00001", &config).await.unwrap();

    let NoteOutcome::Created { note, missing_section, .. } = outcome else {
      panic!("expected a created note, got {outcome:?}");
    };
    assert!(missing_section);
    assert_eq!(note.path, "papers/No title.md");
    assert_eq!(
      unresolved_placeholders(&note.content),
      vec![AUTHORS_PLACEHOLDER, ABSTRACT_PLACEHOLDER]
    );
  }

  #[test]
  fn test_outcome_display() {
    let duplicate =
      NoteOutcome::Duplicate { path: "papers/Foo.md".to_string(), document: DocumentStatus::Disabled };
    assert_eq!(duplicate.to_string(), "File already exists: papers/Foo.md");
    assert_eq!(
      DocumentStatus::Duplicate("papers/_pdfs/x.pdf".to_string()).to_string(),
      "PDF already exists: papers/_pdfs/x.pdf"
    );
  }
}
