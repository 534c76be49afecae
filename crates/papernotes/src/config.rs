//! Render configuration and its on-disk store.
//!
//! A [`Config`] is a plain value handed to every pipeline invocation. Persisting it is the
//! job of [`ConfigStore`], which loads it once, applies updates and writes every change back
//! to a TOML file:
//!
//! ```toml
//! template = "# {{title}}\nAuthors: {{authors}}\n..."
//! authors_as_link = true
//! file_name_format = "title"
//! folder = "papers"
//! pdf_folder = "_pdfs"
//! download_pdf = true
//! ```
//!
//! Missing keys take their default. An empty `folder` or `pdf_folder` reverts to its default
//! as well.

use super::*;

/// Default vault folder for notes.
pub const DEFAULT_FOLDER: &str = "papers";
/// Default subfolder (inside the notes folder) for PDFs.
pub const DEFAULT_PDF_FOLDER: &str = "_pdfs";

/// How note files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNameFormat {
  /// Use the paper title, with its first `:` turned into `-`
  #[default]
  Title,
  /// Use the bare identifier
  Id,
}

impl Display for FileNameFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FileNameFormat::Title => write!(f, "title"),
      FileNameFormat::Id => write!(f, "id"),
    }
  }
}

impl FromStr for FileNameFormat {
  type Err = PaperNotesError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "title" => Ok(FileNameFormat::Title),
      "id" => Ok(FileNameFormat::Id),
      s => Err(PaperNotesError::Config(format!(
        "Unknown file name format \"{s}\", expected \"title\" or \"id\""
      ))),
    }
  }
}

/// Settings for rendering and storing notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Note template with `{{title}}`, `{{authors}}`, `{{abstract}}` and `{{pdf_file}}`
  pub template:         NoteTemplate,
  /// Whether authors become `[[Name]]` links
  pub authors_as_link:  bool,
  /// Naming strategy for note files
  pub file_name_format: FileNameFormat,
  /// Vault folder the notes go into
  pub folder:           String,
  /// Subfolder of [`Config::folder`] the PDFs go into
  pub pdf_folder:       String,
  /// Whether to download the PDF alongside the note
  pub download_pdf:     bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      template:         NoteTemplate::default(),
      authors_as_link:  true,
      file_name_format: FileNameFormat::Title,
      folder:           DEFAULT_FOLDER.to_string(),
      pdf_folder:       DEFAULT_PDF_FOLDER.to_string(),
      download_pdf:     true,
    }
  }
}

impl Config {
  /// Names of the keys accepted by [`Config::set`].
  pub const KEYS: [&'static str; 6] =
    ["template", "authors_as_link", "file_name_format", "folder", "pdf_folder", "download_pdf"];

  /// Returns the default location of the configuration file.
  ///
  /// - On Unix: `~/.config/papernotes/config.toml`
  /// - On macOS: `~/Library/Application Support/papernotes/config.toml`
  /// - On Windows: `%APPDATA%\papernotes\config.toml`
  /// - Fallback: `./papernotes/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("papernotes").join("config.toml")
  }

  /// Parses a configuration from TOML text.
  pub fn from_toml(text: &str) -> Result<Self> {
    let config: Config = toml::from_str(text)?;
    Ok(config.with_default_folders())
  }

  /// Serializes the configuration to TOML text.
  pub fn to_toml(&self) -> Result<String> { Ok(toml::to_string_pretty(self)?) }

  /// Sets the note template.
  pub fn with_template(mut self, template: impl Into<NoteTemplate>) -> Self {
    self.template = template.into();
    self
  }

  /// Sets whether authors are linked.
  pub fn with_authors_as_link(mut self, authors_as_link: bool) -> Self {
    self.authors_as_link = authors_as_link;
    self
  }

  /// Sets the file naming strategy.
  pub fn with_file_name_format(mut self, file_name_format: FileNameFormat) -> Self {
    self.file_name_format = file_name_format;
    self
  }

  /// Sets the notes folder; an empty value means [`DEFAULT_FOLDER`].
  pub fn with_folder(mut self, folder: &str) -> Self {
    self.folder = folder.to_string();
    self.with_default_folders()
  }

  /// Sets the PDF subfolder; an empty value means [`DEFAULT_PDF_FOLDER`].
  pub fn with_pdf_folder(mut self, pdf_folder: &str) -> Self {
    self.pdf_folder = pdf_folder.to_string();
    self.with_default_folders()
  }

  /// Sets whether PDFs are downloaded.
  pub fn with_download_pdf(mut self, download_pdf: bool) -> Self {
    self.download_pdf = download_pdf;
    self
  }

  /// Updates a single setting from its string form.
  ///
  /// # Errors
  ///
  /// Returns [`PaperNotesError::Config`] for an unknown key or a value that does not parse.
  pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
    match key {
      "template" => self.template = NoteTemplate::from(value),
      "authors_as_link" => self.authors_as_link = parse_bool(key, value)?,
      "file_name_format" => self.file_name_format = value.parse()?,
      "folder" => self.folder = value.to_string(),
      "pdf_folder" => self.pdf_folder = value.to_string(),
      "download_pdf" => self.download_pdf = parse_bool(key, value)?,
      _ =>
        return Err(PaperNotesError::Config(format!(
          "Unknown setting \"{key}\", expected one of: {}",
          Self::KEYS.join(", ")
        ))),
    }
    *self = std::mem::take(self).with_default_folders();
    debug!("Updated setting {key}");
    Ok(())
  }

  /// Vault path of the PDF folder, `{folder}/{pdf_folder}`.
  pub fn document_folder(&self) -> String { format!("{}/{}", self.folder, self.pdf_folder) }

  /// Vault path of the PDF for `id`, `{folder}/{pdf_folder}/{id}.pdf`.
  pub fn document_path(&self, id: &PaperId) -> String {
    format!("{}/{}", self.document_folder(), id.document_file_name())
  }

  /// Puts back the default for any empty folder setting.
  fn with_default_folders(mut self) -> Self {
    if self.folder.is_empty() {
      self.folder = DEFAULT_FOLDER.to_string();
    }
    if self.pdf_folder.is_empty() {
      self.pdf_folder = DEFAULT_PDF_FOLDER.to_string();
    }
    self
  }
}

/// Parses a boolean setting.
fn parse_bool(key: &str, value: &str) -> Result<bool> {
  value
    .trim()
    .parse()
    .map_err(|_| PaperNotesError::Config(format!("Setting \"{key}\" expects true or false, got \"{value}\"")))
}

/// Persistent home of a [`Config`].
///
/// Loaded once with [`ConfigStore::open`], changed only through [`ConfigStore::update`] or
/// [`ConfigStore::set`], each of which writes the file again.
///
/// # Examples
///
/// ```no_run
/// use papernotes::config::{Config, ConfigStore};
///
/// # fn example() -> Result<(), papernotes::error::PaperNotesError> {
/// let mut store = ConfigStore::open(Config::default_path())?;
/// store.set("folder", "reading/papers")?;
/// assert_eq!(store.config().folder, "reading/papers");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
  /// File the configuration is persisted to
  path:   PathBuf,
  /// Current configuration
  config: Config,
}

impl ConfigStore {
  /// Loads the configuration at `path`, or starts from defaults when there is no file yet.
  ///
  /// Nothing is written until the first update or [`ConfigStore::flush`].
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let config = if path.exists() {
      debug!("Loading configuration from {}", path.display());
      Config::from_toml(&std::fs::read_to_string(&path)?)?
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Config::default()
    };
    Ok(Self { path, config })
  }

  /// Path of the backing file.
  pub fn path(&self) -> &Path { &self.path }

  /// Current configuration.
  pub fn config(&self) -> &Config { &self.config }

  /// Whether the backing file exists.
  pub fn exists(&self) -> bool { self.path.exists() }

  /// Applies `change` and persists the result.
  ///
  /// If `change` or the write fails, neither the in-memory nor the on-disk configuration is
  /// modified.
  pub fn update<F>(&mut self, change: F) -> Result<()>
  where F: FnOnce(&mut Config) -> Result<()> {
    let mut next = self.config.clone();
    change(&mut next)?;
    let next = next.with_default_folders();
    write_config(&self.path, &next)?;
    self.config = next;
    Ok(())
  }

  /// Updates one setting from its string form and persists the result.
  pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.update(|config| config.set(key, value))
  }

  /// Replaces the whole configuration and persists it.
  pub fn replace(&mut self, config: Config) -> Result<()> {
    self.update(|current| {
      *current = config;
      Ok(())
    })
  }

  /// Writes the current configuration to disk, creating parent folders as needed.
  pub fn flush(&self) -> Result<()> { write_config(&self.path, &self.config) }
}

/// Writes `config` to `path`, creating parent folders as needed.
fn write_config(path: &Path, config: &Config) -> Result<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, config.to_toml()?)?;
  info!("Saved configuration to {}", path.display());
  Ok(())
}
