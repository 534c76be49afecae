//! HTTP access to the arXiv catalog.
//!
//! Two endpoints are used:
//!
//! - `GET {base}abs/{identifier}` returns the HTML abstract page
//! - `GET {base}pdf/{identifier}.pdf` returns the paper itself
//!
//! Requests are issued once. There is no retry, backoff or timeout; a failure of any kind
//! propagates to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use papernotes::catalog::Catalog;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::new();
//! let id = catalog.identifier("https://arxiv.org/abs/2301.07041");
//! let html = catalog.fetch_abstract_page(&id).await?;
//! println!("{} bytes of markup", html.len());
//! # Ok(())
//! # }
//! ```

use url::Url;

use super::*;

/// Client for one catalog instance.
///
/// The underlying [`reqwest::Client`] is shared between the abstract-page and PDF requests.
#[derive(Debug, Clone)]
pub struct Catalog {
  /// Base URL, always ending in `/`
  base_url: String,
  /// HTTP client reused across requests
  client:   reqwest::Client,
}

impl Default for Catalog {
  fn default() -> Self {
    Self { base_url: ARXIV_BASE_URL.to_string(), client: reqwest::Client::new() }
  }
}

impl Catalog {
  /// Creates a client for `https://arxiv.org/`.
  pub fn new() -> Self { Self::default() }

  /// Creates a client for a catalog mirror (or a test server) at `base_url`.
  ///
  /// # Errors
  ///
  /// Returns [`PaperNotesError::InvalidCatalogUrl`] when `base_url` is not an absolute
  /// http(s) URL.
  pub fn with_base_url(base_url: &str) -> Result<Self> {
    let parsed =
      Url::parse(base_url).map_err(|e| PaperNotesError::InvalidCatalogUrl(format!("{base_url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(PaperNotesError::InvalidCatalogUrl(format!(
        "{base_url}: unsupported scheme {}",
        parsed.scheme()
      )));
    }

    let mut base_url = base_url.to_string();
    if !base_url.ends_with('/') {
      base_url.push('/');
    }
    Ok(Self { base_url, client: reqwest::Client::new() })
  }

  /// The base URL requests are built from.
  pub fn base_url(&self) -> &str { &self.base_url }

  /// Normalizes raw user input into a bare identifier for this catalog.
  pub fn identifier(&self, input: &str) -> PaperId { PaperId::with_base(input, &self.base_url) }

  /// URL of the abstract page for `id`.
  pub fn abstract_url(&self, id: &PaperId) -> String { format!("{}abs/{}", self.base_url, id) }

  /// URL of the PDF for `id`.
  pub fn document_url(&self, id: &PaperId) -> String { format!("{}pdf/{}.pdf", self.base_url, id) }

  /// Fetches the raw HTML of the abstract page.
  ///
  /// # Errors
  ///
  /// - [`PaperNotesError::Network`] on transport failure or a non-success status
  /// - [`PaperNotesError::EmptyResponse`] when the body is empty
  pub async fn fetch_abstract_page(&self, id: &PaperId) -> Result<String> {
    let url = self.abstract_url(id);
    debug!("Fetching abstract page via: {url}");

    let response = self.client.get(&url).send().await?.error_for_status()?;
    let text = response.text().await?;
    if text.trim().is_empty() {
      return Err(PaperNotesError::EmptyResponse(url));
    }

    trace!("Abstract page response: {text}");
    Ok(text)
  }

  /// Downloads the PDF bytes for `id`.
  ///
  /// # Errors
  ///
  /// Same as [`Catalog::fetch_abstract_page`].
  pub async fn fetch_document(&self, id: &PaperId) -> Result<Vec<u8>> {
    let url = self.document_url(id);
    debug!("Downloading document via: {url}");

    let response = self.client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
      return Err(PaperNotesError::EmptyResponse(url));
    }

    debug!("Downloaded {} bytes for {id}", bytes.len());
    Ok(bytes.to_vec())
  }
}
