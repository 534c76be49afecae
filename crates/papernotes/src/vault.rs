//! Storage abstraction for notes and PDFs.
//!
//! The pipeline never touches the filesystem directly. It talks to a [`Vault`]: a tree of
//! named files addressed by `/`-separated paths relative to the vault root, the way a
//! note-taking app exposes its storage. [`FsVault`] is the implementation backed by a plain
//! directory.

use std::path::Component;

use tokio::{fs, io::AsyncWriteExt};

use super::*;

/// Hierarchical file store the pipeline writes into.
///
/// Every method is a separate suspend point; none of them are atomic with respect to each
/// other, so an `exists` check followed by a `create_folder` can race with outside changes.
#[async_trait]
pub trait Vault: Send + Sync {
  /// Whether a file or folder exists at `path`.
  async fn exists(&self, path: &str) -> Result<bool>;

  /// Creates the folder at `path`, including missing parents.
  async fn create_folder(&self, path: &str) -> Result<()>;

  /// Writes raw bytes to a file at `path`.
  async fn create_binary(&self, path: &str, data: &[u8]) -> Result<()>;

  /// Creates a new text file at `path`.
  ///
  /// Fails if something already exists there.
  async fn create(&self, path: &str, content: &str) -> Result<()>;

  /// Shows the note at `path` in the most recently active view.
  ///
  /// Returns `false` when there is no view to show it in, which is not an error.
  async fn open_recent(&self, path: &str) -> Result<bool> {
    trace!("No view available to open {path}");
    Ok(false)
  }
}

/// A [`Vault`] rooted at a directory on the local filesystem.
///
/// A directory has no views, so [`Vault::open_recent`] always reports `false`.
///
/// Every vault path stays below the root: `..` segments and absolute or drive-prefixed segments
/// are rejected with [`PaperNotesError::Storage`] before the filesystem is touched.
#[derive(Debug, Clone)]
pub struct FsVault {
  /// Directory every vault path is resolved against
  root: PathBuf,
}

impl FsVault {
  /// Creates a vault rooted at `root`. The directory itself is created lazily.
  pub fn new(root: impl AsRef<Path>) -> Self { Self { root: root.as_ref().to_path_buf() } }

  /// The vault root.
  pub fn root(&self) -> &Path { &self.root }

  /// Filesystem location of a vault path.
  ///
  /// Empty and `.` segments are skipped.
  ///
  /// # Errors
  ///
  /// Returns [`PaperNotesError::Storage`] with [`std::io::ErrorKind::InvalidInput`] when a
  /// segment is `..` or would replace the root.
  pub fn resolve(&self, path: &str) -> Result<PathBuf> {
    let mut resolved = self.root.clone();
    for part in path.split('/').filter(|part| !part.is_empty() && *part != ".") {
      let mut components = Path::new(part).components();
      match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => resolved.push(name),
        _ => {
          warn!("Refusing vault path {path:?}");
          return Err(
            std::io::Error::new(
              std::io::ErrorKind::InvalidInput,
              format!("Path {path:?} points outside the vault"),
            )
            .into(),
          );
        },
      }
    }
    Ok(resolved)
  }
}

#[async_trait]
impl Vault for FsVault {
  async fn exists(&self, path: &str) -> Result<bool> {
    Ok(fs::try_exists(self.resolve(path)?).await?)
  }

  async fn create_folder(&self, path: &str) -> Result<()> {
    let target = self.resolve(path)?;
    debug!("Creating folder {}", target.display());
    fs::create_dir_all(target).await?;
    Ok(())
  }

  async fn create_binary(&self, path: &str, data: &[u8]) -> Result<()> {
    let target = self.resolve(path)?;
    debug!("Writing {} bytes to {}", data.len(), target.display());
    fs::write(target, data).await?;
    Ok(())
  }

  async fn create(&self, path: &str, content: &str) -> Result<()> {
    let target = self.resolve(path)?;
    debug!("Creating note {}", target.display());
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(target).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    Ok(())
  }
}
