//! File storage behind the `/files/*` routes.
//!
//! Files live directly under the configured directory: the target of a
//! request for `name` is `directory/name`. Names are not sanitized.

use bytes::Bytes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("no directory configured")]
    NotConfigured,

    #[error("create directory {} error: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("write file {} error: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Default)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(name))
    }

    /// Reads `directory/name`.
    ///
    /// Every miss returns `None`: no directory configured, directory absent,
    /// file absent or unreadable.
    pub async fn read(&self, name: &str) -> Option<Bytes> {
        let Some(path) = self.resolve(name) else {
            debug!(name, "read file without directory configured");
            return None;
        };

        match tokio::fs::read(&path).await {
            Ok(contents) => Some(Bytes::from(contents)),
            Err(e) => {
                debug!(path = %path.display(), cause = %e, "read file error");
                None
            }
        }
    }

    /// Writes `contents` to `directory/name`, creating missing parent
    /// directories and truncating an existing file.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileStoreError> {
        let path = self.resolve(name).ok_or(FileStoreError::NotConfigured)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                error!(path = %parent.display(), cause = %source, "create directory error");
                FileStoreError::CreateDirectory { path: parent.to_path_buf(), source }
            })?;
        }

        tokio::fs::write(&path, contents).await.map_err(|source| {
            error!(path = %path.display(), cause = %source, "write file error");
            FileStoreError::Write { path: path.clone(), source }
        })?;

        debug!(path = %path.display(), size = contents.len(), "file written");
        Ok(())
    }
}
