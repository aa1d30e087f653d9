//! Local storage for artifacts and reports.
//!
//! Everything lives under a root directory (the current directory by default), in
//! `<root>/<folder>/<filename>`.  Folders are created on demand.  Artifacts are written in
//! place (a new fetch overwrites the previous one) whereas reports go through a temporary
//! file in the same folder and are renamed into place once complete.
//!

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::{makepath, Payload};

/// I/O failures while persisting or reading back data.
///
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Can not create directory {path:?}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Can not write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Can not read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Short name of the failure, used in one-line reports.
    ///
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::CreateDirFailed { .. } => "CreateDirFailed",
            StorageError::WriteFailed { .. } => "WriteFailed",
            StorageError::ReadFailed { .. } => "ReadFailed",
        }
    }
}

/// Root of all dataset folders.
///
#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Storage::new(".")
    }
}

impl Storage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Storage {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final location of `filename` inside `folder`.
    ///
    pub fn path(&self, folder: &str, filename: &str) -> PathBuf {
        makepath!(&self.root, folder, filename)
    }

    /// Create `folder` and any missing parent.  Fine to call when it already exists.
    ///
    #[tracing::instrument(skip(self))]
    pub fn ensure_folder(&self, folder: &str) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(folder);
        trace!("ensure {:?}", dir);

        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDirFailed {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Persist a payload as `folder/filename`, returning the final path.
    ///
    /// Text and binary bodies are both written byte for byte, no newline translation or
    /// re-encoding happens.
    ///
    #[tracing::instrument(skip(self, payload), fields(payload = %payload))]
    pub fn write(
        &self,
        folder: &str,
        filename: &str,
        payload: Payload,
    ) -> Result<PathBuf, StorageError> {
        self.ensure_folder(folder)?;

        let path = self.path(folder, filename);
        let res = match &payload {
            Payload::Text(text) => fs::write(&path, text),
            Payload::Binary(data) => fs::write(&path, data),
        };
        res.map_err(|source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        let what = if payload.is_binary() { "Binary" } else { "Text" };
        info!("{} data saved to {}", what, path.display());
        Ok(path)
    }

    /// Read back a persisted artifact.
    ///
    #[tracing::instrument(skip(self))]
    pub fn read(&self, folder: &str, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path(folder, filename);

        let data = fs::read(&path).map_err(|source| StorageError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        debug!("{} bytes read from {}", data.len(), path.display());
        Ok(data)
    }

    /// Write a complete report: all or nothing.
    ///
    /// The content goes into a temporary file next to the destination which is then renamed
    /// over it, so readers never see a truncated report.
    ///
    #[tracing::instrument(skip(self, content))]
    pub fn write_atomic(
        &self,
        folder: &str,
        filename: &str,
        content: &str,
    ) -> Result<PathBuf, StorageError> {
        let dir = self.ensure_folder(folder)?;
        let path = self.path(folder, filename);

        let write_err = |source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        };

        let mut tmpf = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmpf.write_all(content.as_bytes()).map_err(write_err)?;
        tmpf.flush().map_err(write_err)?;
        tmpf.persist(&path).map_err(|e| write_err(e.error))?;

        info!("Report saved to {}", path.display());
        Ok(path)
    }
}
