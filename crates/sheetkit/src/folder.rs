//! A [`Folder`] on the local file system.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{HostError, HostResult};
use crate::host::{Folder, StoredFile};

/// Stores exports as files in a local directory.
#[derive(Debug, Clone)]
pub struct LocalFolder {
    dir: PathBuf,
}

impl LocalFolder {
    /// Use `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> HostResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory files are written to.
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl Folder for LocalFolder {
    /// Write `bytes` to `name` inside the folder.
    ///
    /// `name` must be a single file name; separators, `..` and absolute paths
    /// are rejected without touching the disk.
    fn create_file(&self, name: &str, mime_type: &str, bytes: Vec<u8>) -> HostResult<StoredFile> {
        let mut components = Path::new(name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(HostError::Rejected(format!("invalid file name {name:?}")));
        }

        let path = self.dir.join(name);
        fs::write(&path, &bytes)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "wrote file");

        Ok(StoredFile {
            id: path.display().to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size: bytes.len(),
        })
    }
}
