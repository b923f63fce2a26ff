//! File-backed session storage

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StorageError};
use crate::storage::SessionStorage;

/// Stores the token as the sole content of one file
///
/// The file is created with 0600 permissions on Unix and is never read or
/// written through a symlink.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reject symlinks so the token can't be redirected to another file
fn validate_not_symlink(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            Err(StorageError::Symlink(path.to_path_buf()).into())
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::Io(e).into()),
    }
}

impl SessionStorage for FileSessionStore {
    fn get(&self) -> Result<Option<String>> {
        validate_not_symlink(&self.path)?;

        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    tracing::debug!("Loaded session token from {}", self.path.display());
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e).into()),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return self.clear();
        }

        validate_not_symlink(&self.path)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(StorageError::Io)?;
        file.write_all(token.as_bytes()).map_err(StorageError::Io)?;

        // `mode` only applies on create; tighten a file that already existed
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(StorageError::Io)?;
        }

        tracing::debug!("Stored session token in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        validate_not_symlink(&self.path)?;

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed session token file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e).into()),
        }
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}
