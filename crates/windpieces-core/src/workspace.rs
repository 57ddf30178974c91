//! The generated project directory

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// `.env` in the project root
pub const ENV_FILE: &str = ".env";
/// Express application module
pub const APP_ENTRY: &str = "src/app.ts";
/// HTTP server bootstrap
pub const SERVER_ENTRY: &str = "src/server.ts";

/// A filesystem operation on the workspace failed
#[derive(Debug, Error)]
#[error("Failed to {action} {}", path.display())]
pub struct WorkspaceError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl WorkspaceError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Project directory named after the project, created by checkout.
///
/// Every file written through it is remembered (relative to the root) so the
/// final report can list what the generator produced.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(base_dir: &Path, project_name: &str) -> Self {
        Self {
            root: base_dir.join(project_name),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Relative paths written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write a file, creating parent directories and replacing prior content
    pub async fn write_file(&mut self, relative: &str, contents: &str) -> Result<(), WorkspaceError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|source| WorkspaceError {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, contents).await.map_err(|source| WorkspaceError {
            action: "write file",
            path: path.clone(),
            source,
        })?;

        log::debug!("Wrote {}", path.display());
        let relative = PathBuf::from(relative);
        if !self.written.contains(&relative) {
            self.written.push(relative);
        }
        Ok(())
    }

    /// Create a new directory. Fails if it already exists.
    pub async fn create_dir(&self, relative: &str) -> Result<(), WorkspaceError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|source| WorkspaceError {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::create_dir(&path).await.map_err(|source| WorkspaceError {
            action: "create directory",
            path: path.clone(),
            source,
        })
    }

    pub async fn exists(&self, relative: &str) -> bool {
        fs::try_exists(self.path(relative)).await.unwrap_or(false)
    }
}

/// Remove the `.git` directory left behind by the clone.
///
/// Returns whether anything was removed.
pub fn remove_git_metadata(root: &Path) -> io::Result<bool> {
    let git_dir = root.join(".git");
    match std::fs::symlink_metadata(&git_dir) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(&git_dir).map(|_| true),
        Ok(_) => std::fs::remove_file(&git_dir).map(|_| true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
