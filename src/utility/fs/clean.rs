// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Removes each existing directory in `dirs`.
///
/// Returns the directories that were removed. In dry-run nothing is
/// deleted and the directories that would be removed are returned.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be removed.
pub async fn clean_dirs(dirs: &[&Path], dry_run: bool) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in dirs {
        if !fs::try_exists(dir).await.unwrap_or(false) {
            debug!(dir = %dir.display(), "nothing to clean");
            continue;
        }
        if dry_run {
            info!("[dry-run] Would remove {}", dir.display());
        } else {
            fs::remove_dir_all(dir)
                .await
                .with_context(|| format!("failed to remove {}", dir.display()))?;
            info!("Removed {}", dir.display());
        }
        removed.push(dir.to_path_buf());
    }
    Ok(removed)
}

/// Generated files that must not outlive the step that consumes them.
///
/// Every registered path is deleted when the guard is dropped, whether the
/// step succeeded or failed.
#[derive(Debug, Default)]
pub struct IntermediateFiles {
    paths: Vec<PathBuf>,
}

impl IntermediateFiles {
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Writes `content` to `path` and registers it for removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The path is
    /// registered either way so a partial write is cleaned up.
    pub async fn write(&mut self, path: PathBuf, content: &str) -> Result<&Path> {
        self.paths.push(path);
        let index = self.paths.len() - 1;
        let path = &self.paths[index];
        fs::write(path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote intermediate file");
        Ok(path)
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for IntermediateFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed intermediate file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove intermediate file"),
            }
        }
    }
}
