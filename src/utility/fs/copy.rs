// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Copies `src` into each directory in `dirs`, keeping its file name.
///
/// Directories are created as needed. A destination that already is `src`
/// (same canonical path) is skipped. Returns the paths actually written.
///
/// # Example
/// ```no_run
/// use ez_release::utility::fs::copy::copy_file_into_dirs;
/// use std::path::{Path, PathBuf};
///
/// # async fn example() -> anyhow::Result<()> {
/// let dirs = [PathBuf::from("src/truefa_crypto"), PathBuf::from("truefa_crypto")];
/// copy_file_into_dirs(Path::new("target/release/truefa_crypto.dll"), &dirs).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if `src` has no file name or does not exist, or if
/// creating a directory or copying fails.
pub async fn copy_file_into_dirs(src: &Path, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let file_name = src
        .file_name()
        .with_context(|| format!("{} has no file name", src.display()))?;
    let src_canonical = fs::canonicalize(src)
        .await
        .map_err(|_| FsError::NotFound(src.display().to_string()))?;

    let mut written = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let dst = dir.join(file_name);
        if let Ok(dst_canonical) = fs::canonicalize(&dst).await
            && dst_canonical == src_canonical
        {
            debug!(path = %dst.display(), "source and destination are the same file");
            continue;
        }

        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
        fs::copy(src, &dst).await.with_context(|| {
            format!("failed to copy {} to {}", src.display(), dst.display())
        })?;
        debug!(from = %src.display(), to = %dst.display(), "copied");
        written.push(dst);
    }

    Ok(written)
}
