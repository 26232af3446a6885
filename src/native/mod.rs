// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Companion native library discovery and verification.
//!
//! ```text
//! locate_library: native.search_paths/<libfile>, first hit wins
//!        |
//!        v
//! ExportTable::read --> missing(required_symbols)
//!        |                    |
//!   all present          some missing --> MissingSymbols
//!        |
//! copy into native.copy_to --> Valid(path)
//! ```

pub mod exports;


use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::utility::fs::copy::copy_file_into_dirs;

pub use exports::ExportTable;

/// Platform file name of a shared library.
///
/// `truefa_crypto` becomes `truefa_crypto.dll`, `libtruefa_crypto.dylib`
/// or `libtruefa_crypto.so`.
#[must_use]
pub fn library_file_name(lib_name: &str) -> String {
    if cfg!(windows) {
        format!("{lib_name}.dll")
    } else if cfg!(target_os = "macos") {
        format!("lib{lib_name}.dylib")
    } else {
        format!("lib{lib_name}.so")
    }
}

/// Where `cargo build --release` leaves the library.
#[must_use]
pub fn build_artifact_path(config: &Config) -> PathBuf {
    config
        .project_path(&config.native.crate_dir)
        .join("target")
        .join("release")
        .join(library_file_name(&config.native.lib_name))
}

/// Returns the first existing library among `native.search_paths`.
#[must_use]
pub fn locate_library(config: &Config) -> Option<PathBuf> {
    let file_name = library_file_name(&config.native.lib_name);
    config
        .native
        .search_paths
        .iter()
        .map(|dir| config.project_path(dir).join(&file_name))
        .inspect(|candidate| debug!(path = %candidate.display(), "probing native library"))
        .find(|candidate| candidate.is_file())
}

/// Outcome of [`check_library`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryCheck {
    /// Library exports every required symbol and was copied into place.
    Valid(PathBuf),
    /// Library exists but lacks some required symbols.
    MissingSymbols { path: PathBuf, missing: Vec<String> },
    /// Library exists but could not be inspected.
    Unreadable { path: PathBuf, reason: String },
    /// No library in any search path.
    NotFound,
}

impl LibraryCheck {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Verifies required exports of `path`, logging the outcome.
///
/// # Errors
///
/// Returns an error if the library cannot be read or parsed.
pub async fn verify_exports(path: &Path, required: &[String]) -> Result<Vec<String>> {
    let table = ExportTable::read(path).await?;
    debug!(path = %path.display(), exports = table.len(), "read export table");
    let missing = table.missing(required);
    if missing.is_empty() {
        info!("All {} required exports present in {}", required.len(), path.display());
    } else {
        warn!(
            "{} is missing exports: {}",
            path.display(),
            missing.join(", ")
        );
    }
    Ok(missing)
}

/// Locates the native library, verifies its exports and copies a valid
/// library into every `native.copy_to` directory.
///
/// # Errors
///
/// Returns an error only if copying a valid library fails.
pub async fn check_library(config: &Config, dry_run: bool) -> Result<LibraryCheck> {
    let Some(path) = locate_library(config) else {
        warn!(
            "Native library {} not found in any search path",
            library_file_name(&config.native.lib_name)
        );
        return Ok(LibraryCheck::NotFound);
    };
    info!("Found native library at {}", path.display());

    let missing = match verify_exports(&path, &config.native.required_symbols).await {
        Ok(missing) => missing,
        Err(e) => {
            warn!("Could not inspect {}: {e:#}", path.display());
            return Ok(LibraryCheck::Unreadable {
                path,
                reason: format!("{e:#}"),
            });
        }
    };
    if !missing.is_empty() {
        return Ok(LibraryCheck::MissingSymbols { path, missing });
    }

    install_library(config, &path, dry_run).await?;
    Ok(LibraryCheck::Valid(path))
}

/// Copies a library into every `native.copy_to` directory.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the copy fails.
pub async fn install_library(config: &Config, path: &Path, dry_run: bool) -> Result<()> {
    let dirs: Vec<PathBuf> = config
        .native
        .copy_to
        .iter()
        .map(|dir| config.project_path(dir))
        .collect();

    if dry_run {
        for dir in &dirs {
            info!("[dry-run] Would copy {} to {}", path.display(), dir.display());
        }
        return Ok(());
    }

    for dst in copy_file_into_dirs(path, &dirs).await? {
        info!("Copied {} to {}", path.display(), dst.display());
    }
    Ok(())
}
