// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   build/   (bundler work directory)
//!   dist/    (executables and installers)
//! ```
//!
//! `build` and `dist` are resolved against `root` when relative.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root; external tools run here.
    pub root: PathBuf,
    /// Bundler work directory.
    pub build: PathBuf,
    /// Output directory for executables and installers.
    pub dist: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            build: PathBuf::from("build"),
            dist: PathBuf::from("dist"),
        }
    }
}

impl PathsConfig {
    /// Resolve `build` and `dist` against `root`.
    pub fn resolve(&mut self) {
        if self.build.is_relative() {
            self.build = self.root.join(&self.build);
        }
        if self.dist.is_relative() {
            self.dist = self.root.join(&self.dist);
        }
    }

    /// Resolve a project-relative path against `root`.
    #[must_use]
    pub fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Name of the dist directory as it appears in generated scripts.
    ///
    /// Scripts run with `root` as working directory, so a dist directory
    /// under `root` is written relative to it.
    #[must_use]
    pub fn dist_relative(&self) -> PathBuf {
        self.dist
            .strip_prefix(&self.root)
            .map_or_else(|_| self.dist.clone(), Path::to_path_buf)
    }
}
