// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! PyInstaller executable bundler.
//!
//! ```text
//! <python> -m PyInstaller <output>.spec --clean
//!          --distpath <paths.dist> --workpath <paths.build>   (cwd = project root)
//!   --> <paths.dist>/<output><EXE_SUFFIX> must exist afterwards
//! ```

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::{Result, ToolError};

/// Builds a one-file executable from a spec file.
#[derive(Debug, Clone)]
pub struct PyInstallerTool {
    /// Spec file, relative to the project root.
    spec: PathBuf,
    /// Executable base name the spec produces.
    output_name: String,
}

impl PyInstallerTool {
    #[must_use]
    pub fn new(spec: impl AsRef<Path>, output_name: impl Into<String>) -> Self {
        Self {
            spec: spec.as_ref().to_path_buf(),
            output_name: output_name.into(),
        }
    }

    /// Path of the executable this build must produce.
    #[must_use]
    pub fn expected_output(&self, config: &Config) -> PathBuf {
        config
            .paths
            .dist
            .join(format!("{}{EXE_SUFFIX}", self.output_name))
    }

    fn builder(&self, ctx: &ToolContext) -> ProcessBuilder {
        let config = ctx.config();
        ProcessBuilder::new(&config.tools.python)
            .args(["-m", "PyInstaller"])
            .arg(&self.spec)
            .arg("--clean")
            .arg("--distpath")
            .arg(&config.paths.dist)
            .arg("--workpath")
            .arg(&config.paths.build)
            .cwd(&config.paths.root)
            .env(ctx.env().clone())
            .flag(ProcessFlags::IGNORE_OUTPUT_ON_SUCCESS)
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
            .name("pyinstaller")
    }
}

impl Tool for PyInstallerTool {
    fn name(&self) -> &'static str {
        "pyinstaller"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let expected = self.expected_output(ctx.config());

            if ctx.is_dry_run() {
                info!(
                    "[dry-run] Would run {} and expect {}",
                    self.builder(ctx).command_line(),
                    expected.display()
                );
                return Ok(());
            }

            info!("Building {} with PyInstaller...", self.output_name);
            debug!(spec = %self.spec.display(), "running PyInstaller");

            self.builder(ctx)
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("PyInstaller failed for {}", self.spec.display()))?;

            if !expected.is_file() {
                return Err(ToolError::OutputMissing {
                    tool: "PyInstaller".to_string(),
                    path: expected.display().to_string(),
                }
                .into());
            }

            info!("Executable created: {}", expected.display());
            Ok(())
        })
    }
}
