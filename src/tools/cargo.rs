// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native library build through cargo.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::probe::cargo_binary;
use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::error::Result;

/// Runs `cargo build --release` inside a crate directory.
#[derive(Debug, Clone)]
pub struct CargoTool {
    crate_dir: PathBuf,
}

impl CargoTool {
    /// Creates a release build of the crate at `crate_dir`.
    #[must_use]
    pub fn new(crate_dir: impl AsRef<Path>) -> Self {
        Self {
            crate_dir: crate_dir.as_ref().to_path_buf(),
        }
    }

    fn builder(&self, ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(cargo_binary(ctx.config()))
            .args(["build", "--release"])
            .cwd(&self.crate_dir)
            .env(ctx.env().clone())
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
            .name("cargo")
    }
}

impl Tool for CargoTool {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let builder = self.builder(ctx);

            if ctx.is_dry_run() {
                info!(
                    "[dry-run] Would run {} in {}",
                    builder.command_line(),
                    self.crate_dir.display()
                );
                return Ok(());
            }

            info!("Building native library in {}...", self.crate_dir.display());
            builder
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("cargo build failed in {}", self.crate_dir.display()))?;

            info!("Native library build finished");
            Ok(())
        })
    }
}
