// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Helper scripts run with the configured interpreter.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::error::Result;

/// Runs `<python> <script>` in the project root.
#[derive(Debug, Clone)]
pub struct PythonScriptTool {
    script: PathBuf,
}

impl PythonScriptTool {
    #[must_use]
    pub fn new(script: impl AsRef<Path>) -> Self {
        Self {
            script: script.as_ref().to_path_buf(),
        }
    }
}

impl Tool for PythonScriptTool {
    fn name(&self) -> &'static str {
        "python"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let config = ctx.config();
            let builder = ProcessBuilder::new(&config.tools.python)
                .arg(&self.script)
                .cwd(&config.paths.root)
                .env(ctx.env().clone())
                .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
                .name("python");

            if ctx.is_dry_run() {
                info!("[dry-run] Would run {}", builder.command_line());
                return Ok(());
            }

            info!("Running {}...", self.script.display());
            builder
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("script {} failed", self.script.display()))?;
            Ok(())
        })
    }
}
