// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! NSIS installer compiler.
//!
//! ```text
//! installer.nsi --> makensis --> dist\<base>_Setup_<version>.exe
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::probe::locate_makensis;
use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::{Result, ToolError};

/// Compiles an NSIS script into a setup executable.
///
/// # Example
///
/// ```ignore
/// let tool = MakensisTool::new("installer.nsi")
///     .expected_output("dist/App_Setup_1.0.0.exe");
/// ctx.run_tool(&tool).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MakensisTool {
    /// Script path, relative to the project root.
    script: PathBuf,

    /// Setup executable that must exist after a successful run.
    expected_output: Option<PathBuf>,
}

impl MakensisTool {
    #[must_use]
    pub fn new(script: impl AsRef<Path>) -> Self {
        Self {
            script: script.as_ref().to_path_buf(),
            expected_output: None,
        }
    }

    #[must_use]
    pub fn expected_output(mut self, path: impl AsRef<Path>) -> Self {
        self.expected_output = Some(path.as_ref().to_path_buf());
        self
    }

}

fn resolve_binary(ctx: &ToolContext) -> Result<PathBuf> {
    locate_makensis(ctx.config())
        .ok_or_else(|| ToolError::Missing(vec!["NSIS (makensis)".to_string()]).into())
}

impl Tool for MakensisTool {
    fn name(&self) -> &'static str {
        "makensis"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if ctx.is_dry_run() {
                info!(
                    script = %self.script.display(),
                    output = ?self.expected_output,
                    "[dry-run] Would compile NSIS script"
                );
                return Ok(());
            }

            let binary = resolve_binary(ctx)?;
            debug!(makensis = %binary.display(), script = %self.script.display(), "compiling installer");
            info!("Building installer with NSIS...");

            ProcessBuilder::new(&binary)
                .arg(&self.script)
                .cwd(&ctx.config().paths.root)
                .env(ctx.env().clone())
                .flag(ProcessFlags::IGNORE_OUTPUT_ON_SUCCESS)
                .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
                .name("makensis")
                .run_with_cancellation(ctx.cancel_token().clone())
                .await
                .with_context(|| format!("Failed to compile {}", self.script.display()))?;

            if let Some(expected) = &self.expected_output {
                if !expected.is_file() {
                    return Err(ToolError::OutputMissing {
                        tool: "makensis".to_string(),
                        path: expected.display().to_string(),
                    }
                    .into());
                }
                info!("Installer created: {}", expected.display());
            }

            Ok(())
        })
    }
}
