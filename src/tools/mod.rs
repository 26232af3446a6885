// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wrappers around the external tools a release is built with.
//!
//! ```text
//! cmd --> ToolContext --> Tool::run --> ProcessBuilder
//!   PyInstallerTool   python -m PyInstaller <spec> --clean --distpath --workpath
//!   MakensisTool      makensis <script>
//!   CargoTool         cargo build --release (cwd = crate dir)
//!   PythonScriptTool  python <script>
//! ToolContext: config, env overrides, cancel token --> run_with_cancellation
//! ToolContext::run_tool wraps each run in a `tool{name=...}` span
//! ```
//!
//! In dry-run every tool logs what it would run and succeeds.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

use crate::config::Config;
use crate::core::env::EnvOverrides;
use crate::error::Result;

pub mod cargo;
pub mod makensis;
pub mod probe;
pub mod pyinstaller;
pub mod python_script;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancellation token handed to every spawned process.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without running anything.
    dry_run: bool,

    config: Arc<Config>,

    /// Environment overrides applied to every spawned process.
    env: EnvOverrides,
}

impl ToolContext {
    /// Creates a new `ToolContext` without environment overrides.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
            env: EnvOverrides::new(),
        }
    }

    /// Replaces the environment overrides.
    #[must_use]
    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn env(&self) -> &EnvOverrides {
        &self.env
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Runs `tool` with this context. Everything it logs, including the
    /// forwarded process output, is recorded inside a `tool` span.
    ///
    /// # Errors
    ///
    /// Returns the tool's error.
    pub async fn run_tool(&self, tool: &dyn Tool) -> Result<()> {
        let span = info_span!("tool", name = tool.name(), dry_run = self.dry_run);
        tool.run(self).instrument(span).await
    }
}

/// Trait for tools that execute external processes.
///
/// Tools should use `ProcessBuilder::run_with_cancellation()` and respect
/// `ctx.is_dry_run()`.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "pyinstaller", "makensis").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;
