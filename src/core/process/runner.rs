// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning and exit handling.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!   cancelled already? --> Interrupted (or empty output with ALLOW_FAILURE)
//!   spawn: log cwd, env overrides, command line at debug
//!   run_child: drain streams, wait or kill on cancel
//!   interrupted --> Interrupted        } both skipped with
//!   exit != 0   --> NonZeroExit        } ALLOW_FAILURE
//! ```

use crate::error::{ProcessError, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    /// Runs the process to completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the process cannot be spawned or exits
    /// with a non-zero code while `ALLOW_FAILURE` is unset.
    pub async fn run(self) -> Result<ProcessOutput> {
        self.execute(None).await
    }

    /// Runs the process, killing it when `token` is cancelled.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus `ProcessError::Interrupted` on
    /// cancellation while `ALLOW_FAILURE` is unset.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tokio_util::sync::CancellationToken;
    /// use ez_release::core::process::builder::ProcessBuilder;
    ///
    /// let token = CancellationToken::new();
    /// let output = ProcessBuilder::new("python3")
    ///     .args(["-m", "PyInstaller", "App.spec", "--clean"])
    ///     .run_with_cancellation(token)
    ///     .await?;
    /// ```
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        self.execute(Some(&token)).await
    }

    async fn execute(&self, token: Option<&CancellationToken>) -> Result<ProcessOutput> {
        let name = self.display_name();

        let output = if token.is_some_and(CancellationToken::is_cancelled) {
            ProcessOutput::interrupted()
        } else {
            let mut child = self.spawn()?;
            self.run_child(&name, &mut child, token).await?
        };

        trace!(
            process = %name,
            exit_code = output.exit_code,
            interrupted = output.interrupted,
            "finished"
        );
        self.check_exit(&name, &output)?;
        Ok(output)
    }

    fn spawn(&self) -> Result<Child> {
        let command_line = self.command_line();
        if let Some(cwd) = &self.cwd {
            debug!(cwd = %cwd.display(), "cd");
        }
        for (key, value) in self.env.iter() {
            debug!(key, value = value.unwrap_or("<unset>"), "env");
        }
        debug!(cmd = %command_line, "exec");

        let child = self
            .command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line,
                source,
            })?;
        trace!(process = %self.display_name(), pid = ?child.id(), "spawned");
        Ok(child)
    }

    fn check_exit(&self, name: &str, output: &ProcessOutput) -> Result<()> {
        if output.success() || self.flags.contains(ProcessFlags::ALLOW_FAILURE) {
            return Ok(());
        }
        if output.interrupted {
            return Err(ProcessError::Interrupted {
                command: self.command_line(),
            }
            .into());
        }
        // Held-back output has already been replayed by run_child.
        if !output.stderr.is_empty() && !self.flags.contains(ProcessFlags::IGNORE_OUTPUT_ON_SUCCESS)
        {
            error!(process = %name, stderr = %output.stderr, "process error output");
        }
        Err(ProcessError::NonZeroExit {
            command: self.command_line(),
            code: output.exit_code,
        }
        .into())
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        self.env.apply(&mut command);

        command
            .stdin(Stdio::null())
            .stdout(stdio(self.stdout))
            .stderr(stdio(self.stderr))
            .kill_on_drop(true);
        command
    }
}

/// Pipes a stream only when a reader task will drain it.
fn stdio(flags: StreamFlags) -> Stdio {
    if flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}
