// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Draining child output.
//!
//! ```text
//! run_child()
//!   one reader task per piped stream, reading raw lines until EOF
//!     bytes --> UTF-8, or Windows-1252 when a line is not valid UTF-8
//!     FORWARD_TO_LOG --> debug!(process, stream)
//!                        or held back with IGNORE_OUTPUT_ON_SUCCESS
//!     KEEP_IN_STRING --> ProcessOutput.stdout / .stderr
//!   wait, or kill on cancel
//!   failed or interrupted --> held-back lines replayed at warn
//! ```

use crate::error::Result;
use anyhow::Context;
use encoding_rs::WINDOWS_1252;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

/// Lines a reader task collected from one stream.
#[derive(Debug, Default)]
struct Drained {
    stream: &'static str,
    kept: String,
    held_back: Vec<String>,
}

struct Reader {
    flags: StreamFlags,
    hold_back: bool,
    process: String,
    stream: &'static str,
}

impl Reader {
    fn spawn<R>(self, pipe: Option<R>) -> Option<JoinHandle<Drained>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        pipe.map(|pipe| tokio::spawn(self.drain(pipe).in_current_span()))
    }

    /// Reads until EOF. Undecodable bytes are never fatal, so the pipe
    /// stays open for as long as the child writes to it.
    async fn drain<R: AsyncRead + Unpin>(self, pipe: R) -> Drained {
        let mut drained = Drained {
            stream: self.stream,
            ..Drained::default()
        };
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => self.accept(decode_line(&buf), &mut drained),
                Err(e) => {
                    warn!(
                        process = %self.process,
                        stream = self.stream,
                        error = %e,
                        "error reading stream"
                    );
                    break;
                }
            }
        }
        drained
    }

    fn accept(&self, line: String, drained: &mut Drained) {
        if self.flags.contains(StreamFlags::KEEP_IN_STRING) {
            if !drained.kept.is_empty() {
                drained.kept.push('\n');
            }
            drained.kept.push_str(&line);
        }
        if self.flags.contains(StreamFlags::FORWARD_TO_LOG) {
            if self.hold_back {
                drained.held_back.push(line);
            } else {
                debug!(process = %self.process, stream = self.stream, "{line}");
            }
        }
    }
}

/// Decodes one raw line without its `\n` or `\r\n` terminator.
///
/// Tools on Windows print paths in the ANSI code page, so a line that is
/// not UTF-8 is read as Windows-1252.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match std::str::from_utf8(line) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(line).0.into_owned(),
    }
}

async fn join(handle: Option<JoinHandle<Drained>>) -> Drained {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => Drained::default(),
    }
}

impl ProcessBuilder {
    fn reader(&self, flags: StreamFlags, process: &str, stream: &'static str) -> Reader {
        Reader {
            flags,
            hold_back: self.flags.contains(ProcessFlags::IGNORE_OUTPUT_ON_SUCCESS),
            process: process.to_string(),
            stream,
        }
    }

    /// Waits for the child while its streams are drained, killing it if
    /// `token` is cancelled first.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
        token: Option<&CancellationToken>,
    ) -> Result<ProcessOutput> {
        let stdout = self
            .reader(self.stdout, name, "stdout")
            .spawn(child.stdout.take());
        let stderr = self
            .reader(self.stderr, name, "stderr")
            .spawn(child.stderr.take());

        let (status, interrupted) = match token {
            Some(token) => tokio::select! {
                status = child.wait() => (status?, false),
                () = token.cancelled() => {
                    warn!(process = %name, "Cancellation requested, terminating process");
                    child.kill().await.ok();
                    let status = child
                        .wait()
                        .await
                        .with_context(|| format!("failed waiting for process {name} to exit"))?;
                    (status, true)
                }
            },
            None => (child.wait().await?, false),
        };

        let stdout = join(stdout).await;
        let stderr = join(stderr).await;

        let output = ProcessOutput {
            exit_code: status.code().unwrap_or(-1),
            interrupted,
            ..ProcessOutput::default()
        };

        if !output.success() {
            for drained in [&stdout, &stderr] {
                for line in &drained.held_back {
                    warn!(process = %name, stream = drained.stream, "{line}");
                }
            }
        }
        Ok(ProcessOutput {
            stdout: stdout.kept,
            stderr: stderr.kept,
            ..output
        })
    }
}
