// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! builder  ProcessBuilder, ProcessFlags, StreamFlags, ProcessOutput
//! runner   run() / run_with_cancellation(token) --> tokio::process::Command
//! io       reader tasks per stream, wait or kill
//! ```

pub mod builder;
mod io;
mod runner;
