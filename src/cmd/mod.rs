// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   package, native, render, config (options / configs / app-version)
//! ```

pub mod config;
pub mod native;
pub mod package;
pub mod render;

#[cfg(test)]
mod tests;

use tokio_util::sync::CancellationToken;

/// Returns a token that is cancelled on Ctrl+C.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting...");
            cancel_token.cancel();
        }
    });
    token
}
