// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Availability checks for external tools.
//!
//! ```text
//! pyinstaller_available  python -m PyInstaller --version == 0
//! locate_makensis        tools.makensis > NSIS install dirs > PATH
//! cargo_binary           tools.cargo > <cargo home>/bin/cargo > PATH
//! rust_installed         tools.rustc --version == 0
//!                        || <cargo home>/bin/rustc exists
//!                        || rustc --version == 0
//! ```

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};

/// Default NSIS install locations on Windows.
const NSIS_INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files (x86)\NSIS\makensis.exe",
    r"C:\Program Files\NSIS\makensis.exe",
];

/// Directory holding rustup-managed binaries (`$CARGO_HOME/bin` or
/// `~/.cargo/bin`).
#[must_use]
fn cargo_bin_dir() -> Option<PathBuf> {
    std::env::var_os("CARGO_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".cargo")))
        .map(|cargo_home| cargo_home.join("bin"))
}

/// Returns `<cargo bin dir>/<name><EXE_SUFFIX>` if it exists.
fn rustup_binary(name: &str) -> Option<PathBuf> {
    cargo_bin_dir()
        .map(|dir| dir.join(format!("{name}{EXE_SUFFIX}")))
        .filter(|path| path.is_file())
}

/// Cargo executable: an explicit `tools.cargo`, then the rustup-managed
/// one, then `cargo` from PATH.
#[must_use]
pub fn cargo_binary(config: &Config) -> PathBuf {
    config
        .tools
        .cargo
        .clone()
        .or_else(|| rustup_binary("cargo"))
        .unwrap_or_else(|| PathBuf::from("cargo"))
}

/// Runs `program args` and returns its first stdout line if it exited with 0.
async fn version_line(program: &Path, args: &[&str]) -> Option<String> {
    let result = ProcessBuilder::new(program)
        .args(args)
        .flag(ProcessFlags::ALLOW_FAILURE)
        .stdout_flags(StreamFlags::KEEP_IN_STRING)
        .stderr_flags(StreamFlags::BIT_BUCKET)
        .run()
        .await;
    match result {
        Ok(output) if output.success() => {
            Some(output.stdout().lines().next().unwrap_or_default().trim().to_string())
        }
        Ok(output) => {
            debug!(program = %program.display(), exit_code = output.exit_code(), "not usable");
            None
        }
        Err(e) => {
            debug!(program = %program.display(), error = %e, "not runnable");
            None
        }
    }
}

/// Checks that the bundler is importable by the configured interpreter.
pub async fn pyinstaller_available(config: &Config) -> bool {
    let found = version_line(&config.tools.python, &["-m", "PyInstaller", "--version"]).await;
    if let Some(version) = &found {
        debug!(%version, "found PyInstaller");
    }
    found.is_some()
}

/// Finds the installer compiler.
///
/// An explicit `tools.makensis` wins when it exists, then the default
/// NSIS install directories, then PATH.
#[must_use]
pub fn locate_makensis(config: &Config) -> Option<PathBuf> {
    if let Some(explicit) = &config.tools.makensis {
        if explicit.is_file() {
            return Some(explicit.clone());
        }
        if let Some(found) = explicit.to_str().and_then(ProcessBuilder::find) {
            return Some(found);
        }
        warn!(
            "Configured makensis {} not found, searching default locations",
            explicit.display()
        );
    }

    NSIS_INSTALL_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
        .or_else(|| ProcessBuilder::find("makensis"))
}

/// Checks for a usable Rust toolchain.
///
/// An explicit `tools.rustc` is the only candidate when set.
pub async fn rust_installed(config: &Config) -> bool {
    let rustc = match &config.tools.rustc {
        Some(explicit) => explicit.clone(),
        None if rustup_binary("rustc").is_some() => return true,
        None => PathBuf::from("rustc"),
    };
    let found = version_line(&rustc, &["--version"]).await;
    if let Some(version) = &found {
        debug!(%version, "found Rust toolchain");
    }
    found.is_some()
}

/// Names of the packaging requirements that are not available.
pub async fn missing_requirements(config: &Config, need_makensis: bool) -> Vec<String> {
    let mut missing = Vec::new();
    if !pyinstaller_available(config).await {
        missing.push("PyInstaller".to_string());
    }
    if need_makensis && locate_makensis(config).is_none() {
        missing.push("NSIS (makensis)".to_string());
    }
    missing
}
