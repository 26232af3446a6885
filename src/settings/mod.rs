// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build settings derived from command line flags.
//!
//! ```text
//! --portable/--installer --> select_variants --> [Portable, Installer]
//! --no-console           --> Interface::{Console, Gui}
//! --config-logging STR   --> LoggingSettings --> _build_env.py
//! ```

use std::fmt;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::error::Result;
use crate::render::build_env::render_build_env;


/// Default value of `--config-logging`.
pub const DEFAULT_LOGGING_CONFIG: &str = "logging=enabled,debug=disabled";

/// Logging switches baked into the bundled application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingSettings {
    pub logging: bool,
    pub debug: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            logging: true,
            debug: false,
        }
    }
}

impl LoggingSettings {
    /// Parses `logging=enabled|disabled,debug=enabled|disabled`.
    ///
    /// Keys and values are case-insensitive; unknown keys are ignored. Any
    /// part that is not exactly one `key=value` pair makes the whole string
    /// invalid, which is reported and replaced by the defaults.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut settings = Self::default();
        for part in input.split(',') {
            let mut pair = part.split('=');
            let (Some(key), Some(value), None) = (pair.next(), pair.next(), pair.next()) else {
                warn!(
                    config = input,
                    "Invalid logging configuration, using defaults (logging enabled, debug disabled)"
                );
                return Self::default();
            };

            let enabled = value.trim().eq_ignore_ascii_case("enabled");
            match key.trim().to_ascii_lowercase().as_str() {
                "logging" => settings.logging = enabled,
                "debug" => settings.debug = enabled,
                other => debug!(key = other, "ignoring unknown logging key"),
            }
        }
        settings
    }
}

impl fmt::Display for LoggingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |on: bool| if on { "enabled" } else { "disabled" };
        write!(
            f,
            "logging={},debug={}",
            state(self.logging),
            state(self.debug)
        )
    }
}

/// Writes the build environment module consumed by the application.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_build_env_file(path: &Path, settings: LoggingSettings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, render_build_env(settings))
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), %settings, "wrote build environment file");
    Ok(())
}

/// Build output kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    /// Single-file executable.
    Portable,
    /// Executable wrapped in a setup program.
    Installer,
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portable => f.write_str("portable"),
            Self::Installer => f.write_str("installer"),
        }
    }
}

/// Selects the variants to build; neither flag means both.
#[must_use]
pub fn select_variants(portable: bool, installer: bool) -> Vec<BuildVariant> {
    match (portable, installer) {
        (true, false) => vec![BuildVariant::Portable],
        (false, true) => vec![BuildVariant::Installer],
        _ => vec![BuildVariant::Portable, BuildVariant::Installer],
    }
}

/// Application front end being bundled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Console,
    Gui,
}

impl Interface {
    #[must_use]
    pub const fn from_no_console(no_console: bool) -> Self {
        if no_console { Self::Gui } else { Self::Console }
    }

    #[must_use]
    pub const fn is_console(self) -> bool {
        matches!(self, Self::Console)
    }

    /// Base name of the produced executable.
    #[must_use]
    pub fn output_name(self, app_name: &str) -> String {
        match self {
            Self::Console => format!("{app_name}-CLI"),
            Self::Gui => app_name.to_string(),
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("console"),
            Self::Gui => f.write_str("gui"),
        }
    }
}
