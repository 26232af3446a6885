// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! (none)                    portable + installer
//! --portable / --installer  only that variant (both flags: both variants)
//! --no-console              GUI entry script, `<name>` instead of `<name>-CLI`
//! --fallback                bundle without the native library
//! ```

use clap::Args;

use crate::settings::DEFAULT_LOGGING_CONFIG;

/// Arguments for the `package` command.
#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Builds the portable executable.
    #[arg(long)]
    pub portable: bool,

    /// Builds the installer.
    #[arg(long)]
    pub installer: bool,

    /// Removes the build and dist directories first.
    #[arg(long)]
    pub clean: bool,

    /// Bundles the GUI front end without a console window.
    #[arg(long = "no-console")]
    pub no_console: bool,

    /// Uses the pure Python cryptography backend; the native library is
    /// neither required nor bundled.
    #[arg(long)]
    pub fallback: bool,

    /// Logging settings baked into the build, e.g. 'logging=enabled,debug=disabled'.
    #[arg(long = "config-logging", value_name = "SETTINGS", default_value = DEFAULT_LOGGING_CONFIG)]
    pub config_logging: String,

    /// Version to stamp instead of the one detected from the sources.
    #[arg(long = "app-version", value_name = "VERSION")]
    pub app_version: Option<String>,
}

impl Default for PackageArgs {
    fn default() -> Self {
        Self {
            portable: false,
            installer: false,
            clean: false,
            no_console: false,
            fallback: false,
            config_logging: DEFAULT_LOGGING_CONFIG.to_string(),
            app_version: None,
        }
    }
}
