// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for ez-release.

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::version::detect_version;

/// Renders the effective options, one `key = value` line each or a single
/// JSON document.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn format_options(config: &Config, json: bool) -> Result<Vec<String>> {
    if json {
        let document =
            serde_json::to_string_pretty(config).context("failed to serialize configuration")?;
        return Ok(vec![document]);
    }
    Ok(config.format_options())
}

/// Display current configuration options.
///
/// # Errors
///
/// Returns an error if `--json` output cannot be produced.
pub fn run_options_command(config: &Config, json: bool) -> Result<()> {
    for line in format_options(config, json)? {
        println!("{line}");
    }
    Ok(())
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Print the application version found in the sources.
///
/// # Errors
///
/// Returns an error if the version file is missing or holds no version.
pub async fn run_app_version_command(config: &Config) -> Result<()> {
    let version = detect_version(config).await?;
    println!("{version}");
    Ok(())
}
