// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application version detection.
//!
//! ```text
//! --app-version VER ----------------------------+
//!                                               v
//! app.version_file --read--> version_pattern --> "1.2.3"
//!                                               |
//!                              version_tuple -> [1, 2, 3, 0]
//! ```

use std::path::Path;

use anyhow::Context;
use regex::Regex;
use tokio::fs;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, Result};


/// Resolves the application version.
///
/// An explicit override wins; otherwise the version is read from
/// `app.version_file`.
///
/// # Errors
///
/// Returns an error if detection is needed and fails.
pub async fn resolve_version(config: &Config, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(version) => {
            debug!(version, "using explicit version");
            Ok(version.to_string())
        }
        None => detect_version(config).await,
    }
}

/// Reads the version string from `app.version_file`.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be read or the version
/// pattern does not match.
pub async fn detect_version(config: &Config) -> Result<String> {
    let path = config.project_path(&config.app.version_file);
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let version = parse_version(&content, &config.app.version_pattern, &path)?;
    debug!(version = %version, file = %path.display(), "detected version");
    Ok(version)
}

/// Extracts the first capture group of `pattern` from `content`.
fn parse_version(content: &str, pattern: &str, path: &Path) -> Result<String> {
    let regex = Regex::new(pattern)
        .with_context(|| format!("failed to compile version pattern '{pattern}'"))?;

    let captures = regex
        .captures(content)
        .with_context(|| format!("version string not found in {}", path.display()))?;
    let version = captures
        .get(1)
        .with_context(|| format!("version capture missing in {}", path.display()))?
        .as_str()
        .trim()
        .to_string();

    if version.is_empty() {
        anyhow::bail!("empty version string in {}", path.display());
    }
    Ok(version)
}

/// Normalises a version string to four numeric components.
///
/// Each dot-separated component contributes its leading digits; missing
/// components are zero and extra components are dropped. `1.2.3-beta`
/// becomes `[1, 2, 3, 0]`.
///
/// # Errors
///
/// Returns a `ConfigError::InvalidValue` if a component has no leading
/// digit or does not fit in a `u32`.
pub fn version_tuple(version: &str) -> Result<[u32; 4]> {
    let invalid = |message: String| ConfigError::InvalidValue {
        section: "app".to_string(),
        key: "version".to_string(),
        message,
    };

    let mut parts = [0u32; 4];
    for (slot, component) in parts.iter_mut().zip(version.trim().split('.')) {
        let digits: &str = component
            .find(|c: char| !c.is_ascii_digit())
            .map_or(component, |end| &component[..end]);
        if digits.is_empty() {
            return Err(invalid(format!(
                "'{version}': component '{component}' is not numeric"
            ))
            .into());
        }
        *slot = digits
            .parse()
            .map_err(|e| invalid(format!("'{version}': {e}")))?;
    }
    Ok(parts)
}
