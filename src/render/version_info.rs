// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows version resource in the bundler's `VSVersionInfo` syntax.

use serde::Serialize;

use super::{py_str, render_template};
use crate::config::Config;
use crate::error::Result;
use crate::version::version_tuple;

const TEMPLATE: &str = include_str!("templates/file_version_info.txt.hbs");

#[derive(Serialize)]
struct VersionInfoContext {
    version_tuple: String,
    company: String,
    description: String,
    version: String,
    name: String,
    copyright: String,
    original_filename: String,
}

/// Renders the version resource for `version`.
///
/// # Errors
///
/// Returns an error if `version` cannot be normalised to four numeric
/// components or rendering fails.
pub fn render_version_info(config: &Config, version: &str) -> Result<String> {
    let parts = version_tuple(version)?;
    let app = &config.app;

    let context = VersionInfoContext {
        version_tuple: parts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        company: py_str(&app.author),
        description: py_str(&app.description),
        version: py_str(version),
        name: py_str(&app.name),
        copyright: py_str(&app.copyright),
        original_filename: py_str(&format!("{}.exe", app.name)),
    };

    render_template("version_info", TEMPLATE, &context)
}
