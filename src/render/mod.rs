// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text generation for the files handed to external tools.
//!
//! ```text
//! Config + variant --> *Context (serde) --> handlebars (no escaping) --> String
//!   spec_file     <output>.spec           PyInstaller
//!   version_info  file_version_info.txt   PyInstaller (Windows resources)
//!   nsis          installer.nsi           makensis
//!   build_env     _build_env.py           bundled module
//! ```
//!
//! Handlebars performs no escaping here. Values are quoted for the target
//! language in Rust before they reach a template, and any value preceded by
//! a backslash in the output is precomputed so templates never contain
//! `\{{`.

pub mod build_env;
pub mod nsis;
pub mod spec_file;
pub mod version_info;


use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Result, template_error};

/// Version resource consumed by the bundler.
pub const VERSION_INFO_FILE: &str = "file_version_info.txt";

/// Installer script consumed by makensis.
pub const NSIS_SCRIPT_FILE: &str = "installer.nsi";

/// Extension of bundler spec files.
pub const SPEC_EXTENSION: &str = "spec";

/// Renders `template` with `data`.
///
/// # Errors
///
/// Returns a `ReleaseError::Template` if the template is malformed or
/// rendering fails.
pub fn render_template<T: Serialize>(name: &str, template: &str, data: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(name, template)
        .map_err(|e| template_error(format!("failed to register {name} template: {e}")))?;

    let rendered = handlebars
        .render(name, data)
        .map_err(|e| template_error(format!("failed to render {name} template: {e}")))?;
    Ok(rendered)
}

/// Quotes a value as a single-quoted Python string literal.
#[must_use]
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Renders a Python boolean.
#[must_use]
pub const fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Renders a Python list of strings.
#[must_use]
pub fn py_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| py_str(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Renders a Python list of `(source, destination)` tuples.
#[must_use]
pub fn py_pairs<A: AsRef<str>, B: AsRef<str>>(pairs: &[(A, B)]) -> String {
    let quoted: Vec<String> = pairs
        .iter()
        .map(|(src, dst)| format!("({}, {})", py_str(src.as_ref()), py_str(dst.as_ref())))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Escapes a value for use inside an NSIS double-quoted string.
#[must_use]
pub fn nsis_str(value: &str) -> String {
    value.replace('"', "$\\\"")
}

/// Renders a path with Windows separators.
#[must_use]
pub fn windows_path(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}
