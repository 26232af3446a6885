// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! PyInstaller spec file for a one-file executable.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::{VERSION_INFO_FILE, py_bool, py_list, py_pairs, py_str, render_template};
use crate::config::Config;
use crate::error::Result;
use crate::native::library_file_name;
use crate::settings::Interface;

const TEMPLATE: &str = include_str!("templates/app.spec.hbs");

/// Inputs that vary between builds of the same project.
#[derive(Debug, Clone, Copy)]
pub struct SpecOptions<'a> {
    /// Entry script, relative to the project root.
    pub entry: &'a str,
    pub interface: Interface,
    /// Icon path written into the spec, if one exists.
    pub icon: Option<&'a Path>,
    /// Leave the native library out of the bundle.
    pub fallback: bool,
}

/// A rendered spec file.
#[derive(Debug, Clone)]
pub struct SpecFile {
    /// Executable base name (`<name>-CLI` or `<name>`).
    pub output_name: String,
    /// File name of the spec (`<output_name>.spec`).
    pub file_name: PathBuf,
    pub content: String,
}

#[derive(Serialize)]
struct SpecContext {
    entry: String,
    binaries: String,
    datas: String,
    hidden_imports: String,
    output_name: String,
    upx: &'static str,
    console: &'static str,
    icon: String,
    version_file: String,
}

/// Renders the spec file for one build variant.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_spec_file(config: &Config, options: SpecOptions<'_>) -> Result<SpecFile> {
    let output_name = options.interface.output_name(&config.app.name);

    let binaries: Vec<(String, String)> = if options.fallback {
        Vec::new()
    } else {
        let library = config
            .native
            .bundle_dir
            .join(library_file_name(&config.native.lib_name));
        vec![(library.to_string_lossy().into_owned(), ".".to_string())]
    };

    let mut datas = config.bundle.datas.clone();
    let hidden_imports = if options.interface.is_console() {
        &config.bundle.console_hidden_imports
    } else {
        for (src, dst) in &config.bundle.gui_plugin_dirs {
            if config.project_path(Path::new(src)).exists() {
                datas.push((src.clone(), dst.clone()));
            } else {
                debug!(source = %src, "skipping missing plugin directory");
            }
        }
        &config.bundle.gui_hidden_imports
    };

    let icon = options.icon.map_or_else(
        || "icon=None".to_string(),
        |path| format!("icon=[{}]", py_str(&path.to_string_lossy())),
    );

    let context = SpecContext {
        entry: py_str(options.entry),
        binaries: py_pairs(&binaries),
        datas: py_pairs(&datas),
        hidden_imports: py_list(hidden_imports),
        output_name: py_str(&output_name),
        upx: py_bool(config.bundle.upx),
        console: py_bool(options.interface.is_console()),
        icon,
        version_file: py_str(VERSION_INFO_FILE),
    };

    let content = render_template("spec", TEMPLATE, &context)?;
    Ok(SpecFile {
        file_name: PathBuf::from(format!("{output_name}.{}", super::SPEC_EXTENSION)),
        output_name,
        content,
    })
}
