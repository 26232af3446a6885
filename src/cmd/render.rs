// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Render command implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::cli::render::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::render::nsis::render_nsis_script;
use crate::render::spec_file::{SpecOptions, render_spec_file};
use crate::render::version_info::render_version_info;
use crate::render::{NSIS_SCRIPT_FILE, VERSION_INFO_FILE};
use crate::settings::Interface;
use crate::version::resolve_version;

use super::package::entry_script;

/// Writes the spec file, version info and installer script into the output
/// directory. Returns the written paths.
///
/// # Errors
///
/// Returns an error if the version cannot be determined, a template fails
/// to render, or a file cannot be written.
pub async fn run_render_command(args: &RenderArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| config.paths.root.clone());
    let interface = Interface::from_no_console(args.no_console);
    let version = resolve_version(config, args.app_version.as_deref()).await?;

    let icon = config
        .project_path(&config.app.icon)
        .is_file()
        .then_some(config.app.icon.as_path());

    let spec = render_spec_file(
        config,
        SpecOptions {
            entry: entry_script(config, interface),
            interface,
            icon,
            fallback: args.fallback,
        },
    )?;
    let version_info = render_version_info(config, &version)?;
    let script = render_nsis_script(config, interface, &version, icon)?;

    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let outputs = [
        (out_dir.join(&spec.file_name), spec.content),
        (out_dir.join(VERSION_INFO_FILE), version_info),
        (out_dir.join(NSIS_SCRIPT_FILE), script),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (path, content) in outputs {
        write_output(&path, &content).await?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

async fn write_output(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
