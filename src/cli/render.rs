// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Render command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Output directory (defaults to the project root).
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Renders for the GUI front end.
    #[arg(long = "no-console")]
    pub no_console: bool,

    /// Leaves the native library out of the spec file.
    #[arg(long)]
    pub fallback: bool,

    /// Version to stamp instead of the one detected from the sources.
    #[arg(long = "app-version", value_name = "VERSION")]
    pub app_version: Option<String>,
}
