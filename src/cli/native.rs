// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `native` command.
#[derive(Debug, Clone, Default, Args)]
pub struct NativeArgs {
    /// Leaves the built library in the cargo target directory.
    #[arg(long = "no-copy")]
    pub no_copy: bool,

    /// Python script run after a successful build, overriding
    /// `native.post_build_script`.
    #[arg(long = "post-build", value_name = "SCRIPT")]
    pub post_build: Option<PathBuf>,
}
