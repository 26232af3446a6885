// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for ez-release using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! ez-release [global options] <command>
//! package      bundle portable executable and/or installer
//! native       build and verify the native library
//! render       write generated files for inspection
//! app-version  print the detected application version
//! options | configs | version
//! ```

pub mod global;
pub mod native;
pub mod package;
pub mod render;


use crate::cli::global::GlobalOptions;
use crate::cli::native::NativeArgs;
use crate::cli::package::PackageArgs;
use crate::cli::render::RenderArgs;
use clap::{Args, Parser, Subcommand};

/// Release Packaging Tool
///
/// Bundles a Python application into single-file executables and Windows
/// installers.
#[derive(Debug, Parser)]
#[command(
    name = "ez-release",
    author,
    version,
    about = "Release Packaging Tool",
    long_about = "ez-release Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Bundles a Python application with PyInstaller, wraps it in an\n\
                  NSIS installer and verifies the companion native library.\n\n\
                  Invoking `ez-release package` builds both the portable executable\n\
                  and the installer. See `ez-release <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  ez-release reads `ez-release.toml` from the project directory\n\
                  when present. Additional files given with --config are loaded\n\
                  after it, in order. EZR_<SECTION>_<KEY> environment variables\n\
                  override files, and --set section.key=value overrides everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options(OptionsArgs),

    /// Lists the configuration files in use.
    Configs,

    /// Prints the application version detected from the sources.
    #[command(name = "app-version")]
    AppVersion,

    /// Bundles the application.
    Package(PackageArgs),

    /// Builds and verifies the native library.
    Native(NativeArgs),

    /// Writes the generated build files without running any tool.
    Render(RenderArgs),
}

/// Arguments for the `options` command.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionsArgs {
    /// Prints the configuration as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
