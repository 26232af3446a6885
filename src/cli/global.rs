// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional config files (can repeat)
//! --dry               ← Log tool invocations instead of running them
//! --log-level N       ← Console verbosity (0-5)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← Enable file logging
//! --project-dir DIR   ← paths.root override
//! --set KEY=VAL       ← Direct config override
//!
//! Precedence: CLI flags > --set > EZR_* env > --config > ez-release.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;
use crate::logging::{LogConfig, LogLevel};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Logs the commands that would run without running any external tool
    /// or touching the filesystem.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Project root; external tools run here.
    #[arg(short = 'C', long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Sets an option, such as 'app.name=MyApp' or 'installer.desktop_shortcut=false'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Configuration file picked up without `--config`.
    ///
    /// Looked up in `--project-dir` when given, else the working directory.
    #[must_use]
    pub fn default_config_file(&self) -> PathBuf {
        self.project_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_CONFIG_FILE)
    }

    /// Converts command-line options to `section.key=value` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global.dry=true".to_string());
        }

        if let Some(ref root) = self.project_dir {
            overrides.push(format!("paths.root={}", root.display()));
        }

        overrides
    }

    /// Creates a loader for every configuration layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is not a `section.key=value`
    /// assignment.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new().add_toml_file_optional(self.default_config_file());
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);

        for assignment in self.to_config_overrides() {
            loader = loader.set_assignment(&assignment)?;
        }
        Ok(loader)
    }

    /// Logging setup from the command line alone, used when no
    /// configuration could be loaded.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(LogLevel::Info);

        let file_level = self
            .file_log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(console_level);

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(file_level)
            .maybe_with_log_file(self.log_file.clone())
            .build()
    }
}
