// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 ReleaseError (~24 bytes)
//!                          |
//!   +------+------+------+--+-----+--------+----+
//!   |      |      |      |        |        |    |
//!   v      v      v      v        v        v    v
//!  Cfg   Proc   Tool   Native  Template    Fs   Io
//!  Box   Box    Box    Box     Box<str>    Box  Box
//!
//! Sub-errors (unboxed internally):
//!   Config   MissingKey, InvalidValue
//!   Process  SpawnFailed, NonZeroExit, Interrupted
//!   Tool     Missing, OutputMissing
//!   Native   Parse, UnsupportedFormat, MissingSymbols, NotFound
//!   Fs       NotFound
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ReleaseError`].
pub type ReleaseResult<T> = std::result::Result<T, ReleaseError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// External tool error.
    #[error("tool error: {0}")]
    Tool(#[from] Box<ToolError>),

    /// Native library inspection error.
    #[error("native library error: {0}")]
    Native(#[from] Box<NativeError>),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(Box<str>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a [`ReleaseError::Template`] from a rendering failure.
pub fn template_error(message: impl Into<String>) -> ReleaseError {
    ReleaseError::Template(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ReleaseError {
                fn from(err: $error) -> Self {
                    ReleaseError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    ToolError => Tool,
    NativeError => Native,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was interrupted before it completed.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },
}

// --- Tool Errors ---

/// Errors reported by external tool wrappers.
#[derive(Debug, Error)]
pub enum ToolError {
    /// One or more required tools are not installed.
    #[error("missing requirements: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// Tool finished but did not produce its expected output.
    #[error("{tool} did not produce expected output '{path}'")]
    OutputMissing { tool: String, path: String },
}

// --- Native Library Errors ---

/// Errors from inspecting a native library.
#[derive(Debug, Error)]
pub enum NativeError {
    /// Library could not be parsed as PE, ELF or Mach-O.
    #[error("failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    /// Library format is recognised but has no export table we understand.
    #[error("unsupported binary format for '{path}'")]
    UnsupportedFormat { path: String },

    /// Library is missing required exports.
    #[error("'{path}' is missing exports: {}", .missing.join(", "))]
    MissingSymbols { path: String, missing: Vec<String> },

    /// No usable library was found.
    #[error("native library '{name}' not found")]
    NotFound { name: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),
}
