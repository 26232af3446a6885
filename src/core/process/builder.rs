// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subprocess description consumed by the runner.
//!
//! ```text
//! ProcessBuilder::new(program)
//!   .arg/.args  .cwd  .env(EnvOverrides)  .name
//!   .flag(ProcessFlags)         ALLOW_FAILURE, IGNORE_OUTPUT_ON_SUCCESS
//!   .stdout_flags/.stderr_flags FORWARD_TO_LOG (default), BIT_BUCKET, KEEP_IN_STRING
//! ProcessBuilder::find(name)    PATH lookup, cached per name
//! ```

use bitflags::bitflags;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::core::env::EnvOverrides;

/// PATH lookups by program name. Misses are not cached.
static PATH_LOOKUPS: LazyLock<Mutex<HashMap<String, PathBuf>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

bitflags! {
    /// How the exit status and forwarded output of a process are treated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u8 {
        /// A non-zero exit or an interruption is returned as output, not as an error.
        const ALLOW_FAILURE = 1;
        /// Forwarded lines are held back and only logged if the process fails.
        const IGNORE_OUTPUT_ON_SUCCESS = 1 << 1;
    }
}

bitflags! {
    /// What happens to the lines of one output stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u8 {
        /// Log each line at debug level.
        const FORWARD_TO_LOG = 1;
        /// Connect the stream to the null device.
        const BIT_BUCKET = 1 << 1;
        /// Collect the lines into `ProcessOutput`.
        const KEEP_IN_STRING = 1 << 2;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Result of a finished (or interrupted) process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub(super) exit_code: i32,
    pub(super) stdout: String,
    pub(super) stderr: String,
    pub(super) interrupted: bool,
}

impl ProcessOutput {
    pub(super) const fn interrupted() -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
            interrupted: true,
        }
    }

    /// Exit code, `-1` when the process was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Kept stdout lines joined with `\n`.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Kept stderr lines joined with `\n`.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.interrupted
    }
}

/// A subprocess to run: program, arguments, working directory, environment
/// overrides and output handling.
#[derive(Debug)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<OsString>,
    pub(super) cwd: Option<PathBuf>,
    pub(super) env: EnvOverrides,
    pub(super) flags: ProcessFlags,
    pub(super) stdout: StreamFlags,
    pub(super) stderr: StreamFlags,
    name: Option<String>,
}

impl ProcessBuilder {
    /// A bare program name is resolved through PATH when the process spawns.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: EnvOverrides::new(),
            flags: ProcessFlags::empty(),
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            name: None,
        }
    }

    /// Full path of `program` on PATH.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let mut lookups = PATH_LOOKUPS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = lookups.get(program) {
            return Some(path.clone());
        }
        let path = which::which(program).ok()?;
        lookups.insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Overrides applied on top of the inherited environment.
    #[must_use]
    pub fn env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    #[must_use]
    pub const fn stdout_flags(mut self, flags: StreamFlags) -> Self {
        self.stdout = flags;
        self
    }

    #[must_use]
    pub const fn stderr_flags(mut self, flags: StreamFlags) -> Self {
        self.stderr = flags;
        self
    }

    /// Name used in log fields instead of the program's file stem.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.program.file_stem().map_or_else(
                || "process".to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            ),
        }
    }

    /// Program and arguments as one line, arguments with spaces quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                let _ = write!(line, " \"{arg}\"");
            } else {
                let _ = write!(line, " {arg}");
            }
        }
        line
    }
}
