// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for ez-release.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, AppConfig, BundleConfig, InstallerConfig,
//!         NativeConfig, ToolsConfig, PathsConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default pattern for `__version__ = "x.y.z"` in a Python module.
pub const DEFAULT_VERSION_PATTERN: &str = r#"(?m)^__version__\s*=\s*['"]([^'"]*)['"]"#;

/// Exports the cryptography module must provide.
pub const DEFAULT_REQUIRED_SYMBOLS: &[&str] = &[
    "c_secure_random_bytes",
    "c_is_vault_unlocked",
    "c_vault_exists",
    "c_create_vault",
    "c_unlock_vault",
    "c_lock_vault",
    "c_generate_salt",
    "c_derive_master_key",
    "c_encrypt_master_key",
    "c_decrypt_master_key",
    "c_verify_signature",
    "c_create_secure_string",
];

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would run without invoking external tools.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file (no file logging when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Debug,
            log_file: None,
        }
    }
}

/// Application metadata stamped into the bundle and installer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Product name, also the base of output file names.
    pub name: String,
    /// Publisher / company name.
    pub author: String,
    /// Copyright line.
    pub copyright: String,
    /// One-line product description.
    pub description: String,
    /// Product web site.
    pub website: String,
    /// Source file holding the version string.
    pub version_file: PathBuf,
    /// Regex whose first capture group is the version.
    pub version_pattern: String,
    /// Application icon (.ico).
    pub icon: PathBuf,
    /// License shown by the installer.
    pub license_file: PathBuf,
    /// Entry script for console builds.
    pub entry_console: String,
    /// Entry script for GUI builds.
    pub entry_gui: String,
    /// Prefix for build environment variables (derived from `name` if empty).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub env_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "App".to_string(),
            author: String::new(),
            copyright: String::new(),
            description: String::new(),
            website: String::new(),
            version_file: PathBuf::from("src/__init__.py"),
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            icon: PathBuf::from("assets/app.ico"),
            license_file: PathBuf::from("LICENSE"),
            entry_console: "main.py".to_string(),
            entry_gui: "gui.py".to_string(),
            env_prefix: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the environment variable prefix.
    ///
    /// `TrueFA-Py` becomes `TRUEFA_PY` when no explicit prefix is set.
    #[must_use]
    pub fn env_prefix(&self) -> String {
        if !self.env_prefix.is_empty() {
            return self.env_prefix.clone();
        }
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// A `(source, destination)` pair handed to the bundler.
pub type DataPair = (String, String);

/// Executable bundler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Data files bundled into every build.
    pub datas: Vec<DataPair>,
    /// Hidden imports for GUI builds.
    pub gui_hidden_imports: Vec<String>,
    /// Hidden imports for console builds.
    pub console_hidden_imports: Vec<String>,
    /// Extra data directories for GUI builds, added only when present.
    pub gui_plugin_dirs: Vec<DataPair>,
    /// Compress the executable with UPX.
    pub upx: bool,
    /// Generated module carrying build-time logging settings.
    pub build_env_file: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            datas: vec![("assets/*".to_string(), "assets".to_string())],
            gui_hidden_imports: [
                "PyQt6",
                "PyQt6.sip",
                "PyQt6.QtCore",
                "PyQt6.QtGui",
                "PyQt6.QtWidgets",
                "PyQt6.QtNetwork",
                "PyQt6.QtSvg",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            console_hidden_imports: Vec::new(),
            gui_plugin_dirs: Vec::new(),
            upx: true,
            build_env_file: PathBuf::from("_build_env.py"),
        }
    }
}

/// Installer script settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// MUI language name.
    pub language: String,
    /// Create a desktop shortcut.
    pub desktop_shortcut: bool,
    /// Registry root for the uninstall key.
    pub registry_root: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            desktop_shortcut: true,
            registry_root: "HKLM".to_string(),
        }
    }
}

/// Companion native library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeConfig {
    /// Cargo crate directory.
    pub crate_dir: PathBuf,
    /// Library name without platform prefix/suffix.
    pub lib_name: String,
    /// Exports the application resolves at runtime.
    pub required_symbols: Vec<String>,
    /// Directories searched, in order, for an already built library.
    pub search_paths: Vec<PathBuf>,
    /// Directories a verified library is copied into.
    pub copy_to: Vec<PathBuf>,
    /// Directory the bundler picks the library from.
    pub bundle_dir: PathBuf,
    /// Python script run after a successful native build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_build_script: Option<PathBuf>,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            crate_dir: PathBuf::from("rust_crypto"),
            lib_name: "truefa_crypto".to_string(),
            required_symbols: DEFAULT_REQUIRED_SYMBOLS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            search_paths: vec![
                PathBuf::from("."),
                PathBuf::from("truefa_crypto"),
                PathBuf::from("src/truefa_crypto"),
                PathBuf::from("rust_crypto/target/release"),
            ],
            copy_to: vec![
                PathBuf::from("src/truefa_crypto"),
                PathBuf::from("truefa_crypto"),
            ],
            bundle_dir: PathBuf::from("truefa_crypto"),
            post_build_script: None,
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Python interpreter used to run the bundler and helper scripts.
    pub python: PathBuf,
    /// Explicit makensis path (searched when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub makensis: Option<PathBuf>,
    /// Explicit cargo path. Unset means the rustup-managed cargo, then PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<PathBuf>,
    /// Explicit rustc path, run to detect a toolchain. Resolved like `cargo`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rustc: Option<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from(if cfg!(windows) { "python" } else { "python3" }),
            makensis: None,
            cargo: None,
            rustc: None,
        }
    }
}
