// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for ez-release.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ez-release.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. EZR_* env vars
//! 5. --set section.key=value and dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! EZR_GLOBAL_DRY=true     → global.dry = true
//! EZR_APP_NAME=TrueFA-Py  → app.name = "TrueFA-Py"
//! EZR_PATHS_ROOT=/src/app → paths.root = "/src/app"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{AppConfig, BundleConfig, GlobalConfig, InstallerConfig, NativeConfig, ToolsConfig};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ez-release.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "EZR";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Application metadata.
    pub app: AppConfig,
    /// Executable bundler settings.
    pub bundle: BundleConfig,
    /// Installer settings.
    pub installer: InstallerConfig,
    /// Native library settings.
    pub native: NativeConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// Project paths.
    pub paths: PathsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ez_release::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("ez-release.toml")
    ///     .with_env_prefix("EZR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths and validate required values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the application name or native library
    /// name is empty, or if the version pattern is not a valid regex with a
    /// capture group.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "app".to_string(),
                key: "name".to_string(),
            }
            .into());
        }
        if self.native.lib_name.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "native".to_string(),
                key: "lib_name".to_string(),
            }
            .into());
        }

        let pattern = regex::Regex::new(&self.app.version_pattern).map_err(|e| {
            ConfigError::InvalidValue {
                section: "app".to_string(),
                key: "version_pattern".to_string(),
                message: e.to_string(),
            }
        })?;
        if pattern.captures_len() < 2 {
            return Err(ConfigError::InvalidValue {
                section: "app".to_string(),
                key: "version_pattern".to_string(),
                message: "pattern needs a capture group for the version".to_string(),
            }
            .into());
        }

        self.paths.resolve();
        Ok(())
    }

    /// Resolve a project-relative path against `paths.root`.
    #[must_use]
    pub fn project_path(&self, path: &Path) -> PathBuf {
        self.paths.project_path(path)
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_app_options(&mut options);
        self.format_bundle_options(&mut options);
        self.format_installer_options(&mut options);
        self.format_native_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            u8::from(self.global.output_log_level).to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            u8::from(self.global.file_log_level).to_string(),
        );
        options.insert(
            "global.log_file".into(),
            fmt_opt_path(self.global.log_file.as_deref()),
        );
    }

    fn format_app_options(&self, options: &mut BTreeMap<String, String>) {
        let app = &self.app;
        options.insert("app.name".into(), app.name.clone());
        options.insert("app.author".into(), app.author.clone());
        options.insert("app.copyright".into(), app.copyright.clone());
        options.insert("app.description".into(), app.description.clone());
        options.insert("app.website".into(), app.website.clone());
        options.insert(
            "app.version_file".into(),
            app.version_file.display().to_string(),
        );
        options.insert("app.version_pattern".into(), app.version_pattern.clone());
        options.insert("app.icon".into(), app.icon.display().to_string());
        options.insert(
            "app.license_file".into(),
            app.license_file.display().to_string(),
        );
        options.insert("app.entry_console".into(), app.entry_console.clone());
        options.insert("app.entry_gui".into(), app.entry_gui.clone());
        options.insert("app.env_prefix".into(), app.env_prefix());
    }

    fn format_bundle_options(&self, options: &mut BTreeMap<String, String>) {
        let bundle = &self.bundle;
        options.insert("bundle.datas".into(), fmt_pairs(&bundle.datas));
        options.insert(
            "bundle.gui_hidden_imports".into(),
            bundle.gui_hidden_imports.join(", "),
        );
        options.insert(
            "bundle.console_hidden_imports".into(),
            bundle.console_hidden_imports.join(", "),
        );
        options.insert(
            "bundle.gui_plugin_dirs".into(),
            fmt_pairs(&bundle.gui_plugin_dirs),
        );
        options.insert("bundle.upx".into(), bundle.upx.to_string());
        options.insert(
            "bundle.build_env_file".into(),
            bundle.build_env_file.display().to_string(),
        );
    }

    fn format_installer_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("installer.language".into(), self.installer.language.clone());
        options.insert(
            "installer.desktop_shortcut".into(),
            self.installer.desktop_shortcut.to_string(),
        );
        options.insert(
            "installer.registry_root".into(),
            self.installer.registry_root.clone(),
        );
    }

    fn format_native_options(&self, options: &mut BTreeMap<String, String>) {
        let native = &self.native;
        let join_paths = |paths: &[PathBuf]| {
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        options.insert(
            "native.crate_dir".into(),
            native.crate_dir.display().to_string(),
        );
        options.insert("native.lib_name".into(), native.lib_name.clone());
        options.insert(
            "native.required_symbols".into(),
            native.required_symbols.join(", "),
        );
        options.insert(
            "native.search_paths".into(),
            join_paths(&native.search_paths),
        );
        options.insert("native.copy_to".into(), join_paths(&native.copy_to));
        options.insert(
            "native.bundle_dir".into(),
            native.bundle_dir.display().to_string(),
        );
        options.insert(
            "native.post_build_script".into(),
            fmt_opt_path(native.post_build_script.as_deref()),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "tools.python".into(),
            self.tools.python.display().to_string(),
        );
        options.insert(
            "tools.makensis".into(),
            fmt_opt_path(self.tools.makensis.as_deref()),
        );
        options.insert("tools.cargo".into(), fmt_opt_path(self.tools.cargo.as_deref()));
        options.insert("tools.rustc".into(), fmt_opt_path(self.tools.rustc.as_deref()));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.root".into(), self.paths.root.display().to_string());
        options.insert("paths.build".into(), self.paths.build.display().to_string());
        options.insert("paths.dist".into(), self.paths.dist.display().to_string());
    }
}

fn fmt_opt_path(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

fn fmt_pairs(pairs: &[types::DataPair]) -> String {
    pairs
        .iter()
        .map(|(src, dst)| format!("{src} -> {dst}"))
        .collect::<Vec<_>>()
        .join(", ")
}
