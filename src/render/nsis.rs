// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! NSIS (MUI2) installer script.
//!
//! ```text
//! dist\<base>.exe --File--> $INSTDIR\<base>.exe
//! OutFile  dist\<base>_Setup_<version>.exe
//! InstallDir $PROGRAMFILES\<name>[ CLI]
//! Start menu + optional desktop shortcut, App Paths + Uninstall keys
//! ```

use std::path::Path;

use serde::Serialize;

use super::{nsis_str, render_template, windows_path};
use crate::config::Config;
use crate::error::Result;
use crate::settings::Interface;

const TEMPLATE: &str = include_str!("templates/installer.nsi.hbs");

const APP_PATHS_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\App Paths";
const UNINSTALL_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Uninstall";

#[derive(Serialize)]
struct NsisContext {
    product_name: String,
    product_version: String,
    publisher: String,
    website: String,
    dir_regkey: String,
    uninst_key: String,
    registry_root: String,
    icon: Option<String>,
    license: Option<String>,
    language: String,
    name_suffix: &'static str,
    out_file: String,
    install_dir: String,
    exe_source: String,
    installed_exe: String,
    uninstaller: String,
    start_menu_dir: String,
    start_menu_link: String,
    desktop_link: String,
    desktop_shortcut: bool,
}

/// File name of the setup executable makensis produces.
#[must_use]
pub fn installer_file_name(config: &Config, interface: Interface, version: &str) -> String {
    format!(
        "{}_Setup_{version}.exe",
        interface.output_name(&config.app.name)
    )
}

/// Renders the installer script.
///
/// `icon` is included only when given; the license page only when
/// `app.license_file` exists under the project root.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_nsis_script(
    config: &Config,
    interface: Interface,
    version: &str,
    icon: Option<&Path>,
) -> Result<String> {
    let app = &config.app;
    let exe_name = format!("{}.exe", interface.output_name(&app.name));
    let dist = windows_path(&config.paths.dist_relative());
    let name_suffix = if interface.is_console() { " CLI" } else { "" };

    let license = config
        .project_path(&app.license_file)
        .exists()
        .then(|| nsis_str(&windows_path(&app.license_file)));

    let context = NsisContext {
        product_name: nsis_str(&app.name),
        product_version: nsis_str(version),
        publisher: nsis_str(&app.author),
        website: nsis_str(&app.website),
        dir_regkey: format!("{APP_PATHS_KEY}\\{}", nsis_str(&exe_name)),
        uninst_key: format!("{UNINSTALL_KEY}\\${{PRODUCT_NAME}}"),
        registry_root: config.installer.registry_root.clone(),
        icon: icon.map(|path| nsis_str(&windows_path(path))),
        license,
        language: nsis_str(&config.installer.language),
        name_suffix,
        out_file: nsis_str(&format!(
            "{dist}\\{}",
            installer_file_name(config, interface, version)
        )),
        install_dir: format!("$PROGRAMFILES\\${{PRODUCT_NAME}}{name_suffix}"),
        exe_source: nsis_str(&format!("{dist}\\{exe_name}")),
        installed_exe: format!("$INSTDIR\\{}", nsis_str(&exe_name)),
        uninstaller: "$INSTDIR\\uninstall.exe".to_string(),
        start_menu_dir: "$SMPROGRAMS\\${PRODUCT_NAME}".to_string(),
        start_menu_link: "$SMPROGRAMS\\${PRODUCT_NAME}\\${PRODUCT_NAME}.lnk".to_string(),
        desktop_link: "$DESKTOP\\${PRODUCT_NAME}.lnk".to_string(),
        desktop_shortcut: config.installer.desktop_shortcut,
    };

    render_template("installer", TEMPLATE, &context)
}
