// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use ez_release::config::Config;
use ez_release::logging::LogLevel;
use std::path::{Path, PathBuf};

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full_project() {
    let toml = r#"
[app]
name = "TrueFA-Py"
author = "Romeo Ahmed"
description = "Two-factor authenticator"
version_file = "src/truefa_py/__init__.py"
entry_gui = "gui_main.py"

[bundle]
datas = [["assets/*", "assets"], ["locale/*", "locale"]]
console_hidden_imports = ["cryptography"]
upx = false

[installer]
desktop_shortcut = false

[native]
lib_name = "truefa_crypto"
copy_to = ["src/truefa_crypto"]
post_build_script = "scripts/fix_dll.py"

[tools]
makensis = "C:/NSIS/makensis.exe"

[paths]
root = "/work/truefa"
dist = "release"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.app.name, "TrueFA-Py");
    assert_eq!(config.app.env_prefix(), "TRUEFA_PY");
    assert_eq!(config.app.entry_console, "main.py");
    assert_eq!(config.app.entry_gui, "gui_main.py");
    assert_eq!(config.bundle.datas.len(), 2);
    assert_eq!(config.bundle.datas[1], ("locale/*".to_string(), "locale".to_string()));
    assert_eq!(config.bundle.console_hidden_imports, vec!["cryptography".to_string()]);
    assert!(!config.bundle.upx);
    assert!(!config.installer.desktop_shortcut);
    assert_eq!(
        config.native.post_build_script,
        Some(PathBuf::from("scripts/fix_dll.py"))
    );
    assert_eq!(config.native.required_symbols.len(), 12);
    assert_eq!(config.tools.makensis, Some(PathBuf::from("C:/NSIS/makensis.exe")));
    assert_eq!(config.paths.dist, Path::new("/work/truefa").join("release"));
    assert_eq!(config.paths.build, Path::new("/work/truefa").join("build"));
}

#[test]
fn config_parse_global_section() {
    let toml = r"
[global]
dry = true
output_log_level = 5
file_log_level = 1
";
    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::Trace);
    assert_eq!(config.global.file_log_level, LogLevel::Error);
}

#[test]
fn config_log_level_out_of_range() {
    let toml = r"
[global]
output_log_level = 6
";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn config_unknown_section_rejected() {
    let toml = r"
[tasks]
usvfs = true
";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn config_explicit_env_prefix() {
    let toml = r#"
[app]
name = "My App"
env_prefix = "MYAPP"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.app.env_prefix(), "MYAPP");
}

// =============================================================================
// Layered loading
// =============================================================================

#[test]
fn config_builder_layered() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let local = temp.path().join("local.toml");
    std::fs::write(&base, "[app]\nname = \"Base\"\nauthor = \"Base Author\"\n").unwrap();
    std::fs::write(&local, "[app]\nname = \"Local\"\n").unwrap();

    let loader = Config::builder()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(temp.path().join("missing.toml"));
    assert_eq!(loader.loaded_files().len(), 2);
    assert_eq!(
        loader.format_loaded_files()[0],
        format!("1. [file] {}", base.display())
    );

    let config = loader.build().unwrap();
    assert_eq!(config.app.name, "Local");
    assert_eq!(config.app.author, "Base Author");
}

#[test]
fn config_builder_missing_required_file() {
    let temp = tempfile::tempdir().unwrap();
    let result = Config::builder()
        .add_toml_file(temp.path().join("nope.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_builder_set_override() {
    let config = Config::builder()
        .add_toml_str("[installer]\nlanguage = \"German\"\n")
        .set_assignment("installer.language=French")
        .unwrap()
        .set("bundle.upx", false)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.installer.language, "French");
    assert!(!config.bundle.upx);
}

#[test]
fn config_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("ez-release.toml");
    std::fs::write(&file, "[native]\ncrate_dir = \"crypto\"\n").unwrap();

    let config = Config::builder().add_toml_file(&file).build().unwrap();
    assert_eq!(config.native.crate_dir, PathBuf::from("crypto"));
}

// =============================================================================
// Options output
// =============================================================================

#[test]
fn config_options_cover_every_section() {
    let lines = Config::default().format_options();
    for section in [
        "global.", "app.", "bundle.", "installer.", "native.", "tools.", "paths.",
    ] {
        assert!(
            lines.iter().any(|line| line.starts_with(section)),
            "no {section} option in {lines:?}"
        );
    }
}

#[test]
fn config_options_json_round_trips() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["installer"]["registry_root"], "HKLM");
    assert_eq!(value["native"]["lib_name"], "truefa_crypto");
}
