// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use super::config::format_options;
use super::native::run_native_command;
use super::package::{build_env_overrides, entry_script, run_package_command};
use super::render::run_render_command;
use crate::cli::native::NativeArgs;
use crate::cli::package::PackageArgs;
use crate::cli::render::RenderArgs;
use crate::config::Config;
use crate::error::ToolError;
use crate::settings::{Interface, LoggingSettings};
use crate::tools::test_utils::run_with_logs;

fn project(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.root = root.to_path_buf();
    config.paths.resolve();
    config
}

fn dry_project(root: &Path) -> Config {
    let mut config = project(root);
    config.global.dry = true;
    config
}

fn package_args(fallback: bool) -> PackageArgs {
    PackageArgs {
        fallback,
        app_version: Some("1.2.0".to_string()),
        ..PackageArgs::default()
    }
}

#[test]
fn test_env_overrides_toggle_each_switch() {
    let config = Config::default();
    let env = build_env_overrides(
        &config,
        true,
        LoggingSettings {
            logging: false,
            debug: true,
        },
    );

    assert_eq!(env.get("APP_USE_FALLBACK"), Some(Some("1")));
    assert_eq!(env.get("APP_LOG"), Some(None));
    assert_eq!(env.get("APP_DEBUG"), Some(Some("1")));
}

#[test]
fn test_env_overrides_use_configured_prefix() {
    let mut config = Config::default();
    config.app.name = "TrueFA-Py".to_string();
    let env = build_env_overrides(&config, false, LoggingSettings::default());

    assert_eq!(env.get("TRUEFA_PY_USE_FALLBACK"), Some(None));
    assert_eq!(env.get("TRUEFA_PY_LOG"), Some(Some("1")));
    assert_eq!(env.get("TRUEFA_PY_DEBUG"), Some(None));
}

#[test]
fn test_entry_script_per_interface() {
    let config = Config::default();
    assert_eq!(entry_script(&config, Interface::Console), "main.py");
    assert_eq!(entry_script(&config, Interface::Gui), "gui.py");
}

#[test]
fn test_format_options_json() {
    let config = Config::default();
    let lines = format_options(&config, true).unwrap();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["app"]["name"], "App");
    assert_eq!(value["global"]["output_log_level"], 3);
}

#[test]
fn test_format_options_plain() {
    let lines = format_options(&Config::default(), false).unwrap();
    assert!(lines.iter().any(|line| line.starts_with("app.name")));
}

#[tokio::test]
async fn test_package_dry_run_with_fallback() {
    let temp = tempfile::tempdir().unwrap();
    let config = dry_project(temp.path());

    let logs = run_with_logs(|| async {
        run_package_command(&package_args(true), &config, CancellationToken::new()).await
    })
    .await
    .unwrap();

    assert!(logs.contains("[dry-run] Would run"), "{logs}");
    assert!(logs.contains("[dry-run] Would compile NSIS script"), "{logs}");
    assert!(logs.contains("Packaging completed successfully"), "{logs}");
    assert!(!temp.path().join("_build_env.py").exists());
    assert!(!temp.path().join("App-CLI.spec").exists());
}

#[tokio::test]
async fn test_package_portable_only_skips_installer() {
    let temp = tempfile::tempdir().unwrap();
    let config = dry_project(temp.path());
    let args = PackageArgs {
        portable: true,
        ..package_args(true)
    };

    let logs = run_with_logs(|| async {
        run_package_command(&args, &config, CancellationToken::new()).await
    })
    .await
    .unwrap();

    assert!(logs.contains("Building portable variant"), "{logs}");
    assert!(!logs.contains("Building installer variant"), "{logs}");
    assert!(!logs.contains("NSIS"), "{logs}");
}

#[tokio::test]
async fn test_package_without_library_needs_fallback() {
    let temp = tempfile::tempdir().unwrap();
    let config = dry_project(temp.path());

    let err = run_package_command(&package_args(false), &config, CancellationToken::new())
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("--fallback"), "{message}");
    assert!(message.contains("not found"), "{message}");
}

#[tokio::test]
async fn test_package_reports_missing_tools() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = project(temp.path());
    config.tools.python = temp.path().join("no-python");
    config.tools.makensis = Some(temp.path().join("no-makensis"));

    let err = run_package_command(&package_args(true), &config, CancellationToken::new())
        .await
        .unwrap_err();
    let tool_err = err.downcast_ref::<ToolError>().expect("tool error");
    match tool_err {
        ToolError::Missing(missing) => assert!(missing.contains(&"PyInstaller".to_string())),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_package_clean_dry_run_keeps_dirs() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("dist")).unwrap();
    let config = dry_project(temp.path());
    let args = PackageArgs {
        clean: true,
        portable: true,
        ..package_args(true)
    };

    let logs = run_with_logs(|| async {
        run_package_command(&args, &config, CancellationToken::new()).await
    })
    .await
    .unwrap();
    assert!(logs.contains("[dry-run] Would remove"), "{logs}");
    assert!(temp.path().join("dist").is_dir());
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_package_portable_build_cleans_intermediates() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(
        &fake_python,
        r#"if [ "$3" = "--version" ]; then echo 6.0; exit 0; fi
test -f "$3" || exit 9
test -f file_version_info.txt || exit 8
mkdir -p dist && touch "dist/${3%.spec}"
echo "$APP_USE_FALLBACK:$APP_DEBUG" > env.txt"#,
    );

    let mut config = project(temp.path());
    config.tools.python = fake_python;
    let args = PackageArgs {
        portable: true,
        config_logging: "logging=enabled,debug=enabled".to_string(),
        ..package_args(true)
    };

    run_package_command(&args, &config, CancellationToken::new())
        .await
        .unwrap();

    assert!(temp.path().join("dist/App-CLI").is_file());
    assert!(!temp.path().join("App-CLI.spec").exists());
    assert!(!temp.path().join("file_version_info.txt").exists());

    let env = std::fs::read_to_string(temp.path().join("env.txt")).unwrap();
    assert_eq!(env.trim(), "1:1");

    let build_env = std::fs::read_to_string(temp.path().join("_build_env.py")).unwrap();
    assert!(build_env.contains("LOGGING_ENABLED = True"));
    assert!(build_env.contains("DEBUG_ENABLED = True"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_package_failure_still_removes_intermediates() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(
        &fake_python,
        r#"if [ "$3" = "--version" ]; then exit 0; fi
echo 'build exploded' >&2
exit 1"#,
    );

    let mut config = project(temp.path());
    config.tools.python = fake_python;
    let args = PackageArgs {
        portable: true,
        ..package_args(true)
    };

    let err = run_package_command(&args, &config, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("PyInstaller failed"), "{err:#}");
    assert!(!temp.path().join("App-CLI.spec").exists());
    assert!(!temp.path().join("file_version_info.txt").exists());
}

#[tokio::test]
async fn test_render_writes_all_files() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("out");
    let config = project(temp.path());
    let args = RenderArgs {
        out: Some(out.clone()),
        app_version: Some("2.0.1".to_string()),
        ..RenderArgs::default()
    };

    let written = run_render_command(&args, &config).await.unwrap();
    assert_eq!(
        written,
        vec![
            out.join("App-CLI.spec"),
            out.join("file_version_info.txt"),
            out.join("installer.nsi"),
        ]
    );

    let script = std::fs::read_to_string(out.join("installer.nsi")).unwrap();
    assert!(script.contains("App-CLI_Setup_2.0.1.exe"), "{script}");
    let spec = std::fs::read_to_string(out.join("App-CLI.spec")).unwrap();
    assert!(spec.contains("main.py"), "{spec}");
}

#[tokio::test]
async fn test_render_gui_uses_gui_entry() {
    let temp = tempfile::tempdir().unwrap();
    let config = project(temp.path());
    let args = RenderArgs {
        no_console: true,
        fallback: true,
        app_version: Some("1.0".to_string()),
        ..RenderArgs::default()
    };

    let written = run_render_command(&args, &config).await.unwrap();
    assert_eq!(written[0], temp.path().join("App.spec"));
    let spec = std::fs::read_to_string(&written[0]).unwrap();
    assert!(spec.contains("gui.py"), "{spec}");
    assert!(!spec.contains("libtruefa_crypto"), "{spec}");
}

#[tokio::test]
async fn test_render_detects_version_from_sources() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::write(
        temp.path().join("src/__init__.py"),
        "__version__ = \"0.9.3\"\n",
    )
    .unwrap();
    let config = project(temp.path());

    run_render_command(&RenderArgs::default(), &config)
        .await
        .unwrap();
    let info = std::fs::read_to_string(temp.path().join("file_version_info.txt")).unwrap();
    assert!(info.contains("0, 9, 3, 0"), "{info}");
}

#[tokio::test]
async fn test_render_without_version_fails() {
    let temp = tempfile::tempdir().unwrap();
    let config = project(temp.path());
    assert!(
        run_render_command(&RenderArgs::default(), &config)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_native_dry_run_logs_build_and_script() {
    let temp = tempfile::tempdir().unwrap();
    let config = dry_project(temp.path());
    let args = NativeArgs {
        no_copy: false,
        post_build: Some(PathBuf::from("post.py")),
    };

    let logs = run_with_logs(|| async {
        run_native_command(&args, &config, CancellationToken::new()).await
    })
    .await
    .unwrap();

    assert!(logs.contains("build --release"), "{logs}");
    assert!(logs.contains("post.py"), "{logs}");
    assert!(logs.contains("Native build completed successfully"), "{logs}");
}

/// Fake interpreter that answers the PyInstaller version check and writes
/// `<--distpath>/<spec stem>` like a real build.
#[cfg(unix)]
const FAKE_PYINSTALLER: &str = r#"if [ "$3" = "--version" ]; then echo 6.0; exit 0; fi
spec=$3; shift 3
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist=$2; shift ;;
  esac
  shift
done
test -f "$spec" || exit 9
mkdir -p "$dist" && touch "$dist/${spec%.spec}""#;

#[cfg(unix)]
fn installer_project(root: &Path, makensis_body: &str) -> Config {
    let fake_python = root.join("fake-python");
    write_script(&fake_python, FAKE_PYINSTALLER);
    let fake_makensis = root.join("fake-makensis");
    write_script(&fake_makensis, makensis_body);

    let mut config = Config::default();
    config.paths.root = root.to_path_buf();
    config.paths.dist = PathBuf::from("out");
    config.paths.resolve();
    config.tools.python = fake_python;
    config.tools.makensis = Some(fake_makensis);
    config
}

#[cfg(unix)]
#[tokio::test]
async fn test_package_installer_compiles_script_into_configured_dist() {
    let temp = tempfile::tempdir().unwrap();
    let config = installer_project(
        temp.path(),
        r#"test -f "$1" || exit 7
cp "$1" seen.nsi
test -f out/App-CLI || exit 6
touch out/App-CLI_Setup_1.2.0.exe"#,
    );
    let args = PackageArgs {
        installer: true,
        ..package_args(true)
    };

    run_package_command(&args, &config, CancellationToken::new())
        .await
        .unwrap();

    assert!(temp.path().join("out/App-CLI").is_file());
    assert!(temp.path().join("out/App-CLI_Setup_1.2.0.exe").is_file());
    assert!(!temp.path().join("dist").exists());
    assert!(!temp.path().join("installer.nsi").exists());
    assert!(!temp.path().join("App-CLI.spec").exists());

    let seen = std::fs::read_to_string(temp.path().join("seen.nsi")).unwrap();
    assert!(seen.contains(r#"OutFile "out\App-CLI_Setup_1.2.0.exe""#), "{seen}");
    assert!(seen.contains(r#"File "out\App-CLI.exe""#), "{seen}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_package_installer_without_setup_exe_fails() {
    let temp = tempfile::tempdir().unwrap();
    let config = installer_project(temp.path(), "exit 0");
    let args = PackageArgs {
        installer: true,
        ..package_args(true)
    };

    let err = run_package_command(&args, &config, CancellationToken::new())
        .await
        .unwrap_err();
    let tool_err = err.downcast_ref::<ToolError>().expect("tool error");
    assert!(matches!(tool_err, ToolError::OutputMissing { .. }), "{tool_err}");
    assert!(!temp.path().join("installer.nsi").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_package_installer_compile_error_removes_script() {
    let temp = tempfile::tempdir().unwrap();
    let config = installer_project(temp.path(), "echo 'Error in script' >&2; exit 1");
    let args = PackageArgs {
        installer: true,
        ..package_args(true)
    };

    let err = run_package_command(&args, &config, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to compile installer.nsi"), "{err:#}");
    assert!(!temp.path().join("installer.nsi").exists());
    assert!(!temp.path().join("App-CLI.spec").exists());
}

/// Project with a fake toolchain whose cargo copies `artifact` to where a
/// release build leaves the library.
#[cfg(unix)]
fn native_project(root: &Path, artifact: &Path) -> Config {
    let fake_rustc = root.join("fake-rustc");
    write_script(&fake_rustc, "echo 'rustc 1.90.0'");
    let fake_cargo = root.join("fake-cargo");
    let lib = crate::native::library_file_name("truefa_crypto");
    write_script(
        &fake_cargo,
        &format!(
            "mkdir -p target/release && cp '{}' target/release/{lib}",
            artifact.display()
        ),
    );
    std::fs::create_dir_all(root.join("rust_crypto")).unwrap();

    let mut config = project(root);
    config.tools.rustc = Some(fake_rustc);
    config.tools.cargo = Some(fake_cargo);
    config.native.copy_to = vec![PathBuf::from("app_lib")];
    config
}

fn native_args(no_copy: bool) -> NativeArgs {
    NativeArgs {
        no_copy,
        post_build: None,
    }
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_native_missing_exports_warns_and_copies() {
    let temp = tempfile::tempdir().unwrap();
    let artifact = std::env::current_exe().unwrap();
    let config = native_project(temp.path(), &artifact);

    let logs = run_with_logs(|| async {
        run_native_command(&native_args(false), &config, CancellationToken::new()).await
    })
    .await
    .unwrap();

    assert!(logs.contains("is missing exports: c_"), "{logs}");
    assert!(temp.path().join("app_lib/libtruefa_crypto.so").is_file());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_native_no_copy_leaves_library_in_target() {
    let temp = tempfile::tempdir().unwrap();
    let artifact = std::env::current_exe().unwrap();
    let config = native_project(temp.path(), &artifact);

    run_native_command(&native_args(true), &config, CancellationToken::new())
        .await
        .unwrap();

    assert!(
        temp.path()
            .join("rust_crypto/target/release/libtruefa_crypto.so")
            .is_file()
    );
    assert!(!temp.path().join("app_lib").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_native_unreadable_library_warns_without_copy() {
    let temp = tempfile::tempdir().unwrap();
    let artifact = temp.path().join("garbage.bin");
    std::fs::write(&artifact, "not a shared library").unwrap();
    let config = native_project(temp.path(), &artifact);

    let logs = run_with_logs(|| async {
        run_native_command(&native_args(false), &config, CancellationToken::new()).await
    })
    .await
    .unwrap();

    assert!(logs.contains("Error checking"), "{logs}");
    assert!(logs.contains("Native build completed successfully"), "{logs}");
    assert!(!temp.path().join("app_lib").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_native_failing_post_build_script_fails() {
    let temp = tempfile::tempdir().unwrap();
    let artifact = temp.path().join("garbage.bin");
    std::fs::write(&artifact, "not a shared library").unwrap();
    let mut config = native_project(temp.path(), &artifact);
    let fake_python = temp.path().join("fake-python");
    write_script(&fake_python, "echo 'fix failed' >&2; exit 1");
    config.tools.python = fake_python;

    let args = NativeArgs {
        no_copy: true,
        post_build: Some(PathBuf::from("post_build.py")),
    };
    let err = run_native_command(&args, &config, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("script post_build.py failed"), "{err:#}");
}

#[tokio::test]
async fn test_native_without_toolchain_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = project(temp.path());
    config.tools.rustc = Some(temp.path().join("no-rustc"));

    let err = run_native_command(&native_args(false), &config, CancellationToken::new())
        .await
        .unwrap_err();
    let tool_err = err.downcast_ref::<ToolError>().expect("tool error");
    assert!(matches!(tool_err, ToolError::Missing(_)), "{tool_err}");
}
