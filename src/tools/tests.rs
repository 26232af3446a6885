// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::cargo::CargoTool;
use super::makensis::MakensisTool;
use super::probe::{cargo_binary, locate_makensis, pyinstaller_available, rust_installed};
use super::pyinstaller::PyInstallerTool;
use super::python_script::PythonScriptTool;
use super::test_utils::run_with_logs;
use super::{Tool, ToolContext};
use crate::config::Config;
use crate::core::env::EnvOverrides;
use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn project(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.root = root.to_path_buf();
    config.paths.resolve();
    config
}

fn context(config: Config, dry_run: bool) -> ToolContext {
    ToolContext::new(Arc::new(config), CancellationToken::new(), dry_run)
}

#[test]
fn test_tool_context_creation() {
    let ctx = context(Config::default(), false);
    assert!(!ctx.is_cancelled());
    assert!(!ctx.is_dry_run());
    assert!(ctx.env().is_empty());
}

#[test]
fn test_tool_context_cancellation() {
    let token = CancellationToken::new();
    let ctx = ToolContext::new(Arc::new(Config::default()), token.clone(), false);

    assert!(!ctx.is_cancelled());
    token.cancel();
    assert!(ctx.is_cancelled());
}

#[test]
fn test_tool_context_env() {
    let mut env = EnvOverrides::new();
    env.set("APP_LOG", "1");
    let ctx = context(Config::default(), true).with_env(env);
    assert_eq!(ctx.env().get("APP_LOG"), Some(Some("1")));
}

#[test]
fn test_tool_names() {
    assert_eq!(PyInstallerTool::new("App.spec", "App").name(), "pyinstaller");
    assert_eq!(MakensisTool::new("installer.nsi").name(), "makensis");
    assert_eq!(CargoTool::new("rust_crypto").name(), "cargo");
    assert_eq!(PythonScriptTool::new("post.py").name(), "python");
}

#[test]
fn test_pyinstaller_expected_output() {
    let config = project(Path::new("/work"));
    let tool = PyInstallerTool::new("App-CLI.spec", "App-CLI");
    assert_eq!(
        tool.expected_output(&config),
        Path::new("/work/dist").join(format!("App-CLI{}", std::env::consts::EXE_SUFFIX))
    );
}

#[tokio::test]
async fn test_pyinstaller_dry_run() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = project(temp.path());
    config.tools.python = PathBuf::from("python3");
    let ctx = context(config, true);
    let tool = PyInstallerTool::new("App-CLI.spec", "App-CLI");

    let logs = run_with_logs(|| async { tool.run(&ctx).await }).await.unwrap();
    assert!(
        logs.contains("[dry-run] Would run python3 -m PyInstaller App-CLI.spec --clean"),
        "unexpected logs: {logs}"
    );
    let dist = temp.path().join("dist");
    let build = temp.path().join("build");
    assert!(
        logs.contains(&format!("--distpath {} --workpath {}", dist.display(), build.display())),
        "unexpected logs: {logs}"
    );
}

#[tokio::test]
async fn test_run_tool_records_tool_span() {
    let ctx = context(Config::default(), true);
    let tool = CargoTool::new("rust_crypto");

    let logs = run_with_logs(|| async { ctx.run_tool(&tool).await }).await.unwrap();
    assert!(logs.contains("tool{name="), "{logs}");
    assert!(logs.contains("cargo"), "{logs}");
}

#[tokio::test]
async fn test_makensis_dry_run() {
    let ctx = context(Config::default(), true);
    let tool = MakensisTool::new("installer.nsi").expected_output("dist/App_Setup_1.0.exe");

    let logs = run_with_logs(|| async { tool.run(&ctx).await }).await.unwrap();
    assert!(logs.contains("[dry-run] Would compile NSIS script"), "{logs}");
    assert!(logs.contains("installer.nsi"), "{logs}");
}

#[tokio::test]
async fn test_cargo_dry_run() {
    let ctx = context(Config::default(), true);
    let tool = CargoTool::new("rust_crypto");

    let logs = run_with_logs(|| async { tool.run(&ctx).await }).await.unwrap();
    assert!(logs.contains("[dry-run] Would run"), "{logs}");
    assert!(logs.contains("build --release in rust_crypto"), "{logs}");
}

#[tokio::test]
async fn test_python_script_dry_run() {
    let mut config = Config::default();
    config.tools.python = PathBuf::from("python3");
    let ctx = context(config, true);
    let tool = PythonScriptTool::new("scripts/post_build.py");

    let logs = run_with_logs(|| async { tool.run(&ctx).await }).await.unwrap();
    assert!(
        logs.contains("[dry-run] Would run python3 scripts/post_build.py"),
        "{logs}"
    );
}

#[test]
fn test_locate_makensis_prefers_explicit() {
    let temp = tempfile::tempdir().unwrap();
    let fake = temp.path().join("makensis.exe");
    std::fs::write(&fake, "").unwrap();

    let mut config = Config::default();
    config.tools.makensis = Some(fake.clone());
    assert_eq!(locate_makensis(&config), Some(fake));
}

#[tokio::test]
async fn test_locate_makensis_warns_on_missing_explicit() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("no-makensis.exe");
    let mut config = Config::default();
    config.tools.makensis = Some(missing.clone());

    let logs = run_with_logs(|| async {
        let _ = locate_makensis(&config);
        Ok(())
    })
    .await
    .unwrap();
    assert!(
        logs.contains(&format!("Configured makensis {} not found", missing.display())),
        "{logs}"
    );
}

#[test]
fn test_cargo_binary_prefers_explicit() {
    let mut config = Config::default();
    assert!(!cargo_binary(&config).as_os_str().is_empty());

    config.tools.cargo = Some(PathBuf::from("/opt/rust/bin/cargo"));
    assert_eq!(cargo_binary(&config), PathBuf::from("/opt/rust/bin/cargo"));
}

#[tokio::test]
async fn test_rust_installed_uses_explicit_rustc() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tools.rustc = Some(temp.path().join("no-rustc"));
    assert!(!rust_installed(&config).await);
}

#[tokio::test]
async fn test_makensis_missing_binary_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = project(temp.path());
    config.tools.makensis = Some(temp.path().join("no-makensis"));
    let ctx = context(config, false);

    assert!(MakensisTool::new("installer.nsi").run(&ctx).await.is_err());
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
async fn test_python_script_runs_in_root_with_env() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("post.sh"),
        "echo \"$APP_LOG\" > marker.txt\n",
    )
    .unwrap();

    let mut config = project(temp.path());
    config.tools.python = PathBuf::from("sh");
    let mut env = EnvOverrides::new();
    env.set("APP_LOG", "1");
    let ctx = context(config, false).with_env(env);

    PythonScriptTool::new("post.sh").run(&ctx).await.unwrap();
    let marker = std::fs::read_to_string(temp.path().join("marker.txt")).unwrap();
    assert_eq!(marker.trim(), "1");
}

#[cfg(unix)]
#[tokio::test]
async fn test_pyinstaller_checks_output() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(&fake_python, "mkdir -p dist && touch dist/App-CLI");

    let mut config = project(temp.path());
    config.tools.python = fake_python;
    let ctx = context(config, false);

    PyInstallerTool::new("App-CLI.spec", "App-CLI")
        .run(&ctx)
        .await
        .unwrap();
    assert!(temp.path().join("dist/App-CLI").is_file());

    let err = PyInstallerTool::new("App.spec", "App")
        .run(&ctx)
        .await
        .unwrap_err();
    let tool_err = err.downcast_ref::<ToolError>().expect("tool error");
    assert!(matches!(tool_err, ToolError::OutputMissing { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_pyinstaller_failure_propagates() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(&fake_python, "echo 'spec error' >&2; exit 1");

    let mut config = project(temp.path());
    config.tools.python = fake_python;
    let ctx = context(config, false);

    let err = PyInstallerTool::new("App.spec", "App")
        .run(&ctx)
        .await
        .unwrap_err();
    assert!(
        format!("{err:#}").contains("PyInstaller failed for App.spec"),
        "{err:#}"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_cargo_runs_in_crate_dir() {
    let temp = tempfile::tempdir().unwrap();
    let crate_dir = temp.path().join("native");
    std::fs::create_dir_all(&crate_dir).unwrap();
    let fake_cargo = temp.path().join("fake-cargo");
    write_script(&fake_cargo, "pwd > cwd.txt; echo \"$@\" > args.txt");

    let mut config = project(temp.path());
    config.tools.cargo = Some(fake_cargo);
    let ctx = context(config, false);

    CargoTool::new(&crate_dir).run(&ctx).await.unwrap();
    let args = std::fs::read_to_string(crate_dir.join("args.txt")).unwrap();
    assert_eq!(args.trim(), "build --release");
}

#[cfg(unix)]
#[tokio::test]
async fn test_pyinstaller_writes_to_configured_dirs() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(
        &fake_python,
        r#"spec=$3; shift 3
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist=$2; shift ;;
    --workpath) work=$2; shift ;;
  esac
  shift
done
mkdir -p "$dist" "$work" && touch "$dist/${spec%.spec}""#,
    );

    let mut config = Config::default();
    config.paths.root = temp.path().to_path_buf();
    config.paths.dist = PathBuf::from("out");
    config.paths.build = PathBuf::from("work");
    config.paths.resolve();
    config.tools.python = fake_python;
    let ctx = context(config, false);

    PyInstallerTool::new("App-CLI.spec", "App-CLI")
        .run(&ctx)
        .await
        .unwrap();
    assert!(temp.path().join("out/App-CLI").is_file());
    assert!(temp.path().join("work").is_dir());
    assert!(!temp.path().join("dist").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_pyinstaller_available_reads_version() {
    let temp = tempfile::tempdir().unwrap();
    let fake_python = temp.path().join("fake-python");
    write_script(&fake_python, "echo 6.11.1");

    let broken_python = temp.path().join("broken-python");
    write_script(&broken_python, "echo 'No module named PyInstaller' >&2; exit 1");

    let mut config = Config::default();
    config.tools.python = fake_python;
    assert!(pyinstaller_available(&config).await);

    config.tools.python = broken_python;
    assert!(!pyinstaller_available(&config).await);
}
