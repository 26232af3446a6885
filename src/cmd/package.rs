// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command implementation.
//!
//! ```text
//! --clean --> variants --> requirements --> icon --> native library
//!   --> build env file + env overrides --> per variant:
//!        spec + version info --> PyInstaller
//!        [installer] installer.nsi --> makensis
//!        intermediate files removed
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::package::PackageArgs;
use crate::config::Config;
use crate::core::env::EnvOverrides;
use crate::error::{NativeError, ReleaseError, Result, ToolError};
use crate::native::{LibraryCheck, check_library, library_file_name};
use crate::render::nsis::{installer_file_name, render_nsis_script};
use crate::render::spec_file::{SpecOptions, render_spec_file};
use crate::render::version_info::render_version_info;
use crate::render::{NSIS_SCRIPT_FILE, VERSION_INFO_FILE};
use crate::settings::{
    BuildVariant, Interface, LoggingSettings, select_variants, write_build_env_file,
};
use crate::tools::makensis::MakensisTool;
use crate::tools::probe::missing_requirements;
use crate::tools::pyinstaller::PyInstallerTool;
use crate::tools::ToolContext;
use crate::utility::fs::clean::{IntermediateFiles, clean_dirs};
use crate::version::resolve_version;

/// Hint appended when the native library is unusable.
const FALLBACK_HINT: &str = "use --fallback to build with the pure Python backend";

/// Everything a variant build needs once the checks have passed.
struct PackagePlan {
    version: String,
    interface: Interface,
    entry: String,
    icon: Option<PathBuf>,
    fallback: bool,
}

/// Main handler for the package command.
///
/// # Errors
///
/// Returns an error if a required tool is missing, the native library is
/// unusable without `--fallback`, a generated file cannot be written, or an
/// external tool fails.
pub async fn run_package_command(
    args: &PackageArgs,
    config: &Config,
    cancel_token: CancellationToken,
) -> Result<()> {
    let dry_run = config.global.dry;

    if args.clean {
        clean_dirs(&[&config.paths.build, &config.paths.dist], dry_run).await?;
    }

    let variants = select_variants(args.portable, args.installer);
    let interface = Interface::from_no_console(args.no_console);
    let version = resolve_version(config, args.app_version.as_deref()).await?;
    info!(
        "Packaging {} {version} ({interface}): {}",
        config.app.name,
        variants
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    if args.fallback {
        info!("Using the fallback backend; the native library is not bundled");
    }

    check_requirements(config, variants.contains(&BuildVariant::Installer), dry_run).await?;

    let icon = find_icon(config);
    check_native_library(config, args.fallback, dry_run).await?;

    let settings = LoggingSettings::parse(&args.config_logging);
    info!("Build logging settings: {settings}");
    let env_file = config.project_path(&config.bundle.build_env_file);
    if dry_run {
        info!("[dry-run] Would write {}", env_file.display());
    } else {
        write_build_env_file(&env_file, settings).await?;
    }

    let env = build_env_overrides(config, args.fallback, settings);
    let ctx = ToolContext::new(Arc::new(config.clone()), cancel_token, dry_run).with_env(env);

    let plan = PackagePlan {
        version,
        interface,
        entry: entry_script(config, interface).to_string(),
        icon,
        fallback: args.fallback,
    };

    for variant in variants {
        info!("Building {variant} variant...");
        build_variant(variant, &ctx, &plan).await?;
    }

    info!("Packaging completed successfully");
    Ok(())
}

/// Fails with every missing tool listed; in dry-run only warns.
async fn check_requirements(config: &Config, need_makensis: bool, dry_run: bool) -> Result<()> {
    let missing = missing_requirements(config, need_makensis).await;
    if missing.is_empty() {
        return Ok(());
    }

    if dry_run {
        warn!("[dry-run] Missing requirements: {}", missing.join(", "));
        return Ok(());
    }

    for tool in &missing {
        error!("{tool} is not installed or could not be found");
    }
    Err(ToolError::Missing(missing).into())
}

/// Returns the configured icon if it exists.
fn find_icon(config: &Config) -> Option<PathBuf> {
    if config.project_path(&config.app.icon).is_file() {
        Some(config.app.icon.clone())
    } else {
        warn!(
            "Icon file {} not found, building without an icon",
            config.app.icon.display()
        );
        None
    }
}

/// Verifies the native library; an unusable library is fatal unless the
/// fallback backend is requested.
async fn check_native_library(config: &Config, fallback: bool, dry_run: bool) -> Result<()> {
    let problem = match check_library(config, dry_run).await? {
        LibraryCheck::Valid(path) => {
            info!("Native library verified: {}", path.display());
            return Ok(());
        }
        LibraryCheck::MissingSymbols { path, missing } => NativeError::MissingSymbols {
            path: path.display().to_string(),
            missing,
        },
        LibraryCheck::Unreadable { path, reason } => NativeError::Parse {
            path: path.display().to_string(),
            message: reason,
        },
        LibraryCheck::NotFound => NativeError::NotFound {
            name: library_file_name(&config.native.lib_name),
        },
    };

    if fallback {
        warn!("Native library unusable ({problem}), continuing with the fallback backend");
        return Ok(());
    }
    Err(ReleaseError::from(problem)).context(FALLBACK_HINT)
}

/// Environment handed to every build subprocess.
///
/// `<PREFIX>_USE_FALLBACK`, `<PREFIX>_LOG` and `<PREFIX>_DEBUG` are set to
/// `1` when enabled and removed otherwise.
#[must_use]
pub fn build_env_overrides(
    config: &Config,
    fallback: bool,
    settings: LoggingSettings,
) -> EnvOverrides {
    let prefix = config.app.env_prefix();
    let mut env = EnvOverrides::new();
    env.toggle(format!("{prefix}_USE_FALLBACK"), fallback);
    env.toggle(format!("{prefix}_LOG"), settings.logging);
    env.toggle(format!("{prefix}_DEBUG"), settings.debug);
    env
}

/// Entry script bundled for `interface`.
#[must_use]
pub fn entry_script(config: &Config, interface: Interface) -> &str {
    match interface {
        Interface::Console => &config.app.entry_console,
        Interface::Gui => &config.app.entry_gui,
    }
}

async fn build_variant(variant: BuildVariant, ctx: &ToolContext, plan: &PackagePlan) -> Result<()> {
    let config = ctx.config();
    let mut files = IntermediateFiles::new();

    let spec = render_spec_file(
        config,
        SpecOptions {
            entry: &plan.entry,
            interface: plan.interface,
            icon: plan.icon.as_deref(),
            fallback: plan.fallback,
        },
    )?;
    let version_info = render_version_info(config, &plan.version)?;

    stage(
        &mut files,
        config.project_path(&spec.file_name),
        &spec.content,
        ctx.is_dry_run(),
    )
    .await?;
    stage(
        &mut files,
        config.project_path(Path::new(VERSION_INFO_FILE)),
        &version_info,
        ctx.is_dry_run(),
    )
    .await?;

    ctx.run_tool(&PyInstallerTool::new(&spec.file_name, &spec.output_name))
        .await?;

    if variant == BuildVariant::Installer {
        let script = render_nsis_script(
            config,
            plan.interface,
            &plan.version,
            plan.icon.as_deref(),
        )?;
        stage(
            &mut files,
            config.project_path(Path::new(NSIS_SCRIPT_FILE)),
            &script,
            ctx.is_dry_run(),
        )
        .await?;

        let setup = config
            .paths
            .dist
            .join(installer_file_name(config, plan.interface, &plan.version));
        ctx.run_tool(&MakensisTool::new(NSIS_SCRIPT_FILE).expected_output(setup))
            .await?;
    }

    Ok(())
}

/// Writes a generated file the guard removes afterwards.
async fn stage(
    files: &mut IntermediateFiles,
    path: PathBuf,
    content: &str,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!("[dry-run] Would write {}", path.display());
        return Ok(());
    }
    files.write(path, content).await?;
    Ok(())
}
