// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native command implementation.
//!
//! ```text
//! rust toolchain? --> cargo build --release (cwd = native.crate_dir)
//!   --> target/release/<libfile>: verify exports (warn only)
//!         copy unless --no-copy or the library cannot be parsed
//!   --> optional post-build script
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::native::NativeArgs;
use crate::config::Config;
use crate::error::{Result, ToolError};
use crate::native::{build_artifact_path, install_library, verify_exports};
use crate::tools::cargo::CargoTool;
use crate::tools::probe::rust_installed;
use crate::tools::python_script::PythonScriptTool;
use crate::tools::ToolContext;

/// Main handler for the native command.
///
/// # Errors
///
/// Returns an error if no Rust toolchain is installed, the cargo build or
/// the post-build script fails, or the built library cannot be copied.
pub async fn run_native_command(
    args: &NativeArgs,
    config: &Config,
    cancel_token: CancellationToken,
) -> Result<()> {
    let dry_run = config.global.dry;

    if !rust_installed(config).await {
        if !dry_run {
            return Err(ToolError::Missing(vec!["Rust toolchain (cargo)".to_string()]).into());
        }
        warn!("[dry-run] Rust toolchain not found");
    }

    let ctx = ToolContext::new(Arc::new(config.clone()), cancel_token, dry_run);
    let crate_dir = config.project_path(&config.native.crate_dir);
    ctx.run_tool(&CargoTool::new(&crate_dir)).await?;

    let artifact = build_artifact_path(config);
    if artifact.is_file() {
        // Missing exports are reported but do not fail the build.
        match verify_exports(&artifact, &config.native.required_symbols).await {
            Ok(_) if args.no_copy => {
                info!("Leaving {} in place (--no-copy)", artifact.display());
            }
            Ok(_) => install_library(config, &artifact, dry_run).await?,
            Err(e) => warn!(
                "Error checking {}, not copying it: {e:#}",
                artifact.display()
            ),
        }
    } else if !dry_run {
        warn!("Built library not found at {}", artifact.display());
    }

    let post_build = args
        .post_build
        .as_ref()
        .or(config.native.post_build_script.as_ref());
    if let Some(script) = post_build {
        ctx.run_tool(&PythonScriptTool::new(script)).await?;
    }

    info!("Native build completed successfully");
    Ok(())
}
