// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Package | Native | Render | AppVersion | Options | Configs | Version
//! ```

use std::process::ExitCode;

use ez_release::cli::global::GlobalOptions;
use ez_release::cli::{self, Command};
use ez_release::cmd::cancel_on_ctrl_c;
use ez_release::cmd::config::{run_app_version_command, run_configs_command, run_options_command};
use ez_release::cmd::native::run_native_command;
use ez_release::cmd::package::run_package_command;
use ez_release::cmd::render::run_render_command;
use ez_release::config::Config;
use ez_release::error::Result;
use ez_release::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = load_config(&cli.global);
    let log_config = config
        .as_ref()
        .map_or_else(|_| cli.global.log_config(), log_config_from);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn log_config_from(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Configs) => cli.global.config_loader().map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Some(Command::Options(args)) => {
            config.and_then(|config| run_options_command(&config, args.json))
        }
        Some(Command::AppVersion) => match config {
            Ok(config) => run_app_version_command(&config).await,
            Err(e) => Err(e),
        },
        Some(Command::Package(args)) => match config {
            Ok(config) => run_package_command(args, &config, cancel_on_ctrl_c()).await,
            Err(e) => Err(e),
        },
        Some(Command::Native(args)) => match config {
            Ok(config) => run_native_command(args, &config, cancel_on_ctrl_c()).await,
            Err(e) => Err(e),
        },
        Some(Command::Render(args)) => match config {
            Ok(config) => run_render_command(args, &config).await.map(|_| ()),
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    global.config_loader()?.build()
}
