// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          package / native / render
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              | TOML, EZR_* env, --set    |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              render    native   tools
//!            handlebars  goblin   pyinstaller / makensis /
//!                                 cargo / python
//!      version, settings (build variants, logging switches)
//!
//!   +-----------------------------------------+
//!   |  core   process, env overrides          |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod native;
pub mod render;
pub mod settings;
pub mod tools;
pub mod utility;
pub mod version;
