// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!         core
//!          |
//!     +----+----+
//!     |         |
//!     v         v
//!    env     process
//!     |         |
//! EnvOverrides Builder
//!              Output
//! ```

pub mod env;
pub mod process;
