// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers.
//!
//! ```text
//! copy:  copy_file_into_dirs()  tokio::fs copy, same-file aware
//! clean: clean_dirs()           remove output directories
//!        IntermediateFiles      removes generated files on drop
//! ```

pub mod clean;
pub mod copy;
