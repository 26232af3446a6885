// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   copy:  copy_file_into_dirs()   library --> copy_to dirs
//!   clean: clean_dirs()            build/ dist/
//!          IntermediateFiles       delete-on-drop guard
//! ```

pub mod fs;
