// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build environment module bundled into the application.

use super::py_bool;
use crate::settings::LoggingSettings;

/// Renders the Python module holding the build-time logging switches.
#[must_use]
pub fn render_build_env(settings: LoggingSettings) -> String {
    format!(
        "# Build-time environment settings\n\
         # This file is generated during the build process and should not be edited manually\n\
         LOGGING_ENABLED = {}\n\
         DEBUG_ENABLED = {}\n",
        py_bool(settings.logging),
        py_bool(settings.debug),
    )
}
