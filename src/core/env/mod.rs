// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment overrides for child processes.
//!
//! ```text
//! EnvOverrides (BTreeMap<String, Option<String>>)
//!   set(key, value)  --> Some(value)  --> Command::env
//!   remove(key)      --> None         --> Command::env_remove
//! inherited environment + overrides = child environment
//! ```
//!
//! The parent environment is never mutated; overrides only apply to the
//! processes they are handed to.

use std::collections::BTreeMap;


/// A set of environment changes layered over the inherited environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: BTreeMap<String, Option<String>>,
}

impl EnvOverrides {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Sets a variable for the child.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), Some(value.into()));
    }

    /// Removes a variable from the child's inherited environment.
    pub fn remove(&mut self, key: impl Into<String>) {
        self.vars.insert(key.into(), None);
    }

    /// Sets `key=1` when `enabled`, removes it otherwise.
    pub fn toggle(&mut self, key: impl Into<String>, enabled: bool) {
        if enabled {
            self.set(key, "1");
        } else {
            self.remove(key);
        }
    }

    /// Returns the override for `key`.
    ///
    /// `Some(None)` means the variable is removed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.vars.get(key).map(Option::as_deref)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over all overrides in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Applies the overrides to a command.
    pub fn apply(&self, command: &mut tokio::process::Command) {
        for (key, value) in self.iter() {
            match value {
                Some(value) => {
                    command.env(key, value);
                }
                None => {
                    command.env_remove(key);
                }
            }
        }
    }
}
