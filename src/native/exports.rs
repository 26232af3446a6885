// ez-release: Release Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export table of a shared library.
//!
//! ```text
//! PE      exports[].name
//! ELF     dynsyms defined (st_shndx != SHN_UNDEF), named via dynstrtab
//! Mach-O  exports()[].name, leading '_' stripped (fat: first arch)
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use goblin::Object;
use goblin::mach::{Mach, MachO, SingleArch};

use crate::error::{NativeError, Result};

/// Names of the symbols a library exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    symbols: BTreeSet<String>,
}

impl ExportTable {
    /// Reads the export table of the library at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a PE, ELF or
    /// Mach-O image, or cannot be parsed.
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::parse(&bytes, path)?)
    }

    /// Parses an in-memory image. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns a `NativeError` if the image cannot be parsed or has an
    /// unsupported format.
    pub fn parse(bytes: &[u8], path: &Path) -> std::result::Result<Self, NativeError> {
        let parse_err = |e: goblin::error::Error| NativeError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let symbols = match Object::parse(bytes).map_err(parse_err)? {
            Object::PE(pe) => pe
                .exports
                .iter()
                .filter_map(|export| export.name)
                .map(String::from)
                .collect(),
            Object::Elf(elf) => elf
                .dynsyms
                .iter()
                .filter(|sym| sym.st_shndx != 0 && sym.st_name != 0)
                .filter_map(|sym| elf.dynstrtab.get_at(sym.st_name))
                .map(String::from)
                .collect(),
            Object::Mach(Mach::Binary(macho)) => macho_exports(&macho).map_err(parse_err)?,
            Object::Mach(Mach::Fat(fat)) => match fat.get(0).map_err(parse_err)? {
                SingleArch::MachO(macho) => macho_exports(&macho).map_err(parse_err)?,
                SingleArch::Archive(_) => {
                    return Err(NativeError::UnsupportedFormat {
                        path: path.display().to_string(),
                    });
                }
            },
            _ => {
                return Err(NativeError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
        };

        Ok(Self { symbols })
    }

    /// Returns whether `name` is exported.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    /// Returns the required names that are not exported, in input order.
    #[must_use]
    pub fn missing<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contains(name))
            .map(String::from)
            .collect()
    }

    /// Number of exported names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExportTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn macho_exports(macho: &MachO<'_>) -> goblin::error::Result<BTreeSet<String>> {
    Ok(macho
        .exports()?
        .into_iter()
        .map(|export| {
            export
                .name
                .strip_prefix('_')
                .map_or_else(|| export.name.clone(), String::from)
        })
        .collect())
}
