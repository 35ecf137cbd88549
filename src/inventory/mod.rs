// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod and loader inventory.
//!
//! ```text
//! crawl (tree walk, *.jar)
//!   |
//!   v
//! archive::inspect_mod_archive()        archive::inspect_loader_archive()
//!   META-INF/MANIFEST.MF  -> manifest     META-INF/MANIFEST.MF  -> family marker
//!   META-INF/mods.toml    -> declaration  install_profile.json  -> family, version
//!   |                                     version.json          -> name, base MC
//!   v                                       |
//! Vec<Mod>                                Option<ModLoader>
//!   +-------------------+-------------------+
//!                       v
//!                   Inventory (crawl order)
//! ```

pub mod archive;
pub mod crawl;
pub mod declaration;
pub mod manifest;


use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::version::VersionRange;

/// A declared dependency of a mod on another mod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub mod_id: String,
    pub version_range: VersionRange,
    pub mandatory: bool,
}

/// A mod discovered in an archive.
///
/// `possible_names` and `possible_mod_versions` keep every value seen for the
/// archive, duplicates and templated strings included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mod {
    pub name: String,
    pub full_name: String,
    pub possible_names: Vec<String>,
    pub path: Option<PathBuf>,
    pub modloader_type: Option<String>,
    pub modloader_version_range: Option<VersionRange>,
    pub dependencies: BTreeMap<String, Dependency>,
    pub possible_mc_versions: Vec<String>,
    pub possible_mod_versions: Vec<String>,
    /// Only set on records that describe a requirement rather than a discovery.
    pub mod_version_range: Option<VersionRange>,
}

impl Mod {
    /// Record for an archive without a usable declaration entry.
    ///
    /// The canonical name is the lexicographically smallest collected name.
    #[must_use]
    pub fn minimal(
        path: Option<PathBuf>,
        possible_names: Vec<String>,
        possible_mod_versions: Vec<String>,
    ) -> Self {
        let name = possible_names.iter().min().cloned().unwrap_or_default();
        Self {
            name,
            full_name: String::new(),
            possible_names,
            path,
            modloader_type: None,
            modloader_version_range: None,
            dependencies: BTreeMap::new(),
            possible_mc_versions: Vec::new(),
            possible_mod_versions,
            mod_version_range: None,
        }
    }

    /// Case-insensitive match against the canonical or any alternate name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .possible_names
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    /// Exact-text membership in the collected versions.
    #[must_use]
    pub fn has_version(&self, version: &str) -> bool {
        self.possible_mod_versions.iter().any(|v| v == version)
    }

    /// File name of the backing archive, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }
}

impl fmt::Display for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.full_name.is_empty() && self.full_name != self.name {
            write!(f, " \"{}\"", self.full_name)?;
        }
        if let Some(file) = self.file_name() {
            write!(f, " ({file})")?;
        }
        Ok(())
    }
}

/// A mod loader installer discovered in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModLoader {
    pub name: String,
    pub family: String,
    pub version: String,
    pub base_mc_version: String,
    /// `None` means recommended but not available locally.
    pub path: Option<PathBuf>,
}

impl fmt::Display for ModLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)?;
        if !self.base_mc_version.is_empty() {
            write!(f, " for minecraft {}", self.base_mc_version)?;
        }
        match self.path.as_deref().and_then(Path::file_name) {
            Some(file) => write!(f, " ({})", file.to_string_lossy()),
            None => write!(f, " [{}]", self.name),
        }
    }
}

/// Everything found by a crawl, in crawl order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inventory {
    pub mods: Vec<Mod>,
    pub loaders: Vec<ModLoader>,
}

impl Inventory {
    #[must_use]
    pub const fn new(mods: Vec<Mod>, loaders: Vec<ModLoader>) -> Self {
        Self { mods, loaders }
    }
}
