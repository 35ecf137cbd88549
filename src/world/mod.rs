// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! World save data.
//!
//! Decoding the binary save format is left to an external exporter; this
//! module consumes its JSON output.
//!
//! ```text
//! <worlds>/                     discover_worlds()  -> [Alpha, Beta, ...]
//!   Alpha/
//!     world.json | level.json | Alpha.json
//!                 |
//!                 v  JsonWorldProvider::load()
//!   WorldData { world_name, engine_info, mod_list: [WorldMod] }
//! ```


use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WorldError;

/// File names probed, in order, inside a world directory.
pub const WORLD_FILE_CANDIDATES: [&str; 2] = ["world.json", "level.json"];

/// Engine metadata recorded in a save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineInfo {
    /// Mod platform family, e.g. `forge`.
    pub mod_type: Option<String>,
    pub mod_version: Option<String>,
    /// Mod platform version as the installer names it, e.g. `45.0.43`.
    pub mod_version_name: Option<String>,
    pub mc_version_name: Option<String>,
    pub mc_version: Option<i64>,
    pub mc_data_version: Option<i64>,
    pub mod_data_version: Option<i64>,
    pub mod_player_data_version: Option<i64>,
}

/// A mod the save requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMod {
    pub name: String,
    pub version: String,
    /// Computed from `version` when the exporter did not record it.
    #[serde(default)]
    pub version_is_weird: Option<bool>,
}

impl WorldMod {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            version_is_weird: None,
        }
    }

    /// True if the recorded version looks like an unexpanded build template.
    #[must_use]
    pub fn is_weird(&self) -> bool {
        self.version_is_weird
            .unwrap_or_else(|| is_weird_version(&self.version))
    }
}

/// Everything the pipeline needs from one save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldData {
    pub world_name: String,
    #[serde(default)]
    pub engine_info: EngineInfo,
    #[serde(default)]
    pub mod_list: Vec<WorldMod>,
}

/// Source of [`WorldData`] for a save location.
pub trait WorldDataProvider {
    /// Loads the world stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoWorldSaveFound`] when `location` holds nothing
    /// this provider understands.
    fn load(&self, location: &Path) -> Result<WorldData, WorldError>;
}

/// Reads world data exported as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWorldProvider;

impl JsonWorldProvider {
    /// Resolves `location` to the JSON file to read.
    ///
    /// A file is used as-is. In a directory, `world.json`, `level.json` and
    /// `<dir_name>.json` are tried in that order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoWorldSaveFound`] if nothing matches.
    pub fn locate(location: &Path) -> Result<PathBuf, WorldError> {
        if location.is_file() {
            return Ok(location.to_path_buf());
        }

        let not_found = || WorldError::NoWorldSaveFound {
            dir: location.to_path_buf(),
        };
        if !location.is_dir() {
            return Err(not_found());
        }

        let named = location
            .file_name()
            .map(|name| format!("{}.json", name.to_string_lossy()));
        WORLD_FILE_CANDIDATES
            .iter()
            .map(|candidate| (*candidate).to_string())
            .chain(named)
            .map(|candidate| location.join(candidate))
            .find(|candidate| candidate.is_file())
            .ok_or_else(not_found)
    }
}

impl WorldDataProvider for JsonWorldProvider {
    fn load(&self, location: &Path) -> Result<WorldData, WorldError> {
        let path = Self::locate(location)?;
        debug!(path = %path.display(), "loading world data");

        let text = fs::read_to_string(&path).map_err(|source| WorldError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|err| WorldError::Parse {
            path,
            message: err.to_string(),
        })
    }
}

/// Lists the immediate subdirectories of `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`WorldError::Io`] if `dir` cannot be read.
pub fn discover_worlds(dir: &Path) -> Result<Vec<PathBuf>, WorldError> {
    let io = |source| WorldError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut worlds = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.is_dir() {
            worlds.push(path);
        }
    }
    worlds.sort();
    Ok(worlds)
}

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@+%{].+[@+%}]").expect("valid template regex"));

/// True if `version` contains a template such as `${file.jarVersion}` or `@VERSION@`.
#[must_use]
pub fn is_weird_version(version: &str) -> bool {
    TEMPLATE_RE.is_match(version)
}
