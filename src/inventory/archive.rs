// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-archive inspection.
//!
//! ```text
//! mod archive                              loader archive
//!   MANIFEST.MF  (optional) --+              MANIFEST.MF  --"forge"?--no--> None
//!   mods.toml    (optional)   |                   | yes
//!      |                      |              install_profile.json  profile, version
//!      +-- none/unparseable --+--> minimal   version.json          id, inheritsFrom
//!      |                                          |
//!      v                                          v
//!   one Mod per [[mods]]                      Some(ModLoader)
//!   names/versions = manifest ++ declared
//! ```
//!
//! The archive handle is dropped before any parsing starts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use zip::ZipArchive;
use zip::result::ZipError;

use super::declaration::{DECLARATION_ENTRY, inspect_mods_toml, parse_declaration};
use super::manifest::{MANIFEST_ENTRY, inspect_manifest};
use super::{Mod, ModLoader};
use crate::error::InspectError;

/// Marker searched for (case-insensitively) on manifest lines of loader installers.
pub const FORGE_MARKER: &str = "forge";

/// Installer profile entry of a loader archive.
pub const INSTALL_PROFILE_ENTRY: &str = "install_profile.json";

/// Top-level version entry of a loader archive.
pub const VERSION_ENTRY: &str = "version.json";

#[derive(Debug, Deserialize)]
struct InstallProfile {
    profile: String,
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionJson {
    id: String,
    inherits_from: String,
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, InspectError> {
    let file = File::open(path).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| InspectError::Archive {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an entry's bytes; `Ok(None)` if the entry does not exist.
fn read_entry(
    archive: &mut ZipArchive<File>,
    path: &Path,
    entry: &str,
) -> Result<Option<Vec<u8>>, InspectError> {
    let mut file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(source) => {
            return Err(InspectError::Archive {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| InspectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(bytes))
}

/// Inspects a mod archive.
///
/// Always yields at least one record for a readable archive: when the
/// declaration entry is absent, unparseable or declares nothing, a minimal
/// record built from the manifest is returned instead.
///
/// # Errors
///
/// Returns an [`InspectError`] if the archive cannot be opened, if the
/// declaration stays malformed after repair, or if a declared range is bad.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn inspect_mod_archive(path: &Path) -> Result<Vec<Mod>, InspectError> {
    let (manifest, declaration) = {
        let mut archive = open_archive(path)?;
        let manifest = read_entry(&mut archive, path, MANIFEST_ENTRY)?;
        let declaration = read_entry(&mut archive, path, DECLARATION_ENTRY)?;
        (manifest, declaration)
    };

    let mut names = Vec::new();
    let mut versions = Vec::new();
    match manifest {
        Some(bytes) => {
            let data = inspect_manifest(&String::from_utf8_lossy(&bytes));
            versions.extend(data.mod_version);
            names.extend(data.possible_names);
        }
        None => note_recoverable(&InspectError::MissingManifestEntry {
            path: path.to_path_buf(),
            entry: MANIFEST_ENTRY,
        }),
    }

    let minimal = |names: Vec<String>, versions: Vec<String>| {
        vec![Mod::minimal(Some(path.to_path_buf()), names, versions)]
    };

    let Some(bytes) = declaration else {
        note_recoverable(&InspectError::MissingDeclarationEntry {
            path: path.to_path_buf(),
            entry: DECLARATION_ENTRY,
        });
        return Ok(minimal(names, versions));
    };

    let parsed = parse_declaration(&String::from_utf8_lossy(&bytes)).map_err(|err| {
        InspectError::MalformedDeclaration {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    let Some(parsed) = parsed else {
        return Ok(minimal(names, versions));
    };

    let declared = inspect_mods_toml(&parsed).map_err(|source| InspectError::Range {
        path: path.to_path_buf(),
        source,
    })?;
    if declared.is_empty() {
        debug!("declaration lists no mods");
        return Ok(minimal(names, versions));
    }

    // Sibling declarations share one name and version pool: a mod may carry
    // its real version only in a sibling entry.
    for entry in &declared {
        names.push(entry.name.clone());
        versions.extend(entry.possible_mod_versions.iter().cloned());
    }

    let records = declared
        .into_iter()
        .map(|declared| Mod {
            name: declared.name,
            full_name: declared.full_name,
            possible_names: names.clone(),
            path: Some(path.to_path_buf()),
            modloader_type: Some(declared.modloader_type),
            modloader_version_range: Some(declared.modloader_version_range),
            dependencies: declared.dependencies,
            possible_mc_versions: declared.possible_mc_versions,
            possible_mod_versions: versions.clone(),
            mod_version_range: None,
        })
        .collect::<Vec<_>>();

    debug!(count = records.len(), "mods declared");
    Ok(records)
}

fn note_recoverable(err: &InspectError) {
    debug!(error = %err, "falling back to manifest data");
}

/// Returns true if any manifest line mentions the family marker.
#[must_use]
pub fn is_loader_family(manifest: &str, marker: &str) -> bool {
    let marker = marker.to_ascii_lowercase();
    manifest
        .lines()
        .any(|line| line.to_ascii_lowercase().contains(&marker))
}

fn read_json<T: DeserializeOwned>(
    archive: &mut ZipArchive<File>,
    path: &Path,
    entry: &'static str,
) -> Result<T, InspectError> {
    let malformed = |message: String| InspectError::MalformedLoaderArchive {
        path: path.to_path_buf(),
        entry,
        message,
    };

    let bytes = read_entry(archive, path, entry)?
        .ok_or_else(|| malformed("entry not found".to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| malformed(err.to_string()))
}

/// Inspects a loader installer archive.
///
/// Archives whose manifest does not carry the family marker (or that have no
/// manifest) are not loaders of this family and yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`InspectError::MalformedLoaderArchive`] when a recognized archive
/// lacks `install_profile.json` or `version.json`.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn inspect_loader_archive(path: &Path) -> Result<Option<ModLoader>, InspectError> {
    let mut archive = open_archive(path)?;

    let Some(manifest) = read_entry(&mut archive, path, MANIFEST_ENTRY)? else {
        return Ok(None);
    };
    if !is_loader_family(&String::from_utf8_lossy(&manifest), FORGE_MARKER) {
        return Ok(None);
    }

    let profile: InstallProfile = read_json(&mut archive, path, INSTALL_PROFILE_ENTRY)?;
    let version: VersionJson = read_json(&mut archive, path, VERSION_ENTRY)?;

    let loader_version =
        strip_installer_prefix(&profile.version, &version.inherits_from, &profile.profile);
    debug!(family = %profile.profile, version = loader_version, "loader found");

    Ok(Some(ModLoader {
        name: version.id,
        version: loader_version.to_string(),
        family: profile.profile,
        base_mc_version: version.inherits_from,
        path: Some(path.to_path_buf()),
    }))
}

/// `1.19.4-forge-45.0.43` -> `45.0.43`, the form worlds record.
fn strip_installer_prefix<'a>(version: &'a str, base_mc_version: &str, family: &str) -> &'a str {
    version
        .strip_prefix(base_mc_version)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_prefix(family))
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(version)
}
