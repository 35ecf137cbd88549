// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundle assembly.
//!
//! ```text
//! <bundles_root>/
//!   .mcbundle-staging-XXXX/          tempfile::TempDir, removed on drop
//!     <bundle_name>/
//!       mods/*.jar                   add_mods()
//!       <loader>.jar                 add_modloader() (local loader only)
//!       notes.txt                    add_notes()
//!            |
//!            | rename once every step succeeded
//!            v
//!   <bundle_name>/
//! ```
//!
//! A failed step leaves no bundle directory behind. An existing bundle is
//! replaced only with `rewrite_existing`, checked before staging and again
//! right before the rename.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::{debug, info, info_span, warn};

use crate::error::BundleError;
use crate::inventory::{Inventory, ModLoader};
use crate::resolve::{Available, LoaderChoice, Resolution, ResolveOptions, Resolver, pick_modloader};
use crate::utility::fs::copy::{copy_file_into, ensure_dir};
use crate::world::WorldData;

/// Subdirectory holding copied mod archives.
pub const MODS_DIR: &str = "mods";

/// Audit file written into every bundle.
pub const NOTES_FILE: &str = "notes.txt";

const STAGING_PREFIX: &str = ".mcbundle-staging-";

/// Rejects names that would not map to exactly one child directory.
fn validate_bundle_name(name: &str) -> Result<(), BundleError> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if name.is_empty() || !single_normal || name.contains(['/', '\\']) {
        return Err(BundleError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Creates `<root>/<name>`, creating `root` first if needed.
///
/// # Errors
///
/// Returns [`BundleError::AlreadyExists`] if the directory exists and
/// `rewrite_existing` is false. With `rewrite_existing` the old directory is
/// removed first.
pub fn ensure_bundle_directory(
    root: &Path,
    name: &str,
    rewrite_existing: bool,
) -> Result<PathBuf, BundleError> {
    validate_bundle_name(name)?;
    fs::create_dir_all(root).map_err(|source| BundleError::io(root, source))?;

    let dir = root.join(name);
    if dir.exists() {
        if !rewrite_existing {
            return Err(BundleError::AlreadyExists { path: dir });
        }
        debug!(path = %dir.display(), "removing previous bundle");
        fs::remove_dir_all(&dir).map_err(|source| BundleError::io(&dir, source))?;
    }

    fs::create_dir(&dir).map_err(|source| BundleError::io(&dir, source))?;
    Ok(dir)
}

/// Copies every available mod's archive into `<bundle_dir>/mods`.
///
/// Records without an archive are skipped, as are archives already copied
/// for an earlier record. Returns the number of archives copied.
///
/// # Errors
///
/// Returns [`BundleError::FileNameClash`] if two different archives share a
/// file name, or [`BundleError::Fs`] if a copy fails.
pub fn add_mods(bundle_dir: &Path, available: &[Available<'_>]) -> Result<usize, BundleError> {
    let mods_dir = bundle_dir.join(MODS_DIR);
    ensure_dir(&mods_dir)?;

    let mut copied: BTreeMap<&OsStr, &Path> = BTreeMap::new();
    for entry in available {
        let Some(path) = entry.record.path.as_deref() else {
            warn!(name = %entry.record.name, "no archive to copy");
            continue;
        };
        let file_name = path.file_name().unwrap_or(path.as_os_str());
        match copied.get(file_name) {
            Some(&first) if first == path => continue,
            Some(&first) => {
                return Err(BundleError::FileNameClash {
                    file_name: file_name.to_string_lossy().into_owned(),
                    first: first.to_path_buf(),
                    second: path.to_path_buf(),
                });
            }
            None => {}
        }
        copy_file_into(path, &mods_dir)?;
        copied.insert(file_name, path);
        debug!(path = %path.display(), "mod copied");
    }
    Ok(copied.len())
}

/// Copies the loader archive into the bundle root when one is available.
///
/// The choice is handed back unchanged for [`add_notes`].
///
/// # Errors
///
/// Returns [`BundleError::Fs`] if the copy fails.
pub fn add_modloader<'a>(
    bundle_dir: &Path,
    choice: LoaderChoice<'a>,
) -> Result<LoaderChoice<'a>, BundleError> {
    if let LoaderChoice::Local(loader) = &choice
        && let Some(path) = loader.path.as_deref()
    {
        copy_file_into(path, bundle_dir)?;
        debug!(path = %path.display(), "loader copied");
    }
    Ok(choice)
}

/// Renders the notes file.
///
/// The text depends only on its arguments.
#[must_use]
pub fn render_notes(world_name: &str, resolution: &Resolution<'_>, loader: &LoaderChoice<'_>) -> String {
    let mut notes = String::new();
    let _ = writeln!(notes, "world: {world_name}");

    let status = if loader.is_local() {
        "loader added"
    } else {
        "loader needed"
    };
    let _ = writeln!(notes, "{status}: {loader}");

    let _ = writeln!(notes, "mods_missing:");
    for missing in &resolution.unavailable {
        let _ = writeln!(notes, "- {missing}");
    }

    let _ = writeln!(notes, "mods_included:");
    for available in &resolution.available {
        let _ = writeln!(notes, "- {available}");
    }
    notes
}

/// Writes `notes.txt` into the bundle, replacing any previous one.
///
/// # Errors
///
/// Returns [`BundleError::Io`] if the file cannot be written.
pub fn add_notes(
    bundle_dir: &Path,
    world_name: &str,
    resolution: &Resolution<'_>,
    loader: &LoaderChoice<'_>,
) -> Result<PathBuf, BundleError> {
    let path = bundle_dir.join(NOTES_FILE);
    fs::write(&path, render_notes(world_name, resolution, loader))
        .map_err(|source| BundleError::io(&path, source))?;
    Ok(path)
}

/// Everything needed to build one bundle.
#[derive(Debug, Clone, Builder)]
pub struct BundleRequest<'a> {
    #[builder(setters(name = with_world))]
    world: &'a WorldData,
    #[builder(setters(name = with_inventory))]
    inventory: &'a Inventory,
    #[builder(setters(name = with_bundles_root), into)]
    bundles_root: PathBuf,
    #[builder(setters(name = with_bundle_name), into)]
    bundle_name: String,
    #[builder(setters(name = with_rewrite_existing), default = false)]
    rewrite_existing: bool,
    #[builder(setters(name = with_resolve_options), default)]
    resolve_options: ResolveOptions,
}

impl BundleRequest<'_> {
    #[must_use]
    pub fn target(&self) -> PathBuf {
        self.bundles_root.join(&self.bundle_name)
    }
}

/// Summary of a finished bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutcome {
    pub path: PathBuf,
    pub mods_copied: usize,
    pub mods_missing: usize,
    pub loader: ModLoader,
    pub loader_copied: bool,
}

/// Resolves the world against the inventory and writes the bundle.
///
/// Runs directory creation, mods, loader and notes in order inside a staging
/// directory, then moves the result into place.
///
/// # Errors
///
/// Returns [`BundleError::AlreadyExists`] if the bundle exists and
/// `rewrite_existing` is false, or the error of the first failing step. No
/// bundle directory is left behind on error.
pub fn make_bundle(request: &BundleRequest<'_>) -> Result<BundleOutcome, BundleError> {
    let _span = info_span!("make_bundle", bundle = %request.bundle_name).entered();

    validate_bundle_name(&request.bundle_name)?;
    let root = request.bundles_root.as_path();
    let target = request.target();
    if target.exists() && !request.rewrite_existing {
        return Err(BundleError::AlreadyExists { path: target });
    }

    fs::create_dir_all(root).map_err(|source| BundleError::io(root, source))?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(root)
        .map_err(|source| BundleError::io(root, source))?;
    let staged = ensure_bundle_directory(staging.path(), &request.bundle_name, false)?;

    let world = request.world;
    let resolution = Resolver::new(&request.resolve_options)
        .locate_mods(&world.mod_list, &request.inventory.mods);
    let choice = pick_modloader(&world.engine_info, &request.inventory.loaders);

    let mods_copied = add_mods(&staged, &resolution.available)?;
    let choice = add_modloader(&staged, choice)?;
    add_notes(&staged, &world.world_name, &resolution, &choice)?;

    if target.exists() {
        if !request.rewrite_existing {
            return Err(BundleError::AlreadyExists { path: target });
        }
        fs::remove_dir_all(&target).map_err(|source| BundleError::io(&target, source))?;
    }
    fs::rename(&staged, &target).map_err(|source| BundleError::io(&target, source))?;
    drop(staging);

    info!(
        path = %target.display(),
        mods = mods_copied,
        missing = resolution.unavailable.len(),
        loader = %choice,
        "bundle written"
    );

    Ok(BundleOutcome {
        path: target,
        mods_copied,
        mods_missing: resolution.unavailable.len(),
        loader_copied: choice.is_local(),
        loader: choice.loader().clone(),
    })
}
