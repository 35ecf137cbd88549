// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::FsError;
use std::fs;
use std::path::{Path, PathBuf};

fn io_error(path: &Path, source: std::io::Error) -> FsError {
    FsError::IoError {
        path: path.display().to_string(),
        source,
    }
}

/// Creates `dir` and any missing parents.
///
/// # Errors
///
/// Returns [`FsError::IoError`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))
}

/// Copies a file into `dst_dir`, keeping its file name.
///
/// Creates `dst_dir` if it doesn't exist and overwrites a file of the same
/// name. Returns the destination path.
///
/// # Example
/// ```no_run
/// use mcbundle::utility::fs::copy::copy_file_into;
/// use std::path::Path;
///
/// let copied = copy_file_into(Path::new("/mods/journeymap.jar"), Path::new("/bundle/mods"))?;
/// assert!(copied.ends_with("journeymap.jar"));
/// # Ok::<(), mcbundle::error::FsError>(())
/// ```
///
/// # Errors
///
/// Returns [`FsError::NotFound`] if `src` is missing or has no file name, and
/// [`FsError::IoError`] if creating the directory or copying fails.
pub fn copy_file_into(src: &Path, dst_dir: &Path) -> Result<PathBuf, FsError> {
    if !src.is_file() {
        return Err(FsError::NotFound(src.display().to_string()));
    }
    let Some(name) = src.file_name() else {
        return Err(FsError::NotFound(src.display().to_string()));
    };

    ensure_dir(dst_dir)?;
    let dst = dst_dir.join(name);
    fs::copy(src, &dst).map_err(|source| io_error(&dst, source))?;
    Ok(dst)
}
