// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              McbError (16 bytes)
//!                     |
//!   +-------+-------+-+-----+-------+-------+------+
//!   |       |       |       |       |       |      |
//!   v       v       v       v       v       v      v
//! Range  Inspect  World  Bundle  Config    Fs     Io
//!  Box     Box     Box     Box     Box     Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Range    Malformed
//!   Inspect  MissingManifestEntry, MissingDeclarationEntry,
//!            MalformedDeclaration, MalformedLoaderArchive, Archive, Io
//!   World    NoWorldSaveFound, Parse, Io
//!   Bundle   AlreadyExists, InvalidName, Fs, Io
//!   Config   MissingKey, InvalidValue
//!   Fs       NotFound, IoError
//! ```
//!
//! Per-archive and per-world errors are recoverable at the crawl/batch level;
//! only `anyhow` plumbing in `cmd` decides what terminates the process.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`McbError`].
pub type McbResult<T> = std::result::Result<T, McbError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at two words on the stack.
#[derive(Debug, Error)]
pub enum McbError {
    /// Version range text could not be parsed.
    #[error("version range error: {0}")]
    Range(#[from] Box<RangeError>),

    /// Archive inspection failed.
    #[error("inspect error: {0}")]
    Inspect(#[from] Box<InspectError>),

    /// World data could not be loaded.
    #[error("world error: {0}")]
    World(#[from] Box<WorldError>),

    /// Bundle assembly failed.
    #[error("bundle error: {0}")]
    Bundle(#[from] Box<BundleError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for McbError {
                fn from(err: $error) -> Self {
                    McbError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    RangeError => Range,
    InspectError => Inspect,
    WorldError => World,
    BundleError => Bundle,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Version Range Errors ---

/// Version range parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The range did not split into one or two bounds.
    #[error("malformed version range '{range}': expected one comma separating minimum and maximum like '[44,45.0.0)'")]
    Malformed { range: String },
}

// --- Archive Inspection Errors ---

/// Errors raised while inspecting a single mod or loader archive.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The archive has no manifest entry. Recoverable.
    #[error("no {entry} in {path}")]
    MissingManifestEntry { path: PathBuf, entry: &'static str },

    /// The archive has no loader-declaration entry. Recoverable.
    #[error("no {entry} in {path}")]
    MissingDeclarationEntry { path: PathBuf, entry: &'static str },

    /// The declaration entry could not be parsed, even after repair.
    #[error("malformed declaration in {path}: {message}")]
    MalformedDeclaration { path: PathBuf, message: String },

    /// A declared version range could not be parsed.
    #[error("bad version range in {path}: {source}")]
    Range {
        path: PathBuf,
        #[source]
        source: RangeError,
    },

    /// A recognized loader archive is missing a required entry.
    #[error("malformed loader archive {path}: {entry}: {message}")]
    MalformedLoaderArchive {
        path: PathBuf,
        entry: &'static str,
        message: String,
    },

    /// The archive container could not be read.
    #[error("unreadable archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// I/O error while opening or reading the archive.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InspectError {
    /// Returns true for the conditions that downgrade to a minimal record.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingManifestEntry { .. } | Self::MissingDeclarationEntry { .. }
        )
    }

    /// Archive the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingManifestEntry { path, .. }
            | Self::MissingDeclarationEntry { path, .. }
            | Self::MalformedDeclaration { path, .. }
            | Self::Range { path, .. }
            | Self::MalformedLoaderArchive { path, .. }
            | Self::Archive { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

// --- World Errors ---

/// Errors raised by the world data provider.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The location holds no recognizable save data.
    #[error("could not find world data to load in {dir}")]
    NoWorldSaveFound { dir: PathBuf },

    /// The save data exists but cannot be decoded.
    #[error("failed to parse world data '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// I/O error reading save data.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Bundle Errors ---

/// Bundle assembly errors.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Target bundle directory exists and overwriting was not requested.
    #[error("bundle directory already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Bundle name cannot be used as a single directory name.
    #[error("invalid bundle name '{name}'")]
    InvalidName { name: String },

    /// Two different archives would land on the same file in `mods/`.
    #[error("archives '{first}' and '{second}' share the file name '{file_name}'")]
    FileNameClash {
        file_name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Copying an archive into the bundle failed.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Directory or file operation failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
