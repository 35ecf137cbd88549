// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [global]   output_log_level, file_log_level, log_file
//! [paths]    mods, loaders, bundles
//! [crawl]    extension, follow_links, threads
//! [resolve]  platform_mods, optional_dependencies
//! [bundle]   rewrite_existing
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::inventory::crawl::{CrawlOptions, DEFAULT_EXTENSION};
use crate::logging::LogLevel;
use crate::resolve::{DEFAULT_PLATFORM_MODS, ResolveOptions};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Directory locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Tree of mod archives.
    pub mods: Option<PathBuf>,
    /// Tree of loader installers; `mods` is used when unset.
    pub loaders: Option<PathBuf>,
    /// Where bundles are written.
    pub bundles: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            mods: None,
            loaders: None,
            bundles: PathBuf::from("bundles"),
        }
    }
}

impl PathsConfig {
    /// Mods directory, or a [`ConfigError::MissingKey`] naming `paths.mods`.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths.mods` is unset.
    pub fn mods_dir(&self) -> Result<&PathBuf, ConfigError> {
        self.mods.as_ref().ok_or_else(|| ConfigError::MissingKey {
            section: "paths".to_string(),
            key: "mods".to_string(),
        })
    }

    /// Loaders directory, falling back to the mods directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `paths.loaders` nor `paths.mods` is set.
    pub fn loaders_dir(&self) -> Result<&PathBuf, ConfigError> {
        match &self.loaders {
            Some(loaders) => Ok(loaders),
            None => self.mods_dir(),
        }
    }
}

/// Tree crawler options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// Archive file extension, without the dot.
    pub extension: String,
    pub follow_links: bool,
    /// 0 crawls on the calling thread.
    pub threads: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            follow_links: true,
            threads: 0,
        }
    }
}

impl CrawlConfig {
    /// Validates the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty or dotted extension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ConfigError::InvalidValue {
                section: "crawl".to_string(),
                key: "extension".to_string(),
                message: format!(
                    "expected an extension without dots like 'jar', got '{}'",
                    self.extension
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_options(&self) -> CrawlOptions {
        CrawlOptions::builder()
            .with_extension(self.extension.clone())
            .with_follow_links(self.follow_links)
            .with_threads(self.threads)
            .build()
    }
}

/// Resolver options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Names never looked up in the inventory.
    pub platform_mods: Vec<String>,
    /// Resolve dependencies not marked mandatory.
    pub optional_dependencies: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            platform_mods: DEFAULT_PLATFORM_MODS.map(String::from).to_vec(),
            optional_dependencies: true,
        }
    }
}

impl ResolveConfig {
    #[must_use]
    pub fn to_options(&self) -> ResolveOptions {
        ResolveOptions::builder()
            .with_platform_mods(self.platform_mods.clone())
            .with_optional_dependencies(self.optional_dependencies)
            .build()
    }
}

/// Bundle assembly options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Replace an existing bundle of the same name.
    pub rewrite_existing: bool,
}
