// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mcbundle.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. mcbundle.toml (cwd, optional)
//! 3. --ini FILE (repeatable, required)
//! 4. MCBUNDLE_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MCBUNDLE_CRAWL__THREADS=4          → crawl.threads = 4
//! MCBUNDLE_PATHS__MODS=/srv/mods     → paths.mods = "/srv/mods"
//! MCBUNDLE_BUNDLE__REWRITE_EXISTING=true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use loader::ConfigLoader;
use types::{BundleConfig, CrawlConfig, GlobalConfig, PathsConfig, ResolveConfig};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "mcbundle.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MCBUNDLE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Directory locations.
    pub paths: PathsConfig,
    /// Tree crawler options.
    pub crawl: CrawlConfig,
    /// Resolver options.
    pub resolve: ResolveConfig,
    /// Bundle assembly options.
    pub bundle: BundleConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcbundle::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("mcbundle.toml")
    ///     .add_toml_file("ci.toml")
    ///     .with_env_prefix("MCBUNDLE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if a section holds an unusable value.
    pub fn validate(&self) -> Result<()> {
        self.crawl.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`. Unset paths are
    /// shown empty.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_crawl_options(&mut options);
        self.format_resolve_options(&mut options);
        options.insert(
            "bundle.rewrite_existing".into(),
            self.bundle.rewrite_existing.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.mods".into(), fmt_path(self.paths.mods.as_ref()));
        options.insert("paths.loaders".into(), fmt_path(self.paths.loaders.as_ref()));
        options.insert(
            "paths.bundles".into(),
            self.paths.bundles.display().to_string(),
        );
    }

    fn format_crawl_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("crawl.extension".into(), self.crawl.extension.clone());
        options.insert(
            "crawl.follow_links".into(),
            self.crawl.follow_links.to_string(),
        );
        options.insert("crawl.threads".into(), self.crawl.threads.to_string());
    }

    fn format_resolve_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "resolve.platform_mods".into(),
            self.resolve.platform_mods.join(", "),
        );
        options.insert(
            "resolve.optional_dependencies".into(),
            self.resolve.optional_dependencies.to_string(),
        );
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
