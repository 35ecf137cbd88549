// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `inspect` and `crawl` commands.
//!
//! ```text
//! mcbundle inspect ARCHIVE... [--json]
//! mcbundle crawl [--mods DIR] [--loaders DIR] [--json]
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `inspect` command.
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Archives to inspect.
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<PathBuf>,

    /// Prints the records as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Directory overrides shared by `crawl` and `bundle`.
#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// Tree of mod archives, overrides paths.mods.
    #[arg(long = "mods", value_name = "DIR")]
    pub mods: Option<PathBuf>,

    /// Tree of loader installers, overrides paths.loaders.
    #[arg(long = "loaders", value_name = "DIR")]
    pub loaders: Option<PathBuf>,
}

impl StoreArgs {
    /// Converts the given directories to `paths.*` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref mods) = self.mods {
            overrides.push(format!("paths.mods={}", mods.display()));
        }
        if let Some(ref loaders) = self.loaders {
            overrides.push(format!("paths.loaders={}", loaders.display()));
        }
        overrides
    }
}

/// Arguments for the `crawl` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CrawlArgs {
    #[command(flatten)]
    pub stores: StoreArgs,

    /// Prints the full inventory as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}
