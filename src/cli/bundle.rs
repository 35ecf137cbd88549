// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `bundle` command.
//!
//! # Modes
//!
//! ```text
//! --world PATH       → one bundle, named --name or after the world
//! --many-worlds DIR  → one bundle per subdirectory, named after it
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::cli::inventory::StoreArgs;

/// Arguments for the `bundle` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BundleArgs {
    #[command(flatten)]
    pub source: WorldSource,

    #[command(flatten)]
    pub stores: StoreArgs,

    /// Where bundles are written, overrides paths.bundles.
    #[arg(long = "bundles", value_name = "DIR")]
    pub bundles: Option<PathBuf>,

    /// Bundle name for a single world. Defaults to the world name.
    #[arg(long = "name", value_name = "NAME", conflicts_with = "many_worlds")]
    pub name: Option<String>,

    /// Replaces bundles that already exist.
    #[arg(long)]
    pub rewrite: bool,
}

impl BundleArgs {
    /// Converts the command's flags to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.stores.to_config_overrides();
        if let Some(ref bundles) = self.bundles {
            overrides.push(format!("paths.bundles={}", bundles.display()));
        }
        if self.rewrite {
            overrides.push("bundle.rewrite_existing=true".to_string());
        }
        overrides
    }
}

/// Which worlds to bundle. Exactly one is required.
#[derive(Debug, Clone, Default, Args)]
#[group(required = true, multiple = false)]
pub struct WorldSource {
    /// World save directory or exported world JSON file.
    #[arg(long = "world", value_name = "PATH")]
    pub world: Option<PathBuf>,

    /// Directory whose subdirectories are world saves.
    #[arg(long = "many-worlds", value_name = "DIR")]
    pub many_worlds: Option<PathBuf>,
}
