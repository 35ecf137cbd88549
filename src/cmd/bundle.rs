// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `bundle` command.
//!
//! ```text
//! crawl stores once --> per world: load save --> make_bundle
//!                                    |
//!                     batch: log failure, continue, exit 1 at end
//! ```

use std::path::{Path, PathBuf};

use anyhow::bail;
use tracing::{error, info, info_span};

use crate::bundle::{BundleOutcome, BundleRequest, make_bundle};
use crate::cli::bundle::BundleArgs;
use crate::cmd::inventory::load_inventory;
use crate::config::Config;
use crate::error::{McbResult, Result};
use crate::inventory::Inventory;
use crate::world::{JsonWorldProvider, WorldDataProvider, discover_worlds};

/// Loads one world and writes its bundle.
///
/// The bundle is named `name` when given, otherwise after the world, falling
/// back to the location's file name for unnamed worlds.
///
/// # Errors
///
/// Returns [`crate::error::McbError::World`] if the save cannot be loaded and
/// [`crate::error::McbError::Bundle`] if assembly fails.
pub fn bundle_world(
    location: &Path,
    name: Option<&str>,
    inventory: &Inventory,
    config: &Config,
) -> McbResult<BundleOutcome> {
    let world = JsonWorldProvider.load(location)?;
    let bundle_name = match name {
        Some(name) => name.to_string(),
        None if !world.world_name.is_empty() => world.world_name.clone(),
        None => location
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let request = BundleRequest::builder()
        .with_world(&world)
        .with_inventory(inventory)
        .with_bundles_root(config.paths.bundles.clone())
        .with_bundle_name(bundle_name)
        .with_rewrite_existing(config.bundle.rewrite_existing)
        .with_resolve_options(config.resolve.to_options())
        .build();
    Ok(make_bundle(&request)?)
}

/// Result of a many-worlds run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub built: Vec<BundleOutcome>,
    /// World directory and the reason it was skipped.
    pub failed: Vec<(PathBuf, String)>,
}

/// Builds one bundle per world directory under `dir`, named after it.
///
/// A failing world is logged and recorded; the remaining worlds still run.
///
/// # Errors
///
/// Returns an error only if `dir` cannot be listed.
pub fn bundle_many_worlds(dir: &Path, inventory: &Inventory, config: &Config) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for world_dir in discover_worlds(dir)? {
        let name = world_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _span = info_span!("world", name = %name).entered();

        match bundle_world(&world_dir, Some(&name), inventory, config) {
            Ok(outcome) => summary.built.push(outcome),
            Err(err) => {
                error!(path = %world_dir.display(), error = %err, "world skipped");
                summary.failed.push((world_dir, err.to_string()));
            }
        }
    }
    info!(
        built = summary.built.len(),
        failed = summary.failed.len(),
        "batch finished"
    );
    Ok(summary)
}

/// One line describing a written bundle.
#[must_use]
pub fn format_outcome(outcome: &BundleOutcome) -> String {
    let loader = if outcome.loader_copied {
        "added"
    } else {
        "needed"
    };
    format!(
        "{}: {} mods copied, {} missing, loader {loader}: {}",
        outcome.path.display(),
        outcome.mods_copied,
        outcome.mods_missing,
        outcome.loader
    )
}

/// Run the bundle command.
///
/// # Errors
///
/// Returns an error if the stores cannot be crawled, the single world fails,
/// or any world of a batch fails.
pub fn run_bundle_command(args: &BundleArgs, config: &Config) -> Result<()> {
    let (inventory, _) = load_inventory(config)?;

    if let Some(ref world) = args.source.world {
        let outcome = bundle_world(world, args.name.as_deref(), &inventory, config)?;
        println!("{}", format_outcome(&outcome));
        return Ok(());
    }

    let Some(ref dir) = args.source.many_worlds else {
        bail!("either --world or --many-worlds is required");
    };
    let summary = bundle_many_worlds(dir, &inventory, config)?;
    for outcome in &summary.built {
        println!("{}", format_outcome(outcome));
    }
    for (path, reason) in &summary.failed {
        println!("{}: failed: {reason}", path.display());
    }

    if !summary.failed.is_empty() {
        bail!(
            "{} of {} worlds failed",
            summary.failed.len(),
            summary.built.len() + summary.failed.len()
        );
    }
    Ok(())
}
