// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `inspect` and `crawl` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::error;

use crate::cli::inventory::{CrawlArgs, InspectArgs};
use crate::config::Config;
use crate::error::{InspectError, Result};
use crate::inventory::archive::{inspect_loader_archive, inspect_mod_archive};
use crate::inventory::crawl::{CrawlStats, crawl_inventory};
use crate::inventory::{Inventory, Mod, ModLoader};

/// Everything the inspector reports for one archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveRecords {
    pub archive: PathBuf,
    pub mods: Vec<Mod>,
    pub loader: Option<ModLoader>,
}

/// Runs both inspector paths on one archive.
///
/// # Errors
///
/// Returns the first [`InspectError`] of either path.
pub fn inspect_archive(path: &Path) -> std::result::Result<ArchiveRecords, InspectError> {
    Ok(ArchiveRecords {
        archive: path.to_path_buf(),
        mods: inspect_mod_archive(path)?,
        loader: inspect_loader_archive(path)?,
    })
}

/// Human-readable lines for one archive.
#[must_use]
pub fn format_archive_records(records: &ArchiveRecords) -> Vec<String> {
    let mut lines = vec![format!("{}:", records.archive.display())];
    for record in &records.mods {
        let versions = if record.possible_mod_versions.is_empty() {
            "-".to_string()
        } else {
            record.possible_mod_versions.join(", ")
        };
        lines.push(format!("  mod: {record} {versions}"));
        for dependency in record.dependencies.values() {
            let kind = if dependency.mandatory {
                "requires"
            } else {
                "optional"
            };
            lines.push(format!(
                "    {kind}: {} {}",
                dependency.mod_id, dependency.version_range
            ));
        }
    }
    if let Some(ref loader) = records.loader {
        lines.push(format!("  loader: {loader}"));
    }
    lines
}

/// Run the inspect command.
///
/// # Errors
///
/// Returns an error if any archive could not be inspected. The others are
/// still printed.
pub fn run_inspect_command(args: &InspectArgs) -> Result<()> {
    let mut inspected = Vec::new();
    let mut failed = 0usize;
    for path in &args.archives {
        match inspect_archive(path) {
            Ok(records) => inspected.push(records),
            Err(err) => {
                error!(path = %path.display(), error = %err, "inspection failed");
                failed += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspected)?);
    } else {
        for records in &inspected {
            for line in format_archive_records(records) {
                println!("{line}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} archives could not be inspected", args.archives.len());
    }
    Ok(())
}

/// Crawls the configured stores.
///
/// # Errors
///
/// Returns an error if `paths.mods` is unset or a store does not exist.
pub fn load_inventory(config: &Config) -> Result<(Inventory, CrawlStats)> {
    let mods = config.paths.mods_dir()?;
    let loaders = config.paths.loaders_dir()?;
    crawl_inventory(mods, loaders, &config.crawl.to_options())
        .with_context(|| format!("failed to crawl {}", mods.display()))
}

/// Summary lines for a crawl.
#[must_use]
pub fn format_stats(stats: &CrawlStats) -> Vec<String> {
    [
        ("mod archives", stats.mod_archives),
        ("loader archives", stats.loader_archives),
        ("mods", stats.mods),
        ("loaders", stats.loaders),
        ("failures", stats.failures),
        ("walk errors", stats.walk_errors),
    ]
    .into_iter()
    .map(|(label, count)| format!("{:<16} {count}", format!("{label}:")))
    .collect()
}

/// Run the crawl command.
///
/// # Errors
///
/// Returns an error if the stores cannot be crawled.
pub fn run_crawl_command(args: &CrawlArgs, config: &Config) -> Result<()> {
    let (inventory, stats) = load_inventory(config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
    } else {
        for line in format_stats(&stats) {
            println!("{line}");
        }
    }
    Ok(())
}
