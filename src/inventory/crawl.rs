// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tree crawler.
//!
//! ```text
//! threads == 0                         threads > 0
//!   sorted_walk()                        parallel_walk_with_callback()
//!   depth-first, sorted by name            inspect on worker threads
//!   inspect in walk order                  flume channel -> collect
//!        |                                 sort by archive path
//!        +-------------------+-------------------+
//!                            v
//!              CrawlReport { records, archives, failures, walk_errors }
//! ```
//!
//! Both modes yield the same order for the same tree, so resolver tie-breaks
//! do not depend on the crawl mode. A failing archive is logged and recorded,
//! never fatal to the crawl.

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::Serialize;
use tracing::{info, info_span, warn};

use super::archive::{inspect_loader_archive, inspect_mod_archive};
use super::{Inventory, Mod, ModLoader};
use crate::error::{InspectError, Result};
use crate::utility::fs::walk::{WalkOptions, parallel_walk_with_callback, sorted_walk};

/// Archive extension looked for when none is configured.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Options controlling a crawl.
#[derive(Debug, Clone, Builder)]
pub struct CrawlOptions {
    /// File extension (without dot) of archives to inspect
    #[builder(setters(name = with_extension), default = DEFAULT_EXTENSION.to_string())]
    extension: String,
    /// Follow symbolic links while walking
    #[builder(setters(name = with_follow_links), default = true)]
    follow_links: bool,
    /// Worker threads; 0 crawls on the calling thread
    #[builder(setters(name = with_threads), default = 0)]
    threads: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CrawlOptions {
    /// Returns the archive extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns whether symbolic links are followed.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns the worker thread count.
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Returns true if `path`'s file name ends with `.<extension>`.
    #[must_use]
    pub fn is_archive(&self, path: &Path) -> bool {
        let suffix = format!(".{}", self.extension);
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix))
    }

    fn walk_options(&self) -> WalkOptions {
        let mut options = WalkOptions::for_archive_store(self.follow_links);
        if self.threads > 0 {
            options = WalkOptions::builder()
                .with_follow_links(self.follow_links)
                .with_include_hidden(true)
                .with_respect_gitignore(false)
                .with_threads(self.threads)
                .build();
        }
        options
    }
}

/// An archive the crawler skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Records found under one root, in crawl order.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport<T> {
    pub records: Vec<T>,
    /// Files with the archive extension that were inspected.
    pub archives: usize,
    pub failures: Vec<CrawlFailure>,
    /// Directory entries the walker could not read.
    pub walk_errors: usize,
}

impl<T> Default for CrawlReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            archives: 0,
            failures: Vec::new(),
            walk_errors: 0,
        }
    }
}

impl<T> CrawlReport<T> {
    fn absorb(&mut self, path: PathBuf, outcome: std::result::Result<Vec<T>, InspectError>) {
        self.archives += 1;
        match outcome {
            Ok(records) => self.records.extend(records),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping archive");
                self.failures.push(CrawlFailure {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }
}

/// Summary of a full inventory crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub mod_archives: usize,
    pub loader_archives: usize,
    pub mods: usize,
    pub loaders: usize,
    pub failures: usize,
    pub walk_errors: usize,
}

fn crawl<T, F>(root: &Path, options: &CrawlOptions, inspect: F) -> Result<CrawlReport<T>>
where
    T: Send,
    F: Fn(&Path) -> std::result::Result<Vec<T>, InspectError> + Send + Sync,
{
    let mut report = CrawlReport::default();

    if options.threads() == 0 {
        let walk = sorted_walk(root, &options.walk_options())?;
        report.walk_errors = walk.error_count();
        for path in walk.into_files() {
            if options.is_archive(&path) {
                let outcome = inspect(&path);
                report.absorb(path, outcome);
            }
        }
        return Ok(report);
    }

    let (tx, rx) = flume::unbounded();
    let count = parallel_walk_with_callback(root, &options.walk_options(), |path| {
        if options.is_archive(path) {
            let _ = tx.send((path.to_path_buf(), inspect(path)));
        }
    })?;
    drop(tx);

    let mut outcomes: Vec<_> = rx.iter().collect();
    outcomes.sort_by(|(a, _), (b, _)| a.cmp(b));

    report.walk_errors = count.error_count;
    for (path, outcome) in outcomes {
        report.absorb(path, outcome);
    }
    Ok(report)
}

/// Inspects every mod archive under `root`.
///
/// # Errors
///
/// Returns an error only if `root` does not exist; per-archive failures are
/// collected in the report.
pub fn crawl_mods(root: &Path, options: &CrawlOptions) -> Result<CrawlReport<Mod>> {
    let _span = info_span!("crawl_mods", root = %root.display()).entered();
    let report = crawl(root, options, inspect_mod_archive)?;
    info!(
        archives = report.archives,
        mods = report.records.len(),
        failures = report.failures.len(),
        "mods crawled"
    );
    Ok(report)
}

/// Inspects every loader installer archive under `root`.
///
/// Archives that are not installers of the known family contribute nothing.
///
/// # Errors
///
/// Returns an error only if `root` does not exist.
pub fn crawl_loaders(root: &Path, options: &CrawlOptions) -> Result<CrawlReport<ModLoader>> {
    let _span = info_span!("crawl_loaders", root = %root.display()).entered();
    let report = crawl(root, options, |path| {
        inspect_loader_archive(path).map(|loader| loader.into_iter().collect())
    })?;
    info!(
        archives = report.archives,
        loaders = report.records.len(),
        failures = report.failures.len(),
        "loaders crawled"
    );
    Ok(report)
}

/// Crawls mods and loaders into one inventory.
///
/// `mods_root` and `loaders_root` may be the same directory.
///
/// # Errors
///
/// Returns an error if either root does not exist.
pub fn crawl_inventory(
    mods_root: &Path,
    loaders_root: &Path,
    options: &CrawlOptions,
) -> Result<(Inventory, CrawlStats)> {
    let mods = crawl_mods(mods_root, options)?;
    let loaders = crawl_loaders(loaders_root, options)?;

    let stats = CrawlStats {
        mod_archives: mods.archives,
        loader_archives: loaders.archives,
        mods: mods.records.len(),
        loaders: loaders.records.len(),
        failures: mods.failures.len() + loaders.failures.len(),
        walk_errors: mods.walk_errors + loaders.walk_errors,
    };
    Ok((Inventory::new(mods.records, loaders.records), stats))
}
