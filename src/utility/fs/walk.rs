// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads for the parallel walker (None = auto-detect)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Creates options for scanning an archive store.
    ///
    /// Everything is visited: hidden entries are included and ignore files
    /// are not consulted, so the result depends only on the directory tree.
    #[must_use]
    pub fn for_archive_store(follow_links: bool) -> Self {
        Self::builder()
            .with_follow_links(follow_links)
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .build()
    }
}

/// Result of a walk that collects file paths.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    /// Creates a new walk result.
    pub(crate) const fn new(files: Vec<PathBuf>, error_count: usize) -> Self {
        Self { files, error_count }
    }

    /// Consumes the result, returning the files.
    #[must_use]
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }

    /// Returns the number of errors encountered.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Counts from a callback walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkCount {
    pub files: usize,
    pub error_count: usize,
}

/// Builds a `WalkBuilder` with the given options.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.ignore(options.respect_gitignore());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    builder
}

fn ensure_root(root: &Path) -> Result<()> {
    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }
    Ok(())
}

/// Walks a tree depth-first on the calling thread, entries of each directory
/// sorted by file name.
///
/// The order depends only on the directory contents, so two walks of the same
/// tree yield the same sequence. Unreadable entries and symbolic-link loops
/// are logged and counted, not fatal.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use mcbundle::utility::fs::walk::{sorted_walk, WalkOptions};
///
/// let result = sorted_walk("/path/to/mods", &WalkOptions::for_archive_store(true))?;
/// println!("{} unreadable entries", result.error_count());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn sorted_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();
    ensure_root(root)?;

    let mut builder = build_walker(root, options);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    let mut error_count = 0;
    for entry in builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "walk error");
                error_count += 1;
            }
        }
    }

    Ok(WalkResult::new(files, error_count))
}

/// Performs parallel directory traversal with a callback for each file.
///
/// The callback runs on the walker's worker threads in no particular order;
/// callers that need a stable order must sort what they collect.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use mcbundle::utility::fs::walk::{parallel_walk_with_callback, WalkOptions};
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let total_size = AtomicU64::new(0);
///
/// parallel_walk_with_callback(
///     "/path/to/mods",
///     &WalkOptions::default(),
///     |path| {
///         if let Ok(meta) = path.metadata() {
///             total_size.fetch_add(meta.len(), Ordering::Relaxed);
///         }
///     }
/// )?;
///
/// println!("Total size: {} bytes", total_size.load(Ordering::Relaxed));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk_with_callback<P, F>(
    root: P,
    options: &WalkOptions,
    callback: F,
) -> Result<WalkCount>
where
    P: AsRef<Path>,
    F: Fn(&Path) + Send + Sync,
{
    let root = root.as_ref();
    ensure_root(root)?;

    let callback = Arc::new(callback);
    let count = Arc::new(AtomicUsize::new(0));
    let error_count = Arc::new(AtomicUsize::new(0));

    let builder = build_walker(root, options);
    let parallel = builder.build_parallel();

    parallel.run(|| {
        let callback = Arc::clone(&callback);
        let count = Arc::clone(&count);
        let error_count = Arc::clone(&error_count);

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    callback(entry.path());
                    count.fetch_add(1, Ordering::Relaxed);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "walk error");
                    error_count.fetch_add(1, Ordering::Relaxed);
                }
            }
            ignore::WalkState::Continue
        })
    });

    Ok(WalkCount {
        files: count.load(Ordering::Relaxed),
        error_count: error_count.load(Ordering::Relaxed),
    })
}
