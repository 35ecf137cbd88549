// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mcbundle using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mcbundle [global options] <command>
//! version
//! options
//! inis
//! inspect ARCHIVE... [--json]
//! crawl [--mods DIR] [--loaders DIR] [--json]
//! bundle (--world PATH | --many-worlds DIR) [--mods DIR] [--loaders DIR]
//!        [--bundles DIR] [--name NAME] [--rewrite]
//! ```

pub mod bundle;
pub mod global;
pub mod inventory;


use crate::cli::bundle::BundleArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::inventory::{CrawlArgs, InspectArgs};
use clap::{Parser, Subcommand};

/// Minecraft Mod Bundle Builder
///
/// Collects the mods and loader a world needs into a self-contained bundle.
#[derive(Debug, Parser)]
#[command(
    name = "mcbundle",
    author,
    version,
    about = "Minecraft Mod Bundle Builder",
    long_about = "mcbundle Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds a bundle directory holding every mod archive a world\n\
                  needs, the matching mod loader installer and a notes file.\n\n\
                  Invoking `mcbundle bundle --world saves/Alpha --mods ~/mods`\n\
                  writes `bundles/Alpha`. See `mcbundle <command> --help` for\n\
                  more information about a command.",
    after_help = "INI FILES:\n\n\
                  mcbundle reads `mcbundle.toml` from the current directory when\n\
                  present. Additional files can be given with --ini and are loaded\n\
                  after it, later files overriding earlier ones. MCBUNDLE_SECTION__KEY\n\
                  environment variables and --set apply on top of the files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by mcbundle.
    Inis,

    /// Prints the records found in mod or loader archives.
    Inspect(InspectArgs),

    /// Crawls the archive stores and summarizes the inventory.
    Crawl(CrawlArgs),

    /// Builds bundles for one world or a directory of worlds.
    Bundle(BundleArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
