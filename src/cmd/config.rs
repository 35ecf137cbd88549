// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands and config assembly from the command line.

use crate::cli::global::GlobalOptions;
use crate::config::{Config, ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Layers `mcbundle.toml`, `--ini` files, environment and overrides.
///
/// `overrides` are `section.key=value` assignments applied after the global
/// options, so command flags win over `--set`.
///
/// # Errors
///
/// Returns an error if an override is not a `section.key=value` assignment.
pub fn build_config_loader(global: &GlobalOptions, overrides: &[String]) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for assignment in global.to_config_overrides().iter().chain(overrides) {
        loader = loader.set_from_str(assignment)?;
    }
    Ok(loader)
}

/// Builds the effective configuration.
///
/// # Errors
///
/// Returns an error if any source fails to load or the result is invalid.
pub fn load_config(global: &GlobalOptions, overrides: &[String]) -> Result<Config> {
    build_config_loader(global, overrides)?
        .build()
        .map_err(|e| e.context("failed to load config"))
}
