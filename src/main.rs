// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Inspect | Crawl | Bundle
//! ```

use std::process::ExitCode;

use mcbundle::cli::{self, Command};
use mcbundle::cmd::bundle::run_bundle_command;
use mcbundle::cmd::config::{
    build_config_loader, load_config, run_inis_command, run_options_command,
};
use mcbundle::cmd::inventory::{run_crawl_command, run_inspect_command};
use mcbundle::config::Config;
use mcbundle::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let overrides = match &cli.command {
        Some(Command::Crawl(args)) => args.stores.to_config_overrides(),
        Some(Command::Bundle(args)) => args.to_config_overrides(),
        _ => Vec::new(),
    };
    let config = match load_config(&cli.global, &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &overrides)
}

fn start_logging(config: &Config) -> mcbundle::error::Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build();
    init_logging(&log_config)
}

fn dispatch_command(cli: &cli::Cli, config: &Config, overrides: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => build_config_loader(&cli.global, overrides).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::Inspect(args)) => run_inspect_command(args),
        Some(Command::Crawl(args)) => run_crawl_command(args, config),
        Some(Command::Bundle(args)) => run_bundle_command(args, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
