// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, build_subscriber};
use tracing::Level;

#[test]
fn test_log_level_conversion() {
    assert_eq!(LogLevel::from_int(0), LogLevel::SILENT);
    assert_eq!(LogLevel::from_int(3), LogLevel::INFO);
    assert_eq!(LogLevel::from_int(5), LogLevel::TRACE);
    assert_eq!(LogLevel::from_int(100), LogLevel::DUMP);
    assert_eq!(LogLevel::from_u8(7), None);
    assert!(LogLevel::try_from(9).is_err());
}

#[test]
fn test_log_level_filters_scope_to_crate() {
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
    assert_eq!(LogLevel::WARN.to_filter_string(), "mcbundle=warn");
    assert_eq!(LogLevel::TRACE.to_filter_string(), "mcbundle=trace");
    assert_eq!(LogLevel::DUMP.to_filter_string(), "trace");
}

#[test]
fn test_log_level_to_tracing_level() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::ERROR.to_tracing_level(), Some(Level::ERROR));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(config.show_timestamps());
    assert!(!config.show_target());
}

#[test]
fn test_log_level_serde_round_trip() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_subscriber_writes_file_without_timestamps() {
    let temp = tempfile::tempdir().unwrap();
    let log_path = temp.path().join("logs/run.log");
    let config = LogConfig::builder()
        .with_console_level(LogLevel::SILENT)
        .with_file_level(LogLevel::DEBUG)
        .with_log_file(log_path.to_string_lossy().into_owned())
        .with_show_timestamps(false)
        .build();

    let (subscriber, guard) = build_subscriber(&config).unwrap();
    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(mods = 3, "bundle staged");
        tracing::trace!("filtered out");
    });
    drop(guard);

    let written = std::fs::read_to_string(&log_path).unwrap();
    assert!(written.contains("bundle staged"));
    assert!(written.contains("mods=3"));
    assert!(!written.contains("filtered out"));
}

#[test]
fn test_subscriber_with_timestamps_and_no_file() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::SILENT)
        .build();

    let (subscriber, _guard) = build_subscriber(&config).unwrap();
    tracing::subscriber::with_default(subscriber, || tracing::info!("console only"));
}
