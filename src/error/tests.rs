// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{BundleError, ConfigError, InspectError, McbError, McbResult, RangeError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "mods".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'mods' in section '[paths]'");
}

#[test]
fn test_range_error_names_offending_string() {
    let err = RangeError::Malformed {
        range: "[1,2,3]".to_string(),
    };
    assert!(err.to_string().contains("'[1,2,3]'"));
}

#[test]
fn test_bundle_error_display() {
    let err = BundleError::AlreadyExists {
        path: PathBuf::from("bundles/survival"),
    };
    insta::assert_snapshot!(err.to_string(), @"bundle directory already exists: bundles/survival");
}

#[test]
fn test_inspect_error_recoverable() {
    let missing = InspectError::MissingDeclarationEntry {
        path: PathBuf::from("a.jar"),
        entry: "META-INF/mods.toml",
    };
    let malformed = InspectError::MalformedLoaderArchive {
        path: PathBuf::from("forge.jar"),
        entry: "install_profile.json",
        message: "not found".to_string(),
    };
    assert!(missing.is_recoverable());
    assert!(!malformed.is_recoverable());
    assert_eq!(malformed.path(), PathBuf::from("forge.jar").as_path());
}

#[test]
fn test_boxed_conversion() {
    let err: McbError = BundleError::InvalidName {
        name: "..".to_string(),
    }
    .into();
    assert!(matches!(err, McbError::Bundle(_)));
    assert_eq!(err.to_string(), "bundle error: invalid bundle name '..'");
}

#[test]
fn test_mcb_error_size() {
    // One thin Box per variant plus the discriminant
    let size = std::mem::size_of::<McbError>();
    assert!(size <= 24, "McbError is {size} bytes, expected <= 24");
}

#[test]
fn test_mcb_result_size() {
    let size = std::mem::size_of::<McbResult<()>>();
    assert!(size <= 24, "McbResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_io_error_is_boxed() {
    let err: McbError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, McbError::Io(_)));
    insta::assert_snapshot!(err.to_string(), @"io error: gone");
}
