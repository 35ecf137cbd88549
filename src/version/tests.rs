// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cmp::Ordering;

use super::{VersionRange, compare_versions, get_range};
use crate::error::RangeError;

fn range(minimum: Option<&str>, maximum: Option<&str>) -> VersionRange {
    VersionRange {
        minimum: minimum.map(String::from),
        maximum: maximum.map(String::from),
    }
}

#[test]
fn test_get_range_valid_inputs() {
    let cases = [
        (",", range(None, None)),
        ("[44,)", range(Some("44"), None)),
        (",45", range(None, Some("45"))),
        ("44.0.1,45.0.0", range(Some("44.0.1"), Some("45.0.0"))),
        ("[44,45.0.0)", range(Some("44"), Some("45.0.0"))),
        (" ( 1.19 , 1.20.1 ] ", range(Some("1.19"), Some("1.20.1"))),
    ];
    for (input, expected) in cases {
        assert_eq!(get_range(input).unwrap(), expected, "input: {input:?}");
    }
}

#[test]
fn test_get_range_single_point() {
    assert_eq!(
        get_range("1.2.3").unwrap(),
        range(Some("1.2.3"), Some("1.2.3"))
    );
    assert_eq!(
        get_range("[5.9.5]").unwrap(),
        range(Some("5.9.5"), Some("5.9.5"))
    );
    assert_eq!(get_range("").unwrap(), VersionRange::any());
}

#[test]
fn test_get_range_too_many_commas() {
    let err = get_range("[1,2,3)").unwrap_err();
    assert_eq!(
        err,
        RangeError::Malformed {
            range: "[1,2,3)".to_string()
        }
    );
    assert!(get_range(",,").is_err());
}

#[test]
fn test_compare_versions_numeric() {
    assert_eq!(compare_versions("1.10", "1.9"), Some(Ordering::Greater));
    assert_eq!(compare_versions("44", "44.0.0"), Some(Ordering::Equal));
    assert_eq!(compare_versions("45.0.43", "45.1"), Some(Ordering::Less));
    assert_eq!(compare_versions("v2.0", "2"), Some(Ordering::Equal));
}

#[test]
fn test_compare_versions_qualifiers() {
    assert_eq!(compare_versions("1.0-beta", "1.0"), Some(Ordering::Less));
    assert_eq!(compare_versions("1.0-beta", "1.0-alpha"), Some(Ordering::Greater));
    assert_eq!(compare_versions("1.0.1", "1.0-rc1"), Some(Ordering::Greater));
    assert_eq!(
        compare_versions("1.19.2-5.1.3.0", "1.19.2-5.1.2"),
        Some(Ordering::Greater)
    );
}

#[test]
fn test_compare_versions_rejects_templates() {
    assert_eq!(compare_versions("${file.jarVersion}", "1.0"), None);
    assert_eq!(compare_versions("1.0", "@VERSION@"), None);
    assert_eq!(compare_versions("", "1"), None);
}

#[test]
fn test_range_contains_inclusive() {
    let window = get_range("[1,2]").unwrap();
    assert!(window.contains("1"));
    assert!(window.contains("1.5"));
    assert!(window.contains("2.0.0"));
    assert!(!window.contains("2.0.1"));
    assert!(!window.contains("0.9"));
}

#[test]
fn test_range_contains_unbounded() {
    let open = get_range("[44.0.0,)").unwrap();
    assert!(open.contains("44"));
    assert!(open.contains("47.1.3"));
    assert!(!open.contains("43.9"));
    assert!(VersionRange::any().contains("anything"));
}

#[test]
fn test_range_contains_never_matches_templates() {
    let window = get_range("[1,)").unwrap();
    assert!(!window.contains("${file.jarVersion}"));
}

#[test]
fn test_range_display() {
    assert_eq!(get_range("[44,)").unwrap().to_string(), "[44,]");
    assert_eq!(get_range("1.2.3").unwrap().to_string(), "1.2.3");
    assert_eq!(VersionRange::any().to_string(), "any");
}
