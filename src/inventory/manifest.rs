// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `META-INF/MANIFEST.MF` reading.
//!
//! Only three keys carry meaning here:
//!
//! ```text
//! Implementation-Version: 5.9.5        -> mod_version (last one wins)
//! Specification-Title: journeymap      -> possible_names
//! Implementation-Title: JourneyMap     -> possible_names
//! ```

use tracing::trace;

/// Entry path of the manifest inside an archive.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

const VERSION_KEY: &str = "Implementation-Version";
const TITLE_KEYS: [&str; 2] = ["Specification-Title", "Implementation-Title"];

/// Values extracted from a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestData {
    pub mod_version: Option<String>,
    pub possible_names: Vec<String>,
}

/// Extracts the version and title fields from manifest text.
#[must_use]
pub fn inspect_manifest(manifest: &str) -> ManifestData {
    let mut data = ManifestData::default();

    for line in manifest.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        if key.starts_with(VERSION_KEY) {
            trace!(version = value, "manifest version");
            data.mod_version = Some(value.to_string());
        }
        if TITLE_KEYS.iter().any(|title| key.starts_with(title)) {
            trace!(title = value, "manifest title");
            data.possible_names.push(value.to_string());
        }
    }

    data
}
