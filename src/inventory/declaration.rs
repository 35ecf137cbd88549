// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `META-INF/mods.toml` parsing.
//!
//! ```text
//! text --trim--> toml::Table --ok--------------------------> ModsToml
//!                    |                                          ^
//!                    | error span points at a line whose        |
//!                    | basic/literal string never closes        |
//!                    v                                          |
//!         merge_line_into_previous() --> toml::Table (once) ----+
//!                    |
//!                    +-- still failing --> DeclarationError::Syntax
//! ```
//!
//! Exactly one repair pass is made. A file with two broken strings stays
//! broken so malformed input is never masked.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, trace};

use super::Dependency;
use crate::error::RangeError;
use crate::version::VersionRange;

/// Entry path of the loader declaration inside an archive.
pub const DECLARATION_ENTRY: &str = "META-INF/mods.toml";

/// Dependency id naming the game itself.
const GAME_MOD_ID: &str = "minecraft";

/// Deserialized shape of a loader declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModsToml {
    pub mod_loader: String,
    pub loader_version: String,
    pub mods: Vec<ModEntry>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<DependencyEntry>>,
}

/// One `[[mods]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModEntry {
    pub mod_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One `[[dependencies.<modId>]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEntry {
    pub mod_id: String,
    #[serde(default)]
    pub version_range: String,
    #[serde(default)]
    pub mandatory: Option<bool>,
    /// Newer declarations write `type = "required"` instead of `mandatory`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl DependencyEntry {
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.mandatory.unwrap_or_else(|| {
            self.kind
                .as_deref()
                .is_some_and(|kind| kind.eq_ignore_ascii_case("required"))
        })
    }
}

/// Normalized view of one mod declared in a `mods.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMod {
    pub name: String,
    pub full_name: String,
    pub modloader_type: String,
    pub modloader_version_range: VersionRange,
    pub dependencies: BTreeMap<String, Dependency>,
    pub possible_mc_versions: Vec<String>,
    pub possible_mod_versions: Vec<String>,
}

/// Declaration text that could not be turned into a [`ModsToml`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Still not valid TOML after the single repair pass.
    Syntax(String),
    /// Valid TOML missing required keys or carrying wrong types.
    Schema(String),
}

impl std::fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(message) => write!(f, "invalid TOML after repair: {message}"),
            Self::Schema(message) => write!(f, "unexpected declaration layout: {message}"),
        }
    }
}

/// Parses declaration text, applying the one-shot multiline-string repair.
///
/// Returns `Ok(None)` for syntax errors that are not an unterminated string;
/// the caller falls back to a minimal record for those.
///
/// # Errors
///
/// Returns [`DeclarationError::Syntax`] when the repaired text still fails to
/// parse, and [`DeclarationError::Schema`] when required keys are missing.
pub fn parse_declaration(text: &str) -> Result<Option<ModsToml>, DeclarationError> {
    let text = text.trim();

    let table = match text.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            let Some(line) = err
                .span()
                .and_then(|span| unterminated_string_line(text, span.start))
            else {
                debug!(error = %err.message(), "declaration is not valid TOML");
                return Ok(None);
            };

            debug!(line, "repairing line break inside quoted string");
            let repaired = merge_line_into_previous(text, line + 1);
            repaired
                .parse::<toml::Table>()
                .map_err(|err| DeclarationError::Syntax(err.message().to_string()))?
        }
    };

    toml::Value::Table(table)
        .try_into::<ModsToml>()
        .map(Some)
        .map_err(|err| DeclarationError::Schema(err.message().to_string()))
}

/// Finds the line whose quoted string runs into a line break.
///
/// The parser's span may point at the string's opening quote, the offending
/// break, or the start of the following line, so the span's own line and the
/// one before it are both checked.
fn unterminated_string_line(text: &str, offset: usize) -> Option<usize> {
    let offset = offset.min(text.len());
    let span_line = text.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    let lines: Vec<&str> = text.lines().collect();

    (span_line.saturating_sub(1)..=span_line)
        .filter(|&index| index + 1 < lines.len())
        .find(|&index| has_unterminated_string(lines[index]))
}

/// Returns true if a single-line basic or literal string never closes.
fn has_unterminated_string(line: &str) -> bool {
    if line.contains("\"\"\"") || line.contains("'''") {
        return false;
    }

    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
        match quote {
            None => match c {
                '"' | '\'' => quote = Some(c),
                '#' => return false,
                _ => {}
            },
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(open) if c == open => quote = None,
            Some(_) => {}
        }
    }
    quote.is_some()
}

/// Joins line `line_index` (0-based) onto the previous line with one space.
///
/// Lines are re-joined with `\n`. Index 0 or an index past the end leaves the
/// text's lines unchanged.
#[must_use]
pub fn merge_line_into_previous(text: &str, line_index: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match lines.last_mut() {
            Some(previous) if index == line_index => {
                let trimmed_len = previous.trim_end().len();
                previous.truncate(trimmed_len);
                previous.push(' ');
                previous.push_str(line);
            }
            _ => lines.push(line.to_string()),
        }
    }
    lines.join("\n")
}

/// Normalizes every mod declared in the file.
///
/// The loader family and loader version range are shared by all mods.
///
/// # Errors
///
/// Returns a [`RangeError`] if the loader range or any dependency range is
/// malformed.
pub fn inspect_mods_toml(declaration: &ModsToml) -> Result<Vec<DeclaredMod>, RangeError> {
    let modloader_version_range = VersionRange::parse(&declaration.loader_version)?;

    declaration
        .mods
        .iter()
        .map(|entry| -> Result<DeclaredMod, RangeError> {
            let mut dependencies = BTreeMap::new();
            let mut possible_mc_versions = Vec::new();

            for dependency in declaration
                .dependencies
                .get(&entry.mod_id)
                .map(Vec::as_slice)
                .unwrap_or_default()
            {
                if dependency.mod_id == GAME_MOD_ID {
                    possible_mc_versions.push(dependency.version_range.clone());
                }
                trace!(
                    mod_id = %entry.mod_id,
                    dependency = %dependency.mod_id,
                    range = %dependency.version_range,
                    "declared dependency"
                );
                dependencies.insert(
                    dependency.mod_id.clone(),
                    Dependency {
                        mod_id: dependency.mod_id.clone(),
                        version_range: VersionRange::parse(&dependency.version_range)?,
                        mandatory: dependency.is_mandatory(),
                    },
                );
            }

            Ok(DeclaredMod {
                name: entry.mod_id.clone(),
                full_name: entry.display_name.clone().unwrap_or_default(),
                modloader_type: declaration.mod_loader.clone(),
                modloader_version_range: modloader_version_range.clone(),
                dependencies,
                possible_mc_versions,
                possible_mod_versions: entry.version.iter().cloned().collect(),
            })
        })
        .collect()
}
