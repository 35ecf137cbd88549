// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Matching a save's mod list against the inventory.
//!
//! ```text
//! WorldData.mod_list (in order)
//!   skip platform names (minecraft, forge)
//!   find_mod(name, exact version) --found--> available (Required)
//!        |                                     |
//!        | not found                           | declared dependencies, minus:
//!        v                                     |   platform names
//!   unavailable (Required)                     |   optional ones (if configured)
//!                                              |   ones the list already satisfies
//!                                              v
//!                  collected dependencies (one per name and range)
//!   find_dependency(name, range) --found--> available (Dependency)
//!        | not found
//!        v
//!   unavailable (Dependency)
//! ```
//!
//! One expansion pass only: dependencies of dependencies are not collected.
//! Every entry borrows from the world data or the inventory; nothing is copied.


use std::collections::HashSet;
use std::fmt;

use bon::Builder;
use tracing::{debug, info, warn};

use crate::inventory::{Dependency, Mod, ModLoader};
use crate::world::{EngineInfo, WorldMod};

/// Names never distributed as ordinary mod archives.
pub const DEFAULT_PLATFORM_MODS: [&str; 2] = ["minecraft", "forge"];

/// Knobs for [`Resolver`].
#[derive(Debug, Clone, Builder)]
pub struct ResolveOptions {
    /// Names skipped both as requirements and as dependencies
    #[builder(setters(name = with_platform_mods), default = Vec::from(DEFAULT_PLATFORM_MODS.map(String::from)))]
    platform_mods: Vec<String>,
    /// Resolve dependencies not marked mandatory
    #[builder(setters(name = with_optional_dependencies), default = true)]
    optional_dependencies: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ResolveOptions {
    #[must_use]
    pub fn platform_mods(&self) -> &[String] {
        &self.platform_mods
    }

    #[must_use]
    pub const fn optional_dependencies(&self) -> bool {
        self.optional_dependencies
    }
}

/// Why a mod ended up in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin<'a> {
    /// Listed by the save.
    Required,
    /// Declared as a dependency by the named mod.
    Dependency { of: &'a str },
}

/// A requirement satisfied by an inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Available<'a> {
    pub record: &'a Mod,
    /// The version that matched.
    pub version: &'a str,
    pub origin: Origin<'a>,
}

impl fmt::Display for Available<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.record, self.version)?;
        if let Origin::Dependency { of } = self.origin {
            write!(f, " [dependency of {of}]")?;
        }
        Ok(())
    }
}

/// A requirement nothing in the inventory satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing<'a> {
    Required(&'a WorldMod),
    Dependency {
        of: &'a Mod,
        dependency: &'a Dependency,
    },
}

impl Missing<'_> {
    /// Name of the missing mod.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Required(required) => &required.name,
            Self::Dependency { dependency, .. } => &dependency.mod_id,
        }
    }
}

impl fmt::Display for Missing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(required) => {
                write!(f, "{} {}", required.name, required.version)?;
                if required.is_weird() {
                    write!(f, " (unexpanded version template)")?;
                }
                Ok(())
            }
            Self::Dependency { of, dependency } => write!(
                f,
                "{} {} [dependency of {}]",
                dependency.mod_id, dependency.version_range, of.name
            ),
        }
    }
}

/// Outcome of [`Resolver::locate_mods`], both lists in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub available: Vec<Available<'a>>,
    pub unavailable: Vec<Missing<'a>>,
}

impl Resolution<'_> {
    /// True if every requirement was satisfied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unavailable.is_empty()
    }
}

/// First record named `name` (case-insensitive) that lists `version` verbatim.
#[must_use]
pub fn find_mod<'a>(name: &str, version: &str, mods: &'a [Mod]) -> Option<&'a Mod> {
    mods.iter()
        .find(|record| record.matches_name(name) && record.has_version(version))
}

/// First record named like the dependency with any version inside its range.
///
/// Returns the record and the version that fell inside the range.
#[must_use]
pub fn find_dependency<'a>(dependency: &Dependency, mods: &'a [Mod]) -> Option<(&'a Mod, &'a str)> {
    mods.iter()
        .filter(|record| record.matches_name(&dependency.mod_id))
        .find_map(|record| {
            record
                .possible_mod_versions
                .iter()
                .find(|version| dependency.version_range.contains(version))
                .map(|version| (record, version.as_str()))
        })
}

/// True if the save itself lists the dependency at a version inside its range.
#[must_use]
pub fn is_dependency_already_listed(required: &[WorldMod], dependency: &Dependency) -> bool {
    required.iter().any(|entry| {
        entry.name.eq_ignore_ascii_case(&dependency.mod_id)
            && dependency.version_range.contains(&entry.version)
    })
}

/// Partitions a save's requirements into available and unavailable mods.
#[derive(Debug, Clone)]
pub struct Resolver {
    platform_mods: Vec<String>,
    optional_dependencies: bool,
}

impl Resolver {
    #[must_use]
    pub fn new(options: &ResolveOptions) -> Self {
        Self {
            platform_mods: options.platform_mods().to_vec(),
            optional_dependencies: options.optional_dependencies(),
        }
    }

    fn is_platform(&self, name: &str) -> bool {
        self.platform_mods
            .iter()
            .any(|platform| platform.eq_ignore_ascii_case(name))
    }

    fn wants(&self, dependency: &Dependency) -> bool {
        !self.is_platform(&dependency.mod_id)
            && (dependency.mandatory || self.optional_dependencies)
    }

    /// Resolves `required` against `mods`.
    ///
    /// Requirements are visited in order, then collected dependencies in
    /// collection order. A name declared with two different ranges is checked
    /// once per range. Within a name the first qualifying record wins, so the
    /// result follows inventory order.
    #[must_use]
    pub fn locate_mods<'a>(&self, required: &'a [WorldMod], mods: &'a [Mod]) -> Resolution<'a> {
        let mut resolution = Resolution::default();
        let mut collected: Vec<(&'a Mod, &'a Dependency)> = Vec::new();
        let mut seen = HashSet::new();

        for entry in required.iter().filter(|entry| !self.is_platform(&entry.name)) {
            let Some(record) = find_mod(&entry.name, &entry.version, mods) else {
                if entry.is_weird() {
                    warn!(
                        name = %entry.name,
                        version = %entry.version,
                        "required version looks like an unexpanded template"
                    );
                }
                debug!(name = %entry.name, version = %entry.version, "not in inventory");
                resolution.unavailable.push(Missing::Required(entry));
                continue;
            };

            debug!(name = %entry.name, version = %entry.version, "found");
            resolution.available.push(Available {
                record,
                version: &entry.version,
                origin: Origin::Required,
            });

            for dependency in record.dependencies.values() {
                if self.wants(dependency)
                    && !is_dependency_already_listed(required, dependency)
                    && seen.insert((
                        dependency.mod_id.to_ascii_lowercase(),
                        &dependency.version_range,
                    ))
                {
                    collected.push((record, dependency));
                }
            }
        }

        for (owner, dependency) in collected {
            match find_dependency(dependency, mods) {
                Some((record, version)) => {
                    debug!(name = %dependency.mod_id, version, of = %owner.name, "dependency found");
                    resolution.available.push(Available {
                        record,
                        version,
                        origin: Origin::Dependency { of: &owner.name },
                    });
                }
                None => {
                    debug!(name = %dependency.mod_id, of = %owner.name, "dependency not in inventory");
                    resolution
                        .unavailable
                        .push(Missing::Dependency { of: owner, dependency });
                }
            }
        }

        info!(
            available = resolution.available.len(),
            unavailable = resolution.unavailable.len(),
            "mods located"
        );
        resolution
    }
}

/// The loader a bundle should ship with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderChoice<'a> {
    /// An inventory loader matching the save exactly.
    Local(&'a ModLoader),
    /// What the save asks for; `path` is always `None`.
    Recommended(ModLoader),
}

impl LoaderChoice<'_> {
    #[must_use]
    pub fn loader(&self) -> &ModLoader {
        match self {
            Self::Local(loader) => loader,
            Self::Recommended(loader) => loader,
        }
    }

    /// True if an archive is available to copy.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for LoaderChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.loader(), f)
    }
}

/// Picks the inventory loader whose family and version match the save exactly.
///
/// Falls back to a recommendation built from the engine info; a loader of the
/// right family but another version is never substituted.
#[must_use]
pub fn pick_modloader<'a>(engine: &EngineInfo, loaders: &'a [ModLoader]) -> LoaderChoice<'a> {
    let family = engine.mod_type.clone().unwrap_or_default();
    let version = engine.mod_version_name.clone().unwrap_or_default();

    if let Some(loader) = loaders
        .iter()
        .find(|loader| loader.family == family && loader.version == version)
    {
        debug!(%loader, "loader available");
        return LoaderChoice::Local(loader);
    }

    let recommended = ModLoader {
        name: family.clone(),
        family,
        version,
        base_mc_version: engine.mc_version_name.clone().unwrap_or_default(),
        path: None,
    };
    info!(loader = %recommended, "no matching loader archive");
    LoaderChoice::Recommended(recommended)
}
