// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{
    BundleRequest, MODS_DIR, NOTES_FILE, add_modloader, add_mods, ensure_bundle_directory,
    make_bundle, render_notes,
};
use crate::error::BundleError;
use crate::inventory::{Dependency, Inventory, Mod, ModLoader};
use crate::resolve::{Available, LoaderChoice, Origin, ResolveOptions, Resolver};
use crate::version::VersionRange;
use crate::world::{EngineInfo, WorldData, WorldMod};

fn archive(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(&path, name).unwrap();
    path
}

fn record(path: Option<PathBuf>, name: &str, version: &str) -> Mod {
    Mod::minimal(path, vec![name.to_string()], vec![version.to_string()])
}

struct Fixture {
    temp: TempDir,
    inventory: Inventory,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join("store");

        let mut mod_a = record(Some(archive(&store, "modA.jar")), "modA", "1.0");
        mod_a.dependencies.insert(
            "modC".to_string(),
            Dependency {
                mod_id: "modC".to_string(),
                version_range: VersionRange::parse("[1,2]").unwrap(),
                mandatory: true,
            },
        );
        let mods = vec![
            mod_a,
            record(Some(archive(&store, "modB.jar")), "modB", "2.0"),
            record(Some(archive(&store, "modC.jar")), "modC", "1.5"),
        ];
        let loaders = vec![ModLoader {
            name: "1.19.4-forge-45.0.43".to_string(),
            family: "forge".to_string(),
            version: "45.0.43".to_string(),
            base_mc_version: "1.19.4".to_string(),
            path: Some(archive(&store, "forge-installer.jar")),
        }];

        Self {
            temp,
            inventory: Inventory::new(mods, loaders),
        }
    }

    fn bundles(&self) -> PathBuf {
        self.temp.path().join("bundles")
    }
}

fn world(required: &[(&str, &str)], loader_version: &str) -> WorldData {
    WorldData {
        world_name: "Alpha".to_string(),
        engine_info: EngineInfo {
            mod_type: Some("forge".to_string()),
            mod_version_name: Some(loader_version.to_string()),
            mc_version_name: Some("1.19.4".to_string()),
            ..EngineInfo::default()
        },
        mod_list: required
            .iter()
            .map(|(name, version)| WorldMod::new(*name, *version))
            .collect(),
    }
}

fn request<'a>(fixture: &'a Fixture, world: &'a WorldData, rewrite: bool) -> BundleRequest<'a> {
    BundleRequest::builder()
        .with_world(world)
        .with_inventory(&fixture.inventory)
        .with_bundles_root(fixture.bundles())
        .with_bundle_name("Alpha")
        .with_rewrite_existing(rewrite)
        .build()
}

fn sorted_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_ensure_bundle_directory_refuses_existing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("bundles");

    let dir = ensure_bundle_directory(&root, "one", false).unwrap();
    assert!(dir.is_dir());
    std::fs::write(dir.join("stale.txt"), "").unwrap();

    let err = ensure_bundle_directory(&root, "one", false).unwrap_err();
    assert!(matches!(err, BundleError::AlreadyExists { .. }));

    let dir = ensure_bundle_directory(&root, "one", true).unwrap();
    assert!(sorted_entries(&dir).is_empty());
}

#[test]
fn test_bundle_names_must_be_single_components() {
    let temp = TempDir::new().unwrap();
    for name in ["", "..", ".", "a/b", "a\\b"] {
        let err = ensure_bundle_directory(temp.path(), name, true).unwrap_err();
        assert!(
            matches!(err, BundleError::InvalidName { .. }),
            "name: {name:?}"
        );
    }
}

#[test]
fn test_add_mods_skips_pathless_and_duplicates() {
    let temp = TempDir::new().unwrap();
    let shared = archive(&temp.path().join("store"), "pack.jar");
    let core = record(Some(shared.clone()), "core", "1");
    let addon = record(Some(shared), "addon", "1");
    let synthetic = record(None, "ghost", "1");
    let available: Vec<Available<'_>> = [&core, &addon, &synthetic]
        .into_iter()
        .map(|record| Available {
            record,
            version: "1",
            origin: Origin::Required,
        })
        .collect();

    let bundle = ensure_bundle_directory(&temp.path().join("bundles"), "b", false).unwrap();
    let copied = add_mods(&bundle, &available).unwrap();

    assert_eq!(copied, 1);
    assert_eq!(sorted_entries(&bundle.join(MODS_DIR)), ["pack.jar"]);
}

#[test]
fn test_add_mods_rejects_same_file_name_from_two_dirs() {
    let temp = TempDir::new().unwrap();
    let first = archive(&temp.path().join("store/a"), "lib.jar");
    let second = archive(&temp.path().join("store/b"), "lib.jar");
    let lib_one = record(Some(first.clone()), "lib", "1");
    let lib_two = record(Some(second.clone()), "lib", "2");
    let available: Vec<Available<'_>> = [&lib_one, &lib_two]
        .into_iter()
        .map(|record| Available {
            record,
            version: "1",
            origin: Origin::Required,
        })
        .collect();

    let bundle = ensure_bundle_directory(&temp.path().join("bundles"), "b", false).unwrap();
    let err = add_mods(&bundle, &available).unwrap_err();

    match err {
        BundleError::FileNameClash {
            file_name,
            first: clash_first,
            second: clash_second,
        } => {
            assert_eq!(file_name, "lib.jar");
            assert_eq!(clash_first, first);
            assert_eq!(clash_second, second);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_add_modloader_copies_only_local() {
    let fixture = Fixture::new();
    let bundle = ensure_bundle_directory(&fixture.bundles(), "b", false).unwrap();

    let recommended = LoaderChoice::Recommended(ModLoader {
        path: None,
        ..fixture.inventory.loaders[0].clone()
    });
    let returned = add_modloader(&bundle, recommended.clone()).unwrap();
    assert_eq!(returned, recommended);
    assert!(sorted_entries(&bundle).is_empty());

    add_modloader(&bundle, LoaderChoice::Local(&fixture.inventory.loaders[0])).unwrap();
    assert_eq!(sorted_entries(&bundle), ["forge-installer.jar"]);
}

#[test]
fn test_render_notes() {
    let fixture = Fixture::new();
    let world = world(
        &[("minecraft", "1.19.4"), ("forge", "45.0.40"), ("modA", "1.0"), ("modX", "@V@")],
        "45.0.40",
    );
    let resolution = Resolver::new(&ResolveOptions::default())
        .locate_mods(&world.mod_list, &fixture.inventory.mods);
    let choice = crate::resolve::pick_modloader(&world.engine_info, &fixture.inventory.loaders);

    insta::assert_snapshot!(render_notes(&world.world_name, &resolution, &choice), @r"
    world: Alpha
    loader needed: forge 45.0.40 for minecraft 1.19.4 [forge]
    mods_missing:
    - modX @V@ (unexpanded version template)
    mods_included:
    - modA (modA.jar) 1.0
    - modC (modC.jar) 1.5 [dependency of modA]
    ");
}

#[test]
fn test_make_bundle_layout() {
    let fixture = Fixture::new();
    let world = world(
        &[("minecraft", "1.19.4"), ("forge", "45.0.43"), ("modA", "1.0"), ("modB", "2.0")],
        "45.0.43",
    );

    let outcome = make_bundle(&request(&fixture, &world, false)).unwrap();

    assert_eq!(outcome.path, fixture.bundles().join("Alpha"));
    assert_eq!(outcome.mods_copied, 3);
    assert_eq!(outcome.mods_missing, 0);
    assert!(outcome.loader_copied);
    assert_eq!(
        sorted_entries(&outcome.path),
        ["forge-installer.jar", MODS_DIR, NOTES_FILE]
    );
    assert_eq!(
        sorted_entries(&outcome.path.join(MODS_DIR)),
        ["modA.jar", "modB.jar", "modC.jar"]
    );
    let notes = std::fs::read_to_string(outcome.path.join(NOTES_FILE)).unwrap();
    assert!(notes.starts_with("world: Alpha\nloader added: forge 45.0.43"));
    assert_eq!(sorted_entries(&fixture.bundles()), ["Alpha"]);
}

#[test]
fn test_make_bundle_twice_requires_rewrite() {
    let fixture = Fixture::new();
    let first = world(&[("modA", "1.0"), ("modB", "2.0")], "45.0.43");
    make_bundle(&request(&fixture, &first, false)).unwrap();

    let second = world(&[("modB", "2.0"), ("modQ", "9")], "45.0.43");
    let err = make_bundle(&request(&fixture, &second, false)).unwrap_err();
    assert!(matches!(err, BundleError::AlreadyExists { .. }));
    insta::assert_snapshot!(
        err.to_string().replace(&fixture.bundles().display().to_string(), "<bundles>"),
        @"bundle directory already exists: <bundles>/Alpha"
    );

    let outcome = make_bundle(&request(&fixture, &second, true)).unwrap();
    let notes = std::fs::read_to_string(outcome.path.join(NOTES_FILE)).unwrap();
    assert!(notes.contains("- modQ 9\n"));
    assert!(!notes.contains("modA"));
    assert_eq!(sorted_entries(&outcome.path.join(MODS_DIR)), ["modB.jar"]);
    assert_eq!(sorted_entries(&fixture.bundles()), ["Alpha"]);
}

#[test]
fn test_make_bundle_failure_leaves_nothing_behind() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.temp.path().join("store/modB.jar")).unwrap();
    let world = world(&[("modA", "1.0"), ("modB", "2.0")], "45.0.43");

    let err = make_bundle(&request(&fixture, &world, false)).unwrap_err();

    assert!(matches!(err, BundleError::Fs(_)));
    assert!(sorted_entries(&fixture.bundles()).is_empty());
}
