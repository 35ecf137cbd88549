// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end tests: archive store on disk, crawl, resolve, bundle.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use mcbundle::bundle::{BundleRequest, MODS_DIR, NOTES_FILE, make_bundle};
use mcbundle::error::BundleError;
use mcbundle::inventory::Inventory;
use mcbundle::inventory::crawl::{CrawlOptions, crawl_inventory};
use mcbundle::world::{JsonWorldProvider, WorldData, WorldDataProvider};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const MOD_A_DECLARATION: &str = r#"
modLoader="javafml"
loaderVersion="[45,)"
license="MIT"

[[mods]]
modId="modA"
version="1.0"
displayName="Mod A"

[[dependencies.modA]]
modId="forge"
mandatory=true
versionRange="[45,)"

[[dependencies.modA]]
modId="modC"
mandatory=true
versionRange="[1,2]"
"#;

const MOD_C_DECLARATION: &str = r#"
modLoader="javafml"
loaderVersion="[45,)"
license="MIT"

[[mods]]
modId="modC"
version="1.5"
displayName="Mod C"
"#;

fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Lays out a store with three mods and one loader installer.
fn populate_store(store: &Path) {
    write_archive(
        &store.join("a/modA.jar"),
        &[
            ("META-INF/MANIFEST.MF", "Implementation-Version: 1.0\n"),
            ("META-INF/mods.toml", MOD_A_DECLARATION),
        ],
    );
    write_archive(
        &store.join("b/modB.jar"),
        &[(
            "META-INF/MANIFEST.MF",
            "Implementation-Title: modB\nImplementation-Version: 2.0\n",
        )],
    );
    write_archive(
        &store.join("c/modC.jar"),
        &[("META-INF/mods.toml", MOD_C_DECLARATION)],
    );
    write_archive(
        &store.join("loaders/forge-1.19.4-45.0.43-installer.jar"),
        &[
            (
                "META-INF/MANIFEST.MF",
                "Main-Class: net.minecraftforge.installer.SimpleInstaller\n",
            ),
            (
                "install_profile.json",
                r#"{"profile":"forge","version":"1.19.4-forge-45.0.43"}"#,
            ),
            (
                "version.json",
                r#"{"id":"1.19.4-forge-45.0.43","inheritsFrom":"1.19.4"}"#,
            ),
        ],
    );
}

fn write_world(dir: &Path, loader_version: &str, mods: &[(&str, &str)]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let mod_list = mods
        .iter()
        .map(|(name, version)| format!(r#"{{"name":"{name}","version":"{version}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    std::fs::write(
        dir.join("world.json"),
        format!(
            r#"{{
  "world_name": "Alpha",
  "engine_info": {{
    "mod_type": "forge",
    "mod_version_name": "{loader_version}",
    "mc_version_name": "1.19.4",
    "mc_data_version": 3337
  }},
  "mod_list": [{mod_list}]
}}"#
        ),
    )
    .unwrap();
    dir.to_path_buf()
}

fn crawl(store: &Path, threads: usize) -> Inventory {
    let options = CrawlOptions::builder().with_threads(threads).build();
    let (inventory, stats) = crawl_inventory(store, &store.join("loaders"), &options).unwrap();
    assert_eq!(stats.failures, 0);
    inventory
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn bundle_world_from_store() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("store");
    populate_store(&store);
    let inventory = crawl(&store, 0);

    let save = write_world(
        &temp.path().join("saves/Alpha"),
        "45.0.43",
        &[
            ("minecraft", "1.19.4"),
            ("forge", "45.0.43"),
            ("modA", "1.0"),
            ("modB", "2.0"),
        ],
    );
    let world = JsonWorldProvider.load(&save).unwrap();

    let request = BundleRequest::builder()
        .with_world(&world)
        .with_inventory(&inventory)
        .with_bundles_root(temp.path().join("bundles"))
        .with_bundle_name(world.world_name.clone())
        .build();
    let outcome = make_bundle(&request).unwrap();

    assert!(outcome.loader_copied);
    assert_eq!(outcome.mods_missing, 0);
    assert_eq!(
        names(&outcome.path),
        ["forge-1.19.4-45.0.43-installer.jar", MODS_DIR, NOTES_FILE]
    );
    assert_eq!(
        names(&outcome.path.join(MODS_DIR)),
        ["modA.jar", "modB.jar", "modC.jar"]
    );

    let notes = std::fs::read_to_string(outcome.path.join(NOTES_FILE)).unwrap();
    insta::assert_snapshot!(notes, @r#"
    world: Alpha
    loader added: forge 45.0.43 for minecraft 1.19.4 (forge-1.19.4-45.0.43-installer.jar)
    mods_missing:
    mods_included:
    - modA "Mod A" (modA.jar) 1.0
    - modB (modB.jar) 2.0
    - modC "Mod C" (modC.jar) 1.5 [dependency of modA]
    "#);
}

#[test]
fn parallel_crawl_bundles_identically() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("store");
    populate_store(&store);
    let save = write_world(
        &temp.path().join("saves/Alpha"),
        "45.0.40",
        &[("modA", "1.0"), ("modB", "3.0")],
    );
    let world = JsonWorldProvider.load(&save).unwrap();

    let mut notes = Vec::new();
    for (threads, bundle) in [(0, "sequential"), (4, "parallel")] {
        let inventory = crawl(&store, threads);
        let request = BundleRequest::builder()
            .with_world(&world)
            .with_inventory(&inventory)
            .with_bundles_root(temp.path().join("bundles"))
            .with_bundle_name(bundle)
            .build();
        let outcome = make_bundle(&request).unwrap();
        assert!(!outcome.loader_copied);
        assert_eq!(outcome.mods_missing, 1);
        notes.push(std::fs::read_to_string(outcome.path.join(NOTES_FILE)).unwrap());
    }

    assert_eq!(notes[0], notes[1]);
    insta::assert_snapshot!(notes[0], @r#"
    world: Alpha
    loader needed: forge 45.0.40 for minecraft 1.19.4 [forge]
    mods_missing:
    - modB 3.0
    mods_included:
    - modA "Mod A" (modA.jar) 1.0
    - modC "Mod C" (modC.jar) 1.5 [dependency of modA]
    "#);
}

#[test]
fn rebuild_requires_rewrite() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("store");
    populate_store(&store);
    let inventory = crawl(&store, 0);
    let bundles = temp.path().join("bundles");

    let first = JsonWorldProvider
        .load(&write_world(&temp.path().join("one"), "45.0.43", &[("modA", "1.0")]))
        .unwrap();
    let second = JsonWorldProvider
        .load(&write_world(&temp.path().join("two"), "45.0.43", &[("modB", "2.0")]))
        .unwrap();

    let build = |world: &WorldData, rewrite: bool| {
        make_bundle(
            &BundleRequest::builder()
                .with_world(world)
                .with_inventory(&inventory)
                .with_bundles_root(bundles.clone())
                .with_bundle_name("Alpha")
                .with_rewrite_existing(rewrite)
                .build(),
        )
    };

    build(&first, false).unwrap();
    let err = build(&second, false).unwrap_err();
    assert!(matches!(err, BundleError::AlreadyExists { .. }));

    let outcome = build(&second, true).unwrap();
    assert_eq!(names(&outcome.path.join(MODS_DIR)), ["modB.jar"]);
    let notes = std::fs::read_to_string(outcome.path.join(NOTES_FILE)).unwrap();
    assert!(notes.contains("- modB (modB.jar) 2.0\n"));
    assert!(!notes.contains("modA"));
    assert_eq!(names(&bundles), ["Alpha"]);
}
