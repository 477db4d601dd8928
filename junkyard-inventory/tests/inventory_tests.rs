use std::{fs, path::Path};

use chrono::Local;
use junkyard_inventory::{File, FilterSettings, Inventory, InventoryError, RunId};

fn entry(root: &Path, run_id: &RunId, name: &str) -> File {
    File::derive(root, run_id, &Path::new("/origin").join(name)).unwrap()
}

#[test]
fn open_missing_inventory_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/history.json");

    let inventory = Inventory::open(&path).unwrap();

    assert!(path.parent().unwrap().exists());
    assert!(inventory.files.is_empty());
    assert_eq!(0, inventory.version);
    assert_eq!(path, inventory.path());
}

#[test]
fn open_empty_file_is_fresh_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "").unwrap();

    let inventory = Inventory::open(&path).unwrap();

    assert!(inventory.files.is_empty());
}

#[test]
fn open_corrupt_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "{\"version\": 1, \"files\": [").unwrap();

    let result = Inventory::open(&path);

    assert!(matches!(result, Err(InventoryError::CorruptStore { .. })));
}

#[test]
fn append_batch_then_open_yields_same_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let run_id = RunId::generate();

    let files = vec![
        entry(dir.path(), &run_id, "a.txt"),
        entry(dir.path(), &run_id, "b.txt"),
    ];

    let mut inventory = Inventory::open(&path).unwrap();
    inventory.append_batch(files.clone()).unwrap();

    let reopened = Inventory::open(&path).unwrap();

    assert_eq!(files, reopened.files);
    assert_eq!(junkyard_inventory::INVENTORY_VERSION, reopened.version);
}

#[test]
fn persisted_form_uses_group_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let run_id = RunId::generate();

    let mut inventory = Inventory::open(&path).unwrap();
    inventory
        .append_batch(vec![entry(dir.path(), &run_id, "a.txt")])
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(1, json["version"]);
    assert_eq!(run_id.as_str(), json["files"][0]["group_id"]);
    assert_eq!("a.txt", json["files"][0]["name"]);
}

#[test]
fn existing_version_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "{\"version\": 3, \"files\": []}").unwrap();

    let mut inventory = Inventory::open(&path).unwrap();
    inventory
        .append_batch(vec![entry(dir.path(), &RunId::generate(), "a.txt")])
        .unwrap();

    let reopened = Inventory::open(&path).unwrap();

    assert_eq!(3, reopened.version);
    assert_eq!(1, reopened.files.len());
}

#[test]
fn missing_primary_is_recovered_from_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let run_id = RunId::generate();

    let mut inventory = Inventory::open(&path).unwrap();
    inventory
        .append_batch(vec![entry(dir.path(), &run_id, "a.txt")])
        .unwrap();
    inventory.backup().unwrap();

    let snapshot = inventory.files.clone();
    fs::remove_file(&path).unwrap();

    let recovered = Inventory::open(&path).unwrap();

    assert_eq!(snapshot, recovered.files);
    assert!(path.exists());
    assert!(!recovered.backup_path().exists());
}

#[test]
fn remove_one_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let run_id = RunId::generate();

    let first = entry(dir.path(), &run_id, "a.txt");
    let second = entry(dir.path(), &run_id, "b.txt");

    let mut inventory = Inventory::open(&path).unwrap();
    inventory
        .append_batch(vec![first.clone(), second.clone()])
        .unwrap();
    inventory.remove_one(&first.id).unwrap();

    let reopened = Inventory::open(&path).unwrap();

    assert_eq!(vec![second], reopened.files);
}

#[test]
fn filter_by_glob_keeps_other_names() {
    let dir = tempfile::tempdir().unwrap();
    let run_id = RunId::generate();

    let mut inventory = Inventory::new(&dir.path().join("history.json"));
    inventory.files = vec![
        entry(dir.path(), &run_id, "a.txt"),
        entry(dir.path(), &run_id, "b.log"),
        entry(dir.path(), &run_id, "c.txt"),
    ];

    let visible = inventory
        .filter(&FilterSettings {
            exclude_globs: vec!["*.txt".to_string()],
            ..Default::default()
        })
        .unwrap();

    let names: Vec<_> = visible.iter().map(|file| file.name.as_str()).collect();

    assert_eq!(vec!["b.log"], names);
    assert_eq!(3, inventory.files.len());
}

#[test]
fn filter_by_size_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let run_id = RunId::generate();

    let mut small = entry(dir.path(), &run_id, "small");
    small.to = dir.path().join("small");
    fs::write(&small.to, vec![0; 100]).unwrap();

    let mut large = entry(dir.path(), &run_id, "large");
    large.to = dir.path().join("large");
    fs::create_dir_all(&large.to).unwrap();
    fs::write(large.to.join("inner"), vec![0; 5000]).unwrap();

    let files = vec![small, large];
    let settings = FilterSettings {
        exclude_size_min: Some("100B".to_string()),
        ..Default::default()
    };
    let filter = junkyard_inventory::Filter::new(&settings).unwrap();
    let names: Vec<_> = filter
        .apply(&files, Local::now())
        .into_iter()
        .map(|file| file.name)
        .collect();

    assert_eq!(vec!["large".to_string()], names);

    let settings = FilterSettings {
        exclude_size_max: Some("5kB".to_string()),
        ..Default::default()
    };
    let filter = junkyard_inventory::Filter::new(&settings).unwrap();
    let names: Vec<_> = filter
        .apply(&files, Local::now())
        .into_iter()
        .map(|file| file.name)
        .collect();

    assert_eq!(vec!["small".to_string()], names);
}
