// crates/flow-terminal/tests/settings_store.rs
use std::fs;

use flow_core::catalog::default_selection;
use flow_core::{FilterOption, FilterSelection, Timezone};
use flow_terminal::settings::{SettingsError, SettingsStore, FILTERS_KEY, TIMEZONE_KEY};
use tempfile::tempdir;

#[test]
fn missing_file_opens_empty() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
    assert_eq!(store.get(FILTERS_KEY), None);
    assert_eq!(store.load_filters(), None);
    assert_eq!(store.load_timezone(), None);
}

#[test]
fn values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut selection = FilterSelection::new();
    selection.push("Option Type", FilterOption::new("cp", "put"));
    selection.push("Premium", FilterOption::new("pre_value", "100000"));

    {
        let mut store = SettingsStore::open(&path).unwrap();
        store.save_filters(&selection).unwrap();
        store.save_timezone(Timezone::Pst).unwrap();
    }

    let store = SettingsStore::open(&path).unwrap();
    assert_eq!(store.load_filters(), Some(selection));
    assert_eq!(store.load_timezone(), Some(Timezone::Pst));
    assert_eq!(store.get(TIMEZONE_KEY), Some("PST"));

    // No temp file is left behind.
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);
}

#[test]
fn filters_are_stored_as_a_json_string() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut store = SettingsStore::open(&path).unwrap();
    store.save_filters(&default_selection()).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let inner = raw[FILTERS_KEY].as_str().expect("filters stored as a string");
    let decoded: serde_json::Value = serde_json::from_str(inner).unwrap();
    assert_eq!(decoded["Option Type"][0]["name"], "cp");
    assert_eq!(decoded["Option Type"][0]["value"], "call");
}

#[test]
fn clear_filters_removes_the_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = SettingsStore::open(&path).unwrap();
    store.save_filters(&default_selection()).unwrap();
    store.save_timezone(Timezone::Utc).unwrap();
    store.clear_filters().unwrap();

    let store = SettingsStore::open(&path).unwrap();
    assert_eq!(store.load_filters(), None);
    assert_eq!(store.load_timezone(), Some(Timezone::Utc));
}

#[test]
fn unreadable_values_are_treated_as_absent() {
    let mut store = SettingsStore::in_memory();
    store.set(FILTERS_KEY, "{not json").unwrap();
    store.set(TIMEZONE_KEY, "HST").unwrap();

    assert_eq!(store.load_filters(), None);
    assert_eq!(store.load_timezone(), None);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json at all").unwrap();

    let err = SettingsStore::open(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Json { .. }));
}

#[test]
fn in_memory_store_never_writes() {
    let mut store = SettingsStore::in_memory();
    store.save_timezone(Timezone::Cst).unwrap();
    assert_eq!(store.path(), None);
    assert_eq!(store.load_timezone(), Some(Timezone::Cst));
}
