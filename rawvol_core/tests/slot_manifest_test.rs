//! Loading slot manifests from disk and preparing their slots.

use rawvol_core::config::SlotManifest;
use rawvol_core::registry::Registry;
use rawvol_core::{InterfaceError, ManifestError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_toml_and_prepare() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slots.toml");
    fs::write(
        &path,
        r#"
[[slots]]
snap = "pc"
name = "data"
interface = "raw-volume"
attrs = { path = "/dev/nvme0n1p3" }

[[slots]]
snap = "pc"
name = "whole-disk"
interface = "raw-volume"
attrs = { path = "/dev/nvme0n1" }
"#,
    )
    .unwrap();

    let manifest = SlotManifest::load_from_file(&path).unwrap();
    let registry = Registry::with_builtins();
    let results: Vec<_> = manifest
        .slots
        .iter()
        .map(|s| registry.prepare_slot(&s.to_slot_info()))
        .collect();

    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(InterfaceError::InvalidDevicePath { .. })
    ));
}

#[test]
fn test_load_json_with_wrong_attr_type() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slots.json");
    fs::write(
        &path,
        r#"{"slots": [{"snap": "pc", "name": "data", "interface": "raw-volume", "attrs": {"path": ["/dev/sda1"]}}]}"#,
    )
    .unwrap();

    let manifest = SlotManifest::load_from_file(&path).unwrap();
    let err = Registry::with_builtins()
        .prepare_slot(&manifest.slots[0].to_slot_info())
        .unwrap_err();
    assert_eq!(err.kind(), "missing-attribute");
}

#[test]
fn test_load_errors() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        SlotManifest::load_from_file(&missing),
        Err(ManifestError::Io { .. })
    ));

    let yaml = dir.path().join("slots.yaml");
    fs::write(&yaml, "slots: []").unwrap();
    assert!(matches!(
        SlotManifest::load_from_file(&yaml),
        Err(ManifestError::UnsupportedFormat { .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{").unwrap();
    assert!(matches!(
        SlotManifest::load_from_file(&broken),
        Err(ManifestError::Json { .. })
    ));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[[slots]\n").unwrap();
    assert!(matches!(
        SlotManifest::load_from_file(&broken),
        Err(ManifestError::Toml { .. })
    ));
}

#[test]
fn test_empty_manifest_is_valid() {
    let manifest = SlotManifest::from_toml("").unwrap();
    assert!(manifest.slots.is_empty());
}
