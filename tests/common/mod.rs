#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENTITIES: &str = "entities.csv";
pub const REGISTRIES: &str = "registries.csv";
pub const TYPES_FILE: &str = "Entity Types-Grid view.csv";
pub const SUBTYPES_FILE: &str = "Entity sub-type-Grid view.csv";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A scratch working directory holding copies of the named fixtures.
pub fn workspace(fixtures: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    for name in fixtures {
        std::fs::copy(fixture(name), temp_dir.path().join(name)).expect("copy fixture");
    }
    temp_dir
}

pub fn all_fixtures() -> Vec<&'static str> {
    vec![ENTITIES, REGISTRIES, TYPES_FILE, SUBTYPES_FILE]
}

pub fn position(text: &str, needle: &str) -> usize {
    text.find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, text))
}
