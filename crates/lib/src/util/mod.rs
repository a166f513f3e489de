//! Shared utilities.
//!
//! Directory scanning for the YAML data files and test helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};


/// List the `*.yml` files directly inside `dir`, keyed by file stem.
///
/// Entries are sorted by name so that loading is deterministic regardless of
/// directory iteration order. Subdirectories and other extensions are
/// ignored.
pub fn yaml_files(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
  let mut files = Vec::new();

  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("yml") {
      continue;
    }
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
      files.push((stem.to_string(), path));
    }
  }

  files.sort();
  Ok(files)
}
