//! Shared test helpers for CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file or directory.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

fn copy_dir(from: &Path, to: &Path) {
  fs::create_dir_all(to).unwrap();
  for entry in fs::read_dir(from).unwrap() {
    let entry = entry.unwrap();
    let target = to.join(entry.file_name());
    if entry.file_type().unwrap().is_dir() {
      copy_dir(&entry.path(), &target);
    } else {
      fs::copy(entry.path(), &target).unwrap();
    }
  }
}

/// Isolated test environment.
///
/// Each test gets its own copy of the fixture data directory, so tests may
/// add or break files freely.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create from the fixture data directory.
  pub fn from_fixture() -> Self {
    let temp = TempDir::new().unwrap();
    copy_dir(&fixture_path("data"), &temp.path().join("data"));
    Self { temp }
  }

  /// Create an environment whose data directory does not exist.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the data directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.data_path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn data_path(&self) -> PathBuf {
    let p = self.temp.path().join("data");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Get a pre-configured Command for the depmap binary.
  ///
  /// Points `DEPMAP_DATA_DIR` at the isolated data directory and clears
  /// `RUST_LOG` so log output does not leak into assertions.
  pub fn depmap_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("depmap");
    cmd.env("DEPMAP_DATA_DIR", self.data_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
