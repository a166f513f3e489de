use std::path::PathBuf;

use crate::consts::{APP_NAME, DATA_DIR_ENV};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the default directory holding mappings, projects and hosts
#[cfg(windows)]
pub fn default_data_dir() -> PathBuf {
  std::env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."))
    .join(APP_NAME)
}

/// Returns the default directory holding mappings, projects and hosts
#[cfg(not(windows))]
pub fn default_data_dir() -> PathBuf {
  let data_home = std::env::var_os("XDG_DATA_HOME")
    .map(PathBuf::from)
    .or_else(|| home_dir().map(|home| home.join(".local").join("share")))
    .unwrap_or_else(|| PathBuf::from("."));
  data_home.join(APP_NAME)
}

/// Returns the data directory, honoring the `DEPMAP_DATA_DIR` override
pub fn data_dir() -> PathBuf {
  match std::env::var_os(DATA_DIR_ENV) {
    Some(dir) if !dir.is_empty() => PathBuf::from(dir),
    _ => default_data_dir(),
  }
}
