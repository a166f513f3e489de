//! Host inventory.
//!
//! Hosts are described by one YAML facts file each, stored as
//! `<data_dir>/hosts/<host>.yml`. The inventory is loaded once and is
//! read-only afterwards.

mod facts;

pub use facts::{Containers, HostFacts, OsInfo, Packaging, PackagingFormat, ToolPaths};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::pattern::{self, PatternError};
use crate::platform::Arch;
use crate::util::yaml_files;

use facts::FactsFile;

/// Errors that can occur while loading or querying the inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
  /// Failed to list the hosts directory.
  #[error("failed to read inventory directory '{path}': {source}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to read a facts file.
  #[error("failed to read facts for host '{host}': {source}")]
  Read {
    host: String,
    #[source]
    source: io::Error,
  },

  /// A facts file is not valid YAML or misses required fields.
  #[error("failed to parse facts for host '{host}': {source}")]
  Parse {
    host: String,
    #[source]
    source: serde_yaml::Error,
  },

  /// A facts file has no `arch` and the running machine is not supported.
  #[error("host '{0}' does not declare an arch and the native arch is unsupported")]
  UnknownNativeArch(String),

  #[error("unknown host: {0}")]
  UnknownHost(String),

  #[error(transparent)]
  Pattern(#[from] PatternError),
}

/// All known hosts and their facts.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
  hosts: BTreeMap<String, HostFacts>,
}

impl Inventory {
  /// Build an inventory from already-loaded facts.
  pub fn from_facts(hosts: impl IntoIterator<Item = (String, HostFacts)>) -> Self {
    Self {
      hosts: hosts.into_iter().collect(),
    }
  }

  /// Load every `*.yml` file from `dir`.
  ///
  /// Facts files without an `arch` field get the architecture of the
  /// running machine.
  pub fn load(dir: &Path) -> Result<Self, InventoryError> {
    let files = yaml_files(dir).map_err(|source| InventoryError::ReadDir {
      path: dir.to_path_buf(),
      source,
    })?;

    let mut hosts = BTreeMap::new();
    for (host, path) in files {
      debug!(host = %host, path = ?path, "loading host facts");
      let content = fs::read_to_string(&path).map_err(|source| InventoryError::Read {
        host: host.clone(),
        source,
      })?;
      let file: FactsFile = serde_yaml::from_str(&content).map_err(|source| InventoryError::Parse {
        host: host.clone(),
        source,
      })?;
      let fallback = match (file.arch, Arch::current()) {
        (Some(arch), _) | (None, Some(arch)) => arch,
        (None, None) => return Err(InventoryError::UnknownNativeArch(host)),
      };
      hosts.insert(host, file.into_facts(fallback));
    }

    Ok(Self { hosts })
  }

  /// Host names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.hosts.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.hosts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hosts.is_empty()
  }

  /// Facts for a single host.
  pub fn facts(&self, host: &str) -> Result<&HostFacts, InventoryError> {
    self
      .hosts
      .get(host)
      .ok_or_else(|| InventoryError::UnknownHost(host.to_string()))
  }

  /// Expand a host pattern (`all`, globs, comma-separated lists).
  pub fn expand(&self, pattern: &str) -> Result<Vec<String>, InventoryError> {
    Ok(pattern::expand(pattern, self.names())?.into_iter().collect())
  }
}
