//! Mapping store: logical package name -> context-keyed concrete names.
//!
//! The store is read from `<data_dir>/mappings.yml`:
//!
//! ```yaml
//! mappings:
//!   gcc:
//!     default: gcc
//!     FreeBSD:              # absent on FreeBSD
//!   libfoo:
//!     default: libfoo-dev
//!     rpm: libfoo-devel
//!     cross-policy-default: foreign
//! pypi_mappings:
//!   meson:
//!     default: meson==0.56.0
//! cpan_mappings:
//!   perl-Test-Pod:
//!     default: Test::Pod
//! ```
//!
//! A key mapped to nothing (`null`) is an explicit "absent" marker.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Key every namespace falls back to.
pub const DEFAULT_KEY: &str = "default";

/// Prefix of the keys carrying a cross policy instead of a package name.
pub const CROSS_POLICY_PREFIX: &str = "cross-policy-";

/// Package ecosystems tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
  Native,
  Pypi,
  Cpan,
}

impl Namespace {
  pub const ALL: [Namespace; 3] = [Self::Native, Self::Pypi, Self::Cpan];

  /// Name of the section in `mappings.yml`
  pub const fn section(&self) -> &'static str {
    match self {
      Self::Native => "mappings",
      Self::Pypi => "pypi_mappings",
      Self::Cpan => "cpan_mappings",
    }
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Native => "native",
      Self::Pypi => "pypi",
      Self::Cpan => "cpan",
    };
    write!(f, "{}", name)
  }
}

/// Value stored under one context key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
  /// A concrete package name.
  Name(String),
  /// Explicitly not available in this context.
  Absent,
}

impl Mapped {
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Name(name) => Some(name),
      Self::Absent => None,
    }
  }
}

impl From<Option<String>> for Mapped {
  fn from(value: Option<String>) -> Self {
    match value {
      Some(name) => Self::Name(name),
      None => Self::Absent,
    }
  }
}

/// All context keys defined for one logical package in one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingEntry {
  keys: BTreeMap<String, Mapped>,
}

impl MappingEntry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insertion, mostly useful in tests.
  pub fn with(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
    self.insert(key, value.map(str::to_string).into());
    self
  }

  pub fn insert(&mut self, key: impl Into<String>, value: Mapped) {
    self.keys.insert(key.into(), value);
  }

  pub fn get(&self, key: &str) -> Option<&Mapped> {
    self.keys.get(key)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Mapped)> {
    self.keys.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Walk `ladder` from least to most specific and return the last match.
  ///
  /// Returns the matching key together with its value, or `None` when no key
  /// of the ladder is defined for this entry.
  pub fn lookup<'a, K: AsRef<str>>(&'a self, ladder: &[K]) -> Option<(&'a str, &'a Mapped)> {
    ladder
      .iter()
      .filter_map(|key| self.keys.get_key_value(key.as_ref()))
      .last()
      .map(|(k, v)| (k.as_str(), v))
  }
}

impl FromIterator<(String, Mapped)> for MappingEntry {
  fn from_iter<I: IntoIterator<Item = (String, Mapped)>>(iter: I) -> Self {
    Self {
      keys: iter.into_iter().collect(),
    }
  }
}

/// Errors raised while loading `mappings.yml`.
#[derive(Debug, Error)]
pub enum MappingError {
  #[error("failed to read mappings '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse mappings '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("invalid {namespace} mapping for '{package}' at key '{key}': {reason}")]
  Invalid {
    namespace: Namespace,
    package: String,
    key: String,
    reason: String,
  },
}

type RawTable = BTreeMap<String, Option<BTreeMap<String, Option<String>>>>;

#[derive(Debug, Deserialize)]
struct MappingsFile {
  #[serde(default)]
  mappings: RawTable,
  #[serde(default)]
  pypi_mappings: RawTable,
  #[serde(default)]
  cpan_mappings: RawTable,
}

/// The three namespaces of package mappings.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
  native: BTreeMap<String, MappingEntry>,
  pypi: BTreeMap<String, MappingEntry>,
  cpan: BTreeMap<String, MappingEntry>,
}

impl MappingStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load and validate a mappings file.
  pub fn load(path: &Path) -> Result<Self, MappingError> {
    let content = fs::read_to_string(path).map_err(|source| MappingError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let file: MappingsFile = serde_yaml::from_str(&content).map_err(|source| MappingError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    let store = Self {
      native: convert(Namespace::Native, file.mappings)?,
      pypi: convert(Namespace::Pypi, file.pypi_mappings)?,
      cpan: convert(Namespace::Cpan, file.cpan_mappings)?,
    };
    debug!(
      native = store.native.len(),
      pypi = store.pypi.len(),
      cpan = store.cpan.len(),
      "loaded mappings"
    );
    Ok(store)
  }

  pub fn insert(&mut self, namespace: Namespace, package: impl Into<String>, entry: MappingEntry) {
    self.table_mut(namespace).insert(package.into(), entry);
  }

  pub fn get(&self, namespace: Namespace, package: &str) -> Option<&MappingEntry> {
    self.table(namespace).get(package)
  }

  /// Whether any namespace has an entry for `package`.
  pub fn contains(&self, package: &str) -> bool {
    Namespace::ALL.iter().any(|ns| self.table(*ns).contains_key(package))
  }

  /// Iterate over the entries of one namespace in package order.
  pub fn entries(&self, namespace: Namespace) -> impl Iterator<Item = (&str, &MappingEntry)> {
    self.table(namespace).iter().map(|(k, v)| (k.as_str(), v))
  }

  fn table(&self, namespace: Namespace) -> &BTreeMap<String, MappingEntry> {
    match namespace {
      Namespace::Native => &self.native,
      Namespace::Pypi => &self.pypi,
      Namespace::Cpan => &self.cpan,
    }
  }

  fn table_mut(&mut self, namespace: Namespace) -> &mut BTreeMap<String, MappingEntry> {
    match namespace {
      Namespace::Native => &mut self.native,
      Namespace::Pypi => &mut self.pypi,
      Namespace::Cpan => &mut self.cpan,
    }
  }
}

fn convert(namespace: Namespace, raw: RawTable) -> Result<BTreeMap<String, MappingEntry>, MappingError> {
  let mut table = BTreeMap::new();

  for (package, keys) in raw {
    let mut entry = MappingEntry::new();
    for (key, value) in keys.unwrap_or_default() {
      if key.trim().is_empty() {
        return Err(MappingError::Invalid {
          namespace,
          package,
          key,
          reason: "empty context key".to_string(),
        });
      }
      if matches!(value.as_deref(), Some(v) if v.trim().is_empty()) {
        return Err(MappingError::Invalid {
          namespace,
          package,
          key,
          reason: "empty package name, use null to mark a package as absent".to_string(),
        });
      }
      if namespace != Namespace::Native && key != DEFAULT_KEY {
        warn!(%namespace, package = %package, key = %key, "only the default key is used for this namespace");
      }
      entry.insert(key, value.into());
    }
    table.insert(package, entry);
  }

  Ok(table)
}
