//! Loaded data tables.
//!
//! A [`Context`] owns the inventory, the mapping tables and the project
//! index. It is built once with [`Context::load`] and only read afterwards,
//! so it can be shared across threads by reference.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{HOSTS_DIR, MAPPINGS_FILE, PROJECTS_DIR};
use crate::inventory::{HostFacts, Inventory, InventoryError};
use crate::mappings::{CROSS_POLICY_PREFIX, MappingError, MappingStore, Namespace};
use crate::platform::{Arch, UnknownArch};
use crate::projects::{ProjectError, ProjectIndex};
use crate::resolve::{self, CrossPolicy, NULL_POLICY, ResolveError, VarMap, check_cross_support};

#[derive(Debug, Error)]
pub enum ContextError {
  #[error(transparent)]
  Inventory(#[from] InventoryError),

  #[error(transparent)]
  Mapping(#[from] MappingError),

  #[error(transparent)]
  Project(#[from] ProjectError),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Arch(#[from] UnknownArch),
}

/// Inconsistency found by [`Context::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
  /// A project requires a package no namespace knows about.
  UnmappedPackage { project: String, package: String },
  /// A cross-policy key holds something other than native/foreign/skip.
  InvalidPolicy {
    package: String,
    key: String,
    value: String,
  },
}

impl fmt::Display for Problem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnmappedPackage { project, package } => {
        write!(f, "project '{}' requires unmapped package '{}'", project, package)
      }
      Self::InvalidPolicy { package, key, value } => {
        write!(f, "package '{}' has invalid cross policy '{}' at key '{}'", package, value, key)
      }
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct Context {
  inventory: Inventory,
  mappings: MappingStore,
  projects: ProjectIndex,
}

impl Context {
  /// Load all tables from a data directory.
  pub fn load(data_dir: &Path) -> Result<Self, ContextError> {
    info!(path = ?data_dir, "loading data directory");
    let mappings = MappingStore::load(&data_dir.join(MAPPINGS_FILE))?;
    let projects = ProjectIndex::load(&data_dir.join(PROJECTS_DIR))?;
    let inventory = Inventory::load(&data_dir.join(HOSTS_DIR))?;
    debug!(hosts = inventory.len(), "data directory loaded");
    Ok(Self::from_parts(inventory, mappings, projects))
  }

  pub fn from_parts(inventory: Inventory, mappings: MappingStore, projects: ProjectIndex) -> Self {
    Self {
      inventory,
      mappings,
      projects,
    }
  }

  pub fn inventory(&self) -> &Inventory {
    &self.inventory
  }

  pub fn mappings(&self) -> &MappingStore {
    &self.mappings
  }

  pub fn project_index(&self) -> &ProjectIndex {
    &self.projects
  }

  /// Known host names, sorted.
  pub fn hosts(&self) -> Vec<&str> {
    self.inventory.names().collect()
  }

  /// User-selectable project names, sorted.
  pub fn projects(&self) -> Vec<&str> {
    self.projects.listable().collect()
  }

  /// Resolve the packages of the projects matching `projects` for the single
  /// host matching `hosts`.
  ///
  /// `cross_arch` accepts the key spelling (`aarch64`) as well as the Debian
  /// name (`arm64`).
  pub fn varmap(&self, hosts: &str, projects: &str, cross_arch: Option<&str>) -> Result<VarMap, ContextError> {
    let selected = self.inventory.expand(hosts)?;
    let [host] = selected.as_slice() else {
      return Err(
        ResolveError::TooManyHosts {
          pattern: hosts.to_string(),
          count: selected.len(),
        }
        .into(),
      );
    };
    let facts = self.inventory.facts(host)?;
    let cross_arch = cross_arch.map(str::parse::<Arch>).transpose()?;
    self.varmap_for(facts, projects, cross_arch)
  }

  /// Like [`Context::varmap`] for facts that are already at hand.
  pub fn varmap_for(
    &self,
    facts: &HostFacts,
    projects: &str,
    cross_arch: Option<Arch>,
  ) -> Result<VarMap, ContextError> {
    if let Some(arch) = cross_arch {
      check_cross_support(facts, arch)?;
    }
    let projects = self.projects.expand(projects)?;
    Ok(resolve::resolve(facts, &projects, cross_arch, &self.mappings, &self.projects)?)
  }

  /// Validate the tables against each other.
  ///
  /// Returns every problem found; an empty list means the data is
  /// consistent.
  pub fn check(&self) -> Vec<Problem> {
    let mut problems = Vec::new();

    for (project, packages) in self.projects.iter() {
      for package in packages {
        if !self.mappings.contains(package) {
          problems.push(Problem::UnmappedPackage {
            project: project.to_string(),
            package: package.clone(),
          });
        }
      }
    }

    for (package, entry) in self.mappings.entries(Namespace::Native) {
      for (key, value) in entry.iter().filter(|(key, _)| key.starts_with(CROSS_POLICY_PREFIX)) {
        let raw = value.name().unwrap_or(NULL_POLICY);
        if raw.parse::<CrossPolicy>().is_err() {
          problems.push(Problem::InvalidPolicy {
            package: package.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
          });
        }
      }
    }

    debug!(problems = problems.len(), "checked data directory");
    problems
  }
}
