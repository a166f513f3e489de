use std::collections::BTreeSet;

use serde::Serialize;

use crate::inventory::{HostFacts, ToolPaths};
use crate::platform::Arch;

/// Cross-compilation target recorded in a [`VarMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTarget {
  pub arch: Arch,
  pub abi: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deb_arch: Option<&'static str>,
}

impl CrossTarget {
  pub fn new(arch: Arch) -> Self {
    Self {
      arch,
      abi: arch.abi(),
      deb_arch: arch.deb_arch(),
    }
  }
}

/// Fully resolved package lists for one host, one project selection and an
/// optional cross target.
///
/// Only the resolver builds a `VarMap`; consumers read it through the
/// accessors or serialize it. All package lists are sorted and free of
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarMap {
  packaging_command: String,
  paths: ToolPaths,
  #[serde(skip_serializing_if = "Option::is_none")]
  container_base: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  cross: Option<CrossTarget>,
  pkgs: BTreeSet<String>,
  cross_pkgs: BTreeSet<String>,
  pypi_pkgs: BTreeSet<String>,
  cpan_pkgs: BTreeSet<String>,
  mappings: BTreeSet<String>,
}

impl VarMap {
  pub(super) fn new(facts: &HostFacts, cross_arch: Option<Arch>) -> Self {
    Self {
      packaging_command: facts.packaging_command().to_string(),
      paths: facts.paths().clone(),
      container_base: facts.base_image().map(str::to_string),
      cross: cross_arch.map(CrossTarget::new),
      pkgs: BTreeSet::new(),
      cross_pkgs: BTreeSet::new(),
      pypi_pkgs: BTreeSet::new(),
      cpan_pkgs: BTreeSet::new(),
      mappings: BTreeSet::new(),
    }
  }

  pub(super) fn fill(
    mut self,
    pkgs: impl IntoIterator<Item = String>,
    cross_pkgs: impl IntoIterator<Item = String>,
    pypi_pkgs: impl IntoIterator<Item = String>,
    cpan_pkgs: impl IntoIterator<Item = String>,
    mappings: impl IntoIterator<Item = String>,
  ) -> Self {
    self.pkgs.extend(pkgs);
    self.cross_pkgs.extend(cross_pkgs);
    self.pypi_pkgs.extend(pypi_pkgs);
    self.cpan_pkgs.extend(cpan_pkgs);
    self.mappings.extend(mappings);
    self
  }

  pub fn packaging_command(&self) -> &str {
    &self.packaging_command
  }

  pub fn paths(&self) -> &ToolPaths {
    &self.paths
  }

  pub fn container_base(&self) -> Option<&str> {
    self.container_base.as_deref()
  }

  pub fn cross(&self) -> Option<&CrossTarget> {
    self.cross.as_ref()
  }

  /// Native packages, installed with the packaging command.
  pub fn pkgs(&self) -> &BTreeSet<String> {
    &self.pkgs
  }

  /// Packages built for the cross target.
  pub fn cross_pkgs(&self) -> &BTreeSet<String> {
    &self.cross_pkgs
  }

  pub fn pypi_pkgs(&self) -> &BTreeSet<String> {
    &self.pypi_pkgs
  }

  pub fn cpan_pkgs(&self) -> &BTreeSet<String> {
    &self.cpan_pkgs
  }

  /// Logical names that ended up in at least one bucket.
  pub fn mappings(&self) -> &BTreeSet<String> {
    &self.mappings
  }

  /// True when no bucket holds anything.
  pub fn is_empty(&self) -> bool {
    self.pkgs.is_empty() && self.cross_pkgs.is_empty() && self.pypi_pkgs.is_empty() && self.cpan_pkgs.is_empty()
  }
}
