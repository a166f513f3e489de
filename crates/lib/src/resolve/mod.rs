//! Package resolution.
//!
//! Turns a host's facts, a selection of projects and an optional cross
//! target into a [`VarMap`]. Resolution runs in two phases:
//!
//! 1. Every logical package of every selected project is looked up in the
//!    native, PyPI and CPAN namespaces. A native name wins; otherwise the
//!    package lands in each of the PyPI and CPAN buckets that name it.
//! 2. If any PyPI or CPAN package was placed, the packages of the matching
//!    support project (`python-pip`, `perl-cpan`) are added natively.
//!
//! Within a namespace the value of a package comes from the most specific
//! key of the relevant [`KeyLadder`]; an explicit absent marker there drops
//! the package from that namespace.

mod cross;
mod keys;
mod policy;
mod varmap;

pub use cross::check_cross_support;
pub use keys::KeyLadder;
pub use policy::CrossPolicy;
pub use varmap::{CrossTarget, VarMap};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::consts::{BASE_PROJECT, CPAN_SUPPORT_PROJECT, PYPI_SUPPORT_PROJECT};
use crate::inventory::{HostFacts, PackagingFormat};
use crate::mappings::{DEFAULT_KEY, Mapped, MappingEntry, MappingStore, Namespace};
use crate::platform::Arch;
use crate::projects::ProjectIndex;

/// Name prefixes of cross toolchain packages on Debian. These already carry
/// the target in their name and must not get an `:<arch>` suffix.
const DEB_TOOLCHAIN_PREFIXES: [&str; 2] = ["gcc-", "g++-"];

/// How a `null` policy value is reported.
pub(crate) const NULL_POLICY: &str = "null";

/// Where a missing mapping was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingContext {
  /// The package has no entry in any namespace.
  Any,
  /// A foreign package has no name for the cross target.
  Foreign,
  /// A package of a support project cannot be installed natively.
  Support,
}

impl fmt::Display for MissingContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Self::Any => "not defined in any namespace",
      Self::Foreign => "no foreign name for the cross target",
      Self::Support => "required by a support project",
    };
    write!(f, "{}", text)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("no mapping for package '{package}' ({context})")]
  MissingMapping { package: String, context: MissingContext },

  #[error("unexpected cross policy '{value}' for package '{package}' at key '{key}'")]
  InvalidPolicy {
    package: String,
    key: String,
    value: String,
  },

  #[error("unknown project: {0}")]
  UnknownProject(String),

  #[error("cannot cross compile for {arch} on {os}")]
  UnsupportedCrossCombination { os: String, arch: String },

  #[error("cross arch {0} is the host's native arch")]
  CrossArchIsNative(Arch),

  #[error("expected exactly one host for '{pattern}', found {count}")]
  TooManyHosts { pattern: String, count: usize },
}

/// Resolve the packages of `projects` for one host.
///
/// `projects` must already be expanded to concrete identifiers; the `base`
/// project is always merged in front of them. With `cross_arch` set,
/// packages whose cross policy is `foreign` are resolved for the target and
/// land in [`VarMap::cross_pkgs`].
///
/// The result only depends on the arguments: the same inputs always yield
/// the same `VarMap`.
pub fn resolve(
  facts: &HostFacts,
  projects: &[String],
  cross_arch: Option<Arch>,
  mappings: &MappingStore,
  index: &ProjectIndex,
) -> Result<VarMap, ResolveError> {
  if let Some(arch) = cross_arch {
    cross::ensure_format_supports(facts, arch)?;
  }

  debug!(
    os = %facts.os_name(),
    version = %facts.os_version(),
    cross = ?cross_arch.map(|a| a.as_str()),
    projects = projects.len(),
    "resolving packages"
  );

  let resolver = Resolver::new(facts, cross_arch, mappings);
  let mut buckets = Buckets::default();
  let mut seen = HashSet::new();

  let selection = std::iter::once(BASE_PROJECT).chain(projects.iter().map(String::as_str));
  for project in selection {
    let packages = index
      .packages(project)
      .map_err(|_| ResolveError::UnknownProject(project.to_string()))?;
    for package in packages {
      if seen.insert(package.as_str()) {
        resolver.place(package, &mut buckets)?;
      }
    }
  }

  for (support, needed) in [
    (PYPI_SUPPORT_PROJECT, !buckets.pypi.is_empty()),
    (CPAN_SUPPORT_PROJECT, !buckets.cpan.is_empty()),
  ] {
    if !needed {
      continue;
    }
    debug!(project = support, "adding support packages");
    let packages = index
      .packages(support)
      .map_err(|_| ResolveError::UnknownProject(support.to_string()))?;
    for package in packages {
      let name = resolver.support_name(package)?;
      buckets.native.insert(package.clone(), name);
    }
  }

  let varmap = resolver.finish(buckets)?;
  debug!(
    pkgs = varmap.pkgs().len(),
    cross_pkgs = varmap.cross_pkgs().len(),
    pypi_pkgs = varmap.pypi_pkgs().len(),
    cpan_pkgs = varmap.cpan_pkgs().len(),
    "resolved packages"
  );
  Ok(varmap)
}

/// Logical package -> concrete name, per bucket.
#[derive(Debug, Default)]
struct Buckets {
  native: BTreeMap<String, String>,
  cross: BTreeMap<String, String>,
  pypi: BTreeMap<String, String>,
  cpan: BTreeMap<String, String>,
}

struct Resolver<'a> {
  facts: &'a HostFacts,
  mappings: &'a MappingStore,
  cross_arch: Option<Arch>,
  native_ladder: KeyLadder,
  foreign_ladder: Option<KeyLadder>,
  policy_ladder: KeyLadder,
}

impl<'a> Resolver<'a> {
  fn new(facts: &'a HostFacts, cross_arch: Option<Arch>, mappings: &'a MappingStore) -> Self {
    Self {
      facts,
      mappings,
      cross_arch,
      native_ladder: KeyLadder::native(facts),
      foreign_ladder: cross_arch.map(|arch| KeyLadder::foreign(facts, arch)),
      policy_ladder: KeyLadder::policy(facts),
    }
  }

  /// Resolve one logical package and record it in its buckets.
  fn place(&self, package: &str, buckets: &mut Buckets) -> Result<(), ResolveError> {
    let native = self.mappings.get(Namespace::Native, package);
    let pypi = self.mappings.get(Namespace::Pypi, package);
    let cpan = self.mappings.get(Namespace::Cpan, package);

    if native.is_none() && pypi.is_none() && cpan.is_none() {
      return Err(ResolveError::MissingMapping {
        package: package.to_string(),
        context: MissingContext::Any,
      });
    }

    let policy = match native {
      Some(entry) => self.cross_policy(package, entry)?,
      None => CrossPolicy::Native,
    };
    let foreign = self.cross_arch.is_some() && policy == CrossPolicy::Foreign;

    let native_name = match native {
      Some(entry) => self.native_name(package, entry, foreign)?,
      None => None,
    };

    if let Some(name) = native_name {
      match (self.cross_arch, policy) {
        (Some(_), CrossPolicy::Skip) => {
          debug!(package, "skipping package for cross build");
        }
        (Some(_), CrossPolicy::Foreign) => {
          trace!(package, name = %name, "foreign package");
          buckets.cross.insert(package.to_string(), name);
        }
        _ => {
          trace!(package, name = %name, "native package");
          buckets.native.insert(package.to_string(), name);
        }
      }
      return Ok(());
    }

    let pypi_name = pypi.and_then(default_name);
    let cpan_name = cpan.and_then(default_name);
    if let Some(name) = pypi_name {
      trace!(package, name, "pypi package");
      buckets.pypi.insert(package.to_string(), name.to_string());
    }
    if let Some(name) = cpan_name {
      trace!(package, name, "cpan package");
      buckets.cpan.insert(package.to_string(), name.to_string());
    }
    if pypi_name.is_none() && cpan_name.is_none() {
      debug!(package, os = %self.facts.os_name(), "package not available, skipping");
    }
    Ok(())
  }

  /// The native namespace name of `package`, using the foreign ladder for
  /// foreign packages of a cross build.
  fn native_name(
    &self,
    package: &str,
    entry: &MappingEntry,
    foreign: bool,
  ) -> Result<Option<String>, ResolveError> {
    let ladder = match (&self.foreign_ladder, foreign) {
      (Some(ladder), true) => ladder,
      _ => &self.native_ladder,
    };

    match entry.lookup(ladder.keys()) {
      Some((key, value)) => {
        trace!(package, key, "matched mapping key");
        Ok(value.name().map(str::to_string))
      }
      // A foreign package the host could install natively but not for the
      // target is a gap in the mappings, not an unavailable package.
      None if foreign && self.native_lookup(entry).is_some() => Err(ResolveError::MissingMapping {
        package: package.to_string(),
        context: MissingContext::Foreign,
      }),
      None => Ok(None),
    }
  }

  fn native_lookup<'e>(&self, entry: &'e MappingEntry) -> Option<&'e str> {
    entry.lookup(self.native_ladder.keys()).and_then(|(_, value)| value.name())
  }

  fn cross_policy(&self, package: &str, entry: &MappingEntry) -> Result<CrossPolicy, ResolveError> {
    let Some((key, value)) = entry.lookup(self.policy_ladder.keys()) else {
      return Ok(CrossPolicy::Native);
    };
    match value {
      Mapped::Name(raw) => raw.parse::<CrossPolicy>().map_err(|value| ResolveError::InvalidPolicy {
        package: package.to_string(),
        key: key.to_string(),
        value,
      }),
      Mapped::Absent => Err(ResolveError::InvalidPolicy {
        package: package.to_string(),
        key: key.to_string(),
        value: NULL_POLICY.to_string(),
      }),
    }
  }

  fn support_name(&self, package: &str) -> Result<String, ResolveError> {
    self
      .mappings
      .get(Namespace::Native, package)
      .and_then(|entry| self.native_lookup(entry))
      .map(str::to_string)
      .ok_or_else(|| ResolveError::MissingMapping {
        package: package.to_string(),
        context: MissingContext::Support,
      })
  }

  /// Apply foreign naming and assemble the final map.
  fn finish(&self, buckets: Buckets) -> Result<VarMap, ResolveError> {
    let mut cross_pkgs = BTreeSet::new();
    if let Some(arch) = self.cross_arch {
      match self.facts.format() {
        PackagingFormat::Deb => {
          let deb_arch = arch.deb_arch().ok_or_else(|| ResolveError::UnsupportedCrossCombination {
            os: self.facts.os_name().to_string(),
            arch: arch.to_string(),
          })?;
          for name in buckets.cross.values() {
            if DEB_TOOLCHAIN_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
              cross_pkgs.insert(name.clone());
            } else {
              cross_pkgs.insert(format!("{}:{}", name, deb_arch));
            }
          }
        }
        PackagingFormat::Rpm | PackagingFormat::Apk => {
          cross_pkgs.extend(buckets.cross.values().cloned());
          cross_pkgs.insert(format!("{}-gcc", arch));
        }
      }
    }

    let mappings: BTreeSet<String> = buckets
      .native
      .keys()
      .chain(buckets.cross.keys())
      .chain(buckets.pypi.keys())
      .chain(buckets.cpan.keys())
      .cloned()
      .collect();

    Ok(VarMap::new(self.facts, self.cross_arch).fill(
      buckets.native.into_values(),
      cross_pkgs,
      buckets.pypi.into_values(),
      buckets.cpan.into_values(),
      mappings,
    ))
  }
}

fn default_name(entry: &MappingEntry) -> Option<&str> {
  entry.get(DEFAULT_KEY).and_then(Mapped::name)
}
