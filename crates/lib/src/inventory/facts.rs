//! Per-host facts consumed by the resolver.
//!
//! A facts file describes one host:
//!
//! ```yaml
//! os:
//!   name: Debian
//!   version: 10
//! packaging:
//!   format: deb
//!   command: apt-get
//! arch: x86_64        # optional, defaults to the running machine
//! paths:
//!   ccache: /usr/bin/ccache
//!   make: /usr/bin/make
//!   ninja: /usr/bin/ninja
//!   python: /usr/bin/python3
//!   pip3: /usr/bin/pip3
//! containers:
//!   base: debian:10
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::platform::Arch;

/// Packaging format of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingFormat {
  /// Debian-like (dpkg/apt)
  Deb,
  /// RPM-like (dnf/yum/zypper)
  Rpm,
  /// Alpine (apk)
  Apk,
}

impl PackagingFormat {
  /// Returns the identifier used as a mapping key
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Deb => "deb",
      Self::Rpm => "rpm",
      Self::Apk => "apk",
    }
  }
}

impl fmt::Display for PackagingFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
  pub name: String,
  #[serde(deserialize_with = "string_or_number")]
  pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packaging {
  pub format: PackagingFormat,
  pub command: String,
}

/// Paths of build tools on the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cc: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ccache: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub make: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ninja: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub python: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pip3: Option<String>,
}

impl ToolPaths {
  /// Iterate over the configured tools as `(name, path)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    [
      ("cc", &self.cc),
      ("ccache", &self.ccache),
      ("make", &self.make),
      ("ninja", &self.ninja),
      ("python", &self.python),
      ("pip3", &self.pip3),
    ]
    .into_iter()
    .filter_map(|(name, path)| path.as_deref().map(|p| (name, p)))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containers {
  pub base: String,
}

/// Immutable description of one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostFacts {
  pub(crate) os: OsInfo,
  pub(crate) packaging: Packaging,
  /// Architecture the host's native packages are built for.
  pub(crate) arch: Arch,
  pub(crate) paths: ToolPaths,
  pub(crate) containers: Option<Containers>,
}

impl HostFacts {
  pub fn os_name(&self) -> &str {
    &self.os.name
  }

  pub fn os_version(&self) -> &str {
    &self.os.version
  }

  pub fn format(&self) -> PackagingFormat {
    self.packaging.format
  }

  pub fn packaging_command(&self) -> &str {
    &self.packaging.command
  }

  pub fn arch(&self) -> Arch {
    self.arch
  }

  pub fn paths(&self) -> &ToolPaths {
    &self.paths
  }

  /// Container image the host is derived from, if any.
  pub fn base_image(&self) -> Option<&str> {
    self.containers.as_ref().map(|c| c.base.as_str())
  }
}

/// On-disk shape of a facts file; `arch` is optional there.
#[derive(Debug, Deserialize)]
pub(crate) struct FactsFile {
  pub os: OsInfo,
  pub packaging: Packaging,
  #[serde(default)]
  pub arch: Option<Arch>,
  #[serde(default)]
  pub paths: ToolPaths,
  #[serde(default)]
  pub containers: Option<Containers>,
}

impl FactsFile {
  pub(crate) fn into_facts(self, fallback_arch: Arch) -> HostFacts {
    HostFacts {
      os: self.os,
      packaging: self.packaging,
      arch: self.arch.unwrap_or(fallback_arch),
      paths: self.paths,
      containers: self.containers,
    }
  }
}

/// OS versions are written both as `10` and as `Rawhide`.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  match serde_yaml::Value::deserialize(deserializer)? {
    serde_yaml::Value::String(s) => Ok(s),
    serde_yaml::Value::Number(n) => Ok(n.to_string()),
    other => Err(serde::de::Error::custom(format!(
      "expected a string or a number, found {:?}",
      other
    ))),
  }
}
