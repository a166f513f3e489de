use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// CPU architectures known to the mapping tables.
///
/// The string form is the spelling used as a mapping key prefix
/// (`aarch64-default`, `mingw64-Fedora`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
  Aarch64,
  Armv6l,
  Armv7l,
  I686,
  Mingw32,
  Mingw64,
  Mips,
  Mipsel,
  Mips64el,
  Ppc64le,
  S390x,
  X86_64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown architecture: {0}")]
pub struct UnknownArch(pub String);

impl Arch {
  pub const ALL: [Arch; 12] = [
    Self::Aarch64,
    Self::Armv6l,
    Self::Armv7l,
    Self::I686,
    Self::Mingw32,
    Self::Mingw64,
    Self::Mips,
    Self::Mipsel,
    Self::Mips64el,
    Self::Ppc64le,
    Self::S390x,
    Self::X86_64,
  ];

  /// Detect the architecture of the running machine
  ///
  /// Returns `None` if the architecture has no entry in the table.
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      "x86" => Some(Self::I686),
      "arm" => Some(Self::Armv7l),
      "powerpc64" if cfg!(target_endian = "little") => Some(Self::Ppc64le),
      "s390x" => Some(Self::S390x),
      "mips" if cfg!(target_endian = "little") => Some(Self::Mipsel),
      "mips" => Some(Self::Mips),
      "mips64" if cfg!(target_endian = "little") => Some(Self::Mips64el),
      _ => None,
    }
  }

  /// Returns the identifier used in mapping keys
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Aarch64 => "aarch64",
      Self::Armv6l => "armv6l",
      Self::Armv7l => "armv7l",
      Self::I686 => "i686",
      Self::Mingw32 => "mingw32",
      Self::Mingw64 => "mingw64",
      Self::Mips => "mips",
      Self::Mipsel => "mipsel",
      Self::Mips64el => "mips64el",
      Self::Ppc64le => "ppc64le",
      Self::S390x => "s390x",
      Self::X86_64 => "x86_64",
    }
  }

  /// GNU target triplet, as used by `--host=` and cross toolchain names
  pub fn abi(&self) -> &'static str {
    match self {
      Self::Aarch64 => "aarch64-linux-gnu",
      Self::Armv6l => "arm-linux-gnueabi",
      Self::Armv7l => "arm-linux-gnueabihf",
      Self::I686 => "i686-linux-gnu",
      Self::Mingw32 => "i686-w64-mingw32",
      Self::Mingw64 => "x86_64-w64-mingw32",
      Self::Mips => "mips-linux-gnu",
      Self::Mipsel => "mipsel-linux-gnu",
      Self::Mips64el => "mips64el-linux-gnuabi64",
      Self::Ppc64le => "powerpc64le-linux-gnu",
      Self::S390x => "s390x-linux-gnu",
      Self::X86_64 => "x86_64-linux-gnu",
    }
  }

  /// Debian architecture name, `None` for targets dpkg has no port for
  pub fn deb_arch(&self) -> Option<&'static str> {
    match self {
      Self::Aarch64 => Some("arm64"),
      Self::Armv6l => Some("armel"),
      Self::Armv7l => Some("armhf"),
      Self::I686 => Some("i386"),
      Self::Mingw32 | Self::Mingw64 => None,
      Self::Mips => Some("mips"),
      Self::Mipsel => Some("mipsel"),
      Self::Mips64el => Some("mips64el"),
      Self::Ppc64le => Some("ppc64el"),
      Self::S390x => Some("s390x"),
      Self::X86_64 => Some("amd64"),
    }
  }

  /// Whether this is a Windows target built with the MinGW toolchain
  pub fn is_mingw(&self) -> bool {
    matches!(self, Self::Mingw32 | Self::Mingw64)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = UnknownArch;

  /// Accepts the key spelling as well as the Debian architecture name.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|arch| arch.as_str() == s || arch.deb_arch() == Some(s))
      .ok_or_else(|| UnknownArch(s.to_string()))
  }
}

impl Serialize for Arch {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Arch {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

/// Returns the architecture of the running machine
///
/// Returns `None` if the architecture is not supported
pub fn native_arch() -> Option<Arch> {
  Arch::current()
}
