use std::fmt;
use std::str::FromStr;

/// What to do with a package when cross-compiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrossPolicy {
  /// Install for the build machine.
  #[default]
  Native,
  /// Install for the target architecture.
  Foreign,
  /// Leave out entirely.
  Skip,
}

impl CrossPolicy {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Native => "native",
      Self::Foreign => "foreign",
      Self::Skip => "skip",
    }
  }
}

impl fmt::Display for CrossPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for CrossPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "native" => Ok(Self::Native),
      "foreign" => Ok(Self::Foreign),
      "skip" => Ok(Self::Skip),
      other => Err(other.to_string()),
    }
  }
}
