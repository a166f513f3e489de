//! Candidate key ladders.
//!
//! A ladder lists context keys from least to most specific. Looking a
//! package up walks the whole ladder and keeps the last key that matched.

use crate::inventory::{HostFacts, PackagingFormat};
use crate::mappings::{CROSS_POLICY_PREFIX, DEFAULT_KEY};
use crate::platform::Arch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLadder {
  keys: Vec<String>,
}

impl KeyLadder {
  /// `default < format < OS name < OS name+version`
  pub fn base(facts: &HostFacts) -> Self {
    Self {
      keys: vec![
        DEFAULT_KEY.to_string(),
        facts.format().as_str().to_string(),
        facts.os_name().to_string(),
        format!("{}{}", facts.os_name(), facts.os_version()),
      ],
    }
  }

  /// Keys for packages installed for the host's own architecture.
  ///
  /// The base ladder followed by the same keys prefixed with the native
  /// architecture (`x86_64-default`, ..., `x86_64-Debian10`).
  pub fn native(facts: &HostFacts) -> Self {
    let base = Self::base(facts);
    let mut keys = base.prefixed(facts.arch().as_str());
    keys.splice(0..0, base.keys);
    Self { keys }
  }

  /// Keys for packages installed for the cross target.
  ///
  /// On Debian-like hosts the foreign package is usually named like the
  /// native one, so the native ladder comes first and `<arch>-` keys
  /// override it. Elsewhere the names are unrelated and only `<arch>-` keys
  /// are considered.
  pub fn foreign(facts: &HostFacts, cross_arch: Arch) -> Self {
    let arch_keys = Self::base(facts).prefixed(cross_arch.as_str());
    let keys = match facts.format() {
      PackagingFormat::Deb => {
        let mut keys = Self::native(facts).keys;
        keys.extend(arch_keys);
        keys
      }
      PackagingFormat::Rpm | PackagingFormat::Apk => arch_keys,
    };
    Self { keys }
  }

  /// `cross-policy-default < ... < cross-policy-<OS name+version>`
  pub fn policy(facts: &HostFacts) -> Self {
    Self {
      keys: Self::base(facts)
        .keys
        .iter()
        .map(|key| format!("{}{}", CROSS_POLICY_PREFIX, key))
        .collect(),
    }
  }

  pub fn keys(&self) -> &[String] {
    &self.keys
  }

  fn prefixed(&self, prefix: &str) -> Vec<String> {
    self.keys.iter().map(|key| format!("{}-{}", prefix, key)).collect()
  }
}
