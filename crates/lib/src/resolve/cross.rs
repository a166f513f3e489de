//! Supported cross-compilation combinations.

use crate::inventory::{HostFacts, PackagingFormat};
use crate::platform::Arch;

use super::ResolveError;

/// Check that `facts` can produce packages for `arch` at all.
///
/// Only Debian-style hosts with a Debian architecture name and RPM hosts
/// are able to install foreign packages.
pub(super) fn ensure_format_supports(facts: &HostFacts, arch: Arch) -> Result<(), ResolveError> {
  let supported = match facts.format() {
    PackagingFormat::Deb => arch.deb_arch().is_some(),
    PackagingFormat::Rpm => true,
    PackagingFormat::Apk => false,
  };
  if supported {
    Ok(())
  } else {
    Err(unsupported(facts, arch))
  }
}

/// Validate a requested cross build against the host.
///
/// Debian hosts cross-build for every non-Windows target, Fedora hosts only
/// for the MinGW targets. The target must differ from the host's own arch.
pub fn check_cross_support(facts: &HostFacts, arch: Arch) -> Result<(), ResolveError> {
  if arch == facts.arch() {
    return Err(ResolveError::CrossArchIsNative(arch));
  }

  let supported = match facts.os_name() {
    "Debian" => !arch.is_mingw(),
    "Fedora" => arch.is_mingw(),
    _ => false,
  };
  if !supported {
    return Err(unsupported(facts, arch));
  }
  ensure_format_supports(facts, arch)
}

fn unsupported(facts: &HostFacts, arch: Arch) -> ResolveError {
  ResolveError::UnsupportedCrossCombination {
    os: facts.os_name().to_string(),
    arch: arch.to_string(),
  }
}
