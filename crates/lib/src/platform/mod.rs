pub mod arch;
pub mod paths;

pub use arch::{Arch, UnknownArch};

/// Returns the architecture identifier of the running machine (e.g., "x86_64")
///
/// Returns `None` if the current architecture is not supported
pub fn native_arch_name() -> Option<&'static str> {
  arch::native_arch().map(|a| a.as_str())
}
