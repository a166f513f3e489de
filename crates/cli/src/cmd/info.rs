use std::path::Path;

use anyhow::Result;

use depmap_lib::platform::native_arch_name;

use crate::output::print_stat;

pub fn cmd_info(data_dir: &Path) -> Result<()> {
  println!("System:");
  print_stat("Version", env!("CARGO_PKG_VERSION"));
  print_stat("Arch", native_arch_name().unwrap_or("unknown"));

  let shown = dunce::canonicalize(data_dir).unwrap_or_else(|_| data_dir.to_path_buf());
  let status = if data_dir.is_dir() { "" } else { " (missing)" };
  print_stat("Data dir", &format!("{}{}", shown.display(), status));
  Ok(())
}
