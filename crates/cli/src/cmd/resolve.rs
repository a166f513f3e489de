use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use depmap_lib::VarMap;

use crate::output::{OutputFormat, print_json, print_stat};

use super::load_context;

pub fn cmd_resolve(
  data_dir: &Path,
  hosts: &str,
  projects: &str,
  cross_arch: Option<&str>,
  output: OutputFormat,
) -> Result<()> {
  let ctx = load_context(data_dir)?;

  debug!(hosts, projects, cross_arch, "resolving");
  let varmap = ctx
    .varmap(hosts, projects, cross_arch)
    .with_context(|| format!("Failed to resolve '{}' for '{}'", projects, hosts))?;

  if output.is_json() {
    print_json(&varmap)?;
  } else {
    print_varmap(&varmap);
  }
  Ok(())
}

fn print_varmap(varmap: &VarMap) {
  print_stat("packaging_command", varmap.packaging_command());
  if let Some(base) = varmap.container_base() {
    print_stat("container_base", base);
  }
  for (tool, path) in varmap.paths().iter() {
    print_stat(&format!("paths.{}", tool), path);
  }
  if let Some(cross) = varmap.cross() {
    print_stat("cross_arch", cross.arch.as_str());
    print_stat("cross_abi", cross.abi);
    if let Some(deb_arch) = cross.deb_arch {
      print_stat("cross_deb_arch", deb_arch);
    }
  }

  print_list("pkgs", varmap.pkgs());
  print_list("cross_pkgs", varmap.cross_pkgs());
  print_list("pypi_pkgs", varmap.pypi_pkgs());
  print_list("cpan_pkgs", varmap.cpan_pkgs());
  print_list("mappings", varmap.mappings());
}

fn print_list(label: &str, items: &BTreeSet<String>) {
  if items.is_empty() {
    return;
  }
  println!("{}:", label);
  for item in items {
    println!("    {}", item);
  }
}
