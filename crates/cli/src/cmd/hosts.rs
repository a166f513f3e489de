use std::path::Path;

use anyhow::Result;

use super::load_context;

pub fn cmd_hosts(data_dir: &Path) -> Result<()> {
  let ctx = load_context(data_dir)?;
  for host in ctx.hosts() {
    println!("{}", host);
  }
  Ok(())
}
