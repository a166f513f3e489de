use std::path::Path;

use anyhow::Result;

use super::load_context;

pub fn cmd_projects(data_dir: &Path) -> Result<()> {
  let ctx = load_context(data_dir)?;
  for project in ctx.projects() {
    println!("{}", project);
  }
  Ok(())
}
