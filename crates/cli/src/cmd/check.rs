use std::path::Path;

use anyhow::{Result, bail};

use crate::output::{print_success, print_warning};

use super::load_context;

pub fn cmd_check(data_dir: &Path) -> Result<()> {
  let ctx = load_context(data_dir)?;
  let problems = ctx.check();

  if problems.is_empty() {
    print_success(&format!(
      "{} hosts, {} projects, no problems found",
      ctx.hosts().len(),
      ctx.project_index().iter().count()
    ));
    return Ok(());
  }

  for problem in &problems {
    print_warning(&problem.to_string());
  }
  bail!("{} problem(s) found in {}", problems.len(), data_dir.display())
}
