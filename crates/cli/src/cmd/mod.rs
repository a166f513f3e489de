mod check;
mod hosts;
mod info;
mod projects;
mod resolve;

pub use check::cmd_check;
pub use hosts::cmd_hosts;
pub use info::cmd_info;
pub use projects::cmd_projects;
pub use resolve::cmd_resolve;

use std::path::Path;

use anyhow::{Context as _, Result};

use depmap_lib::Context;

/// Load the data directory, naming it in the error.
fn load_context(data_dir: &Path) -> Result<Context> {
  Context::load(data_dir).with_context(|| format!("Failed to load data directory {}", data_dir.display()))
}
