mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use depmap_lib::platform::paths;

use crate::cmd::{cmd_check, cmd_hosts, cmd_info, cmd_projects, cmd_resolve};
use crate::output::{OutputFormat, print_error};

/// depmap - resolve build dependencies to distro package names
#[derive(Parser)]
#[command(name = "depmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Directory holding mappings.yml, projects/ and hosts/
  #[arg(long, global = true, env = "DEPMAP_DATA_DIR", value_name = "DIR")]
  data_dir: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List known hosts
  Hosts,

  /// List projects that can be selected
  Projects,

  /// Resolve the packages of some projects for one host
  Resolve {
    /// Host name or pattern, must select exactly one host
    hosts: String,

    /// Projects as a comma separated list of names or globs, or `all`
    projects: String,

    /// Cross compile for this architecture
    #[arg(short = 'x', long, value_name = "ARCH")]
    cross_arch: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Validate the data directory
  Check,

  /// Show platform and data directory information
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let data_dir = cli.data_dir.unwrap_or_else(paths::data_dir);

  let result = match cli.command {
    Commands::Hosts => cmd_hosts(&data_dir),
    Commands::Projects => cmd_projects(&data_dir),
    Commands::Resolve {
      hosts,
      projects,
      cross_arch,
      format,
    } => cmd_resolve(&data_dir, &hosts, &projects, cross_arch.as_deref(), format),
    Commands::Check => cmd_check(&data_dir),
    Commands::Info => cmd_info(&data_dir),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
