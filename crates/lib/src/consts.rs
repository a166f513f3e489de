/// Application name, used for data directory lookup.
pub const APP_NAME: &str = "depmap";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DEPMAP_DATA_DIR";

/// Project implicitly merged into every resolution.
pub const BASE_PROJECT: &str = "base";

/// Project merged when the PyPI bucket is non-empty.
pub const PYPI_SUPPORT_PROJECT: &str = "python-pip";

/// Project merged when the CPAN bucket is non-empty.
pub const CPAN_SUPPORT_PROJECT: &str = "perl-cpan";

/// Projects that are implementation details and never offered to the user.
pub const INTERNAL_PROJECTS: &[&str] = &[
  BASE_PROJECT,
  "cloud-init",
  "developer",
  CPAN_SUPPORT_PROJECT,
  PYPI_SUPPORT_PROJECT,
  "unwanted",
  "vm",
];

/// Mapping tables, relative to the data directory.
pub const MAPPINGS_FILE: &str = "mappings.yml";

/// Directory of project package lists, relative to the data directory.
pub const PROJECTS_DIR: &str = "projects";

/// Directory of host facts files, relative to the data directory.
pub const HOSTS_DIR: &str = "hosts";
