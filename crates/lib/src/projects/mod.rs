//! Project index: project identifier -> required logical packages.
//!
//! Each project lives in `<data_dir>/projects/<name>.yml`:
//!
//! ```yaml
//! packages:
//!   - gcc
//!   - make
//!   - meson
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::INTERNAL_PROJECTS;
use crate::pattern::{self, PatternError};
use crate::util::yaml_files;

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("failed to read projects directory '{path}': {source}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read packages for '{project}': {source}")]
  Read {
    project: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse packages for '{project}': {source}")]
  Parse {
    project: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("unknown project: {0}")]
  UnknownProject(String),

  #[error("obsolete project syntax '{0}', use the cross arch option instead")]
  ObsoleteSyntax(String),

  #[error(transparent)]
  Pattern(#[from] PatternError),
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
  #[serde(default)]
  packages: Vec<String>,
}

/// Whether `project` is an implementation detail hidden from users.
pub fn is_internal(project: &str) -> bool {
  INTERNAL_PROJECTS.contains(&project)
}

/// All projects and the logical packages they require.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
  projects: BTreeMap<String, Vec<String>>,
}

impl ProjectIndex {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load every `*.yml` file from `dir`.
  pub fn load(dir: &Path) -> Result<Self, ProjectError> {
    let files = yaml_files(dir).map_err(|source| ProjectError::ReadDir {
      path: dir.to_path_buf(),
      source,
    })?;

    let mut projects = BTreeMap::new();
    for (project, path) in files {
      debug!(project = %project, "loading packages for project");
      let content = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
        project: project.clone(),
        source,
      })?;
      let file: ProjectFile = serde_yaml::from_str(&content).map_err(|source| ProjectError::Parse {
        project: project.clone(),
        source,
      })?;
      projects.insert(project, file.packages);
    }

    Ok(Self { projects })
  }

  pub fn insert(&mut self, project: impl Into<String>, packages: impl IntoIterator<Item = impl Into<String>>) {
    self
      .projects
      .insert(project.into(), packages.into_iter().map(Into::into).collect());
  }

  /// Packages required by `project`, looked up by exact name.
  ///
  /// Internal projects are found here even though they are never listed.
  pub fn packages(&self, project: &str) -> Result<&[String], ProjectError> {
    self
      .projects
      .get(project)
      .map(Vec::as_slice)
      .ok_or_else(|| ProjectError::UnknownProject(project.to_string()))
  }

  /// Every project, internal ones included.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.projects.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }

  /// Projects a user may select, in sorted order.
  pub fn listable(&self) -> impl Iterator<Item = &str> {
    self.projects.keys().map(String::as_str).filter(|p| !is_internal(p))
  }

  /// Expand a user-supplied project pattern.
  ///
  /// Internal projects are never part of the result, not even when named
  /// explicitly.
  pub fn expand(&self, pattern: &str) -> Result<Vec<String>, ProjectError> {
    if pattern.contains("+mingw") {
      return Err(ProjectError::ObsoleteSyntax(pattern.to_string()));
    }
    Ok(pattern::expand(pattern, self.listable())?.into_iter().collect())
  }
}
