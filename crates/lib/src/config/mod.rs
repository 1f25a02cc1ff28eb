//! Static build configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "output_offset": "../../build",
//!   "root_project": "android",
//!   "subprojects": ["app", { "name": "feature", "depends_on": ["core"] }, "core"],
//!   "evaluation_anchor": "app",
//!   "buildscript_repositories": ["google", "mavenCentral"],
//!   "classpath": ["com.google.gms:google-services:4.4.2"],
//!   "repositories": ["google", "mavenCentral"]
//! }
//! ```

use std::env::{self, VarError};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_EVALUATION_ANCHOR, DEFAULT_OUTPUT_OFFSET, DEFAULT_ROOT_PROJECT, OUTPUT_OFFSET_ENV};
use crate::deps::{Coordinate, DeclarationError, Declarations, Repository, default_classpath, default_repositories};
use crate::project::{Project, ProjectTree};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config: {0}")]
  Parse(#[from] serde_json::Error),
}

/// A subproject entry: either a bare name or a name with evaluation dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubprojectConfig {
  Name(String),
  Detailed {
    name: String,
    #[serde(default)]
    depends_on: Vec<String>,
  },
}

impl SubprojectConfig {
  fn into_project(self) -> Project {
    match self {
      SubprojectConfig::Name(name) => Project::new(name),
      SubprojectConfig::Detailed { name, depends_on } => Project::new(name).with_depends_on(depends_on),
    }
  }
}

impl From<&str> for SubprojectConfig {
  fn from(name: &str) -> Self {
    SubprojectConfig::Name(name.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
  /// Where the shared output base lives, relative to the root project directory.
  #[serde(default = "default_output_offset")]
  pub output_offset: String,
  #[serde(default = "default_root_project")]
  pub root_project: String,
  #[serde(default)]
  pub subprojects: Vec<SubprojectConfig>,
  /// Subproject all others are evaluated after. `null` disables it.
  #[serde(default = "default_evaluation_anchor")]
  pub evaluation_anchor: Option<String>,
  #[serde(default = "default_repositories")]
  pub buildscript_repositories: Vec<Repository>,
  #[serde(default = "default_classpath")]
  pub classpath: Vec<Coordinate>,
  #[serde(default = "default_repositories")]
  pub repositories: Vec<Repository>,
}

fn default_output_offset() -> String {
  DEFAULT_OUTPUT_OFFSET.to_string()
}

fn default_root_project() -> String {
  DEFAULT_ROOT_PROJECT.to_string()
}

fn default_evaluation_anchor() -> Option<String> {
  Some(DEFAULT_EVALUATION_ANCHOR.to_string())
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      output_offset: default_output_offset(),
      root_project: default_root_project(),
      subprojects: Vec::new(),
      evaluation_anchor: default_evaluation_anchor(),
      buildscript_repositories: default_repositories(),
      classpath: default_classpath(),
      repositories: default_repositories(),
    }
  }
}

impl LayoutConfig {
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_json_str(&content)?;
    info!(path = %path.display(), subprojects = config.subprojects.len(), "loaded layout config");
    Ok(config)
  }

  pub fn with_subprojects<I, S>(mut self, subprojects: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<SubprojectConfig>,
  {
    self.subprojects = subprojects.into_iter().map(Into::into).collect();
    self
  }

  /// Apply overrides from the environment.
  ///
  /// `OUTBASE_OUTPUT_OFFSET` replaces `output_offset`. A value that is not
  /// valid UTF-8 is ignored with a warning.
  pub fn with_env_overrides(mut self) -> Self {
    match env::var(OUTPUT_OFFSET_ENV) {
      Ok(offset) => {
        debug!(offset = %offset, "output offset overridden from environment");
        self.output_offset = offset;
      }
      Err(VarError::NotUnicode(raw)) => {
        warn!(
          var = OUTPUT_OFFSET_ENV,
          value = ?raw,
          offset = %self.output_offset,
          "ignoring non-UTF-8 output offset override"
        );
      }
      Err(VarError::NotPresent) => {}
    }
    self
  }

  pub fn project_tree(&self) -> ProjectTree {
    ProjectTree::new(
      Project::new(self.root_project.as_str()),
      self.subprojects.iter().cloned().map(SubprojectConfig::into_project).collect(),
    )
  }

  pub fn declarations(&self) -> Result<Declarations, DeclarationError> {
    Declarations::new(
      self.buildscript_repositories.clone(),
      self.classpath.clone(),
      self.repositories.clone(),
    )
  }
}
