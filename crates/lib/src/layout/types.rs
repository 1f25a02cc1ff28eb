use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors raised while resolving or assigning output directories.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
  #[error("invalid path {}: {reason}", .path.display())]
  InvalidPath { path: PathBuf, reason: String },

  #[error("duplicate subproject name: {0}")]
  DuplicateProjectName(String),

  #[error("invalid project name {name:?}: {reason}")]
  InvalidProjectName { name: String, reason: String },

  #[error(
    "project {project} already has build directory {}, refusing to reassign it to {}",
    .existing.display(),
    .requested.display()
  )]
  ConflictingAssignment {
    project: String,
    existing: PathBuf,
    requested: PathBuf,
  },
}

/// The shared directory every project's build output is placed under.
///
/// Only [`resolve_root_output_base`](crate::paths::resolve_root_output_base)
/// produces one, so the path is always absolute and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OutputBase(PathBuf);

impl OutputBase {
  pub(crate) fn new_unchecked(path: PathBuf) -> Self {
    Self(path)
  }

  pub fn as_path(&self) -> &Path {
    &self.0
  }
}

impl AsRef<Path> for OutputBase {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for OutputBase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

/// Which kind of project a path is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResolution<'a> {
  /// The root project owns the output base itself.
  Root,
  /// A subproject gets `base / name`.
  Subproject(&'a str),
}

impl PathResolution<'_> {
  pub fn resolve(&self, base: &OutputBase) -> PathBuf {
    match self {
      PathResolution::Root => base.as_path().to_path_buf(),
      PathResolution::Subproject(name) => base.as_path().join(name),
    }
  }
}
