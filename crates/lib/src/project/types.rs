use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while ordering project evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
  #[error("project {project} depends on unknown subproject {dependency}")]
  UnknownEvaluationDependency { project: String, dependency: String },

  #[error("evaluation dependencies form a cycle through {0}")]
  EvaluationCycle(String),
}

/// A single build unit.
///
/// `build_dir` starts out unset and is assigned by
/// [`assign_project_output_dirs`](crate::layout::assign_project_output_dirs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub name: String,
  /// Names of sibling subprojects that must be evaluated before this one.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub depends_on: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub build_dir: Option<PathBuf>,
}

impl Project {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      depends_on: Vec::new(),
      build_dir: None,
    }
  }

  pub fn with_depends_on<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.depends_on = deps.into_iter().map(Into::into).collect();
    self
  }

  pub fn build_dir(&self) -> Option<&Path> {
    self.build_dir.as_deref()
  }
}

/// The root project plus its subprojects in declaration order.
///
/// Construction never fails: name checks happen when output directories are
/// assigned, so a tree can be built straight from static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTree {
  pub root: Project,
  pub subprojects: Vec<Project>,
}

impl ProjectTree {
  pub fn new(root: Project, subprojects: Vec<Project>) -> Self {
    Self { root, subprojects }
  }

  /// Build a tree from plain names, with no evaluation dependencies.
  pub fn from_names<I, S>(root: &str, subprojects: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      root: Project::new(root),
      subprojects: subprojects.into_iter().map(Project::new).collect(),
    }
  }

  pub fn subproject(&self, name: &str) -> Option<&Project> {
    self.subprojects.iter().find(|p| p.name == name)
  }

  pub fn subproject_names(&self) -> impl Iterator<Item = &str> {
    self.subprojects.iter().map(|p| p.name.as_str())
  }

  /// Every project in the tree, root first.
  pub fn projects(&self) -> impl Iterator<Item = &Project> {
    std::iter::once(&self.root).chain(self.subprojects.iter())
  }
}
