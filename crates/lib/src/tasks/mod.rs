//! Named tasks handed to the build engine.
//!
//! Registered tasks never run on their own; the engine runs them by name on
//! explicit request.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cleanup::{CleanupAction, CleanupError, CleanupReport};

#[derive(Debug, Error)]
pub enum TaskError {
  #[error("unknown task: {0}")]
  UnknownTask(String),

  #[error("task already registered: {0}")]
  DuplicateTask(String),

  #[error("task {name} failed: {source}")]
  Failed {
    name: String,
    #[source]
    source: CleanupError,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
  /// Recursively delete a path.
  Delete(CleanupAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TaskOutcome {
  Deleted(CleanupReport),
}

#[derive(Debug, Default, Clone)]
pub struct TaskRegistry {
  tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: &str, task: Task) -> Result<(), TaskError> {
    if self.tasks.contains_key(name) {
      return Err(TaskError::DuplicateTask(name.to_string()));
    }
    debug!(task = name, "registered task");
    self.tasks.insert(name.to_string(), task);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Task> {
    self.tasks.get(name)
  }

  /// Registered task names, sorted.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.tasks.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Run the task registered under `name`. Failures are not retried.
  pub fn run(&self, name: &str) -> Result<TaskOutcome, TaskError> {
    let task = self.get(name).ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;

    info!(task = name, "running task");
    match task {
      Task::Delete(action) => action
        .run()
        .map(TaskOutcome::Deleted)
        .map_err(|source| TaskError::Failed {
          name: name.to_string(),
          source,
        }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn duplicate_registration_is_rejected() {
    let mut registry = TaskRegistry::new();
    registry.register("clean", Task::Delete(CleanupAction::new("/tmp/a"))).unwrap();

    let err = registry
      .register("clean", Task::Delete(CleanupAction::new("/tmp/b")))
      .unwrap_err();
    assert!(matches!(err, TaskError::DuplicateTask(ref name) if name == "clean"));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn unknown_task_is_an_error() {
    let registry = TaskRegistry::new();
    assert!(registry.is_empty());
    assert!(matches!(registry.run("assemble"), Err(TaskError::UnknownTask(_))));
  }

  #[test]
  fn runs_delete_task() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("build");
    std::fs::create_dir_all(target.join("app")).unwrap();

    let mut registry = TaskRegistry::new();
    registry.register("clean", Task::Delete(CleanupAction::new(&target))).unwrap();

    let TaskOutcome::Deleted(report) = registry.run("clean").unwrap();
    assert!(report.existed);
    assert!(!target.exists());
  }

  #[test]
  #[cfg(unix)]
  fn cleanup_failure_surfaces_as_failed_task() {
    let mut registry = TaskRegistry::new();
    registry.register("clean", Task::Delete(CleanupAction::new("/"))).unwrap();

    let err = registry.run("clean").unwrap_err();
    assert!(matches!(err, TaskError::Failed { ref name, .. } if name == "clean"));
  }

  #[test]
  fn names_are_sorted() {
    let mut registry = TaskRegistry::new();
    registry.register("clean", Task::Delete(CleanupAction::new("/tmp/x"))).unwrap();
    registry.register("allclean", Task::Delete(CleanupAction::new("/tmp/y"))).unwrap();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["allclean", "clean"]);
  }
}
