//! The configuration step run before any build task executes.
//!
//! [`configure`] threads an explicit [`LayoutConfig`] through path resolution,
//! output assignment, evaluation ordering and task registration. Any error
//! aborts the whole step; there is no partially configured result.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::cleanup::register_cleanup;
use crate::config::{ConfigError, LayoutConfig};
use crate::consts::CLEAN_TASK;
use crate::deps::{DeclarationError, Declarations};
use crate::layout::{LayoutError, OutputBase, assign_project_output_dirs};
use crate::paths::resolve_root_output_base;
use crate::project::{ProjectError, ProjectTree, evaluation_order};
use crate::tasks::{Task, TaskError, TaskRegistry};

#[derive(Debug, Error)]
pub enum ConfigureError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Declaration(#[from] DeclarationError),

  #[error(transparent)]
  Layout(#[from] LayoutError),

  #[error(transparent)]
  Project(#[from] ProjectError),

  #[error(transparent)]
  Task(#[from] TaskError),
}

/// Everything handed to the build engine once configuration succeeds.
#[derive(Debug)]
pub struct Configuration {
  pub output_base: OutputBase,
  /// Projects with their output directories assigned.
  pub tree: ProjectTree,
  /// Subproject names in evaluation order.
  pub evaluation_order: Vec<String>,
  pub tasks: TaskRegistry,
  pub declarations: Declarations,
}

pub fn configure(config: &LayoutConfig, current_root_dir: &Path) -> Result<Configuration, ConfigureError> {
  let declarations = config.declarations()?;
  let mut tree = config.project_tree();

  let output_base = resolve_root_output_base(current_root_dir, &config.output_offset)?;
  assign_project_output_dirs(&mut tree, &output_base)?;
  let evaluation_order = evaluation_order(&tree, config.evaluation_anchor.as_deref())?;

  let mut tasks = TaskRegistry::new();
  tasks.register(CLEAN_TASK, Task::Delete(register_cleanup(&output_base)))?;

  info!(
    root = %tree.root.name,
    base = %output_base,
    subprojects = tree.subprojects.len(),
    classpath = declarations.classpath.len(),
    "build configured"
  );

  Ok(Configuration {
    output_base,
    tree,
    evaluation_order,
    tasks,
    declarations,
  })
}

/// Load a JSON config, apply environment overrides, then [`configure`].
pub fn configure_from_file(config_path: &Path, current_root_dir: &Path) -> Result<Configuration, ConfigureError> {
  let config = LayoutConfig::load(config_path)?.with_env_overrides();
  configure(&config, current_root_dir)
}
