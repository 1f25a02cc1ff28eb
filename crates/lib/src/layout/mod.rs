//! Output directory layout.
//!
//! Every project's build output is relocated beneath one [`OutputBase`]:
//!
//! ```text
//! <base>/              # root project
//! ├── app/             # subproject "app"
//! └── core/            # subproject "core"
//! ```
//!
//! Each subproject directory depends only on the base and the subproject's
//! own name, so assignment order among siblings never matters.

mod types;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

pub use types::*;

use crate::project::{Project, ProjectTree};

/// Output directory for the subproject `name` beneath `base`.
pub fn project_output_dir(base: &OutputBase, name: &str) -> PathBuf {
  PathResolution::Subproject(name).resolve(base)
}

/// Check that `name` is usable as a single directory name under the output base.
pub fn validate_project_name(name: &str) -> Result<(), LayoutError> {
  let invalid = |reason: &str| LayoutError::InvalidProjectName {
    name: name.to_string(),
    reason: reason.to_string(),
  };

  if name.is_empty() {
    return Err(invalid("name is empty"));
  }

  let mut components = Path::new(name).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(part)), None) if part == name => Ok(()),
    (Some(Component::CurDir | Component::ParentDir), None) => Err(invalid("name is a relative path marker")),
    _ => Err(invalid("name must be a single path component")),
  }
}

/// Reject trees whose subproject names are invalid or collide.
///
/// The root project's name never becomes a path segment, so only subprojects
/// are checked.
pub fn validate_tree(tree: &ProjectTree) -> Result<(), LayoutError> {
  let mut seen = HashSet::new();
  for project in &tree.subprojects {
    validate_project_name(&project.name)?;
    if !seen.insert(project.name.as_str()) {
      return Err(LayoutError::DuplicateProjectName(project.name.clone()));
    }
  }
  Ok(())
}

/// Assign every project in `tree` its output directory beneath `base`.
///
/// - The root project gets `base`
/// - Each subproject gets `base / name`
///
/// The whole tree is validated before anything is assigned, so on error the
/// tree is left untouched. Calling this again with the same base is a no-op.
///
/// # Errors
///
/// - `InvalidProjectName` / `DuplicateProjectName` for bad subproject names
/// - `ConflictingAssignment` if a project already has a different directory
pub fn assign_project_output_dirs(tree: &mut ProjectTree, base: &OutputBase) -> Result<(), LayoutError> {
  validate_tree(tree)?;

  let root_dir = PathResolution::Root.resolve(base);
  check_assignment(&tree.root, &root_dir)?;
  let planned: Vec<PathBuf> = tree
    .subprojects
    .iter()
    .map(|project| {
      let dir = project_output_dir(base, &project.name);
      check_assignment(project, &dir).map(|()| dir)
    })
    .collect::<Result<_, _>>()?;

  tree.root.build_dir = Some(root_dir);
  for (project, dir) in tree.subprojects.iter_mut().zip(planned) {
    debug!(project = %project.name, dir = %dir.display(), "assigned build directory");
    project.build_dir = Some(dir);
  }

  info!(base = %base, subprojects = tree.subprojects.len(), "assigned project output directories");
  Ok(())
}

fn check_assignment(project: &Project, requested: &Path) -> Result<(), LayoutError> {
  match project.build_dir() {
    Some(existing) if existing != requested => Err(LayoutError::ConflictingAssignment {
      project: project.name.clone(),
      existing: existing.to_path_buf(),
      requested: requested.to_path_buf(),
    }),
    _ => Ok(()),
  }
}
