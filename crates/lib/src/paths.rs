//! Lexical path resolution for the shared output base.
//!
//! Nothing here touches the filesystem: the output base usually does not exist
//! yet when the build is configured, so `canonicalize` is not an option.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::layout::{LayoutError, OutputBase};

/// Resolve the shared output base from the root project directory and a relative offset.
///
/// - `current_root_dir` must be absolute
/// - Relative offsets are joined onto `current_root_dir`
/// - Absolute offsets ignore `current_root_dir`
/// - `.` is dropped and `..` collapses the preceding component
///
/// # Examples
///
/// ```
/// use outbase_lib::paths::resolve_root_output_base;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// # {
/// let base = resolve_root_output_base(Path::new("/home/user/project/android"), "../../build").unwrap();
/// assert_eq!(base.as_path(), Path::new("/home/user/build"));
/// # }
/// ```
pub fn resolve_root_output_base(current_root_dir: &Path, relative_offset: &str) -> Result<OutputBase, LayoutError> {
  if relative_offset.trim().is_empty() {
    return Err(LayoutError::InvalidPath {
      path: PathBuf::from(relative_offset),
      reason: "output offset is empty".to_string(),
    });
  }

  let root = dunce::simplified(current_root_dir);
  if !root.is_absolute() {
    return Err(LayoutError::InvalidPath {
      path: root.to_path_buf(),
      reason: "root project directory is not absolute".to_string(),
    });
  }

  let joined = root.join(relative_offset);
  let normalized = normalize_path(&joined)?;

  if normalized.parent().is_none() {
    return Err(LayoutError::InvalidPath {
      path: normalized,
      reason: "output base resolves to a filesystem root".to_string(),
    });
  }

  debug!(root = %root.display(), offset = relative_offset, base = %normalized.display(), "resolved output base");
  Ok(OutputBase::new_unchecked(normalized))
}

/// Normalize an absolute path by resolving `.` and `..` without requiring it to exist.
///
/// Unlike a best-effort normalizer this refuses `..` above the root, since the
/// result would silently point somewhere other than what was configured.
pub(crate) fn normalize_path(path: &Path) -> Result<PathBuf, LayoutError> {
  let mut components: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::ParentDir => match components.last() {
        Some(Component::Normal(_)) => {
          components.pop();
        }
        _ => {
          return Err(LayoutError::InvalidPath {
            path: path.to_path_buf(),
            reason: "`..` escapes the filesystem root".to_string(),
          });
        }
      },
      Component::CurDir => {}
      other => components.push(other),
    }
  }

  let normalized: PathBuf = components.iter().collect();
  if !normalized.is_absolute() {
    return Err(LayoutError::InvalidPath {
      path: path.to_path_buf(),
      reason: "path is not absolute".to_string(),
    });
  }

  Ok(normalized)
}
