//! Deferred removal of the shared output base.
//!
//! A [`CleanupAction`] is inert until [`run`](CleanupAction::run) is called.
//! Running it against a missing path succeeds, so it can be re-invoked after a
//! partial failure.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::layout::OutputBase;

#[derive(Debug, Error)]
pub enum CleanupError {
  #[error("refusing to delete filesystem root {}", .0.display())]
  RefuseRoot(PathBuf),

  #[error("failed to delete {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
  pub existed: bool,
  pub entries_removed: usize,
  pub bytes_freed: u64,
}

/// Recursively deletes one path when run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupAction {
  target: PathBuf,
}

/// Produce the cleanup action for an output base. Nothing is deleted yet.
pub fn register_cleanup(root_output_base: &OutputBase) -> CleanupAction {
  CleanupAction::new(root_output_base.as_path())
}

impl CleanupAction {
  pub fn new(target: impl Into<PathBuf>) -> Self {
    Self { target: target.into() }
  }

  pub fn target(&self) -> &Path {
    &self.target
  }

  /// Delete the target and everything beneath it.
  ///
  /// Symlinks are removed, never followed.
  pub fn run(&self) -> Result<CleanupReport, CleanupError> {
    let target = &self.target;

    if target.parent().is_none() {
      return Err(CleanupError::RefuseRoot(target.clone()));
    }

    let metadata = match fs::symlink_metadata(target) {
      Ok(m) => m,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %target.display(), "nothing to clean");
        return Ok(CleanupReport::default());
      }
      Err(source) => {
        return Err(CleanupError::Io {
          path: target.clone(),
          source,
        });
      }
    };

    let mut report = CleanupReport {
      existed: true,
      ..Default::default()
    };

    let result = if metadata.is_dir() {
      let (entries, bytes) = tree_stats(target);
      report.entries_removed = entries;
      report.bytes_freed = bytes;
      fs::remove_dir_all(target)
    } else {
      report.entries_removed = 1;
      report.bytes_freed = if metadata.is_file() { metadata.len() } else { 0 };
      fs::remove_file(target)
    };

    match result {
      Ok(()) => {}
      // Removed concurrently between the stat and the delete
      Err(e) if e.kind() == ErrorKind::NotFound => {}
      Err(source) => {
        return Err(CleanupError::Io {
          path: target.clone(),
          source,
        });
      }
    }

    info!(
      path = %target.display(),
      entries_removed = report.entries_removed,
      bytes_freed = report.bytes_freed,
      "cleaned output base"
    );
    Ok(report)
  }
}

fn tree_stats(path: &Path) -> (usize, u64) {
  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .fold((0, 0), |(entries, bytes), entry| {
      let size = if entry.file_type().is_file() {
        entry.metadata().map(|m| m.len()).unwrap_or(0)
      } else {
        0
      };
      (entries + 1, bytes + size)
    })
}
