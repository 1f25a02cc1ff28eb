//! Shared test helpers for library integration tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Isolated checkout with a root project two levels below the temp dir.
///
/// ```text
/// <temp>/
/// ├── build/              # default output base
/// └── checkout/
///     └── android/        # root project
/// ```
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("checkout").join("android")).unwrap();
    Self { temp }
  }

  /// Canonical temp root, so paths compare equal on every platform.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn project_dir(&self) -> PathBuf {
    self.root().join("checkout").join("android")
  }

  pub fn default_base(&self) -> PathBuf {
    self.root().join("build")
  }

  /// Write a file, creating parent directories.
  pub fn write_file(&self, path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
  }
}
