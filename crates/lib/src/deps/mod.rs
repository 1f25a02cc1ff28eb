//! Repository and classpath declarations.

mod types;

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use tracing::warn;

pub use types::*;

pub fn default_repositories() -> Vec<Repository> {
  vec![Repository::Google, Repository::MavenCentral]
}

pub fn default_classpath() -> Vec<Coordinate> {
  vec![Coordinate::new("com.google.gms", "google-services", "4.4.2")]
}

/// Drop repeated entries, keeping the first occurrence of each.
fn dedup<T: Clone + Eq + Hash + Display>(items: Vec<T>, kind: &str) -> Vec<T> {
  let mut seen = HashSet::new();
  items
    .into_iter()
    .filter(|item| {
      let fresh = seen.insert(item.clone());
      if !fresh {
        warn!(kind, entry = %item, "ignoring duplicate declaration");
      }
      fresh
    })
    .collect()
}

pub fn dedup_repositories(repositories: Vec<Repository>) -> Vec<Repository> {
  dedup(repositories, "repository")
}

pub fn dedup_classpath(classpath: Vec<Coordinate>) -> Vec<Coordinate> {
  dedup(classpath, "classpath")
}

impl Declarations {
  /// Build the declarations handed to the engine.
  ///
  /// # Errors
  ///
  /// - `EmptyClasspath` if no build-tool dependency is declared
  /// - `NoRepositories` if there is nowhere to resolve the classpath from
  pub fn new(
    buildscript_repositories: Vec<Repository>,
    classpath: Vec<Coordinate>,
    repositories: Vec<Repository>,
  ) -> Result<Self, DeclarationError> {
    if classpath.is_empty() {
      return Err(DeclarationError::EmptyClasspath);
    }
    if buildscript_repositories.is_empty() {
      return Err(DeclarationError::NoRepositories);
    }

    Ok(Self {
      buildscript_repositories: dedup_repositories(buildscript_repositories),
      classpath: dedup_classpath(classpath),
      repositories: dedup_repositories(repositories),
    })
  }
}

impl Default for Declarations {
  fn default() -> Self {
    Self {
      buildscript_repositories: default_repositories(),
      classpath: default_classpath(),
      repositories: default_repositories(),
    }
  }
}
