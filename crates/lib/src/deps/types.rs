use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GOOGLE_REPOSITORY_URL, MAVEN_CENTRAL_REPOSITORY_URL};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
  #[error("invalid dependency coordinate {input:?}: {reason}")]
  InvalidCoordinate { input: String, reason: String },

  #[error("no build-tool classpath dependency declared")]
  EmptyClasspath,

  #[error("classpath dependencies declared without any buildscript repository to resolve them from")]
  NoRepositories,
}

/// A package repository the build engine consults when resolving dependencies.
///
/// Serialized as `"google"`, `"mavenCentral"` or `{ "maven": { "url": "..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Repository {
  Google,
  MavenCentral,
  Maven { url: String },
}

impl Repository {
  /// Identifier the build engine knows the repository by.
  pub fn id(&self) -> &str {
    match self {
      Repository::Google => "google",
      Repository::MavenCentral => "mavenCentral",
      Repository::Maven { url } => url,
    }
  }

  pub fn url(&self) -> &str {
    match self {
      Repository::Google => GOOGLE_REPOSITORY_URL,
      Repository::MavenCentral => MAVEN_CENTRAL_REPOSITORY_URL,
      Repository::Maven { url } => url,
    }
  }
}

impl fmt::Display for Repository {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id())
  }
}

/// A `group:artifact:version` dependency coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
  pub group: String,
  pub artifact: String,
  pub version: String,
}

impl Coordinate {
  pub fn new(group: &str, artifact: &str, version: &str) -> Self {
    Self {
      group: group.to_string(),
      artifact: artifact.to_string(),
      version: version.to_string(),
    }
  }
}

impl FromStr for Coordinate {
  type Err = DeclarationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = |reason: &str| DeclarationError::InvalidCoordinate {
      input: s.to_string(),
      reason: reason.to_string(),
    };

    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    let [group, artifact, version] = parts.as_slice() else {
      return Err(invalid("expected group:artifact:version"));
    };
    if [group, artifact, version].iter().any(|p| p.is_empty()) {
      return Err(invalid("group, artifact and version must be non-empty"));
    }

    Ok(Coordinate::new(group, artifact, version))
  }
}

impl TryFrom<String> for Coordinate {
  type Error = DeclarationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Coordinate> for String {
  fn from(value: Coordinate) -> Self {
    value.to_string()
  }
}

impl fmt::Display for Coordinate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
  }
}

/// Declaration data passed through to the external dependency resolver.
///
/// Nothing here is resolved or fetched; the engine treats these exactly as it
/// would any other repository list and coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declarations {
  /// Repositories for resolving plugin classpath entries.
  pub buildscript_repositories: Vec<Repository>,
  /// Build-tool plugin classpath entries.
  pub classpath: Vec<Coordinate>,
  /// Repositories applied to every project's own dependencies.
  pub repositories: Vec<Repository>,
}
