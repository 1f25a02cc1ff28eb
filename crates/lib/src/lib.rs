//! outbase-lib: build-output path coordination for multi-project builds
//!
//! This crate configures an external build engine before any task runs:
//! - `paths`: resolve the shared output base from the root project directory
//! - `layout`: place every project's build output beneath that base
//! - `cleanup` / `tasks`: the deferred `clean` task that removes the base
//! - `deps`: repository and classpath declarations passed through to the engine
//! - `configure`: the single configuration step tying these together

pub mod cleanup;
pub mod config;
pub mod configure;
pub mod consts;
pub mod deps;
pub mod layout;
pub mod paths;
pub mod project;
pub mod tasks;

pub use configure::{Configuration, ConfigureError, configure, configure_from_file};
