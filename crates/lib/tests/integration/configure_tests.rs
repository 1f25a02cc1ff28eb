use std::collections::HashSet;

use outbase_lib::config::LayoutConfig;
use outbase_lib::consts::{CLEAN_TASK, OUTPUT_OFFSET_ENV};
use outbase_lib::deps::{Coordinate, Repository};
use outbase_lib::layout::LayoutError;
use outbase_lib::{ConfigureError, configure, configure_from_file};
use serial_test::serial;

use super::common::TestEnv;

#[test]
fn every_project_lands_under_the_shared_base() {
  let env = TestEnv::new();
  let config = LayoutConfig::default().with_subprojects(["app", "core", "feature"]);

  let configured = configure(&config, &env.project_dir()).unwrap();

  assert_eq!(configured.output_base.as_path(), env.default_base());
  assert_eq!(configured.tree.root.build_dir(), Some(env.default_base().as_path()));
  for name in ["app", "core", "feature"] {
    let project = configured.tree.subproject(name).unwrap();
    assert_eq!(project.build_dir(), Some(env.default_base().join(name).as_path()));
  }

  let dirs: HashSet<_> = configured.tree.projects().filter_map(|p| p.build_dir()).collect();
  assert_eq!(dirs.len(), 4);
}

#[test]
fn configuring_twice_is_identical() {
  let env = TestEnv::new();
  let config = LayoutConfig::default().with_subprojects(["app", "core"]);

  let first = configure(&config, &env.project_dir()).unwrap();
  let second = configure(&config, &env.project_dir()).unwrap();

  assert_eq!(first.output_base, second.output_base);
  assert_eq!(first.tree, second.tree);
  assert_eq!(first.evaluation_order, second.evaluation_order);
}

#[test]
fn configuring_touches_no_files() {
  let env = TestEnv::new();
  let config = LayoutConfig::default().with_subprojects(["app"]);

  configure(&config, &env.project_dir()).unwrap();

  assert!(!env.default_base().exists());
}

#[test]
fn clean_task_removes_outputs_and_is_repeatable() {
  let env = TestEnv::new();
  let config = LayoutConfig::default().with_subprojects(["app", "core"]);
  let configured = configure(&config, &env.project_dir()).unwrap();

  let app_dir = configured.tree.subproject("app").unwrap().build_dir().unwrap().to_path_buf();
  env.write_file(&app_dir.join("outputs/apk/app-debug.apk"), "apk");
  env.write_file(&env.default_base().join("reports/lint.html"), "<html/>");

  configured.tasks.run(CLEAN_TASK).unwrap();
  assert!(!env.default_base().exists());
  assert!(env.project_dir().exists());

  configured.tasks.run(CLEAN_TASK).unwrap();
}

#[test]
fn duplicate_app_subprojects_are_rejected() {
  let env = TestEnv::new();
  let config = LayoutConfig::default().with_subprojects(["app", "app"]);

  let err = configure(&config, &env.project_dir()).unwrap_err();
  assert!(matches!(err, ConfigureError::Layout(LayoutError::DuplicateProjectName(_))));
}

#[test]
#[serial]
fn loads_config_file_with_custom_declarations() {
  let env = TestEnv::new();
  let config_path = env.root().join("layout.json");
  env.write_file(
    &config_path,
    r#"{
      "output_offset": "../out",
      "root_project": "android",
      "subprojects": ["core", { "name": "app", "depends_on": ["core"] }],
      "evaluation_anchor": null,
      "buildscript_repositories": ["mavenCentral", { "maven": { "url": "https://maven.example.com/" } }],
      "classpath": ["com.android.tools.build:gradle:8.5.0"]
    }"#,
  );

  let configured = temp_env::with_var(OUTPUT_OFFSET_ENV, None::<&str>, || {
    configure_from_file(&config_path, &env.project_dir()).unwrap()
  });

  assert_eq!(configured.output_base.as_path(), env.root().join("checkout").join("out"));
  assert_eq!(configured.evaluation_order, vec!["core", "app"]);
  assert_eq!(
    configured.declarations.buildscript_repositories,
    vec![
      Repository::MavenCentral,
      Repository::Maven {
        url: "https://maven.example.com/".to_string()
      }
    ]
  );
  assert_eq!(
    configured.declarations.classpath,
    vec![Coordinate::new("com.android.tools.build", "gradle", "8.5.0")]
  );
  assert_eq!(configured.declarations.repositories, vec![Repository::Google, Repository::MavenCentral]);
}

#[test]
#[serial]
fn env_override_relocates_output_base() {
  let env = TestEnv::new();
  let config_path = env.root().join("layout.json");
  env.write_file(&config_path, r#"{ "subprojects": ["app"] }"#);

  let configured = temp_env::with_var(OUTPUT_OFFSET_ENV, Some("../../shared"), || {
    configure_from_file(&config_path, &env.project_dir()).unwrap()
  });

  assert_eq!(configured.output_base.as_path(), env.root().join("shared"));
  assert_eq!(
    configured.tree.subproject("app").unwrap().build_dir(),
    Some(env.root().join("shared").join("app").as_path())
  );
}
