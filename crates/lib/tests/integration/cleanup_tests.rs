use outbase_lib::cleanup::register_cleanup;
use outbase_lib::paths::resolve_root_output_base;

use super::common::TestEnv;

#[test]
fn cleanup_of_missing_base_succeeds() {
  let env = TestEnv::new();
  let base = resolve_root_output_base(&env.project_dir(), "../../build").unwrap();

  let action = register_cleanup(&base);
  assert!(!action.run().unwrap().existed);
  assert!(!action.run().unwrap().existed);
}

#[test]
fn cleanup_is_deferred_until_run() {
  let env = TestEnv::new();
  let base = resolve_root_output_base(&env.project_dir(), "../../build").unwrap();
  env.write_file(&base.as_path().join("app/tmp/kotlin.txt"), "k");

  let action = register_cleanup(&base);
  assert!(base.as_path().exists());

  let report = action.run().unwrap();
  assert!(report.existed);
  assert_eq!(report.bytes_freed, 1);
  assert!(!base.as_path().exists());

  // Second run after everything is gone
  assert!(!action.run().unwrap().existed);
}

#[test]
fn cleanup_leaves_siblings_alone() {
  let env = TestEnv::new();
  let base = resolve_root_output_base(&env.project_dir(), "../../build").unwrap();
  env.write_file(&base.as_path().join("app/out.bin"), "x");
  let sibling = env.root().join("build-cache/entry");
  env.write_file(&sibling, "keep");

  register_cleanup(&base).run().unwrap();

  assert!(sibling.exists());
  assert!(env.project_dir().exists());
}
