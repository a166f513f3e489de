use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn check_passes_on_fixture_data() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("no problems found"));
}

#[test]
fn check_reports_unmapped_packages() {
  let env = TestEnv::from_fixture();
  env.write_file("projects/broken.yml", "packages:\n  - nosuchpkg\n");

  env
    .depmap_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("project 'broken' requires unmapped package 'nosuchpkg'"))
    .stderr(predicate::str::contains("1 problem(s) found"));
}

#[test]
fn check_reports_invalid_cross_policy() {
  let env = TestEnv::from_fixture();
  let mappings = std::fs::read_to_string(env.data_path().join("mappings.yml")).unwrap();
  env.write_file(
    "mappings.yml",
    &mappings.replace("cross-policy-default: skip", "cross-policy-default: sometimes"),
  );

  env
    .depmap_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid cross policy 'sometimes'"));
}
