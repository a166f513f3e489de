use depmap_lib::inventory::InventoryError;
use depmap_lib::mappings::MappingError;
use depmap_lib::projects::ProjectError;
use depmap_lib::resolve::ResolveError;
use depmap_lib::{Context, ContextError, Problem};

use super::common::DataDir;

#[test]
fn loads_sample_data_directory() {
  let ctx = DataDir::sample().load();
  assert_eq!(ctx.hosts(), vec!["debian-10", "fedora-35"]);
  assert_eq!(ctx.projects(), vec!["debugging", "docs", "libfoo", "perl-bindings"]);
}

#[test]
fn sample_data_passes_check() {
  assert_eq!(DataDir::sample().load().check(), Vec::<Problem>::new());
}

#[test]
fn check_finds_unmapped_packages() {
  let data = DataDir::sample();
  data.project("broken", &["make", "does-not-exist"]);

  let problems = data.load().check();
  assert_eq!(problems.len(), 1);
  assert_eq!(
    problems[0].to_string(),
    "project 'broken' requires unmapped package 'does-not-exist'"
  );
}

#[test]
fn missing_mappings_file_is_reported() {
  let data = DataDir::empty();
  let err = Context::load(data.path()).unwrap_err();
  assert!(matches!(err, ContextError::Mapping(MappingError::Read { .. })));
}

#[test]
fn malformed_mappings_are_reported() {
  let data = DataDir::empty();
  data.write("mappings.yml", "mappings: [not, a, table]\n");
  let err = Context::load(data.path()).unwrap_err();
  assert!(matches!(err, ContextError::Mapping(MappingError::Parse { .. })));
}

#[test]
fn malformed_host_names_the_host() {
  let data = DataDir::sample();
  data.write("hosts/broken.yml", "os: nope\n");
  match Context::load(data.path()).unwrap_err() {
    ContextError::Inventory(InventoryError::Parse { host, .. }) => assert_eq!(host, "broken"),
    other => panic!("unexpected error: {:?}", other),
  }
}

#[test]
fn malformed_project_names_the_project() {
  let data = DataDir::sample();
  data.write("projects/broken.yml", "packages: 42\n");
  match Context::load(data.path()).unwrap_err() {
    ContextError::Project(ProjectError::Parse { project, .. }) => assert_eq!(project, "broken"),
    other => panic!("unexpected error: {:?}", other),
  }
}

#[test]
fn obsolete_mingw_project_syntax_is_rejected() {
  let ctx = DataDir::sample().load();
  let err = ctx.varmap("fedora-35", "libfoo+mingw64", None).unwrap_err();
  assert!(matches!(err, ContextError::Project(ProjectError::ObsoleteSyntax(_))));
}

#[test]
fn host_pattern_must_select_one_host() {
  let ctx = DataDir::sample().load();
  let err = ctx.varmap("*", "libfoo", None).unwrap_err();
  assert!(matches!(
    err,
    ContextError::Resolve(ResolveError::TooManyHosts { count: 2, .. })
  ));
}

#[test]
fn varmap_serializes_to_json() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("debian-10", "libfoo", Some("aarch64")).unwrap();
  let json = serde_json::to_value(&varmap).unwrap();

  assert_eq!(json["packaging_command"], "apt-get");
  assert_eq!(json["container_base"], "docker.io/library/debian:10-slim");
  assert_eq!(json["cross"]["arch"], "aarch64");
  assert_eq!(json["cross"]["abi"], "aarch64-linux-gnu");
  assert_eq!(json["cross"]["deb_arch"], "arm64");
  assert_eq!(json["paths"]["ccache"], "/usr/bin/ccache");
  let cross_pkgs = json["cross_pkgs"].as_array().unwrap();
  assert!(cross_pkgs.contains(&serde_json::Value::from("libfoo-dev:arm64")));
}
