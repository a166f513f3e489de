use std::collections::BTreeSet;

use depmap_lib::ContextError;
use depmap_lib::resolve::{MissingContext, ResolveError};

use super::common::DataDir;

fn names(set: &BTreeSet<String>) -> Vec<&str> {
  set.iter().map(String::as_str).collect()
}

#[test]
fn debian_cross_build_suffixes_foreign_packages() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("debian-10", "libfoo", Some("aarch64")).unwrap();

  assert_eq!(
    names(varmap.cross_pkgs()),
    ["gcc-aarch64-linux-gnu", "libfoo-dev:arm64"]
  );
  assert_eq!(names(varmap.pkgs()), ["make", "pkg-config"]);
  assert_eq!(names(varmap.mappings()), ["foolib", "gcc", "make", "pkg-config"]);
}

#[test]
fn rpm_cross_build_does_not_reuse_native_names() {
  let ctx = DataDir::sample().load();
  let err = ctx.varmap("fedora-35", "libfoo", Some("mingw64")).unwrap_err();

  assert!(matches!(
    err,
    ContextError::Resolve(ResolveError::MissingMapping {
      ref package,
      context: MissingContext::Foreign,
    }) if package == "foolib"
  ));
}

#[test]
fn native_build_ignores_cross_policy() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("fedora-35", "libfoo", None).unwrap();

  assert_eq!(names(varmap.pkgs()), ["foolib-devel", "gcc", "make", "pkg-config"]);
  assert!(varmap.cross_pkgs().is_empty());
  assert!(varmap.cross().is_none());
}

#[test]
fn pypi_fallback_adds_pip() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("debian-10", "docs", None).unwrap();

  assert_eq!(names(varmap.pypi_pkgs()), ["meson"]);
  assert_eq!(names(varmap.pkgs()), ["make", "python3-pip"]);
}

#[test]
fn native_package_wins_over_pypi() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("fedora-35", "docs", None).unwrap();

  assert_eq!(names(varmap.pkgs()), ["make", "meson"]);
  assert!(varmap.pypi_pkgs().is_empty());
}

#[test]
fn cpan_fallback_adds_cpanminus() {
  let ctx = DataDir::sample().load();
  let varmap = ctx.varmap("fedora-35", "perl-bindings", None).unwrap();

  assert_eq!(names(varmap.cpan_pkgs()), ["XML::LibXML"]);
  assert_eq!(names(varmap.pkgs()), ["cpanminus", "make"]);
}

#[test]
fn skipped_packages_vanish_from_cross_builds() {
  let ctx = DataDir::sample().load();

  let cross = ctx.varmap("debian-10", "debugging", Some("arm64")).unwrap();
  assert!(!cross.pkgs().contains("valgrind"));
  assert!(!cross.mappings().contains("valgrind"));

  let native = ctx.varmap("debian-10", "debugging", None).unwrap();
  assert!(native.pkgs().contains("valgrind"));
}

#[test]
fn same_inputs_give_same_varmap() {
  let ctx = DataDir::sample().load();
  let first = ctx.varmap("debian-10", "all", Some("aarch64")).unwrap();
  let second = ctx.varmap("debian-10", "all", Some("aarch64")).unwrap();
  assert_eq!(first, second);
}
