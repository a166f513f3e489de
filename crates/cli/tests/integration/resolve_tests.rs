use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn resolve_native_build() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "debian-10", "libvirt"])
    .assert()
    .success()
    .stdout(predicate::str::contains("packaging_command: apt-get"))
    .stdout(predicate::str::contains("    libglib2.0-dev\n"))
    .stdout(predicate::str::contains("    python3-pip\n"))
    .stdout(predicate::str::contains("pypi_pkgs:\n    meson\n"))
    .stdout(predicate::str::contains("cross_pkgs").not());
}

#[test]
fn resolve_debian_cross_build() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "debian-10", "libvirt", "-x", "aarch64"])
    .assert()
    .success()
    .stdout(predicate::str::contains("cross_deb_arch: arm64"))
    .stdout(predicate::str::contains(
      "cross_pkgs:\n    gcc-aarch64-linux-gnu\n    libglib2.0-dev:arm64\n",
    ));
}

#[test]
fn resolve_fedora_mingw_build_as_json() {
  let env = TestEnv::from_fixture();

  let output = env
    .depmap_cmd()
    .args(["resolve", "fedora-35", "libvirt", "--cross-arch", "mingw64", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["cross"]["abi"], "x86_64-w64-mingw32");
  assert_eq!(
    json["cross_pkgs"],
    serde_json::json!(["mingw64-gcc", "mingw64-glib2"])
  );
  assert_eq!(json["pkgs"], serde_json::json!(["git", "make", "meson"]));
}

#[test]
fn resolve_rpm_foreign_without_target_name_fails() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "fedora-35", "libfoo", "-x", "mingw64"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no mapping for package 'libfoo'"));
}

#[test]
fn resolve_requires_a_single_host() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "all", "libvirt"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected exactly one host"));
}

#[test]
fn resolve_rejects_unsupported_cross_target() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "debian-10", "libvirt", "-x", "mingw64"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot cross compile for mingw64 on Debian"));
}

#[test]
fn resolve_rejects_unknown_arch() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "debian-10", "libvirt", "-x", "sparc64"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown architecture: sparc64"));
}

#[test]
fn resolve_rejects_obsolete_mingw_project_syntax() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "fedora-35", "libvirt+mingw64"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("obsolete project syntax"));
}

#[test]
fn resolve_skips_packages_in_cross_builds() {
  let env = TestEnv::from_fixture();

  env
    .depmap_cmd()
    .args(["resolve", "debian-10", "debugging", "-x", "arm64"])
    .assert()
    .success()
    .stdout(predicate::str::contains("valgrind").not());
}
