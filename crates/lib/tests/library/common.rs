//! Shared helpers for library integration tests.

use std::fs;
use std::path::Path;

use depmap_lib::Context;
use tempfile::TempDir;

pub const MAPPINGS: &str = r#"
mappings:
  gcc:
    default: gcc
    aarch64-deb: gcc-aarch64-linux-gnu
    mingw64-rpm: mingw64-gcc
    cross-policy-default: foreign
  make:
    default: make
  foolib:
    default: libfoo-dev
    rpm: foolib-devel
    cross-policy-default: foreign
  meson:
    default: meson
    Debian10:
  python3-pip:
    default: python3-pip
  cpanminus:
    default: cpanminus
  valgrind:
    default: valgrind
    cross-policy-default: skip
  pkg-config:
    default: pkg-config
    cross-policy-deb: native

pypi_mappings:
  meson:
    default: meson

cpan_mappings:
  perl-xml-libxml:
    default: XML::LibXML
"#;

pub const DEBIAN_10: &str = r#"
os:
  name: Debian
  version: 10
packaging:
  format: deb
  command: apt-get
arch: x86_64
paths:
  ccache: /usr/bin/ccache
  make: /usr/bin/make
  python: /usr/bin/python3
containers:
  base: docker.io/library/debian:10-slim
"#;

pub const FEDORA_35: &str = r#"
os:
  name: Fedora
  version: 35
packaging:
  format: rpm
  command: dnf
arch: x86_64
paths:
  make: /usr/bin/make
"#;

/// A data directory in a temporary location.
pub struct DataDir {
  pub temp: TempDir,
}

impl DataDir {
  /// Two hosts and a handful of projects.
  pub fn sample() -> Self {
    let data = Self::empty();
    data.write("mappings.yml", MAPPINGS);
    data.write("hosts/debian-10.yml", DEBIAN_10);
    data.write("hosts/fedora-35.yml", FEDORA_35);
    data.project("base", &["make"]);
    data.project("python-pip", &["python3-pip"]);
    data.project("perl-cpan", &["cpanminus"]);
    data.project("libfoo", &["gcc", "foolib", "pkg-config"]);
    data.project("docs", &["meson"]);
    data.project("perl-bindings", &["perl-xml-libxml"]);
    data.project("debugging", &["valgrind"]);
    data
  }

  /// The expected layout without any content.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("hosts")).unwrap();
    fs::create_dir_all(temp.path().join("projects")).unwrap();
    Self { temp }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the data directory.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
  }

  pub fn project(&self, name: &str, packages: &[&str]) {
    let mut content = String::from("packages:\n");
    for package in packages {
      content.push_str(&format!("  - {}\n", package));
    }
    self.write(&format!("projects/{}.yml", name), &content);
  }

  pub fn load(&self) -> Context {
    Context::load(self.path()).unwrap()
  }
}
