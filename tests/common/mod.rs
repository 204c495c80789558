//! Shared helpers for integration tests: a fixture tree plus a shell script
//! standing in for `memsim_app`.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Reads one line, then:
/// - `crash` prints to stderr and exits 1
/// - `noisy` prints to both streams and exits 0
/// - `signal` kills itself with SIGSEGV
/// - anything else is treated as two numbers and their sum is printed
pub const FAKE_MEMSIM: &str = r#"#!/bin/sh
read a b
case "$a" in
  crash) echo segfault >&2; exit 1 ;;
  noisy) echo partial; echo careful >&2 ;;
  signal) kill -SEGV $$ ;;
  *) echo $((a + b)) ;;
esac
"#;

pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new(fixtures: &[(&str, &str)]) -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("tests")).unwrap();
        let ws = Self { root };
        for (name, content) in fixtures {
            ws.add_fixture(name, content);
        }
        ws.install_binary("memsim_app", FAKE_MEMSIM);
        ws
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.path().join("tests")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("outputs")
    }

    pub fn binary(&self) -> PathBuf {
        self.path().join("memsim_app")
    }

    pub fn add_fixture(&self, name: &str, content: &str) {
        fs::write(self.tests_dir().join(name), content).unwrap();
    }

    pub fn install_binary(&self, name: &str, script: &str) {
        let path = self.path().join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name)).unwrap()
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
