use muxytail_core::conf::{BuildOptions, RuntimeSettings, load_config};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a config file and the logs it follows.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn log(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn write_log(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.log(name);
        fs::write(&path, contents).expect("failed to write log");
        path
    }

    pub fn append(&self, name: &str, text: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.log(name))
            .expect("failed to open log");
        file.write_all(text.as_bytes()).expect("failed to append");
    }

    pub fn write_config(&self, hcl: &str) -> PathBuf {
        let path = self.path().join("muxytail.hcl");
        fs::write(&path, hcl).expect("failed to write config");
        path
    }

    /// Writes `hcl` and compiles it the way the binary does.
    pub fn settings(&self, hcl: &str, options: BuildOptions) -> RuntimeSettings {
        let path = self.write_config(hcl);
        let cfg = load_config(&path).expect("config should load");
        RuntimeSettings::build(&cfg, self.path(), options).expect("config should build")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
