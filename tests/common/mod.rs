//! Common test utilities for osgirun integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch project with bundles, a fake framework jar and a local repository
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp directory");
        let project = Self { temp, path };
        project.write_file("framework/framework.jar", "PK");
        std::fs::create_dir_all(project.path.join("repo")).expect("Failed to create repository");
        project
    }

    /// Write a file, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Write a fake bundle jar
    pub fn bundle(&self, path: &str) -> PathBuf {
        self.write_file(path, "PK\u{3}\u{4}")
    }

    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Options isolating a launch from the user's machine
    #[allow(dead_code)]
    pub fn launch_options(&self) -> Vec<String> {
        vec![
            "--console".to_string(),
            "false".to_string(),
            "--framework-jar".to_string(),
            display(&self.path.join("framework/framework.jar")),
            "--local-repository".to_string(),
            display(&self.path.join("repo")),
            "-d".to_string(),
            display(&self.path.join("runner")),
        ]
    }

    /// osgirun running inside the project with a clean `OSGIRUN_*` environment
    pub fn cmd(&self) -> Command {
        let mut cmd = osgirun_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

/// The osgirun binary without inherited `OSGIRUN_*` variables
#[allow(deprecated)]
pub fn osgirun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("osgirun").expect("osgirun binary");
    for (name, _) in std::env::vars() {
        if name.starts_with("OSGIRUN_") {
            cmd.env_remove(name);
        }
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn display(path: &Path) -> String {
    path.display().to_string()
}
