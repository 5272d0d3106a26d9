//! Common test utilities for Stagehand integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test project for integration tests: a workspace with a runtime store,
/// a package index, a payload tree, a manifest, and a build file.
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new empty test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with a standard fixture set: one runtime
    /// (python-3.11.9 backed by /bin/sh), a small index, a payload with a
    /// main.py, and a default build file.
    pub fn with_fixtures() -> Self {
        let project = Self::new();
        project.install_runtime("python-3.11.9", "/bin/sh");
        project.publish("redis", "4.6.0");
        project.publish("redis", "5.0.1");
        project.publish("pytz", "2023.3");
        project.write_file("src/main.py", "exit 0\n");
        project.write_file("requirements.txt", "redis>=5.0\npytz\n");
        project.write_default_build_file();
        project
    }

    /// Install a runtime into the project's runtime store
    pub fn install_runtime(&self, name: &str, interpreter: &str) {
        let root = self.path.join("runtimes").join(name);
        std::fs::create_dir_all(&root).expect("Failed to create runtime directory");
        std::fs::write(
            root.join("runtime.yaml"),
            format!("interpreter: {interpreter}\n"),
        )
        .expect("Failed to write runtime descriptor");
    }

    /// Publish a package version into the project's index
    pub fn publish(&self, name: &str, version: &str) {
        let dir = self.path.join("index").join(name).join(version);
        std::fs::create_dir_all(&dir).expect("Failed to create package directory");
        std::fs::write(dir.join("PKG-INFO"), format!("{name} {version}\n"))
            .expect("Failed to write package contents");
    }

    /// Write the default build file
    pub fn write_default_build_file(&self) {
        self.write_file(
            "stagehand.yaml",
            "runtime: python-3.11.9\n\
             manifest: requirements.txt\n\
             payload: ./src\n\
             index: ./index\n\
             port: 8000\n\
             entrypoint: main.py\n",
        );
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Path to the project's runtime store
    pub fn runtimes_dir(&self) -> PathBuf {
        self.path.join("runtimes")
    }

    /// Path to the built image directory
    pub fn image_dir(&self) -> PathBuf {
        self.path.join("image")
    }
}
