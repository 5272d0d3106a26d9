//! Build file (stagehand.yaml) data structures
//!
//! The build file is the declarative input to `stagehand build`, playing the
//! role of a container build file: it pins the base runtime, names the
//! dependency manifest and package index, points at the application payload,
//! declares the service port, and names the entrypoint.
//!
//! ```yaml
//! runtime: python-3.11.9
//! manifest: requirements.txt
//! payload: .
//! index: ./index
//! port: 8000
//! entrypoint: main.py
//! logs_dir: logs
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StagehandError};

/// Default build file name
pub const BUILD_FILE_NAME: &str = "stagehand.yaml";

/// Parsed build file with paths resolved against the build file's directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildFile {
    /// Pinned base runtime name (must match a runtime store entry exactly)
    pub runtime: String,

    /// Dependency manifest path
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Application payload directory, copied verbatim into the image
    #[serde(default = "default_payload")]
    pub payload: PathBuf,

    /// Package index directory
    pub index: PathBuf,

    /// Declared service port (advertised metadata, never bound by stagehand)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Entrypoint command, relative to the payload root
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    /// Log directory name, provisioned beside the payload in the image
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_payload() -> PathBuf {
    PathBuf::from(".")
}

fn default_port() -> u16 {
    8000
}

fn default_entrypoint() -> String {
    "main.py".to_string()
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

impl BuildFile {
    /// Load a build file and resolve its relative paths against the file's
    /// parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(StagehandError::BuildFileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| StagehandError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut build_file: BuildFile =
            serde_yaml::from_str(&content).map_err(|e| StagehandError::BuildFileParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let context = path.parent().unwrap_or_else(|| Path::new("."));
        build_file.manifest = resolve(context, &build_file.manifest);
        build_file.payload = resolve(context, &build_file.payload);
        build_file.index = resolve(context, &build_file.index);

        build_file.validate()?;
        Ok(build_file)
    }

    /// Validate declared fields
    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(StagehandError::BuildFileInvalid {
                message: "'runtime' must name a pinned base runtime".to_string(),
            });
        }

        if self.port == 0 {
            return Err(StagehandError::BuildFileInvalid {
                message: "'port' must be non-zero".to_string(),
            });
        }

        if self.entrypoint.trim().is_empty() {
            return Err(StagehandError::BuildFileInvalid {
                message: "'entrypoint' must name a command".to_string(),
            });
        }

        if self.logs_dir.is_empty()
            || self.logs_dir.contains('/')
            || self.logs_dir.contains('\\')
            || self.logs_dir == "."
            || self.logs_dir == ".."
        {
            return Err(StagehandError::BuildFileInvalid {
                message: format!("'logs_dir' must be a single directory name: {}", self.logs_dir),
            });
        }

        Ok(())
    }
}

fn resolve(context: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        context.join(path)
    }
}
