//! Base runtime store
//!
//! Installed base runtimes live in a store directory, one subdirectory per
//! runtime. Each runtime carries a small descriptor naming its interpreter:
//!
//! ```text
//! <store>/
//! └── python-3.11.9/
//!     ├── runtime.yaml      # interpreter: bin/python3.11
//!     └── bin/...
//! ```
//!
//! A build file pins exactly one runtime name. The pin must match a store
//! entry exactly: the dependency manifest was validated against that version,
//! so a near-miss is still a fatal build-environment error.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, StagehandError};

/// Runtime descriptor filename inside each store entry
pub const RUNTIME_DESCRIPTOR_FILE: &str = "runtime.yaml";

#[derive(Debug, Deserialize)]
struct RuntimeDescriptor {
    /// Interpreter path, absolute or relative to the runtime root
    interpreter: PathBuf,
}

/// A base runtime selected from the store
#[derive(Debug, Clone)]
pub struct BaseRuntime {
    /// Store entry name, e.g. `python-3.11.9`
    pub name: String,
    /// Runtime root directory in the store
    pub root: PathBuf,
    /// Resolved interpreter path
    pub interpreter: PathBuf,
}

/// The runtime store directory
#[derive(Debug)]
pub struct RuntimeStore {
    root: PathBuf,
}

impl RuntimeStore {
    /// Locate the runtime store: an explicit override, or the default under
    /// the user data directory.
    pub fn locate(override_dir: Option<PathBuf>) -> Result<Self> {
        let root = match override_dir {
            Some(dir) => dir,
            None => default_store_dir(),
        };

        if !root.is_dir() {
            return Err(StagehandError::RuntimeStoreNotFound {
                path: root.display().to_string(),
            });
        }

        Ok(Self { root })
    }

    /// List installed runtime names, sorted
    pub fn installed(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| StagehandError::FileReadFailed {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })? {
            let entry = entry.map_err(StagehandError::from)?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Select the runtime matching the pin exactly
    pub fn select(&self, pin: &str) -> Result<BaseRuntime> {
        let runtime_root = self.root.join(pin);
        if !runtime_root.is_dir() {
            return Err(StagehandError::RuntimeUnavailable {
                pin: pin.to_string(),
                available: self.installed()?.join(", "),
            });
        }

        let descriptor_path = runtime_root.join(RUNTIME_DESCRIPTOR_FILE);
        let content =
            fs::read_to_string(&descriptor_path).map_err(|e| {
                StagehandError::RuntimeDescriptorInvalid {
                    runtime: pin.to_string(),
                    reason: format!("{}: {}", descriptor_path.display(), e),
                }
            })?;

        let descriptor: RuntimeDescriptor = serde_yaml::from_str(&content).map_err(|e| {
            StagehandError::RuntimeDescriptorInvalid {
                runtime: pin.to_string(),
                reason: e.to_string(),
            }
        })?;

        let interpreter = if descriptor.interpreter.is_absolute() {
            descriptor.interpreter
        } else {
            runtime_root.join(descriptor.interpreter)
        };

        if !interpreter.is_file() {
            return Err(StagehandError::RuntimeDescriptorInvalid {
                runtime: pin.to_string(),
                reason: format!("interpreter not found: {}", interpreter.display()),
            });
        }

        Ok(BaseRuntime {
            name: pin.to_string(),
            root: runtime_root,
            interpreter,
        })
    }
}

fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stagehand")
        .join("runtimes")
}
