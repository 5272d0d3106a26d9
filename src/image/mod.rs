//! Built image layout and declared configuration (image.json)
//!
//! A built image is a directory:
//!
//! ```text
//! <image>/
//! ├── image.json     # declared configuration
//! └── rootfs/
//!     ├── app/       # application payload
//!     ├── deps/      # installed packages
//!     └── logs/      # provisioned log sink (sibling of app/)
//! ```
//!
//! `image.json` is deterministic: rebuilding from unchanged inputs yields a
//! byte-identical file, and the embedded BLAKE3 digest makes configuration
//! drift detectable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StagehandError};

/// Image configuration filename
pub const IMAGE_CONFIG_FILE: &str = "image.json";

/// Root filesystem subdirectory
pub const ROOTFS_DIR: &str = "rootfs";

/// Payload subdirectory under rootfs
pub const APP_DIR: &str = "app";

/// Installed packages subdirectory under rootfs
pub const DEPS_DIR: &str = "deps";

/// A package installed into the image, with its resolved version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// Declared configuration of a built image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Pinned base runtime name
    pub runtime: String,

    /// Interpreter path recorded at build time
    pub interpreter: String,

    /// Entrypoint command, relative to the app directory
    pub entrypoint: String,

    /// Declared service port; advertised metadata only, never bound here
    pub exposed_port: u16,

    /// Log directory name under rootfs
    pub logs_dir: String,

    /// Installed packages in manifest order
    pub packages: Vec<InstalledPackage>,

    /// BLAKE3 digest over the declared fields above
    pub digest: String,
}

/// The declared fields of an image configuration, before sealing
#[derive(Debug, Clone, Serialize)]
pub struct ImageDeclaration {
    pub runtime: String,
    pub interpreter: String,
    pub entrypoint: String,
    pub exposed_port: u16,
    pub logs_dir: String,
    pub packages: Vec<InstalledPackage>,
}

impl ImageDeclaration {
    /// Seal the declaration into an image configuration with its digest
    pub fn seal(self) -> Result<ImageConfig> {
        let canonical = serde_json::to_string(&self)?;
        let digest = blake3::hash(canonical.as_bytes()).to_hex().to_string();

        Ok(ImageConfig {
            runtime: self.runtime,
            interpreter: self.interpreter,
            entrypoint: self.entrypoint,
            exposed_port: self.exposed_port,
            logs_dir: self.logs_dir,
            packages: self.packages,
            digest,
        })
    }
}

impl ImageConfig {
    /// Write image.json into an image directory
    pub fn save(&self, image_dir: &Path) -> Result<()> {
        let path = image_dir.join(IMAGE_CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, format!("{content}\n")).map_err(|e| StagehandError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load image.json from an image directory
    pub fn load(image_dir: &Path) -> Result<Self> {
        let path = image_dir.join(IMAGE_CONFIG_FILE);
        if !path.is_file() {
            return Err(StagehandError::ImageNotFound {
                path: image_dir.display().to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| StagehandError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| StagehandError::ImageConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Path to an image's rootfs directory
pub fn rootfs_dir(image_dir: &Path) -> PathBuf {
    image_dir.join(ROOTFS_DIR)
}

/// Path to an image's app directory
pub fn app_dir(image_dir: &Path) -> PathBuf {
    rootfs_dir(image_dir).join(APP_DIR)
}

/// Path to an image's installed packages directory
pub fn deps_dir(image_dir: &Path) -> PathBuf {
    rootfs_dir(image_dir).join(DEPS_DIR)
}

/// Path to an image's log directory
pub fn logs_dir(image_dir: &Path, name: &str) -> PathBuf {
    rootfs_dir(image_dir).join(name)
}
