//! Package index access and dependency resolution
//!
//! The index is a directory tree of published package versions:
//!
//! ```text
//! <index>/
//! ├── fastapi/
//! │   ├── 0.103.2/        # package contents
//! │   └── 0.104.1/
//! └── redis/
//!     └── 5.0.1/
//! ```
//!
//! Resolution picks, for each manifest entry, the highest published version
//! satisfying every constraint. Any unresolvable entry aborts the build
//! before later bootstrap steps run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StagehandError};
use crate::manifest::version::Version;
use crate::manifest::{Dependency, Manifest};

/// A manifest entry resolved against the index
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub name: String,
    pub version: Version,
    /// Directory holding this version's contents in the index
    pub source_dir: PathBuf,
}

/// A local package index directory
#[derive(Debug)]
pub struct PackageIndex {
    root: PathBuf,
}

impl PackageIndex {
    /// Open a package index, failing if the directory is not reachable
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(StagehandError::IndexUnavailable {
                path: root.display().to_string(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// List published versions of a package, sorted ascending
    pub fn available_versions(&self, name: &str) -> Result<Vec<Version>> {
        let package_dir = self.root.join(name);
        if !package_dir.is_dir() {
            return Err(StagehandError::PackageNotFound {
                name: name.to_string(),
            });
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&package_dir).map_err(|e| StagehandError::FileReadFailed {
            path: package_dir.display().to_string(),
            reason: e.to_string(),
        })? {
            let entry = entry.map_err(StagehandError::from)?;
            if !entry.path().is_dir() {
                continue;
            }
            // Non-version entries in a package directory are index corruption
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            versions.push(dir_name.parse::<Version>()?);
        }

        versions.sort();
        Ok(versions)
    }

    /// Resolve one dependency to the highest satisfying published version
    pub fn resolve(&self, dep: &Dependency) -> Result<ResolvedPackage> {
        let available = self.available_versions(&dep.name)?;

        let best = available
            .iter()
            .rev()
            .find(|v| dep.constraints.iter().all(|c| c.matches(v)));

        match best {
            Some(version) => Ok(ResolvedPackage {
                name: dep.name.clone(),
                version: version.clone(),
                source_dir: self.root.join(&dep.name).join(version.to_string()),
            }),
            None => Err(StagehandError::UnsatisfiableConstraint {
                name: dep.name.clone(),
                requirement: dep.requirement(),
                available: render_versions(&available),
            }),
        }
    }

    /// Resolve every manifest entry in declaration order
    pub fn resolve_all(&self, manifest: &Manifest) -> Result<Vec<ResolvedPackage>> {
        manifest
            .dependencies
            .iter()
            .map(|dep| self.resolve(dep))
            .collect()
    }
}

fn render_versions(versions: &[Version]) -> String {
    if versions.is_empty() {
        "none".to_string()
    } else {
        versions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
