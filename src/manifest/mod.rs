//! Dependency manifest parsing
//!
//! The manifest is a requirements.txt-style file: one dependency per line,
//! `#` comments and blank lines ignored, and a comma-separated constraint
//! list after the package name (`redis>=5.0,<6.0`). A bare name means any
//! version. The manifest is consumed once at build time and is immutable
//! afterwards; the resolved versions are recorded in the image configuration.

pub mod version;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Result, StagehandError};
use version::Constraint;

/// A single declared dependency: package name plus zero or more constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl Dependency {
    /// Render the constraint list as written in the manifest (`>=1.0,<2.0`),
    /// or `*` when unconstrained.
    pub fn requirement(&self) -> String {
        if self.constraints.is_empty() {
            "*".to_string()
        } else {
            self.constraints
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}", self.name, self.requirement())
        }
    }
}

/// An ordered dependency manifest
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Load and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(StagehandError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| StagehandError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest content
    pub fn parse(content: &str) -> Result<Self> {
        let mut dependencies = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            let dep = parse_dependency(line).map_err(|e| StagehandError::ManifestParseFailed {
                line: idx + 1,
                reason: e.to_string(),
            })?;
            dependencies.push(dep);
        }

        Ok(Self { dependencies })
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}

/// Parse one dependency line: a package name followed by an optional
/// comma-separated constraint list.
fn parse_dependency(line: &str) -> Result<Dependency> {
    let split_at = line
        .find(|c| matches!(c, '=' | '!' | '>' | '<' | '~'))
        .unwrap_or(line.len());
    let (name, spec) = line.split_at(split_at);
    let name = name.trim();

    if !is_valid_package_name(name) {
        return Err(StagehandError::InvalidPackageName {
            name: name.to_string(),
        });
    }

    let mut constraints = Vec::new();
    if !spec.trim().is_empty() {
        for part in spec.split(',') {
            constraints.push(part.parse::<Constraint>()?);
        }
    }

    Ok(Dependency {
        name: name.to_string(),
        constraints,
    })
}
