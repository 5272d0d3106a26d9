//! Version and version-constraint model for dependency manifests
//!
//! Versions are dotted numeric (`1.2.3`); comparison is componentwise with
//! missing components treated as zero, so `1.2` == `1.2.0` and `1.10` > `1.9`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StagehandError};

/// A dotted numeric package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn new(parts: Vec<u64>) -> Self {
        Self { parts }
    }
}

impl FromStr for Version {
    type Err = StagehandError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StagehandError::InvalidVersion {
                version: s.to_string(),
            });
        }

        let parts = s
            .split('.')
            .map(|p| {
                p.parse::<u64>().map_err(|_| StagehandError::InvalidVersion {
                    version: s.to_string(),
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Self { parts })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .parts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", rendered)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Comparison operator in a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
        }
    }
}

/// A single version constraint, e.g. `>=1.0` or `==2.3.1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub version: Version,
}

impl Constraint {
    /// Check whether a candidate version satisfies this constraint
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.op {
            Op::Eq => candidate == &self.version,
            Op::Ne => candidate != &self.version,
            Op::Ge => candidate >= &self.version,
            Op::Le => candidate <= &self.version,
            Op::Gt => candidate > &self.version,
            Op::Lt => candidate < &self.version,
        }
    }
}

impl FromStr for Constraint {
    type Err = StagehandError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        // Two-character operators must be tried first
        let (op, rest) = if let Some(rest) = s.strip_prefix("==") {
            (Op::Eq, rest)
        } else if let Some(rest) = s.strip_prefix("!=") {
            (Op::Ne, rest)
        } else if let Some(rest) = s.strip_prefix(">=") {
            (Op::Ge, rest)
        } else if let Some(rest) = s.strip_prefix("<=") {
            (Op::Le, rest)
        } else if let Some(rest) = s.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (Op::Lt, rest)
        } else {
            return Err(StagehandError::InvalidVersion {
                version: s.to_string(),
            });
        };

        Ok(Self {
            op,
            version: rest.parse()?,
        })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn c(s: &str) -> Constraint {
        s.parse().unwrap()
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
        assert_eq!(v("4").to_string(), "4");
    }

    #[test]
    fn test_version_parse_rejects_garbage() {
        assert!("".parse::<Version>().is_err());
        assert!("1.2.x".parse::<Version>().is_err());
        assert!("one.two".parse::<Version>().is_err());
    }

    #[test]
    fn test_version_ordering_componentwise() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("2.0") > v("1.999.999"));
        assert!(v("0.1") < v("0.1.1"));
    }

    #[test]
    fn test_version_missing_components_are_zero() {
        assert_eq!(v("1.2").cmp(&v("1.2.0")), Ordering::Equal);
        assert!(v("1.2.1") > v("1.2"));
    }

    #[test]
    fn test_constraint_eq() {
        assert!(c("==1.2.3").matches(&v("1.2.3")));
        assert!(!c("==1.2.3").matches(&v("1.2.4")));
    }

    #[test]
    fn test_constraint_ne() {
        assert!(c("!=1.0").matches(&v("1.1")));
        assert!(!c("!=1.0").matches(&v("1.0")));
    }

    #[test]
    fn test_constraint_ranges() {
        assert!(c(">=1.0").matches(&v("1.0")));
        assert!(c(">1.0").matches(&v("1.0.1")));
        assert!(!c(">1.0").matches(&v("1.0")));
        assert!(c("<2.0").matches(&v("1.999")));
        assert!(!c("<2.0").matches(&v("2.0")));
        assert!(c("<=2.0").matches(&v("2.0")));
    }

    #[test]
    fn test_constraint_parse_requires_operator() {
        assert!("1.2.3".parse::<Constraint>().is_err());
        assert!("~=1.2".parse::<Constraint>().is_err());
    }

    #[test]
    fn test_constraint_display_round_trip() {
        for s in ["==1.2.3", "!=2.0", ">=1.0", "<=3.4.5", ">0.9", "<10"] {
            assert_eq!(c(s).to_string(), s);
        }
    }
}
