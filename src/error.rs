//! Error types and handling for Stagehand
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every failure at this layer is fatal: the bootstrap sequence is fail-fast
//! with no retries, so errors propagate straight up to the operator.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Stagehand operations
#[derive(Error, Diagnostic, Debug)]
pub enum StagehandError {
    // Build file errors
    #[error("Build file not found: {path}")]
    #[diagnostic(
        code(stagehand::build_file::not_found),
        help("Create a stagehand.yaml or pass one with -f/--build-file")
    )]
    BuildFileNotFound { path: String },

    #[error("Failed to parse build file: {path}")]
    #[diagnostic(code(stagehand::build_file::parse_failed))]
    BuildFileParseFailed { path: String, reason: String },

    #[error("Invalid build file: {message}")]
    #[diagnostic(code(stagehand::build_file::invalid))]
    BuildFileInvalid { message: String },

    // Manifest errors
    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(stagehand::manifest::not_found),
        help("Check the 'manifest' path in the build file (default: requirements.txt)")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest at line {line}: {reason}")]
    #[diagnostic(code(stagehand::manifest::parse_failed))]
    ManifestParseFailed { line: usize, reason: String },

    #[error("Invalid package name: {name}")]
    #[diagnostic(
        code(stagehand::manifest::invalid_name),
        help("Package names may contain letters, digits, '.', '_' and '-'")
    )]
    InvalidPackageName { name: String },

    #[error("Invalid version: {version}")]
    #[diagnostic(code(stagehand::manifest::invalid_version))]
    InvalidVersion { version: String },

    // Package index errors
    #[error("Package index unavailable: {path}")]
    #[diagnostic(
        code(stagehand::index::unavailable),
        help("Check the 'index' path in the build file and that the index directory exists")
    )]
    IndexUnavailable { path: String },

    #[error("Package '{name}' not found in index")]
    #[diagnostic(code(stagehand::index::package_not_found))]
    PackageNotFound { name: String },

    #[error("No version of '{name}' satisfies '{requirement}' (available: {available})")]
    #[diagnostic(
        code(stagehand::index::unsatisfiable),
        help("Relax the constraint in the manifest or publish a satisfying version to the index")
    )]
    UnsatisfiableConstraint {
        name: String,
        requirement: String,
        available: String,
    },

    #[error("Payload directory not found: {path}")]
    #[diagnostic(
        code(stagehand::payload::missing),
        help("Check the 'payload' path in the build file")
    )]
    PayloadMissing { path: String },

    // Runtime store errors
    #[error("Runtime store not found: {path}")]
    #[diagnostic(
        code(stagehand::runtime::store_not_found),
        help("Set STAGEHAND_RUNTIMES_DIR or pass --runtimes-dir")
    )]
    RuntimeStoreNotFound { path: String },

    #[error("Base runtime '{pin}' is not available in the runtime store")]
    #[diagnostic(
        code(stagehand::runtime::unavailable),
        help(
            "The runtime pin must exactly match an installed runtime. This is a build-environment \
             error and is not retryable without installing the pinned runtime."
        )
    )]
    RuntimeUnavailable { pin: String, available: String },

    #[error("Invalid runtime descriptor for '{runtime}': {reason}")]
    #[diagnostic(code(stagehand::runtime::descriptor_invalid))]
    RuntimeDescriptorInvalid { runtime: String, reason: String },

    // Image errors
    #[error("No image found at: {path}")]
    #[diagnostic(
        code(stagehand::image::not_found),
        help("Run 'stagehand build' to produce an image first")
    )]
    ImageNotFound { path: String },

    #[error("Failed to parse image configuration: {path}")]
    #[diagnostic(code(stagehand::image::config_parse_failed))]
    ImageConfigParseFailed { path: String, reason: String },

    #[error("Failed to commit image to '{path}': {reason}")]
    #[diagnostic(code(stagehand::image::commit_failed))]
    ImageCommitFailed { path: String, reason: String },

    // Launch errors
    #[error("Entrypoint not found in image: {path}")]
    #[diagnostic(
        code(stagehand::launch::entrypoint_missing),
        help("The entrypoint recorded in image.json must exist under rootfs/app")
    )]
    EntrypointMissing { path: String },

    #[error("Failed to launch entrypoint '{command}': {reason}")]
    #[diagnostic(code(stagehand::launch::failed))]
    LaunchFailed { command: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(stagehand::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(stagehand::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(stagehand::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for StagehandError {
    fn from(err: std::io::Error) -> Self {
        StagehandError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StagehandError {
    fn from(err: serde_yaml::Error) -> Self {
        StagehandError::BuildFileParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StagehandError {
    fn from(err: serde_json::Error) -> Self {
        StagehandError::ImageConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, StagehandError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = StagehandError::RuntimeUnavailable {
            pin: "python-3.11.9".to_string(),
            available: "python-3.12.1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Base runtime 'python-3.11.9' is not available in the runtime store"
        );
    }

    #[test]
    fn test_error_code() {
        let err = StagehandError::PackageNotFound {
            name: "requests".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("stagehand::index::package_not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StagehandError = io_err.into();
        assert!(matches!(err, StagehandError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: yaml: content: [unclosed";
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str(yaml_str);
        let yaml_err = parse_result.unwrap_err();
        let err: StagehandError = yaml_err.into();
        assert!(matches!(err, StagehandError::BuildFileParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "not json";
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str(json_str);
        let json_err = parse_result.unwrap_err();
        let err: StagehandError = json_err.into();
        assert!(matches!(err, StagehandError::ImageConfigParseFailed { .. }));
    }

    test_error_contains!(
        test_unsatisfiable_constraint_error,
        StagehandError::UnsatisfiableConstraint {
            name: "redis".to_string(),
            requirement: ">=5.0,<6.0".to_string(),
            available: "4.6.0".to_string(),
        },
        "redis",
        ">=5.0,<6.0",
        "4.6.0",
    );

    test_error_contains!(
        test_entrypoint_missing_error,
        StagehandError::EntrypointMissing {
            path: "/image/rootfs/app/main.py".to_string(),
        },
        "Entrypoint not found",
        "main.py",
    );

    test_error_contains!(
        test_manifest_parse_failed_error,
        StagehandError::ManifestParseFailed {
            line: 3,
            reason: "empty constraint".to_string(),
        },
        "line 3",
        "empty constraint",
    );
}
