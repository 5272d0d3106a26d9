//! Entrypoint launcher
//!
//! Starts the image's single foreground process: the pinned interpreter
//! executing the recorded entrypoint, working directory set to the image's
//! app directory. The launcher waits for the child and reports its exit
//! status; the caller's lifetime equals the child's lifetime. There is no
//! retry or restart policy, and a missing entrypoint is a fatal launch error.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, StagehandError};
use crate::image::{self, ImageConfig};

/// Environment variable handing the log directory to the entrypoint
pub const LOG_DIR_ENV: &str = "STAGEHAND_LOG_DIR";

/// Launch the image's entrypoint and wait for it; returns the exit code to
/// propagate.
pub fn launch(image_dir: &Path) -> Result<i32> {
    let config = ImageConfig::load(image_dir)?;

    // The child's working directory is the app dir, so every path handed to
    // it must be absolute or a relative image dir would skew them.
    let image_dir = fs::canonicalize(image_dir).map_err(|e| StagehandError::IoError {
        message: format!("{}: {}", image_dir.display(), e),
    })?;
    let image_dir = image_dir.as_path();

    let app_dir = image::app_dir(image_dir);
    let entrypoint = app_dir.join(&config.entrypoint);
    if !entrypoint.is_file() {
        return Err(StagehandError::EntrypointMissing {
            path: entrypoint.display().to_string(),
        });
    }

    let interpreter = Path::new(&config.interpreter);
    if !interpreter.is_file() {
        return Err(StagehandError::LaunchFailed {
            command: config.interpreter.clone(),
            reason: "interpreter recorded in image.json does not exist".to_string(),
        });
    }

    let logs_dir = image::logs_dir(image_dir, &config.logs_dir);

    let status = Command::new(interpreter)
        .arg(&config.entrypoint)
        .current_dir(&app_dir)
        .env(LOG_DIR_ENV, &logs_dir)
        .status()
        .map_err(|e| StagehandError::LaunchFailed {
            command: format!("{} {}", config.interpreter, config.entrypoint),
            reason: e.to_string(),
        })?;

    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    // Shell convention for signal-terminated children
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageDeclaration, InstalledPackage};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fake_image(entrypoint_body: Option<&str>) -> (TempDir, PathBuf) {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let image_dir = temp.path().join("image");
        fs::create_dir_all(image_dir.join("rootfs/app")).unwrap();
        fs::create_dir_all(image_dir.join("rootfs/logs")).unwrap();

        if let Some(body) = entrypoint_body {
            fs::write(image_dir.join("rootfs/app/main.py"), body).unwrap();
        }

        let config = ImageDeclaration {
            runtime: "python-3.11.9".to_string(),
            interpreter: "/bin/sh".to_string(),
            entrypoint: "main.py".to_string(),
            exposed_port: 8000,
            logs_dir: "logs".to_string(),
            packages: Vec::<InstalledPackage>::new(),
        }
        .seal()
        .unwrap();
        config.save(&image_dir).unwrap();

        (temp, image_dir)
    }

    #[test]
    fn test_launch_propagates_success() {
        let (_temp, image_dir) = fake_image(Some("exit 0\n"));
        assert_eq!(launch(&image_dir).unwrap(), 0);
    }

    #[test]
    fn test_launch_propagates_nonzero_exit_code() {
        let (_temp, image_dir) = fake_image(Some("exit 7\n"));
        assert_eq!(launch(&image_dir).unwrap(), 7);
    }

    #[test]
    fn test_launch_runs_in_app_dir_with_sibling_logs() {
        let (_temp, image_dir) = fake_image(Some("echo started > ../logs/boot.log\n"));
        assert_eq!(launch(&image_dir).unwrap(), 0);

        let logged = fs::read_to_string(image_dir.join("rootfs/logs/boot.log")).unwrap();
        assert_eq!(logged.trim(), "started");
    }

    #[test]
    fn test_launch_exports_log_dir() {
        let (_temp, image_dir) =
            fake_image(Some("printf '%s' \"$STAGEHAND_LOG_DIR\" > ../logs/dir.txt\n"));
        assert_eq!(launch(&image_dir).unwrap(), 0);

        let reported = fs::read_to_string(image_dir.join("rootfs/logs/dir.txt")).unwrap();
        assert_eq!(
            PathBuf::from(reported),
            image_dir.join("rootfs/logs")
        );
    }

    #[test]
    fn test_launch_with_relative_image_dir() {
        let (_temp, image_dir) =
            fake_image(Some("echo ok > \"$STAGEHAND_LOG_DIR/rel.log\"\n"));

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(image_dir.parent().unwrap()).unwrap();
        let result = launch(Path::new("image"));
        std::env::set_current_dir(original).unwrap();

        assert_eq!(result.unwrap(), 0);
        // The log landed in the provisioned sink, not somewhere under app/
        let logged = fs::read_to_string(image_dir.join("rootfs/logs/rel.log")).unwrap();
        assert_eq!(logged.trim(), "ok");
        assert!(!image_dir.join("rootfs/app/image").exists());
    }

    #[test]
    fn test_launch_missing_entrypoint() {
        let (_temp, image_dir) = fake_image(None);
        let err = launch(&image_dir).unwrap_err();
        assert!(matches!(err, StagehandError::EntrypointMissing { .. }));
    }

    #[test]
    fn test_launch_missing_image() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let err = launch(&temp.path().join("no-image")).unwrap_err();
        assert!(matches!(err, StagehandError::ImageNotFound { .. }));
    }
}
