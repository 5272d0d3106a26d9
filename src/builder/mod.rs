//! Bootstrap environment builder
//!
//! Runs the linear bootstrap sequence, each step gating the next, with no
//! retries:
//!
//! 1. Select the pinned base runtime
//! 2. Resolve and install manifest dependencies
//! 3. Provision the log directory
//! 4. Materialize the application payload
//! 5. Declare the service port and entrypoint (image.json)
//!
//! The image is assembled in a staging directory beside the target and
//! renamed into place only after every step succeeds, so a failed build
//! never commits a partial image.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::common::fs::copy_dir_recursive;
use crate::config::BuildFile;
use crate::error::{Result, StagehandError};
use crate::image::{self, ImageConfig, ImageDeclaration, InstalledPackage};
use crate::index::{PackageIndex, ResolvedPackage};
use crate::manifest::Manifest;
use crate::progress::ProgressDisplay;
use crate::runtime::{BaseRuntime, RuntimeStore};

/// Inputs to a build
#[derive(Debug)]
pub struct BuildRequest {
    pub build_file: BuildFile,
    pub image_dir: PathBuf,
    pub runtimes_dir: Option<PathBuf>,
}

/// A successfully built image
#[derive(Debug)]
pub struct BuiltImage {
    pub image_dir: PathBuf,
    pub config: ImageConfig,
}

/// Staging directory for an in-progress build
///
/// Created beside the target image directory so the final rename stays on
/// one filesystem. Dropped without commit, the staged tree is removed and
/// the target is left untouched.
struct Staging {
    dir: TempDir,
}

impl Staging {
    fn create(image_dir: &Path) -> Result<Self> {
        let parent = image_dir.parent().unwrap_or_else(|| Path::new("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StagehandError::FileWriteFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let dir = tempfile::Builder::new()
            .prefix(".stagehand-build-")
            .tempdir_in(if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            })
            .map_err(|e| StagehandError::FileWriteFailed {
                path: image_dir.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit the staged image into place, replacing any previous image.
    ///
    /// A previous image is renamed aside before the staged tree is renamed
    /// in, and restored if that second rename fails, so the target never
    /// goes missing mid-replacement.
    fn commit(self, image_dir: &Path) -> Result<()> {
        let commit_err = |e: std::io::Error| StagehandError::ImageCommitFailed {
            path: image_dir.display().to_string(),
            reason: e.to_string(),
        };

        let aside = aside_path(image_dir);
        let had_previous = image_dir.exists();
        if had_previous {
            if aside.exists() {
                fs::remove_dir_all(&aside).map_err(commit_err)?;
            }
            fs::rename(image_dir, &aside).map_err(commit_err)?;
        }

        let staged = self.dir.into_path();
        if let Err(e) = fs::rename(&staged, image_dir) {
            let _ = fs::remove_dir_all(&staged);
            if had_previous {
                let _ = fs::rename(&aside, image_dir);
            }
            return Err(commit_err(e));
        }

        if had_previous {
            let _ = fs::remove_dir_all(&aside);
        }
        Ok(())
    }
}

/// Sibling path holding the previous image while a rebuild commits
fn aside_path(image_dir: &Path) -> PathBuf {
    let name = image_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image_dir.with_file_name(format!(".{name}-previous"))
}

/// Run the bootstrap sequence and produce an image
pub fn build(request: &BuildRequest, verbose: bool) -> Result<BuiltImage> {
    let build_file = &request.build_file;

    // 1. Select the pinned base runtime
    let store = RuntimeStore::locate(request.runtimes_dir.clone())?;
    let runtime = store.select(&build_file.runtime)?;
    if verbose {
        println!(
            "Selected runtime {} ({})",
            runtime.name,
            runtime.interpreter.display()
        );
    }

    // 2. Resolve the manifest against the index before touching the filesystem
    let manifest = Manifest::load(&build_file.manifest)?;
    let index = PackageIndex::open(&build_file.index)?;
    let resolved = index.resolve_all(&manifest)?;

    let staging = Staging::create(&request.image_dir)?;

    install_packages(staging.path(), &resolved, verbose)?;

    // 3. Provision the log directory
    provision_logs_dir(staging.path(), &build_file.logs_dir)?;
    if verbose {
        println!("Provisioned log directory '{}'", build_file.logs_dir);
    }

    // 4. Materialize the payload
    materialize_payload(staging.path(), &build_file.payload)?;
    if verbose {
        println!("Copied payload from {}", build_file.payload.display());
    }

    // 5. Declare port and entrypoint
    let config = declare_config(build_file, &runtime, &resolved)?;
    config.save(staging.path())?;

    staging.commit(&request.image_dir)?;

    Ok(BuiltImage {
        image_dir: request.image_dir.clone(),
        config,
    })
}

/// Install resolved packages into the staged rootfs
fn install_packages(
    staging_dir: &Path,
    resolved: &[ResolvedPackage],
    verbose: bool,
) -> Result<()> {
    let deps_dir = image::deps_dir(staging_dir);
    fs::create_dir_all(&deps_dir).map_err(|e| StagehandError::FileWriteFailed {
        path: deps_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let progress = ProgressDisplay::new(resolved.len() as u64);

    for package in resolved {
        progress.update_package(&package.name, &package.version.to_string());

        let target = deps_dir.join(&package.name);
        if let Err(e) = copy_dir_recursive(&package.source_dir, &target) {
            progress.abandon();
            return Err(StagehandError::FileWriteFailed {
                path: target.display().to_string(),
                reason: e.to_string(),
            });
        }

        if verbose {
            println!("Installed {} {}", package.name, package.version);
        }
        progress.inc_package();
    }

    progress.finish();
    Ok(())
}

/// Create the log directory with the minimum principal set that still lets
/// the entrypoint write: the entrypoint runs as the image owner, so only the
/// owner gets write permission.
fn provision_logs_dir(staging_dir: &Path, name: &str) -> Result<()> {
    let logs = image::logs_dir(staging_dir, name);
    fs::create_dir_all(&logs).map_err(|e| StagehandError::FileWriteFailed {
        path: logs.display().to_string(),
        reason: e.to_string(),
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&logs, fs::Permissions::from_mode(0o755)).map_err(|e| {
            StagehandError::FileWriteFailed {
                path: logs.display().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(())
}

/// Copy the payload tree verbatim into the staged app directory
fn materialize_payload(staging_dir: &Path, payload: &Path) -> Result<()> {
    if !payload.is_dir() {
        return Err(StagehandError::PayloadMissing {
            path: payload.display().to_string(),
        });
    }

    let app = image::app_dir(staging_dir);
    copy_dir_recursive(payload, &app).map_err(|e| StagehandError::FileWriteFailed {
        path: app.display().to_string(),
        reason: e.to_string(),
    })
}

/// Assemble the declared image configuration
fn declare_config(
    build_file: &BuildFile,
    runtime: &BaseRuntime,
    resolved: &[ResolvedPackage],
) -> Result<ImageConfig> {
    let packages = resolved
        .iter()
        .map(|p| InstalledPackage {
            name: p.name.clone(),
            version: p.version.to_string(),
        })
        .collect();

    ImageDeclaration {
        runtime: runtime.name.clone(),
        interpreter: runtime.interpreter.display().to_string(),
        entrypoint: build_file.entrypoint.clone(),
        exposed_port: build_file.port,
        logs_dir: build_file.logs_dir.clone(),
        packages,
    }
    .seal()
}
