//! Run command implementation
//!
//! Launches a built image's entrypoint as the single foreground process and
//! reports the exit code to propagate. All behavior past the launch belongs
//! to the entrypoint; stagehand only mirrors its lifetime.

use crate::cli::RunArgs;
use crate::error::Result;
use crate::launcher;

/// Run the image's entrypoint; returns the child's exit code
pub fn run(args: RunArgs) -> Result<i32> {
    launcher::launch(&args.image_dir)
}
