//! Build command implementation
//!
//! Runs the bootstrap sequence from a build file and commits the resulting
//! image:
//! 1. Load and validate the build file
//! 2. Select the pinned base runtime
//! 3. Resolve and install manifest dependencies
//! 4. Provision the log directory
//! 5. Materialize the payload
//! 6. Declare port and entrypoint, commit the image

use console::Style;

use crate::builder::{self, BuildRequest};
use crate::cli::BuildArgs;
use crate::config::BuildFile;
use crate::error::Result;

/// Run build command
pub fn run(args: BuildArgs, verbose: bool) -> Result<()> {
    let build_file = BuildFile::load(&args.build_file)?;

    println!(
        "Building image from {}",
        Style::new().bold().apply_to(args.build_file.display())
    );

    let request = BuildRequest {
        build_file,
        image_dir: args.image_dir,
        runtimes_dir: args.runtimes_dir,
    };

    let built = builder::build(&request, verbose)?;

    println!();
    println!(
        "Built {}",
        Style::new().bold().green().apply_to(built.image_dir.display())
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Runtime:"),
        built.config.runtime
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Packages:"),
        built.config.packages.len()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Exposed port:"),
        built.config.exposed_port
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Entrypoint:"),
        built.config.entrypoint
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Digest:"),
        built.config.digest
    );

    Ok(())
}
