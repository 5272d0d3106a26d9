//! Inspect command implementation
//!
//! Prints the declared configuration of a built image: the runtime pin,
//! exposed port, entrypoint, and installed packages, straight from
//! image.json. The exposed port is advertised metadata; whether anything
//! actually binds it is the entrypoint's business.

use console::Style;

use crate::cli::InspectArgs;
use crate::common::fs::count_files;
use crate::error::{Result, StagehandError};
use crate::image::{self, IMAGE_CONFIG_FILE, ImageConfig};

/// Run inspect command
pub fn run(args: InspectArgs) -> Result<()> {
    let config = ImageConfig::load(&args.image_dir)?;

    if args.json {
        let path = args.image_dir.join(IMAGE_CONFIG_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|e| StagehandError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        print!("{raw}");
        return Ok(());
    }

    println!(
        "Image {}",
        Style::new().bold().apply_to(args.image_dir.display())
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Runtime:"),
        config.runtime
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Interpreter:"),
        config.interpreter
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Entrypoint:"),
        config.entrypoint
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Exposed port:"),
        config.exposed_port
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Log directory:"),
        config.logs_dir
    );
    println!(
        "  {} {} files",
        Style::new().bold().apply_to("Payload:"),
        count_files(&image::app_dir(&args.image_dir))
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Digest:"),
        config.digest
    );

    if config.packages.is_empty() {
        println!("  {} none", Style::new().bold().apply_to("Packages:"));
    } else {
        println!("  {}", Style::new().bold().apply_to("Packages:"));
        for package in &config.packages {
            println!(
                "    {} {}",
                Style::new().yellow().apply_to(&package.name),
                package.version
            );
        }
    }

    Ok(())
}
