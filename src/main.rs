//! Stagehand - container bootstrap builder and entrypoint launcher
//!
//! A command line tool that assembles a reproducible runtime image from a
//! pinned base runtime, a dependency manifest, and an application payload,
//! then launches the image's single entrypoint process in the foreground.

use clap::Parser;

mod builder;
mod cli;
mod commands;
mod common;
mod config;
mod error;
mod image;
mod index;
mod launcher;
mod manifest;
mod progress;
mod runtime;
mod temp;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args, verbose),
        Commands::Verify(args) => commands::verify::run(args, verbose),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Run(args) => {
            // The launched child is the foreground process: our lifetime is
            // its lifetime and its exit status becomes our exit status.
            match commands::run::run(args) {
                Ok(code) => std::process::exit(code),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
