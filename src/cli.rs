//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stagehand - container bootstrap builder
///
/// Build a reproducible runtime image from a build file, then launch its
/// entrypoint as the single foreground process.
#[derive(Parser, Debug)]
#[command(
    name = "stagehand",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Container bootstrap builder and entrypoint launcher",
    long_about = "Stagehand assembles a runtime image from a pinned base runtime, a dependency \
                  manifest, and an application payload, provisions a log directory, records the \
                  declared service port, and launches the image's entrypoint as the container's \
                  single foreground process.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  stagehand build\n    \
                  stagehand build -f deploy/stagehand.yaml -o ./image\n    \
                  stagehand verify\n    \
                  stagehand inspect ./image\n    \
                  stagehand run ./image"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a runtime image from a build file
    Build(BuildArgs),

    /// Resolve the dependency manifest without building
    Verify(VerifyArgs),

    /// Print the declared configuration of a built image
    Inspect(InspectArgs),

    /// Launch a built image's entrypoint as the foreground process
    Run(RunArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build from stagehand.yaml in the current directory:\n    stagehand build\n\n\
                  Build from an explicit build file:\n    stagehand build -f deploy/stagehand.yaml\n\n\
                  Build into a specific image directory:\n    stagehand build -o ./image\n\n\
                  Build against a local runtime store:\n    stagehand build --runtimes-dir ./runtimes")]
pub struct BuildArgs {
    /// Path to the build file
    #[arg(long, short = 'f', default_value = "stagehand.yaml")]
    pub build_file: PathBuf,

    /// Output image directory
    #[arg(long, short = 'o', default_value = "image")]
    pub image_dir: PathBuf,

    /// Runtime store directory (overrides STAGEHAND_RUNTIMES_DIR)
    #[arg(long, env = "STAGEHAND_RUNTIMES_DIR")]
    pub runtimes_dir: Option<PathBuf>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Verify the manifest resolves against the index:\n    stagehand verify\n\n\
                  Verify an explicit build file:\n    stagehand verify -f deploy/stagehand.yaml")]
pub struct VerifyArgs {
    /// Path to the build file
    #[arg(long, short = 'f', default_value = "stagehand.yaml")]
    pub build_file: PathBuf,

    /// Runtime store directory (overrides STAGEHAND_RUNTIMES_DIR)
    #[arg(long, env = "STAGEHAND_RUNTIMES_DIR")]
    pub runtimes_dir: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Inspect a built image:\n    stagehand inspect ./image\n\n\
                  Dump the raw image configuration:\n    stagehand inspect ./image --json")]
pub struct InspectArgs {
    /// Image directory to inspect
    #[arg(default_value = "image")]
    pub image_dir: PathBuf,

    /// Print the raw image.json instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Run a built image:\n    stagehand run ./image\n\n\
                  Run the default image directory:\n    stagehand run")]
pub struct RunArgs {
    /// Image directory to run
    #[arg(default_value = "image")]
    pub image_dir: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    stagehand completions --shell bash > ~/.bash_completion.d/stagehand\n\n\
                  Generate zsh completions:\n    stagehand completions --shell zsh > ~/.zfunc/_stagehand\n\n\
                  Generate fish completions:\n    stagehand completions --shell fish > ~/.config/fish/completions/stagehand.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
