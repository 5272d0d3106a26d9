//! Verify command implementation
//!
//! Preflight for a build: checks the pinned runtime is installed and that
//! every manifest entry resolves against the index, without writing anything.
//! Failures here are exactly the failures 'build' would hit first.

use console::Style;

use crate::cli::VerifyArgs;
use crate::config::BuildFile;
use crate::error::Result;
use crate::index::PackageIndex;
use crate::manifest::Manifest;
use crate::runtime::RuntimeStore;

/// Run verify command
pub fn run(args: VerifyArgs, verbose: bool) -> Result<()> {
    let build_file = BuildFile::load(&args.build_file)?;

    let store = RuntimeStore::locate(args.runtimes_dir)?;
    let runtime = store.select(&build_file.runtime)?;
    println!(
        "Runtime {} ok",
        Style::new().bold().apply_to(&runtime.name)
    );
    if verbose {
        println!("  Interpreter: {}", runtime.interpreter.display());
    }

    let manifest = Manifest::load(&build_file.manifest)?;
    let index = PackageIndex::open(&build_file.index)?;
    let resolved = index.resolve_all(&manifest)?;

    if resolved.is_empty() {
        println!("Manifest declares no dependencies.");
    } else {
        println!("Resolved {} dependencies:", resolved.len());
        for (dep, package) in manifest.dependencies.iter().zip(&resolved) {
            println!(
                "  {} {} -> {}",
                Style::new().bold().yellow().apply_to(&package.name),
                dep.requirement(),
                package.version
            );
        }
    }

    println!(
        "{}",
        Style::new().bold().green().apply_to("Manifest resolves; build would proceed.")
    );

    Ok(())
}
