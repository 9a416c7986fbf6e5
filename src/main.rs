#![forbid(unsafe_code)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dirtree::cli::Args;
use dirtree::tree::{generate_tree, write_tree};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("dirtree: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = args.to_options();

    match &args.output {
        Some(outfile) => {
            write_tree(outfile, &args.path, &options)
                .context("failed to generate tree")?;
            if args.verbose {
                eprintln!("dirtree: wrote {}", outfile.display());
            }
        }
        None => {
            let lines = generate_tree(&args.path, &options)
                .context("failed to generate tree")?;
            let mut stdout = io::stdout().lock();
            for line in &lines {
                writeln!(stdout, "{line}")?;
            }
        }
    }
    Ok(())
}

/// Route library diagnostics to stderr. RUST_LOG overrides the default
/// level; -v raises it to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "dirtree=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
