//! akusento CLI binary.

use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use akusento::cli::args::*;
use akusento::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = AkusentoArgs::parse();

    // RUST_LOG wins over the verbosity flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(io::stderr)
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
