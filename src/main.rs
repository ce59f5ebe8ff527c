use clap::Parser;
use tracing_subscriber::EnvFilter;

use bb2do::cli::commands::Cli;
use bb2do::cli::handlers;

fn main() {
    // BB2_LOG controls verbosity (e.g. BB2_LOG=debug); warnings by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BB2_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
