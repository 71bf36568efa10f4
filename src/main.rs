use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use changeset_release::cli::orchestration::exit_code_for;
use changeset_release::cli::Cli;
use changeset_release::ui;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.execute() {
        ui::display_error(&e.to_string());

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {err}");
            source = err.source();
        }

        process::exit(exit_code_for(&e));
    }
}

/// Logs go to stderr so they never mix with command output. RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
