//! tabprobe CLI: dataset overview, Markdown reports and the HTTP API.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Overview { file } => commands::overview::run(file),

        Commands::Report {
            file,
            out_dir,
            title,
            max_hist_columns,
            top_k_categories,
            thresholds,
        } => commands::report::run(
            file,
            out_dir,
            title,
            max_hist_columns,
            top_k_categories,
            thresholds,
        ),

        Commands::Serve {
            host,
            port,
            max_upload_mb,
        } => commands::serve::run(host, port, max_upload_mb),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` wins over
/// the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
