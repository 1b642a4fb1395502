//! Serve command - run the HTTP API.

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(
    host: String,
    port: u16,
    max_upload_mb: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = usize::try_from(max_upload_mb)?.saturating_mul(1024 * 1024);
    let state = AppState::new().with_upload_limit(limit);

    println!(
        "{} http://{}:{}",
        "Starting tabprobe API at".cyan().bold(),
        host,
        port
    );
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
