use anyhow::Result;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::execute_command;
use discovery_cli::{parse_command, Config};

// Environment variable holding the log filter, e.g. `DISCOVERY_LOG=debug`
const LOG_FILTER_ENV: &str = "DISCOVERY_LOG";

fn main() -> Result<()> {
    init_logging();

    // Parse command line arguments
    let config = Config::from_env();
    let invocation = parse_command(env::args().skip(1), &config, io::stdin().lock())?;

    // Hand the parsed command over
    execute_command(&invocation)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
