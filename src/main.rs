mod cli;
mod config;
mod digest;
mod utils;
mod zabbix;

use clap::Parser;
use cli::Cli;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = digest::run_digest(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose))
        .init();
}

/// `-v` opens this crate up to DEBUG; dependencies (reqwest, hyper) stay at WARN.
fn log_filter(verbose: bool) -> Targets {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), level)
        .with_default(Level::WARN)
}
