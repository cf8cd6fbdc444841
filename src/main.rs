use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pdc::cli::args::Cli;
use pdc::cli::commands::{self, RunOptions};
use pdc::client::TcpTransport;
use pdc::config::Config;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("failed to load configuration")?;
    let transport = TcpTransport::new(
        cli.host.unwrap_or_else(|| config.server.host.clone()),
        cli.port.unwrap_or(config.server.port),
        config.server.timeout(),
    );
    let options = RunOptions {
        dry_run: cli.dry_run,
        format: cli.output.unwrap_or(config.general.default_output),
    };
    let now = Local::now().naive_local();

    let output = match &cli.input {
        Some(path) => commands::send_file(path, now, &transport, options)
            .with_context(|| format!("failed to run {}", path.display()))?,
        None => commands::send(&cli.tokens, now, &transport, options)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdc={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
