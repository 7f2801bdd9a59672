// src/main.rs
//! GNSS Tester - print GGA fixes read from a serial GNSS receiver

use anyhow::Context;
use clap::Parser;
use gnss_tester::{monitor, Console, GnssReader, GpsError, ReaderConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gnss-tester", version, about)]
struct Cli {
    /// Serial port of the receiver
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read settings from this JSON file instead of the user config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_env("GNSS_TESTER_LOG")
        .init();

    let cli = Cli::parse();

    if cli.list_ports {
        monitor::list_serial_ports()?;
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ReaderConfig::load_from(path),
        None => ReaderConfig::load(),
    }
    .context("loading configuration")?
    .with_overrides(cli.port, cli.baud);

    let reader = GnssReader::new(config);
    log::debug!("Using {:?}", reader.config());

    let mut console = Console::stdout();

    match reader.run(&mut console).await {
        Ok(()) => Ok(()),
        // Already reported on the console
        Err(GpsError::Connection { .. }) => std::process::exit(1),
        Err(e) => Err(e.into()),
    }
}
