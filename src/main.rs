use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use lb::{MatchMode, OutputFormat};

/// Count access log visits per client address and attribute them to known networks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File listing one network per line, followed by its description
    networks: PathBuf,

    /// Access log whose lines start with the client address
    log: PathBuf,

    /// Report every network containing an address, not only the first one listed
    #[clap(long, short, action)]
    all_matches: bool,

    /// Output format
    #[clap(long, short, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mode = if cli.all_matches {
        MatchMode::All
    } else {
        MatchMode::First
    };

    let stdout = io::stdout();
    let visits = lb::run(&cli.networks, &cli.log, mode, cli.format, stdout.lock()).with_context(|| {
        format!(
            "failed to attribute {} to {}",
            cli.log.display(),
            cli.networks.display()
        )
    })?;

    log::info!("reported {} visits", visits.len());
    Ok(())
}
