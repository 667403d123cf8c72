use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pin_ledger::interactive::Shell;
use pin_ledger::{AccountRegistry, LedgerConfig};

#[derive(Parser)]
#[command(name = "pin_ledger")]
#[command(about = "In-memory ledger of PIN-protected accounts", long_about = None)]
struct Cli {
    /// TOML config file; defaults are used if it does not exist
    #[arg(long, default_value = "pin_ledger.toml")]
    config: PathBuf,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = LedgerConfig::load_or_default(&cli.config);
    let registry = match AccountRegistry::from_config(&config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Cannot start ledger: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        id_min = config.registry.id_min,
        id_max = config.registry.id_max,
        "Ledger ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = Shell::new(&registry, stdin.lock(), stdout.lock()).run() {
        error!("Console I/O failed: {}", e);
        return ExitCode::FAILURE;
    }

    info!(accounts = registry.len(), "Session ended");
    ExitCode::SUCCESS
}
