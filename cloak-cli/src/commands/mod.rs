//! CLI command implementations

pub mod balance;
pub mod demo;
pub mod logs;
pub mod networks;
pub mod quote;
pub mod session;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use cloak_core::adapters::demo::{DemoBackendFactory, DemoLedger};
use cloak_core::{Address, Amount, CloakContext, EntryPoint, LogEvent, LoggingService};

/// Public balance every demo (owner, token) pair starts with
pub const DEMO_FAUCET: u64 = 1_000_000;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let cloak_dir = get_cloak_dir().ok()?;
    LoggingService::new(&cloak_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

pub fn log_command(logger: &Option<LoggingService>, command: &str, network: Option<&str>) {
    if let Some(l) = logger {
        let _ = l.log_command(command, network);
    }
}

/// Log a failed command with the core error kind when there is one
pub fn log_failure(
    logger: &Option<LoggingService>,
    command: &str,
    network: Option<&str>,
    error: &anyhow::Error,
) {
    if let Some(l) = logger {
        let _ = l.log_error(command, network, error_kind(error), &error.to_string());
    }
}

pub fn error_kind(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<cloak_core::Error>()
        .map(|e| e.kind())
        .unwrap_or("cli")
}

/// Get the cloak directory from environment or default
pub fn get_cloak_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CLOAK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".cloak"))
        .context("Could not find home directory; set CLOAK_DIR")
}

/// Load the context with the demo backend funded by a faucet
pub fn get_context() -> Result<CloakContext> {
    let cloak_dir = get_cloak_dir()?;

    std::fs::create_dir_all(&cloak_dir)
        .with_context(|| format!("Failed to create cloak directory: {:?}", cloak_dir))?;

    let mut context =
        CloakContext::new(&cloak_dir).context("Failed to initialize cloak context")?;
    let ledger = DemoLedger::new().with_faucet(Amount::from(DEMO_FAUCET));
    context.register_backend(Arc::new(DemoBackendFactory::new(Arc::new(ledger))));
    Ok(context)
}

pub fn parse_address(value: &str, what: &str) -> Result<Address> {
    Address::parse(value).with_context(|| format!("Invalid {} address", what))
}

/// Base units, or whole token units when the token's `decimals` are given
pub fn parse_amount(value: &str, decimals: Option<u32>) -> Result<Amount> {
    let parsed = match decimals {
        Some(decimals) => Amount::parse_units(value, decimals),
        None => value.parse::<Amount>(),
    };
    parsed.with_context(|| format!("Invalid amount '{}'", value))
}


/// Spinner shown while waiting on the network
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
