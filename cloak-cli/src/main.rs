//! Cloak CLI - confidential token operations in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use cloak_core::domain::amount::MAX_DECIMALS;
use commands::{balance, demo, logs, networks, quote, session, status};

/// Cloak - confidential token operations in your terminal
#[derive(Parser)]
#[command(name = "cloak", version, about, long_about = None)]
struct Cli {
    /// Network to use (defaults to app.defaultNetwork or CLOAK_NETWORK)
    #[arg(long, short, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and manage configured networks
    Networks {
        #[command(subcommand)]
        command: Option<networks::NetworksCommands>,
    },

    /// Show the selected network and check its RPC endpoint
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the public token balance of an address
    PublicBalance {
        /// Account address
        address: String,
        /// Token address
        #[arg(long)]
        token: String,
        /// Token decimals for display (base units when omitted)
        #[arg(long, value_parser = decimals_parser())]
        decimals: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quote the fee of a confidential operation
    Quote {
        /// Account address
        address: String,
        /// Token address
        #[arg(long)]
        token: String,
        /// Operation to quote
        #[arg(long, value_enum, default_value = "transfer")]
        operation: quote::QuoteOperation,
        /// Amount in base units, or in whole tokens with --decimals
        #[arg(long)]
        amount: Option<String>,
        /// Token decimals used to read --amount
        #[arg(long, value_parser = decimals_parser())]
        decimals: Option<u32>,
        /// Transfer recipient
        #[arg(long)]
        recipient: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: enable, deposit, transfer, withdraw and read balances
    Session {
        /// Signing account address
        address: String,
        /// RPC URL (defaults to the network's rpcUrl)
        #[arg(long)]
        rpc_url: Option<String>,
    },

    /// Scripted walkthrough on the demo backend
    Demo {
        /// Token address used in the walkthrough
        #[arg(long, default_value = "0xAAA")]
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn decimals_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(MAX_DECIMALS))
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Networks { .. } => "networks",
            Commands::Status { .. } => "status",
            Commands::PublicBalance { .. } => "public-balance",
            Commands::Quote { .. } => "quote",
            Commands::Session { .. } => "session",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = commands::get_logger();
    let command = cli.command.name();
    let network = cli.network.clone();

    let result = run(cli).await;

    match result {
        Ok(()) => {
            commands::log_command(&logger, command, network.as_deref());
            ExitCode::SUCCESS
        }
        Err(e) => {
            commands::log_failure(&logger, command, network.as_deref(), &e);
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let network = cli.network.as_deref();
    match cli.command {
        Commands::Networks { command } => networks::run(command),
        Commands::Status { json } => status::run(network, json).await,
        Commands::PublicBalance {
            address,
            token,
            decimals,
            json,
        } => balance::run(network, &address, &token, decimals, json).await,
        Commands::Quote {
            address,
            token,
            operation,
            amount,
            decimals,
            recipient,
            json,
        } => {
            quote::run(
                network,
                &address,
                &token,
                operation,
                amount.as_deref(),
                decimals,
                recipient.as_deref(),
                json,
            )
            .await
        }
        Commands::Session { address, rpc_url } => {
            session::run(network, &address, rpc_url.as_deref()).await
        }
        Commands::Demo { token, json } => demo::run(network, &token, json).await,
        Commands::Logs { command } => logs::run(command),
    }
}
