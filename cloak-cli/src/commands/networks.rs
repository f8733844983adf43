//! Networks command - list, select and add networks

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;

use cloak_core::config::{Config, NetworkSettings, NetworkShape};

use super::{get_cloak_dir, parse_address};
use crate::output;

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    /// Explicit contract address, public balance and fees
    Contract,
    /// Contract resolved from the chain id, transfer quotes
    Chain,
}

impl From<ShapeArg> for NetworkShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Contract => NetworkShape::Contract,
            ShapeArg::Chain => NetworkShape::Chain,
        }
    }
}

#[derive(Subcommand)]
pub enum NetworksCommands {
    /// List configured networks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the default network
    Use {
        /// Network name
        name: String,
    },
    /// Add or replace a network
    Add {
        /// Network name
        name: String,
        #[arg(long, value_enum)]
        shape: ShapeArg,
        #[arg(long)]
        rpc_url: String,
        #[arg(long)]
        chain_id: u64,
        /// Required for contract networks
        #[arg(long)]
        contract_address: Option<String>,
        /// Backend name
        #[arg(long, default_value = "demo")]
        backend: String,
    },
}

pub fn run(command: Option<NetworksCommands>) -> Result<()> {
    let cloak_dir = get_cloak_dir()?;
    let mut config = Config::load(&cloak_dir)?;

    match command.unwrap_or(NetworksCommands::List { json: false }) {
        NetworksCommands::List { json } => list(&config, json),
        NetworksCommands::Use { name } => {
            config.set_default_network(&name)?;
            config.save(&cloak_dir)?;
            output::success(&format!("Default network set to {}", name));
            Ok(())
        }
        NetworksCommands::Add {
            name,
            shape,
            rpc_url,
            chain_id,
            contract_address,
            backend,
        } => {
            let contract_address = contract_address
                .as_deref()
                .map(|a| parse_address(a, "contract"))
                .transpose()?;
            config.set_network(
                &name,
                NetworkSettings {
                    shape: shape.into(),
                    rpc_url,
                    chain_id,
                    contract_address,
                    backend,
                },
            )?;
            config.save(&cloak_dir)?;
            output::success(&format!("Saved network {}", name));
            Ok(())
        }
    }
}

fn list(config: &Config, json: bool) -> Result<()> {
    if json {
        let networks: serde_json::Map<String, serde_json::Value> = config
            .networks
            .iter()
            .map(|(name, n)| Ok((name.clone(), serde_json::to_value(n)?)))
            .collect::<Result<_>>()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "defaultNetwork": config.default_network,
                "networks": networks,
            }))?
        );
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["", "Name", "Shape", "Chain ID", "RPC URL", "Contract", "Backend"]);

    for (name, network) in &config.networks {
        let marker = if *name == config.default_network {
            "*".green().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            marker,
            name.clone(),
            network.shape.as_str().to_string(),
            network.chain_id.to_string(),
            network.rpc_url.clone(),
            network
                .contract_address
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
            network.backend.clone(),
        ]);
    }

    println!("{}", table);
    Ok(())
}
