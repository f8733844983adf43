//! Status command - show the selected network and check its RPC endpoint

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use cloak_core::adapters::jsonrpc::JsonRpcProvider;
use cloak_core::ports::ChainProvider;

use super::{get_context, spinner};
use crate::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    network: String,
    shape: &'static str,
    rpc_url: String,
    chain_id: u64,
    backend: String,
    backend_registered: bool,
    rpc_chain_id: Option<u64>,
    rpc_error: Option<String>,
}

async fn check_endpoint(rpc_url: &str) -> std::result::Result<u64, String> {
    let provider = JsonRpcProvider::new(rpc_url).map_err(|e| e.to_string())?;
    provider.chain_id().await.map_err(|e| e.to_string())
}

pub async fn run(network: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let (name, settings) = ctx.network(network)?;

    let bar = (!json).then(|| spinner(format!("Contacting {}", settings.rpc_url)));
    let checked = check_endpoint(&settings.rpc_url).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let report = StatusReport {
        shape: settings.shape.as_str(),
        backend_registered: ctx.backend_names().contains(&settings.backend),
        rpc_chain_id: checked.as_ref().ok().copied(),
        rpc_error: checked.err(),
        network: name,
        rpc_url: settings.rpc_url,
        chain_id: settings.chain_id,
        backend: settings.backend,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Network Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Network", &report.network]);
    table.add_row(vec!["Shape", report.shape]);
    table.add_row(vec!["RPC URL", &report.rpc_url]);
    table.add_row(vec!["Chain ID", &report.chain_id.to_string()]);
    table.add_row(vec!["Backend", &report.backend]);
    println!("{}", table);
    println!();

    if !report.backend_registered {
        output::warning(&format!("Backend '{}' is not available in this build", report.backend));
    }

    match (report.rpc_chain_id, &report.rpc_error) {
        (Some(id), _) if id == report.chain_id => {
            output::success(&format!("RPC reachable, chain id {}", id))
        }
        (Some(id), _) => output::warning(&format!(
            "RPC reachable but reports chain id {} (configured {})",
            id, report.chain_id
        )),
        (None, Some(err)) => output::warning(&format!("RPC unreachable: {}", err)),
        (None, None) => output::warning("RPC unreachable"),
    }

    Ok(())
}
