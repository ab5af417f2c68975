//! Burn bank listing example: resolve the selectable burn banks of a chain and print
//! their token and parameters.
//!
//! Usage: burnbank-contracts <rpc_url> <chain_id> [fetched|official|merged] [official_config_dir]

use std::path::Path;
use std::sync::Arc;

use alloy::network::Ethereum;
use alloy::providers::{Provider, RootProvider};
use anyhow::{anyhow, Result};
use clients_burnbank::{BurnBankClient, BurnBankConfig, BurnBankFactory, BurnBankFactoryConfig};
use dashboard::{
    chains, resolve_contract_list, ContractSourceMode, DashboardConfig, OfficialRegistry,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <rpc_url> <chain_id> [fetched|official|merged] [official_config_dir]",
            args.first()
                .map(|s| s.as_str())
                .unwrap_or("burnbank-contracts")
        );
        std::process::exit(1);
    }

    let rpc_url = url::Url::parse(args[1].trim())?;
    let chain_id: u64 = args[2].trim().parse()?;
    let chain = chains::chain_by_id(chain_id)
        .ok_or_else(|| anyhow!("unsupported chain id {}", chain_id))?;
    let mode = match args.get(3) {
        Some(raw) => raw.parse::<ContractSourceMode>()?,
        None => ContractSourceMode::default(),
    };
    let registry = match args.get(4) {
        Some(dir) => OfficialRegistry::from_dir(Path::new(dir.trim()))?,
        None => OfficialRegistry::new(),
    };
    let config = DashboardConfig::from_env();

    let provider = Arc::new(RootProvider::<Ethereum>::new_http(rpc_url).erased());

    let fetched = match (mode.uses_factory(), chain.factory) {
        (true, Some(address)) => {
            let factory =
                BurnBankFactory::new(BurnBankFactoryConfig { address }, Arc::clone(&provider));
            factory.list().await?
        }
        (true, None) => {
            println!("Coming Soon on {}!", chain.name);
            Vec::new()
        }
        (false, _) => Vec::new(),
    };
    let burn_banks = resolve_contract_list(mode, chain.official_burn_banks, &fetched);
    println!("{} | {:?} | Burn banks: {}", chain.name, mode, burn_banks.len());

    for address in burn_banks {
        let client = BurnBankClient::new(BurnBankConfig { address }, Arc::clone(&provider));
        println!("---");
        println!("  burn bank: {}", address);
        println!("  explorer:  {}", chain.explorer_address_url(address));

        match client.token_info().await {
            Ok(token) => println!("  token:     {} ({}) {}", token.symbol, token.name, token.address),
            Err(err) => warn!(%address, error = %err, "failed to read token info"),
        }
        match client.parameters().await {
            Ok(params) => {
                println!("  burn factor: {}", params.burn_factor);
                println!("  donation %:  {}", params.donation_percentage);
                println!("  donations to: {}", params.destination);
                println!("  burns to:     {}", params.burn_destination);
            }
            Err(err) => warn!(%address, error = %err, "failed to read parameters"),
        }

        if let Some(official) = registry.lookup(chain.path_segment, address) {
            println!("  official:  {} / charity: {}", official.token_name, official.charity);
            if let Some(link) = config
                .website_url
                .as_ref()
                .and_then(|website| official.details_link(website))
            {
                println!("  details:   {}", link);
            }
        }
    }

    Ok(())
}
