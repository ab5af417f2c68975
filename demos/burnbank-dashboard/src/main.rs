//! Burn bank dashboard example: print a snapshot on every new block and tick the
//! epoch countdown once per second in between.
//!
//! Usage: burnbank-dashboard <rpc_url> <chain_id> [burn_bank_address] [user_address]
//!
//! Feature flags are read from `BURNBANK_*` environment variables.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::{Provider, RootProvider};
use anyhow::{anyhow, Result};
use clients_burnbank::{BurnBankClient, BurnBankConfig, NativeUsdPriceFeed, PriceFeedConfig};
use dashboard::{chains, BurnBankDashboard, DashboardConfig};
use tokio::time::{interval, Duration};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use utils::Countdown;

/// Seconds between block number polls
const BLOCK_POLL_SECONDS: u64 = 4;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <rpc_url> <chain_id> [burn_bank_address] [user_address]",
            args.first()
                .map(|s| s.as_str())
                .unwrap_or("burnbank-dashboard")
        );
        std::process::exit(1);
    }

    let rpc_url = url::Url::parse(args[1].trim())?;
    let chain_id: u64 = args[2].trim().parse()?;
    let chain = chains::chain_by_id(chain_id)
        .ok_or_else(|| anyhow!("unsupported chain id {}", chain_id))?;
    let burn_bank = match args.get(3) {
        Some(raw) => Address::from_str(raw.trim())?,
        None => chain
            .default_burn_bank
            .ok_or_else(|| anyhow!("no default burn bank on {}", chain.name))?,
    };
    let user = args
        .get(4)
        .map(|raw| Address::from_str(raw.trim()))
        .transpose()?;

    let provider = Arc::new(RootProvider::<Ethereum>::new_http(rpc_url).erased());
    let client = BurnBankClient::new(BurnBankConfig { address: burn_bank }, Arc::clone(&provider));
    let price_feed = chain.native_usd_feed.map(|address| {
        NativeUsdPriceFeed::new(PriceFeedConfig { address }, Arc::clone(&provider))
    });
    let dashboard = BurnBankDashboard::new(DashboardConfig::from_env(), chain, client, price_feed);

    let mut ticker = interval(Duration::from_secs(1));
    let mut countdown = Countdown::new();
    let mut last_block = None;
    let mut elapsed = 0u64;

    loop {
        ticker.tick().await;
        let refreshed = if elapsed % BLOCK_POLL_SECONDS == 0 {
            refresh(&dashboard, user, &mut last_block, &mut countdown).await
        } else {
            false
        };
        if !refreshed {
            countdown.tick();
        }
        elapsed += 1;

        print!("\rNext epoch in: {:<20}", countdown.display());
        std::io::stdout().flush()?;
    }
}

/// Re-reads the dashboard when a new block arrived. Returns whether it did.
async fn refresh(
    dashboard: &BurnBankDashboard,
    user: Option<Address>,
    last_block: &mut Option<u64>,
    countdown: &mut Countdown,
) -> bool {
    let block = match dashboard.burn_bank().get_block_number().await {
        Ok(block) => block,
        Err(err) => {
            warn!(error = %err, "failed to poll block number");
            return false;
        }
    };
    if *last_block == Some(block) {
        return false;
    }

    match dashboard.status(user).await {
        Ok(snapshot) => {
            *last_block = snapshot.block_number;
            countdown.reset(snapshot.seconds_until_next_epoch);
            if let Ok(json) = serde_json::to_string(&snapshot) {
                debug!(snapshot = %json, "dashboard snapshot");
            }
            println!("\n{}", snapshot.to_message());
            true
        }
        Err(err) => {
            warn!(block, error = %err, "failed to read dashboard");
            false
        }
    }
}
