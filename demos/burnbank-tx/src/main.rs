//! Burn bank transaction example: approve, stake, withdraw, donate or change the
//! winning preference with a local private key.
//!
//! Usage: burnbank-tx <rpc_url> <chain_id> <burn_bank_address> <private_key> <action> [amount]
//!
//! Actions: approve <amount> | stake <amount> | withdraw <amount> | donate <amount> | opt-in | opt-out
//! Amounts are decimal strings in whole tokens (or whole native currency for donate).

use std::str::FromStr;
use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, bail, Result};
use clients_burnbank::{BurnBankClient, BurnBankConfig};
use dashboard::{chains, BurnBankDashboard, DashboardConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utils::ScaledAmount;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 6 {
        eprintln!(
            "Usage: {} <rpc_url> <chain_id> <burn_bank_address> <private_key> <approve|stake|withdraw|donate|opt-in|opt-out> [amount]",
            args.first().map(|s| s.as_str()).unwrap_or("burnbank-tx")
        );
        std::process::exit(1);
    }

    let rpc_url = url::Url::parse(args[1].trim())?;
    let chain_id: u64 = args[2].trim().parse()?;
    let chain = chains::chain_by_id(chain_id)
        .ok_or_else(|| anyhow!("unsupported chain id {}", chain_id))?;
    let burn_bank = Address::from_str(args[3].trim())?;
    let signer = PrivateKeySigner::from_str(args[4].trim())?;
    let action = args[5].trim().to_lowercase();
    let amount = args.get(6).map(|s| s.trim().to_string());

    let user = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url)
        .erased();

    let connected_chain = provider.get_chain_id().await?;
    if connected_chain != chain.id {
        bail!(
            "Please switch your wallet to {} (RPC reports chain {}).",
            chain.name,
            connected_chain
        );
    }

    let client = BurnBankClient::new(BurnBankConfig { address: burn_bank }, Arc::new(provider));
    let dashboard = BurnBankDashboard::new(DashboardConfig::from_env(), chain, client, None);

    let tx_hash = match action.as_str() {
        "approve" => {
            let value = token_amount(&dashboard, amount.as_deref()).await?;
            dashboard.approve(value).await?
        }
        "stake" => {
            let value = token_amount(&dashboard, amount.as_deref()).await?;
            dashboard.stake(user, value).await?
        }
        "withdraw" => {
            let value = token_amount(&dashboard, amount.as_deref()).await?;
            dashboard.withdraw(user, value).await?
        }
        "donate" => {
            let value = parse_amount(amount.as_deref(), chain.native_decimals)?;
            info!(
                amount = %ScaledAmount::new(value, chain.native_decimals),
                symbol = chain.native_symbol,
                "donating"
            );
            dashboard.donate(user, value).await?
        }
        "opt-in" => dashboard.set_winning_preference(true).await?,
        "opt-out" => dashboard.set_winning_preference(false).await?,
        other => bail!("unknown action: {}", other),
    };

    println!("{}", chain.explorer_tx_url(tx_hash));
    Ok(())
}

async fn token_amount(dashboard: &BurnBankDashboard, raw: Option<&str>) -> Result<U256> {
    let token = dashboard.burn_bank().token_info().await?;
    let value = parse_amount(raw, token.decimals)?;
    info!(
        amount = %ScaledAmount::new(value, token.decimals),
        symbol = %token.symbol,
        "parsed token amount"
    );
    Ok(value)
}

/// Parses a decimal amount into base units; signed input is rejected.
fn parse_amount(raw: Option<&str>, decimals: u8) -> Result<U256> {
    let raw = raw.ok_or_else(|| anyhow!("missing amount"))?;
    match parse_units(raw, decimals)? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => bail!("Enter a valid amount: {} is negative.", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(
            parse_amount(Some("1.5"), 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_amount(Some("42"), 0).unwrap(), U256::from(42u64));
    }

    #[test]
    fn rejects_negative_and_missing_amounts() {
        assert!(parse_amount(Some("-5"), 18).is_err());
        assert!(parse_amount(Some("-0.1"), 18).is_err());
        assert!(parse_amount(None, 18).is_err());
        assert!(parse_amount(Some("abc"), 18).is_err());
    }
}
