//! Burn bank dashboard implementation
//!
//! Gathers every read the dashboard renders into a [`DashboardSnapshot`] and guards
//! user transactions with the configured feature flags and the wallet's balances.

use std::future::Future;

use alloy::primitives::{Address, TxHash, U256};
use anyhow::{bail, Result};
use clients_burnbank::{BurnBankClient, NativeUsdPriceFeed, UserPosition};
use tracing::{debug, warn};

use crate::chains::Chain;
use crate::config::DashboardConfig;
use crate::types::{DashboardSnapshot, SnapshotInputs};

/// Burn Bank Dashboard
///
/// Binds one burn bank on one chain to the native/USD feed of that chain.
pub struct BurnBankDashboard {
    config: DashboardConfig,
    chain: &'static Chain,
    burn_bank: BurnBankClient,
    /// Absent on chains without a native/USD aggregator
    price_feed: Option<NativeUsdPriceFeed>,
}

impl BurnBankDashboard {
    /// Creates a new `BurnBankDashboard` instance
    ///
    /// # Arguments
    /// * `config` - Feature flags read at startup
    /// * `chain` - Metadata of the chain the burn bank lives on
    /// * `burn_bank` - Client bound to the selected burn bank
    /// * `price_feed` - Native/USD feed of the chain, if it has one
    pub fn new(
        config: DashboardConfig,
        chain: &'static Chain,
        burn_bank: BurnBankClient,
        price_feed: Option<NativeUsdPriceFeed>,
    ) -> Self {
        Self {
            config,
            chain,
            burn_bank,
            price_feed,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn chain(&self) -> &'static Chain {
        self.chain
    }

    pub fn burn_bank(&self) -> &BurnBankClient {
        &self.burn_bank
    }

    /// Performs a complete read cycle and assembles a snapshot.
    ///
    /// Only the block number is required; any other failed read is logged and
    /// rendered as unavailable. `user` is ignored while wallet connection is disabled.
    ///
    /// # Returns
    /// A `DashboardSnapshot`, or an error if the block number cannot be read
    pub async fn status(&self, user: Option<Address>) -> Result<DashboardSnapshot> {
        let inputs = self.read_inputs(user).await?;
        Ok(DashboardSnapshot::assemble(
            self.chain,
            &self.config,
            self.burn_bank.address(),
            &inputs,
        ))
    }

    async fn read_inputs(&self, user: Option<Address>) -> Result<SnapshotInputs> {
        let bank = &self.burn_bank;
        let block_number = bank.get_block_number().await?;

        let metrics = optional("metrics", bank.metrics_at(block_number)).await;
        let mut inputs = SnapshotInputs {
            block_number: Some(block_number),
            jackpot_balance: optional("jackpot balance", bank.jackpot_balance()).await,
            total_donated: metrics.as_ref().map(|m| m.total_donated),
            total_burned: metrics.as_ref().map(|m| m.total_burned),
            total_staked: metrics.as_ref().map(|m| m.total_staked),
            token: optional("token info", bank.token_info()).await,
            token_price_in_native: optional("token price", bank.token_price_in_native()).await,
            epoch: optional("epoch", bank.epoch()).await,
            ..SnapshotInputs::default()
        };

        if let Some(feed) = &self.price_feed {
            inputs.price_reading = optional("price feed round", feed.latest_round()).await;
            inputs.price_decimals = optional("price feed decimals", feed.decimals()).await;
        }

        if let Some(user) = user {
            if self.config.wallet_connection_enabled {
                inputs.user = optional("user position", bank.user_position(user)).await;
            } else {
                debug!(%user, "wallet connection disabled, skipping user reads");
            }
        }
        Ok(inputs)
    }

    /// Approves the burn bank to pull `amount` of the stake token
    pub async fn approve(&self, amount: U256) -> Result<TxHash> {
        self.ensure_wallet()?;
        if !self.config.stake_enabled {
            bail!("Staking is temporarily disabled.");
        }
        if amount.is_zero() {
            bail!("Please enter a valid amount to approve.");
        }
        self.burn_bank.approve(amount).await
    }

    /// Stakes `amount` after checking the wallet's balance and allowance
    pub async fn stake(&self, user: Address, amount: U256) -> Result<TxHash> {
        self.ensure_wallet()?;
        let position = self.burn_bank.user_position(user).await?;
        check_stake(&self.config, &position, amount)?;
        self.burn_bank.stake(amount).await
    }

    /// Withdraws `amount` after checking the wallet's stake
    pub async fn withdraw(&self, user: Address, amount: U256) -> Result<TxHash> {
        self.ensure_wallet()?;
        let position = self.burn_bank.user_position(user).await?;
        check_withdraw(&position, amount)?;
        self.burn_bank.withdraw(amount).await
    }

    /// Donates `value` wei after checking the wallet's native balance
    pub async fn donate(&self, user: Address, value: U256) -> Result<TxHash> {
        self.ensure_wallet()?;
        let native_balance = self.burn_bank.native_balance(user).await?;
        check_donate(native_balance, value)?;
        self.burn_bank.donate(value).await
    }

    /// Opts into or out of jackpot winnings
    pub async fn set_winning_preference(&self, opt_in: bool) -> Result<TxHash> {
        self.ensure_wallet()?;
        if !self.config.winning_preference_enabled {
            bail!("Winning preference is not available.");
        }
        self.burn_bank.set_winning_preference(opt_in).await
    }

    fn ensure_wallet(&self) -> Result<()> {
        if !self.config.wallet_connection_enabled {
            bail!("Wallet connection is disabled.");
        }
        Ok(())
    }
}

async fn optional<T>(what: &str, read: impl Future<Output = Result<T>>) -> Option<T> {
    match read.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(read = what, error = %err, "dashboard read failed");
            None
        }
    }
}

pub(crate) fn check_stake(
    config: &DashboardConfig,
    position: &UserPosition,
    amount: U256,
) -> Result<()> {
    if !config.stake_enabled {
        bail!("Staking is temporarily disabled.");
    }
    if amount.is_zero() {
        bail!("Enter a valid amount to stake.");
    }
    if amount > position.token_balance {
        bail!("Stake amount exceeds your available balance.");
    }
    if amount > position.allowance {
        bail!("Please approve the token amount before staking.");
    }
    Ok(())
}

pub(crate) fn check_withdraw(position: &UserPosition, amount: U256) -> Result<()> {
    if amount.is_zero() {
        bail!("Enter a valid amount to withdraw.");
    }
    if amount > position.staked {
        bail!("Withdraw amount exceeds your staked balance.");
    }
    Ok(())
}

pub(crate) fn check_donate(native_balance: U256, value: U256) -> Result<()> {
    if value.is_zero() {
        bail!("Enter a valid amount to donate.");
    }
    if value > native_balance {
        bail!("Insufficient native token balance for this donation.");
    }
    Ok(())
}
