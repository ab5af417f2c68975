//! Burn bank client and the data types read from it.

use std::sync::Arc;

use alloy::eips::BlockId;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::BurnBankConfig;
use crate::contracts::{IBurnBank, IERC20, ITokenPrice};

/// Aggregate totals of a burn bank, read at a single block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnBankMetrics {
    /// Block number the totals were read at
    pub block_number: u64,
    /// Total native currency donated, in wei
    pub total_donated: U256,
    /// Total stake token burned, in token units
    pub total_burned: U256,
    /// Total stake token currently staked, in token units
    pub total_staked: U256,
}

/// Epoch schedule as stored on-chain
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochData {
    pub interval_blocks: u16,
    pub start_block: U256,
}

/// Metadata of the token staked into a burn bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Wallet-specific state relative to a burn bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPosition {
    pub user: Address,
    /// Native currency balance of the wallet
    pub native_balance: U256,
    /// Stake token held by the wallet
    pub token_balance: U256,
    /// Stake token currently staked in the burn bank
    pub staked: U256,
    /// Stake token the burn bank may pull from the wallet
    pub allowance: U256,
    /// Whether the wallet declined jackpot winnings
    pub declines: bool,
}

/// Owner-set parameters of a burn bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankParameters {
    pub burn_factor: u16,
    pub donation_percentage: u16,
    /// Recipient of donations
    pub destination: Address,
    /// Recipient of burned tokens
    pub burn_destination: Address,
}

/// BurnBankClient reads burn bank state and submits user transactions.
///
/// Writes require the provider to carry a wallet; each waits for the transaction
/// to be included and returns its hash.
pub struct BurnBankClient {
    /// Burn bank contract instance for making RPC calls
    burn_bank: IBurnBank::IBurnBankInstance<Arc<DynProvider>>,
    /// Stake token address, read once on first use
    token: OnceCell<Address>,
}

impl BurnBankClient {
    /// Creates a new `BurnBankClient` instance
    ///
    /// # Arguments
    /// * `config` - A `BurnBankConfig` containing the contract address
    /// * `provider` - Provider instance for making RPC calls to the blockchain
    pub fn new(config: BurnBankConfig, provider: Arc<DynProvider>) -> Self {
        Self {
            burn_bank: IBurnBank::new(config.address, provider),
            token: OnceCell::new(),
        }
    }

    pub fn address(&self) -> Address {
        *self.burn_bank.address()
    }

    fn provider(&self) -> &Arc<DynProvider> {
        self.burn_bank.provider()
    }

    /// Gets the current block number from the blockchain provider
    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider().get_block_number().await?)
    }

    /// Native currency balance of any account
    pub async fn native_balance(&self, account: Address) -> Result<U256> {
        Ok(self.provider().get_balance(account).await?)
    }

    /// Native currency held by the burn bank, paid out as the jackpot
    pub async fn jackpot_balance(&self) -> Result<U256> {
        self.native_balance(self.address()).await
    }

    /// Reads donated, burned and staked totals at the latest block
    pub async fn metrics(&self) -> Result<BurnBankMetrics> {
        let block_number = self.get_block_number().await?;
        self.metrics_at(block_number).await
    }

    /// Reads donated, burned and staked totals at `block_number`
    pub async fn metrics_at(&self, block_number: u64) -> Result<BurnBankMetrics> {
        let block_id = BlockId::number(block_number);

        let total_donated = self.burn_bank.totalGvn().block(block_id).call().await?;
        let total_burned = self.burn_bank.totalBurned().block(block_id).call().await?;
        let total_staked = self.burn_bank.totalStk().block(block_id).call().await?;

        Ok(BurnBankMetrics {
            block_number,
            total_donated,
            total_burned,
            total_staked,
        })
    }

    /// Reads the epoch interval and start block
    pub async fn epoch(&self) -> Result<EpochData> {
        let interval_blocks = self.burn_bank.epochInterval().call().await?;
        let start_block = self.burn_bank.startBlock().call().await?;
        Ok(EpochData {
            interval_blocks,
            start_block,
        })
    }

    /// Address of the staked token
    pub async fn token_address(&self) -> Result<Address> {
        let address = self
            .token
            .get_or_try_init(|| async { self.burn_bank.tokenAddr().call().await })
            .await?;
        Ok(*address)
    }

    /// Reads name, symbol and decimals of the staked token
    pub async fn token_info(&self) -> Result<TokenInfo> {
        let address = self.token_address().await?;
        let token = IERC20::new(address, Arc::clone(self.provider()));
        let name = token.name().call().await?;
        let symbol = token.symbol().call().await?;
        let decimals = token.decimals().call().await?;
        Ok(TokenInfo {
            address,
            name,
            symbol,
            decimals,
        })
    }

    /// Price of one whole staked token in wei, as reported by the bank's price helper.
    ///
    /// Banks paired on a Uniswap v2 pair are priced with `priceV2`, others with the v3
    /// `price`. The helper may report the rate inverted; see `utils::detect_quote`.
    pub async fn token_price_in_native(&self) -> Result<U256> {
        let is_v2 = self.burn_bank.v2().call().await?;
        let pool = self.burn_bank.pool().call().await?;
        let helper_address = self.burn_bank.tp().call().await?;

        let helper = ITokenPrice::new(helper_address, Arc::clone(self.provider()));
        let price = if is_v2 {
            helper.priceV2(pool).call().await?
        } else {
            helper.price(pool).call().await?
        };
        debug!(bank = %self.address(), %pool, is_v2, %price, "read token price");
        Ok(price)
    }

    /// Reads balances, stake, allowance and winning preference of `user`
    pub async fn user_position(&self, user: Address) -> Result<UserPosition> {
        let native_balance = self.native_balance(user).await?;
        let token = IERC20::new(self.token_address().await?, Arc::clone(self.provider()));
        let token_balance = token.balanceOf(user).call().await?;
        let staked = self.burn_bank.userStks(user).call().await?;
        let allowance = token.allowance(user, self.address()).call().await?;
        let declines = self.burn_bank.declines(user).call().await?;

        Ok(UserPosition {
            user,
            native_balance,
            token_balance,
            staked,
            allowance,
            declines,
        })
    }

    /// Reads burn factor, donation percentage and payout destinations
    pub async fn parameters(&self) -> Result<BankParameters> {
        Ok(BankParameters {
            burn_factor: self.burn_bank.burnFactor().call().await?,
            donation_percentage: self.burn_bank.donationPrc().call().await?,
            destination: self.burn_bank.dest().call().await?,
            burn_destination: self.burn_bank.burnDest().call().await?,
        })
    }

    /// Approves the burn bank to pull `amount` of the staked token
    pub async fn approve(&self, amount: U256) -> Result<TxHash> {
        let token = IERC20::new(self.token_address().await?, Arc::clone(self.provider()));
        let tx_hash = token
            .approve(self.address(), amount)
            .send()
            .await?
            .watch()
            .await?;
        info!(bank = %self.address(), %amount, %tx_hash, "approved stake token");
        Ok(tx_hash)
    }

    /// Stakes `amount` of the token; requires a prior approval
    pub async fn stake(&self, amount: U256) -> Result<TxHash> {
        let tx_hash = self.burn_bank.stake(amount).send().await?.watch().await?;
        info!(bank = %self.address(), %amount, %tx_hash, "staked");
        Ok(tx_hash)
    }

    /// Withdraws `amount` of previously staked token
    pub async fn withdraw(&self, amount: U256) -> Result<TxHash> {
        let tx_hash = self
            .burn_bank
            .withdraw(amount)
            .send()
            .await?
            .watch()
            .await?;
        info!(bank = %self.address(), %amount, %tx_hash, "withdrew");
        Ok(tx_hash)
    }

    /// Donates `value` wei of native currency to the burn bank
    pub async fn donate(&self, value: U256) -> Result<TxHash> {
        let tx_hash = self
            .burn_bank
            .give()
            .value(value)
            .send()
            .await?
            .watch()
            .await?;
        info!(bank = %self.address(), %value, %tx_hash, "donated");
        Ok(tx_hash)
    }

    /// Opts into (`allow`) or out of (`decline`) jackpot winnings
    pub async fn set_winning_preference(&self, opt_in: bool) -> Result<TxHash> {
        let pending = if opt_in {
            self.burn_bank.allow().send().await?
        } else {
            self.burn_bank.decline().send().await?
        };
        let tx_hash = pending.watch().await?;
        info!(bank = %self.address(), opt_in, %tx_hash, "updated winning preference");
        Ok(tx_hash)
    }
}
