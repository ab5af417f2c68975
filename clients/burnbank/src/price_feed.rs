//! Chainlink native/USD price feed client.

use std::sync::Arc;

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use anyhow::Result;
use tracing::debug;
use utils::PriceReading;

use crate::config::PriceFeedConfig;
use crate::contracts::IAggregatorV3;

/// NativeUsdPriceFeed reads the latest native/USD round from an aggregator
pub struct NativeUsdPriceFeed {
    feed: IAggregatorV3::IAggregatorV3Instance<Arc<DynProvider>>,
}

impl NativeUsdPriceFeed {
    /// Creates a new `NativeUsdPriceFeed` bound to the aggregator at `config.address`
    pub fn new(config: PriceFeedConfig, provider: Arc<DynProvider>) -> Self {
        Self {
            feed: IAggregatorV3::new(config.address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.feed.address()
    }

    /// Number of decimals of the feed's answer
    pub async fn decimals(&self) -> Result<u8> {
        Ok(self.feed.decimals().call().await?)
    }

    /// Reads `latestRoundData`. The answer is not checked for staleness.
    pub async fn latest_round(&self) -> Result<PriceReading> {
        let round = self.feed.latestRoundData().call().await?;
        let reading = PriceReading {
            round_id: round.roundId.to::<u128>(),
            answer: round.answer,
            started_at: round.startedAt,
            updated_at: round.updatedAt,
            answered_in_round: round.answeredInRound.to::<u128>(),
        };
        debug!(feed = %self.address(), round_id = reading.round_id, answer = %reading.answer, "read price feed");
        Ok(reading)
    }
}
