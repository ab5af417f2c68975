//! Burn bank factory client.

use std::sync::Arc;

use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider};
use anyhow::Result;
use tracing::{debug, warn};

use crate::config::BurnBankFactoryConfig;
use crate::contracts::IBurnBankFactory;

/// BurnBankFactory enumerates the burn banks deployed by a factory contract
pub struct BurnBankFactory {
    factory: IBurnBankFactory::IBurnBankFactoryInstance<Arc<DynProvider>>,
}

impl BurnBankFactory {
    pub fn new(config: BurnBankFactoryConfig, provider: Arc<DynProvider>) -> Self {
        Self {
            factory: IBurnBankFactory::new(config.address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.factory.address()
    }

    /// Number of burn banks deployed so far
    pub async fn count(&self) -> Result<u64> {
        let count = self.factory.count().call().await?;
        Ok(count.saturating_to::<u64>())
    }

    /// Lists every deployed burn bank in creation order.
    ///
    /// All reads are pinned to the latest block. An entry whose read fails is skipped
    /// and logged rather than failing the whole listing.
    pub async fn list(&self) -> Result<Vec<Address>> {
        let block_number = self.factory.provider().get_block_number().await?;
        let block_id = BlockId::number(block_number);

        let count = self
            .factory
            .count()
            .block(block_id)
            .call()
            .await?
            .saturating_to::<u64>();

        let mut created = Vec::with_capacity(count as usize);
        for index in 0..count {
            match self
                .factory
                .created(U256::from(index))
                .block(block_id)
                .call()
                .await
            {
                Ok(address) => created.push(address),
                Err(err) => {
                    warn!(factory = %self.address(), index, %err, "failed to read created burn bank");
                }
            }
        }
        debug!(factory = %self.address(), count, listed = created.len(), "listed burn banks");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Bytes, U64};
    use alloy::sol_types::SolValue;
    use alloy_transport::mock::Asserter;

    fn mocked_factory() -> (Asserter, BurnBankFactory) {
        let asserter = Asserter::new();
        let provider = alloy::providers::ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        let config = BurnBankFactoryConfig {
            address: address!("71B9a8Cdc785Dac637056D371e762CDc0f0d9385"),
        };
        (asserter, BurnBankFactory::new(config, Arc::new(provider)))
    }

    #[tokio::test]
    async fn lists_created_banks_in_order() {
        let (asserter, factory) = mocked_factory();
        let first = address!("0B0b9dCac89Cb585fAc7fC7F7A625870Ac8d9693");
        let second = address!("3A8c5868B9625B8C82650C6B25cE0E6e55c767B4");

        asserter.push_success(&U64::from(19_000_000u64));
        asserter.push_success(&Bytes::from(U256::from(2u64).abi_encode()));
        asserter.push_success(&Bytes::from(first.abi_encode()));
        asserter.push_success(&Bytes::from(second.abi_encode()));

        assert_eq!(factory.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn skips_entries_that_fail() {
        let (asserter, factory) = mocked_factory();
        let second = address!("3A8c5868B9625B8C82650C6B25cE0E6e55c767B4");

        asserter.push_success(&U64::from(19_000_000u64));
        asserter.push_success(&Bytes::from(U256::from(2u64).abi_encode()));
        asserter.push_failure_msg("execution reverted");
        asserter.push_success(&Bytes::from(second.abi_encode()));

        assert_eq!(factory.list().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn empty_factory_lists_nothing() {
        let (asserter, factory) = mocked_factory();
        asserter.push_success(&U64::from(1u64));
        asserter.push_success(&Bytes::from(U256::ZERO.abi_encode()));
        assert!(factory.list().await.unwrap().is_empty());
    }
}
