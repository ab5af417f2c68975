//! Configuration types for burn bank clients.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Configuration for BurnBankClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnBankConfig {
    /// The contract address of the burn bank
    pub address: Address,
}

/// Configuration for BurnBankFactory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnBankFactoryConfig {
    /// The contract address of the factory that deploys burn banks
    pub address: Address,
}

/// Configuration for NativeUsdPriceFeed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    /// The contract address of the native/USD aggregator
    pub address: Address,
}
