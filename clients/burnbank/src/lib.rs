mod burn_bank;
mod config;
mod contracts;
mod factory;
mod price_feed;

pub use burn_bank::{
    BankParameters, BurnBankClient, BurnBankMetrics, EpochData, TokenInfo, UserPosition,
};
pub use config::{BurnBankConfig, BurnBankFactoryConfig, PriceFeedConfig};
pub use factory::BurnBankFactory;
pub use price_feed::NativeUsdPriceFeed;
