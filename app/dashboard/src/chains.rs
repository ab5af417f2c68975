//! Static metadata of the supported networks.

use alloy::primitives::{address, Address};

/// A network the dashboard can read from
#[derive(Debug)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    /// Segment used in URLs and official config paths (e.g. `eth`)
    pub path_segment: &'static str,
    pub native_symbol: &'static str,
    pub native_decimals: u8,
    /// Average block time in seconds, when known
    pub average_block_seconds: Option<u64>,
    pub explorer_url: &'static str,
    /// Public RPC endpoint used when none is supplied
    pub rpc_url: &'static str,
    /// Factory deploying burn banks on this chain
    pub factory: Option<Address>,
    /// Burn bank shown before the user picks one
    pub default_burn_bank: Option<Address>,
    /// Chainlink native/USD aggregator
    pub native_usd_feed: Option<Address>,
    /// Burn banks curated by the project
    pub official_burn_banks: &'static [Address],
}

pub const ETHEREUM: Chain = Chain {
    id: 1,
    name: "Ethereum",
    path_segment: "eth",
    native_symbol: "ETH",
    native_decimals: 18,
    average_block_seconds: Some(12),
    explorer_url: "https://etherscan.io",
    rpc_url: "https://eth.llamarpc.com",
    factory: Some(address!("71B9a8Cdc785Dac637056D371e762CDc0f0d9385")),
    default_burn_bank: Some(address!("B1511DfE756342CA14a858B4896983095fEc1B51")),
    native_usd_feed: Some(address!("5f4eC3Df9cbd43714FE2740f5E3616155c5b8419")),
    official_burn_banks: &[
        address!("0B0b9dCac89Cb585fAc7fC7F7A625870Ac8d9693"),
        address!("3A8c5868B9625B8C82650C6B25cE0E6e55c767B4"),
    ],
};

pub const SEPOLIA: Chain = Chain {
    id: 11_155_111,
    name: "Sepolia",
    path_segment: "sepolia",
    native_symbol: "ETH",
    native_decimals: 18,
    average_block_seconds: Some(12),
    explorer_url: "https://sepolia.etherscan.io",
    rpc_url: "https://ethereum-sepolia-rpc.publicnode.com",
    factory: Some(address!("8cCaaA26014285dAF6cDeF0e6a51C15198E5936c")),
    default_burn_bank: Some(address!("4a889E3B1feebeABDe205097a87bF9f6FBe51D1B")),
    native_usd_feed: Some(address!("694AA1769357215DE4FAC081bf1f309aDC325306")),
    official_burn_banks: &[address!("6A653395F0CA00205427D98BE7A8947D1b8F82E8")],
};

pub const BASE: Chain = Chain {
    id: 8453,
    name: "Base",
    path_segment: "base",
    native_symbol: "ETH",
    native_decimals: 18,
    average_block_seconds: Some(2),
    explorer_url: "https://basescan.org",
    rpc_url: "https://mainnet.base.org",
    factory: None,
    default_burn_bank: None,
    native_usd_feed: Some(address!("71041dddad3595F9CEd3DcCFBe3D1F4b0a16Bb70")),
    official_burn_banks: &[],
};

pub const SHIBARIUM: Chain = Chain {
    id: 109,
    name: "Shibarium",
    path_segment: "shibarium",
    native_symbol: "BONE",
    native_decimals: 18,
    average_block_seconds: Some(5),
    explorer_url: "https://shibariumscan.io",
    rpc_url: "https://rpc.shibarium.shib.io",
    factory: None,
    default_burn_bank: None,
    native_usd_feed: None,
    official_burn_banks: &[],
};

pub const SUPPORTED_CHAINS: [&Chain; 4] = [&ETHEREUM, &SEPOLIA, &BASE, &SHIBARIUM];

pub fn chain_by_id(id: u64) -> Option<&'static Chain> {
    SUPPORTED_CHAINS.into_iter().find(|chain| chain.id == id)
}

pub fn chain_by_path(segment: &str) -> Option<&'static Chain> {
    SUPPORTED_CHAINS
        .into_iter()
        .find(|chain| chain.path_segment.eq_ignore_ascii_case(segment))
}

impl Chain {
    /// Explorer page of an address
    pub fn explorer_address_url(&self, address: Address) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }

    /// Explorer page of a transaction
    pub fn explorer_tx_url(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(chain_by_id(8453).map(|c| c.name), Some("Base"));
        assert_eq!(chain_by_path("ETH").map(|c| c.id), Some(1));
        assert!(chain_by_id(56).is_none());
    }

    #[test]
    fn average_block_times() {
        let times: Vec<_> = SUPPORTED_CHAINS
            .iter()
            .map(|c| (c.id, c.average_block_seconds))
            .collect();
        assert_eq!(
            times,
            vec![
                (1, Some(12)),
                (11_155_111, Some(12)),
                (8453, Some(2)),
                (109, Some(5))
            ]
        );
    }

    #[test]
    fn shibarium_has_no_price_feed() {
        assert!(SHIBARIUM.native_usd_feed.is_none());
        assert!(SHIBARIUM.factory.is_none());
    }

    #[test]
    fn explorer_links() {
        let url = ETHEREUM.explorer_address_url(address!("B1511DfE756342CA14a858B4896983095fEc1B51"));
        assert!(url.starts_with("https://etherscan.io/address/0x"));
    }
}
