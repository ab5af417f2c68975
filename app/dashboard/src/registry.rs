//! Official burn bank metadata and contract list resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use alloy::primitives::Address;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

const CONFIG_FILE: &str = "config.json";
const LOGO_FILE: &str = "logo.png";

/// Curated metadata of an official burn bank, stored as `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialTokenConfig {
    /// Burn bank contract address
    pub address: Address,
    pub token_address: Address,
    pub token_symbol: String,
    pub token_name: String,
    pub token_decimals: u8,
    /// Charity receiving donations
    pub charity: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Whether the project website hosts a details page for this bank
    #[serde(default)]
    pub details: bool,
}

impl OfficialTokenConfig {
    /// Link to the bank's details page, `{website}/bank/{symbol}`
    pub fn details_link(&self, website: &Url) -> Option<String> {
        if !self.details || self.token_symbol.is_empty() {
            return None;
        }
        let base = website.as_str().trim_end_matches('/');
        Some(format!("{}/bank/{}", base, self.token_symbol.to_lowercase()))
    }
}

/// Official configs grouped by chain path segment
#[derive(Debug, Clone, Default)]
pub struct OfficialRegistry {
    chains: BTreeMap<String, Vec<OfficialTokenConfig>>,
}

impl OfficialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chain_path: &str, config: OfficialTokenConfig) {
        self.chains
            .entry(chain_path.to_lowercase())
            .or_default()
            .push(config);
    }

    /// Parses `{ "<chain path>": [config, ...], ... }`
    pub fn from_json(json: &str) -> Result<Self> {
        let chains: BTreeMap<String, Vec<OfficialTokenConfig>> =
            serde_json::from_str(json).context("invalid official registry json")?;
        let mut registry = Self::new();
        for (chain_path, configs) in chains {
            for config in configs {
                registry.insert(&chain_path, config);
            }
        }
        Ok(registry)
    }

    /// Loads `<root>/<chain path>/<token>/config.json`, attaching `logo.png` when present.
    ///
    /// Token folders without a config are skipped.
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut registry = Self::new();
        for chain_entry in read_subdirs(root)? {
            let chain_path = dir_name(&chain_entry)?;
            for token_dir in read_subdirs(&chain_entry)? {
                let config_path = token_dir.join(CONFIG_FILE);
                if !config_path.is_file() {
                    debug!(dir = %token_dir.display(), "no official config");
                    continue;
                }
                let raw = fs::read_to_string(&config_path)
                    .with_context(|| format!("failed to read {}", config_path.display()))?;
                let mut config: OfficialTokenConfig = serde_json::from_str(&raw)
                    .with_context(|| format!("invalid config {}", config_path.display()))?;
                let logo = token_dir.join(LOGO_FILE);
                if logo.is_file() {
                    config.logo_url = Some(logo.display().to_string());
                }
                registry.insert(&chain_path, config);
            }
        }
        Ok(registry)
    }

    /// Finds the official config of a burn bank on a chain
    pub fn lookup(&self, chain_path: &str, burn_bank: Address) -> Option<&OfficialTokenConfig> {
        let Some(configs) = self.chains.get(&chain_path.to_lowercase()) else {
            warn!(chain_path, "no official configs for chain");
            return None;
        };
        configs.iter().find(|config| config.address == burn_bank)
    }

    pub fn len(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_subdirs(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("invalid directory name {}", path.display()))
}

/// Where the list of selectable burn banks comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractSourceMode {
    /// Only banks enumerated from the chain's factory
    FetchedOnly,
    /// Only the curated official banks
    HardcodedOnly,
    /// Official banks first, then any additional factory banks
    #[default]
    BothMerged,
}

impl ContractSourceMode {
    pub fn uses_factory(self) -> bool {
        matches!(self, Self::FetchedOnly | Self::BothMerged)
    }
}

impl FromStr for ContractSourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fetched" | "fetched-only" => Ok(Self::FetchedOnly),
            "hardcoded" | "hardcoded-only" | "official" => Ok(Self::HardcodedOnly),
            "merged" | "both" | "both-merged" => Ok(Self::BothMerged),
            other => Err(anyhow!("unknown contract source mode: {}", other)),
        }
    }
}

/// Combines official and factory-listed banks according to `mode`.
///
/// The merged list keeps first occurrences in order and drops duplicates.
pub fn resolve_contract_list(
    mode: ContractSourceMode,
    official: &[Address],
    fetched: &[Address],
) -> Vec<Address> {
    match mode {
        ContractSourceMode::FetchedOnly => fetched.to_vec(),
        ContractSourceMode::HardcodedOnly => official.to_vec(),
        ContractSourceMode::BothMerged => {
            let mut merged: Vec<Address> = Vec::with_capacity(official.len() + fetched.len());
            for address in official.iter().chain(fetched) {
                if !merged.contains(address) {
                    merged.push(*address);
                }
            }
            merged
        }
    }
}
