//! Feature flags of the dashboard.
//!
//! Read once at startup and passed explicitly to whatever needs them.

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

const STAKE_DISABLED_VAR: &str = "BURNBANK_STAKE_DISABLED";
const WALLET_CONNECTION_DISABLED_VAR: &str = "BURNBANK_WALLET_CONNECTION_DISABLED";
const WINNING_PREFERENCE_ENABLED_VAR: &str = "BURNBANK_WINNING_PREFERENCE_ENABLED";
const COMPACT_METRICS_VAR: &str = "BURNBANK_COMPACT_METRICS";
const WEBSITE_URL_VAR: &str = "BURNBANK_WEBSITE_URL";

/// Configuration for BurnBankDashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Staking and approvals may be submitted
    pub stake_enabled: bool,
    /// Wallet-bound reads and every transaction are allowed
    pub wallet_connection_enabled: bool,
    /// The opt-in/opt-out winning preference is shown and may be changed
    pub winning_preference_enabled: bool,
    /// Burned and staked totals render with magnitude suffixes instead of grouped integers
    pub compact_metrics: bool,
    /// Project website hosting per-bank detail pages
    pub website_url: Option<Url>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stake_enabled: true,
            wallet_connection_enabled: true,
            winning_preference_enabled: false,
            compact_metrics: false,
            website_url: None,
        }
    }
}

impl DashboardConfig {
    /// Reads the flags from the process environment.
    ///
    /// A flag is set only by the literal value `true`; anything else keeps the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).is_some_and(|value| value.trim() == "true");
        let website_url = lookup(WEBSITE_URL_VAR).and_then(|raw| match Url::parse(raw.trim()) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(%raw, %err, "ignoring invalid website url");
                None
            }
        });

        Self {
            stake_enabled: !flag(STAKE_DISABLED_VAR),
            wallet_connection_enabled: !flag(WALLET_CONNECTION_DISABLED_VAR),
            winning_preference_enabled: flag(WINNING_PREFERENCE_ENABLED_VAR),
            compact_metrics: flag(COMPACT_METRICS_VAR),
            website_url,
        }
    }
}
