//! Display-ready dashboard snapshots.

use alloy::primitives::{Address, U256};
use clients_burnbank::{EpochData, TokenInfo, UserPosition};
use serde::{Deserialize, Serialize};
use utils::{
    format_allowance, format_balance, format_compact_number, format_epoch_interval,
    format_grouped_integer, format_seconds_to_time, usd_from_native, usd_from_token, EpochState,
    EpochStatus, PriceReading, ScaledAmount, DEFAULT_NATIVE_DECIMALS,
};

use crate::chains::Chain;
use crate::config::DashboardConfig;

/// Raw chain reads feeding a snapshot. `None` means "not loaded", never zero.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInputs {
    pub block_number: Option<u64>,
    /// Native balance of the burn bank
    pub jackpot_balance: Option<U256>,
    pub total_donated: Option<U256>,
    pub total_burned: Option<U256>,
    pub total_staked: Option<U256>,
    pub token: Option<TokenInfo>,
    /// Price of one whole token in wei, possibly inverted
    pub token_price_in_native: Option<U256>,
    pub price_reading: Option<PriceReading>,
    pub price_decimals: Option<u8>,
    pub epoch: Option<EpochData>,
    pub user: Option<UserPosition>,
}

/// Wallet section of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub address: Address,
    pub native_balance: String,
    pub token_balance: Option<String>,
    pub staked: Option<String>,
    pub staked_usd: Option<String>,
    pub allowance: Option<String>,
    /// `Some(true)` when opted into winnings; `None` when the preference is hidden
    pub winning_opt_in: Option<bool>,
}

/// Everything the dashboard renders for one burn bank at one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub chain: String,
    pub native_symbol: String,
    pub burn_bank: Address,
    pub block_number: Option<u64>,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    /// Jackpot in native currency, 4 fractional digits
    pub jackpot: Option<String>,
    pub jackpot_usd: Option<String>,
    pub total_donated: Option<String>,
    pub total_donated_usd: Option<String>,
    pub total_burned: Option<String>,
    pub total_burned_usd: Option<String>,
    pub total_staked: Option<String>,
    pub total_staked_usd: Option<String>,
    /// Length of one epoch, e.g. `1d 0h 0m 0s`
    pub epoch_interval: String,
    pub epoch_status: Option<EpochStatus>,
    pub seconds_until_next_epoch: Option<u64>,
    pub countdown: String,
    pub user: Option<UserSnapshot>,
}

impl DashboardSnapshot {
    /// Composes a snapshot from raw reads; pure and deterministic.
    pub fn assemble(
        chain: &Chain,
        config: &DashboardConfig,
        burn_bank: Address,
        inputs: &SnapshotInputs,
    ) -> Self {
        let reading = inputs.price_reading.as_ref();
        let native_decimals = chain.native_decimals;
        let token_decimals = inputs.token.as_ref().map(|token| token.decimals);

        let native_usd =
            |amount: Option<U256>| usd_from_native(amount, reading, inputs.price_decimals, native_decimals);
        let token_usd = |amount: Option<U256>| {
            usd_from_token(
                amount,
                token_decimals,
                inputs.token_price_in_native,
                DEFAULT_NATIVE_DECIMALS,
                reading,
                inputs.price_decimals,
            )
        };
        let native_display =
            |amount: Option<U256>| amount.map(|value| format_native(value, native_decimals));
        let metric_display = |amount: Option<U256>| {
            let decimals = token_decimals?;
            let value = ScaledAmount::new(amount?, decimals).to_f64();
            Some(if config.compact_metrics {
                format_compact_number(value, 2)
            } else {
                format_grouped_integer(value)
            })
        };

        let epoch_state = inputs.epoch.and_then(|epoch| {
            Some(EpochState {
                start_block: epoch.start_block.saturating_to::<u64>(),
                interval_blocks: u64::from(epoch.interval_blocks),
                average_block_seconds: chain.average_block_seconds?,
            })
        });
        let epoch_status = epoch_state
            .zip(inputs.block_number)
            .map(|(state, block)| state.status(block));
        let seconds_until_next_epoch = epoch_state
            .zip(inputs.block_number)
            .and_then(|(state, block)| state.seconds_until_next_epoch(block));
        let epoch_interval = format_epoch_interval(
            inputs.epoch.map(|epoch| u64::from(epoch.interval_blocks)),
            chain.average_block_seconds,
        );

        let user = inputs.user.as_ref().map(|position| {
            let token_amount = |value: U256| {
                token_decimals.map(|decimals| format_balance(&ScaledAmount::new(value, decimals)))
            };
            UserSnapshot {
                address: position.user,
                native_balance: format_balance(&ScaledAmount::new(
                    position.native_balance,
                    native_decimals,
                )),
                token_balance: token_amount(position.token_balance),
                staked: token_amount(position.staked),
                staked_usd: token_usd(Some(position.staked)),
                allowance: token_decimals
                    .map(|decimals| format_allowance(&ScaledAmount::new(position.allowance, decimals))),
                winning_opt_in: config
                    .winning_preference_enabled
                    .then_some(!position.declines),
            }
        });

        Self {
            chain: chain.name.to_string(),
            native_symbol: chain.native_symbol.to_string(),
            burn_bank,
            block_number: inputs.block_number,
            token_symbol: inputs.token.as_ref().map(|token| token.symbol.clone()),
            token_name: inputs.token.as_ref().map(|token| token.name.clone()),
            jackpot: native_display(inputs.jackpot_balance),
            jackpot_usd: native_usd(inputs.jackpot_balance),
            total_donated: native_display(inputs.total_donated),
            total_donated_usd: native_usd(inputs.total_donated),
            total_burned: metric_display(inputs.total_burned),
            total_burned_usd: token_usd(inputs.total_burned),
            total_staked: metric_display(inputs.total_staked),
            total_staked_usd: token_usd(inputs.total_staked),
            epoch_interval,
            epoch_status,
            seconds_until_next_epoch,
            countdown: format_seconds_to_time(
                seconds_until_next_epoch.map(|s| i64::try_from(s).unwrap_or(i64::MAX)),
            ),
            user,
        }
    }

    /// Renders the snapshot as a plain-text message
    pub fn to_message(&self) -> String {
        let token = self.token_symbol.as_deref().unwrap_or("Tokens");
        let mut lines = vec![
            format!("Burn Bank {} on {}", self.burn_bank, self.chain),
            format!("Block: {}", or_dash(self.block_number.map(|b| b.to_string()))),
            format!(
                "Jackpot: {} {} (${})",
                or_dash(self.jackpot.clone()),
                self.native_symbol,
                or_dash(self.jackpot_usd.clone())
            ),
            format!(
                "Donated: {} {} (${})",
                or_dash(self.total_donated.clone()),
                self.native_symbol,
                or_dash(self.total_donated_usd.clone())
            ),
            format!(
                "Burned: {} {} (${})",
                or_dash(self.total_burned.clone()),
                token,
                or_dash(self.total_burned_usd.clone())
            ),
            format!(
                "Staked: {} {} (${})",
                or_dash(self.total_staked.clone()),
                token,
                or_dash(self.total_staked_usd.clone())
            ),
            format!("Epoch length: {}", self.epoch_interval),
            format!("Next epoch in: {}", self.countdown),
        ];
        if let Some(user) = &self.user {
            lines.push(format!("Wallet {}", user.address));
            lines.push(format!("  {}: {}", self.native_symbol, user.native_balance));
            lines.push(format!("  {}: {}", token, or_dash(user.token_balance.clone())));
            lines.push(format!(
                "  Staked: {} (${})",
                or_dash(user.staked.clone()),
                or_dash(user.staked_usd.clone())
            ));
            lines.push(format!("  Allowance: {}", or_dash(user.allowance.clone())));
            if let Some(opt_in) = user.winning_opt_in {
                let preference = if opt_in { "opted in" } else { "opted out" };
                lines.push(format!("  Winnings: {}", preference));
            }
        }
        lines.join("\n")
    }
}

fn format_native(value: U256, decimals: u8) -> String {
    format!("{:.4}", ScaledAmount::new(value, decimals).to_f64())
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{ETHEREUM, SHIBARIUM};
    use alloy::primitives::{address, I256};

    const BANK: Address = address!("B1511DfE756342CA14a858B4896983095fEc1B51");

    fn pow10(exp: u64) -> U256 {
        U256::from(10u64).pow(U256::from(exp))
    }

    fn token() -> TokenInfo {
        TokenInfo {
            address: address!("e20B9e246db5a0d21BF9209E4858Bc9A3ff7A034"),
            name: "Shina Inu".to_string(),
            symbol: "SHI".to_string(),
            decimals: 18,
        }
    }

    fn loaded_inputs() -> SnapshotInputs {
        SnapshotInputs {
            block_number: Some(120),
            jackpot_balance: Some(U256::from(15u64) * pow10(17)),
            total_donated: Some(U256::from(2u64) * pow10(18)),
            total_burned: Some(U256::from(12_340_000u64) * pow10(18)),
            total_staked: Some(U256::from(1_500u64) * pow10(18)),
            token: Some(token()),
            // 1,000,000 tokens per ETH, quoted inverted
            token_price_in_native: Some(U256::from(1_000_000u64) * pow10(18)),
            price_reading: Some(PriceReading::from_answer(
                I256::try_from(200_000_000_000i64).unwrap(),
            )),
            price_decimals: Some(8),
            epoch: Some(EpochData {
                interval_blocks: 50,
                start_block: U256::from(100u64),
            }),
            user: None,
        }
    }

    #[test]
    fn assembles_loaded_snapshot() {
        let config = DashboardConfig::default();
        let snapshot = DashboardSnapshot::assemble(&ETHEREUM, &config, BANK, &loaded_inputs());

        assert_eq!(snapshot.jackpot.as_deref(), Some("1.5000"));
        assert_eq!(snapshot.jackpot_usd.as_deref(), Some("3000.00"));
        assert_eq!(snapshot.total_donated_usd.as_deref(), Some("4000.00"));
        assert_eq!(snapshot.total_burned.as_deref(), Some("12,340,000"));
        assert_eq!(snapshot.total_burned_usd.as_deref(), Some("24680.00"));
        assert_eq!(snapshot.total_staked_usd.as_deref(), Some("3.00"));
        assert_eq!(snapshot.seconds_until_next_epoch, Some(360));
        assert_eq!(snapshot.countdown, "0d 0h 6m 0s");
        assert_eq!(snapshot.epoch_interval, "0d 0h 10m 0s");
        assert!(snapshot.user.is_none());
    }

    #[test]
    fn compact_metrics_use_suffixes() {
        let config = DashboardConfig {
            compact_metrics: true,
            ..DashboardConfig::default()
        };
        let snapshot = DashboardSnapshot::assemble(&ETHEREUM, &config, BANK, &loaded_inputs());
        assert_eq!(snapshot.total_burned.as_deref(), Some("12.34M"));
        assert_eq!(snapshot.total_staked.as_deref(), Some("1.5K"));
    }

    #[test]
    fn missing_reads_stay_unavailable() {
        let config = DashboardConfig::default();
        let snapshot =
            DashboardSnapshot::assemble(&ETHEREUM, &config, BANK, &SnapshotInputs::default());
        assert!(snapshot.jackpot.is_none());
        assert!(snapshot.jackpot_usd.is_none());
        assert!(snapshot.total_burned.is_none());
        assert!(snapshot.total_staked_usd.is_none());
        assert_eq!(snapshot.epoch_interval, "--d --h --m --s");
        assert_eq!(snapshot.countdown, "--d --h --m --s");
        assert!(snapshot.to_message().contains("Jackpot: -- ETH ($--)"));
    }

    #[test]
    fn chain_without_feed_has_no_usd_values() {
        let config = DashboardConfig::default();
        let inputs = SnapshotInputs {
            price_reading: None,
            price_decimals: None,
            ..loaded_inputs()
        };
        let snapshot = DashboardSnapshot::assemble(&SHIBARIUM, &config, BANK, &inputs);
        assert_eq!(snapshot.jackpot.as_deref(), Some("1.5000"));
        assert!(snapshot.jackpot_usd.is_none());
        assert!(snapshot.total_burned_usd.is_none());
        // 5 second blocks on Shibarium
        assert_eq!(snapshot.seconds_until_next_epoch, Some(150));
    }

    #[test]
    fn epoch_not_started_hides_countdown() {
        let config = DashboardConfig::default();
        let inputs = SnapshotInputs {
            block_number: Some(40),
            ..loaded_inputs()
        };
        let snapshot = DashboardSnapshot::assemble(&ETHEREUM, &config, BANK, &inputs);
        assert_eq!(
            snapshot.epoch_status,
            Some(EpochStatus::NotStarted {
                blocks_until_start: 60
            })
        );
        assert_eq!(snapshot.countdown, "--d --h --m --s");
    }

    #[test]
    fn user_section() {
        let user = address!("4444444444444444444444444444444444444444");
        let inputs = SnapshotInputs {
            user: Some(UserPosition {
                user,
                native_balance: pow10(18),
                token_balance: U256::from(250u64) * pow10(18),
                staked: U256::from(1_000u64) * pow10(18),
                allowance: U256::MAX,
                declines: false,
            }),
            ..loaded_inputs()
        };

        let hidden = DashboardSnapshot::assemble(&ETHEREUM, &DashboardConfig::default(), BANK, &inputs);
        let section = hidden.user.expect("user section");
        assert_eq!(section.native_balance, "1.0000");
        assert_eq!(section.token_balance.as_deref(), Some("250.0000"));
        assert_eq!(section.staked_usd.as_deref(), Some("2.00"));
        assert_eq!(section.allowance.as_deref(), Some("Infinite"));
        assert_eq!(section.winning_opt_in, None);

        let config = DashboardConfig {
            winning_preference_enabled: true,
            ..DashboardConfig::default()
        };
        let shown = DashboardSnapshot::assemble(&ETHEREUM, &config, BANK, &inputs);
        assert_eq!(shown.user.as_ref().and_then(|u| u.winning_opt_in), Some(true));
        assert!(shown.to_message().contains("Winnings: opted in"));
    }
}
