//! Shared utilities for the burn bank workspace.
//!
//! Everything in here is pure: fixed-point USD conversions, display formatting and
//! epoch timing. Missing inputs yield `None` or a placeholder string, never zero.

mod amount;
mod epoch;
mod format;
mod usd;

pub use amount::{format_allowance, format_balance, u256_to_f64, ScaledAmount};
pub use epoch::{format_epoch_interval, Countdown, EpochState, EpochStatus};
pub use format::{
    format_compact_number, format_compact_str, format_grouped_integer, format_seconds_to_time,
    TIME_PLACEHOLDER, TIME_ZERO,
};
pub use usd::{
    detect_quote, usd_from_native, usd_from_token, PriceQuote, PriceReading,
    DEFAULT_NATIVE_DECIMALS,
};
