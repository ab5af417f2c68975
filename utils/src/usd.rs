//! Fixed-point USD conversions driven by a Chainlink-style price feed.
//!
//! Products are formed in `U512` so that large supplies never overflow before the
//! division; the quotient is a `U256` scaled by `10^18`, truncated (not rounded) to
//! 2 fractional digits.

use alloy::primitives::{I256, U256, U512};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default decimals of a native currency (wei).
pub const DEFAULT_NATIVE_DECIMALS: u8 = 18;

/// 10^18 numeraire used for every intermediate USD value.
const USD_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
const USD_SCALE_DECIMALS: usize = 18;

/// Latest-round response of an aggregator feed.
///
/// Only `answer` is consumed; freshness is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReading {
    pub round_id: u128,
    pub answer: I256,
    pub started_at: U256,
    pub updated_at: U256,
    pub answered_in_round: u128,
}

impl PriceReading {
    /// Reading carrying only an answer, as produced by tests and static fixtures.
    pub fn from_answer(answer: I256) -> Self {
        Self {
            round_id: 0,
            answer,
            started_at: U256::ZERO,
            updated_at: U256::ZERO,
            answered_in_round: 0,
        }
    }

    /// The answer as an unsigned price, or `None` when the feed reports a negative value.
    pub fn price(&self) -> Option<U256> {
        if self.answer.is_negative() {
            None
        } else {
            Some(self.answer.into_raw())
        }
    }
}

impl From<(u128, I256, U256, U256, u128)> for PriceReading {
    fn from(tuple: (u128, I256, U256, U256, u128)) -> Self {
        Self {
            round_id: tuple.0,
            answer: tuple.1,
            started_at: tuple.2,
            updated_at: tuple.3,
            answered_in_round: tuple.4,
        }
    }
}

/// Convention used by a token/native exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceQuote {
    /// Native units per whole token
    Direct,
    /// Token units per whole native unit
    Inverted,
}

/// Infers whether `token_price_in_native` is quoted directly or inverted.
///
/// A price above one whole native unit is assumed to be inverted. A token that is
/// genuinely worth more than one native unit is misclassified; the rate source does
/// not say which convention it uses, so the ambiguity is left as is.
pub fn detect_quote(token_price_in_native: U256, native_price_decimals: u8) -> PriceQuote {
    match pow10(native_price_decimals) {
        Some(one_native) if token_price_in_native > one_native => PriceQuote::Inverted,
        Some(_) => PriceQuote::Direct,
        // 10^decimals does not fit in U256, so no U256 price can exceed it
        None => PriceQuote::Direct,
    }
}

/// Converts a native-currency amount into a USD string with exactly 2 fractional digits.
///
/// # Arguments
/// * `amount` - Amount in the smallest native unit
/// * `reading` - Latest native/USD oracle reading
/// * `price_decimals` - Decimals of the oracle answer
/// * `amount_decimals` - Decimals of `amount`, usually [`DEFAULT_NATIVE_DECIMALS`]
///
/// # Returns
/// `None` when any input is missing, the answer is negative, or the arithmetic overflows
pub fn usd_from_native(
    amount: Option<U256>,
    reading: Option<&PriceReading>,
    price_decimals: Option<u8>,
    amount_decimals: u8,
) -> Option<String> {
    let (amount, reading, price_decimals) = (amount?, reading?, price_decimals?);
    let price = oracle_price(reading)?;

    let compute = || -> Option<U256> {
        let numerator = wide(amount)
            .checked_mul(wide(price))?
            .checked_mul(wide(USD_SCALE))?;
        let denominator = wide_pow10(amount_decimals)?.checked_mul(wide_pow10(price_decimals)?)?;
        narrow(numerator.checked_div(denominator)?)
    };

    match compute() {
        Some(scaled) => Some(format_usd(scaled)),
        None => {
            warn!(%amount, %price, amount_decimals, price_decimals, "native USD conversion overflowed");
            None
        }
    }
}

/// Converts a token amount into a USD string by way of its price in the native currency.
///
/// # Arguments
/// * `token_amount` - Amount in the token's smallest unit
/// * `token_decimals` - Decimals of the token
/// * `token_price_in_native` - Price of one whole token in the smallest native unit,
///   possibly inverted (see [`detect_quote`])
/// * `native_price_decimals` - Decimals of `token_price_in_native`
/// * `reading` - Latest native/USD oracle reading
/// * `price_feed_decimals` - Decimals of the oracle answer
///
/// # Returns
/// `None` when any input is missing, the token price is zero, the answer is negative,
/// or the arithmetic overflows
pub fn usd_from_token(
    token_amount: Option<U256>,
    token_decimals: Option<u8>,
    token_price_in_native: Option<U256>,
    native_price_decimals: u8,
    reading: Option<&PriceReading>,
    price_feed_decimals: Option<u8>,
) -> Option<String> {
    let amount = token_amount?;
    let token_decimals = token_decimals?;
    let token_price = token_price_in_native?;
    let reading = reading?;
    let price_feed_decimals = price_feed_decimals?;

    if token_price.is_zero() {
        return None;
    }
    let native_usd = oracle_price(reading)?;
    let quote = detect_quote(token_price, native_price_decimals);

    let compute = || -> Option<U256> {
        let one_native = wide_pow10(native_price_decimals)?;
        let token_scale = wide_pow10(token_decimals)?;
        let feed_scale = wide_pow10(price_feed_decimals)?;
        let (amount, token_price, native_usd) = (wide(amount), wide(token_price), wide(native_usd));
        let (numerator, denominator) = match quote {
            PriceQuote::Inverted => (
                amount
                    .checked_mul(native_usd)?
                    .checked_mul(one_native)?
                    .checked_mul(wide(USD_SCALE))?,
                token_scale
                    .checked_mul(token_price)?
                    .checked_mul(feed_scale)?,
            ),
            PriceQuote::Direct => (
                amount
                    .checked_mul(token_price)?
                    .checked_mul(native_usd)?
                    .checked_mul(wide(USD_SCALE))?,
                token_scale.checked_mul(one_native)?.checked_mul(feed_scale)?,
            ),
        };
        narrow(numerator.checked_div(denominator)?)
    };

    match compute() {
        Some(scaled) => Some(format_usd(scaled)),
        None => {
            warn!(%amount, %token_price, ?quote, "token USD conversion overflowed");
            None
        }
    }
}

fn oracle_price(reading: &PriceReading) -> Option<U256> {
    let price = reading.price();
    if price.is_none() {
        warn!(answer = %reading.answer, round_id = reading.round_id, "negative oracle answer");
    }
    price
}

fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

fn wide_pow10(exp: u8) -> Option<U512> {
    U512::from(10u64).checked_pow(U512::from(exp))
}

fn wide(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(value.as_limbs());
    U512::from_limbs(limbs)
}

/// The quotient as a `U256`, or `None` when it does not fit.
fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Renders a `10^18`-scaled value truncated to 2 fractional digits.
fn format_usd(scaled: U256) -> String {
    let (whole, frac) = scaled.div_rem(USD_SCALE);
    let frac = format!("{:0>width$}", frac.to_string(), width = USD_SCALE_DECIMALS);
    format!("{}.{}", whole, &frac[..2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pow10_u256(exp: u64) -> U256 {
        U256::from(10u64).pow(U256::from(exp))
    }

    fn eth(whole: u64) -> U256 {
        U256::from(whole) * pow10_u256(18)
    }

    /// ETH/USD at $2000.00 with 8 feed decimals.
    fn eth_usd_2000() -> PriceReading {
        PriceReading::from_answer(I256::try_from(200_000_000_000i64).unwrap())
    }

    #[test]
    fn native_conversion_has_two_fraction_digits() {
        let reading = eth_usd_2000();
        assert_eq!(
            usd_from_native(Some(eth(1)), Some(&reading), Some(8), 18).as_deref(),
            Some("2000.00")
        );
        // 0.123456 ETH * 2000 = 246.912 -> truncated, not rounded
        let amount = U256::from(123_456u64) * pow10_u256(12);
        assert_eq!(
            usd_from_native(Some(amount), Some(&reading), Some(8), 18).as_deref(),
            Some("246.91")
        );
    }

    #[test]
    fn native_conversion_of_zero_is_zero_string() {
        let reading = eth_usd_2000();
        assert_eq!(
            usd_from_native(Some(U256::ZERO), Some(&reading), Some(8), 18).as_deref(),
            Some("0.00")
        );
    }

    #[test]
    fn native_conversion_without_price_is_unavailable() {
        let reading = eth_usd_2000();
        for amount in [U256::ZERO, eth(1), eth(1_000_000)] {
            assert_eq!(usd_from_native(Some(amount), None, Some(8), 18), None);
            assert_eq!(usd_from_native(Some(amount), Some(&reading), None, 18), None);
        }
        assert_eq!(usd_from_native(None, Some(&reading), Some(8), 18), None);
    }

    #[test]
    fn native_conversion_respects_amount_decimals() {
        // 2.5 units of a 6-decimal currency at $2000
        let reading = eth_usd_2000();
        assert_eq!(
            usd_from_native(Some(U256::from(2_500_000u64)), Some(&reading), Some(8), 6).as_deref(),
            Some("5000.00")
        );
    }

    #[test]
    fn native_conversion_stays_within_a_cent_of_exact() {
        let reading = PriceReading::from_answer(I256::try_from(312_345_678_901i64).unwrap());
        for raw in [1u64, 999, 123_456_789, 987_654_321_123_456_789] {
            let result = usd_from_native(Some(U256::from(raw)), Some(&reading), Some(8), 18)
                .expect("conversion");
            let (_, frac) = result.split_once('.').expect("decimal point");
            assert_eq!(frac.len(), 2);
            let exact = raw as f64 * 3123.45678901 / 1e18;
            let parsed: f64 = result.parse().unwrap();
            assert!((exact - parsed).abs() <= 0.01, "{raw}: {parsed} vs {exact}");
        }
    }

    #[test]
    fn negative_answer_is_invalid() {
        let reading = PriceReading::from_answer(I256::try_from(-1i64).unwrap());
        assert_eq!(usd_from_native(Some(eth(1)), Some(&reading), Some(8), 18), None);
        assert_eq!(
            usd_from_token(Some(eth(1)), Some(18), Some(eth(1)), 18, Some(&reading), Some(8)),
            None
        );
    }

    #[test]
    fn large_supplies_convert_in_both_quotes() {
        let reading = eth_usd_2000();
        let amount = pow10_u256(30);
        // 1e8 tokens per ETH: 1e12 tokens are 1e4 ETH
        assert_eq!(
            usd_from_token(Some(amount), Some(18), Some(pow10_u256(26)), 18, Some(&reading), Some(8))
                .as_deref(),
            Some("20000000.00")
        );
        // 1e-6 ETH per token: 1e12 tokens are 1e6 ETH
        assert_eq!(
            usd_from_token(Some(amount), Some(18), Some(pow10_u256(12)), 18, Some(&reading), Some(8))
                .as_deref(),
            Some("2000000000.00")
        );
        assert_eq!(
            usd_from_native(Some(amount), Some(&reading), Some(8), 18).as_deref(),
            Some("2000000000000000.00")
        );
    }

    #[test]
    fn overflow_yields_none() {
        let reading = eth_usd_2000();
        assert_eq!(usd_from_native(Some(U256::MAX), Some(&reading), Some(8), 18), None);
    }

    #[test]
    fn quote_detection_around_one_native_unit() {
        assert_eq!(detect_quote(U256::from(5u64) * pow10_u256(17), 18), PriceQuote::Direct);
        assert_eq!(detect_quote(pow10_u256(18), 18), PriceQuote::Direct);
        assert_eq!(detect_quote(U256::from(2u64) * pow10_u256(19), 18), PriceQuote::Inverted);
    }

    #[test]
    fn token_conversion_direct_price() {
        // 10 tokens at 0.5 ETH each, ETH at $2000
        let reading = eth_usd_2000();
        let price = U256::from(5u64) * pow10_u256(17);
        assert_eq!(
            usd_from_token(Some(eth(10)), Some(18), Some(price), 18, Some(&reading), Some(8))
                .as_deref(),
            Some("10000.00")
        );
    }

    #[test]
    fn token_conversion_inverted_price() {
        // 20 tokens per ETH, so 10 tokens are 0.5 ETH
        let reading = eth_usd_2000();
        let price = U256::from(2u64) * pow10_u256(19);
        assert_eq!(
            usd_from_token(Some(eth(10)), Some(18), Some(price), 18, Some(&reading), Some(8))
                .as_deref(),
            Some("1000.00")
        );
    }

    #[test]
    fn inverse_quotes_agree() {
        // 0.5 ETH per token quoted directly and as 2 tokens per ETH
        let reading = eth_usd_2000();
        let direct = U256::from(5u64) * pow10_u256(17);
        let inverted = U256::from(2u64) * pow10_u256(18);
        let a = usd_from_token(Some(eth(7)), Some(18), Some(direct), 18, Some(&reading), Some(8));
        let b = usd_from_token(Some(eth(7)), Some(18), Some(inverted), 18, Some(&reading), Some(8));
        assert_eq!(a.as_deref(), Some("7000.00"));
        assert_eq!(a, b);
    }

    #[test]
    fn token_conversion_rejects_zero_price_and_missing_inputs() {
        let reading = eth_usd_2000();
        assert_eq!(
            usd_from_token(Some(eth(1)), Some(18), Some(U256::ZERO), 18, Some(&reading), Some(8)),
            None
        );
        assert_eq!(
            usd_from_token(Some(eth(1)), None, Some(eth(1)), 18, Some(&reading), Some(8)),
            None
        );
        assert_eq!(
            usd_from_token(Some(eth(1)), Some(18), None, 18, Some(&reading), Some(8)),
            None
        );
        assert_eq!(
            usd_from_token(Some(eth(1)), Some(18), Some(eth(1)), 18, None, Some(8)),
            None
        );
    }

    #[test]
    fn token_conversion_with_small_token_decimals() {
        // 1,000,000 units of a 9-decimal token at 1 gwei each is 0.001 ETH
        let reading = eth_usd_2000();
        let amount = U256::from(1_000_000u64) * pow10_u256(9);
        let price = pow10_u256(9);
        assert_eq!(
            usd_from_token(Some(amount), Some(9), Some(price), 18, Some(&reading), Some(8))
                .as_deref(),
            Some("2.00")
        );
    }

    #[test]
    fn conversions_are_deterministic() {
        let reading = eth_usd_2000();
        let a = usd_from_native(Some(eth(3)), Some(&reading), Some(8), 18);
        let b = usd_from_native(Some(eth(3)), Some(&reading), Some(8), 18);
        assert_eq!(a, b);
    }
}
