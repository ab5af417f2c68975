//! Integer amounts paired with their decimal exponent.

use std::fmt;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Allowances above 2^96 are treated as unlimited approvals.
const INFINITE_ALLOWANCE_BITS: usize = 96;

/// An on-chain integer amount denoting `value / 10^decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledAmount {
    /// Raw amount in the smallest unit
    pub value: U256,
    /// Decimal exponent of the unit
    pub decimals: u8,
}

impl ScaledAmount {
    pub fn new(value: U256, decimals: u8) -> Self {
        Self { value, decimals }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Lossy conversion for display and ratio computations.
    pub fn to_f64(&self) -> f64 {
        u256_to_f64(self.value, self.decimals)
    }
}

impl fmt::Display for ScaledAmount {
    /// Full decimal rendering with trailing fractional zeros removed (`1.5`, `42`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.value.to_string();
        let decimals = self.decimals as usize;
        if decimals == 0 {
            return f.write_str(&digits);
        }
        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (whole, frac) = padded.split_at(padded.len() - decimals);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, frac)
        }
    }
}

/// Converts a U256 value to f64, accounting for token decimals.
///
/// Parts larger than `u128::MAX` saturate; this is acceptable for f64 precision.
pub fn u256_to_f64(value: U256, decimals: u8) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let Some(divisor) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        // 10^decimals exceeds U256, so the whole part is zero
        return value.saturating_to::<u128>() as f64 / scale;
    };
    let (whole, frac) = value.div_rem(divisor);
    let whole = whole.saturating_to::<u128>() as f64;
    let frac = frac.saturating_to::<u128>() as f64 / scale;
    whole + frac
}

/// Wallet balance rendering: 4 fractional digits, with dust shown as `< 0.0001`.
pub fn format_balance(amount: &ScaledAmount) -> String {
    let value = amount.to_f64();
    if value > 0.0 && value < 0.0001 {
        return "< 0.0001".to_string();
    }
    format!("{:.4}", value)
}

/// Allowance rendering: `Infinite` for unlimited approvals, otherwise 2 fractional digits.
pub fn format_allowance(amount: &ScaledAmount) -> String {
    if amount.value > U256::from(1u8) << INFINITE_ALLOWANCE_BITS {
        return "Infinite".to_string();
    }
    format!("{:.2}", amount.to_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(ScaledAmount::new(ether(1), 18).to_string(), "1");
        let one_and_half = ether(1) + ether(1) / U256::from(2u8);
        assert_eq!(ScaledAmount::new(one_and_half, 18).to_string(), "1.5");
        assert_eq!(ScaledAmount::new(U256::from(1u8), 6).to_string(), "0.000001");
        assert_eq!(ScaledAmount::new(U256::from(1234u64), 0).to_string(), "1234");
    }

    #[test]
    fn decimals_beyond_u256_range() {
        let tiny = ScaledAmount::new(U256::from(5u8), 80);
        assert_eq!(tiny.to_string(), format!("0.{}5", "0".repeat(79)));
        let value = tiny.to_f64();
        assert!(value > 0.0 && value < 1e-70);
        assert_eq!(format_balance(&tiny), "< 0.0001");
    }

    #[test]
    fn to_f64_handles_values_beyond_u128() {
        let huge = U256::MAX;
        assert!(u256_to_f64(huge, 18).is_finite());
        assert_eq!(u256_to_f64(U256::from(2_500_000u64), 6), 2.5);
    }

    #[test]
    fn balance_formatting() {
        assert_eq!(format_balance(&ScaledAmount::new(U256::ZERO, 18)), "0.0000");
        assert_eq!(format_balance(&ScaledAmount::new(ether(3), 18)), "3.0000");
        let dust = ScaledAmount::new(U256::from(10u64).pow(U256::from(13u64)), 18);
        assert_eq!(format_balance(&dust), "< 0.0001");
    }

    #[test]
    fn allowance_formatting() {
        assert_eq!(
            format_allowance(&ScaledAmount::new(U256::MAX, 18)),
            "Infinite"
        );
        assert_eq!(format_allowance(&ScaledAmount::new(ether(12), 18)), "12.00");
    }
}
