//! Adapter layer: converts between the allocation's f64 world and the
//! payout ledger's Decimal amounts.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert f64 to Decimal (lossy; NaN and out-of-range values become zero).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Round toward negative infinity at `decimals` places, so a payout never
/// exceeds its computed amount, negative amounts included.
pub fn round_down(d: Decimal, decimals: u32) -> Decimal {
    d.round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity)
}

/// `to_decimal` followed by [`round_down`].
pub fn to_payout_amount(v: f64, decimals: u32) -> Decimal {
    round_down(to_decimal(v), decimals)
}
