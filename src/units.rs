//! Amount conversion between user-entered decimal strings and base units

use crate::error::{SwapError, SwapResult};

/// Decimal places shared by the swappable Cardano tokens
pub const BASE_UNIT_DECIMALS: u32 = 6;

/// 1_000_000 SUN = 1 TRX
pub const SUN_PER_TRX: u64 = 1_000_000;

/// Convert a decimal amount string to integer base units (6 decimals).
///
/// Rejects negative, malformed, and over-precise amounts rather than
/// rounding.
pub fn to_base_units(amount: &str) -> SwapResult<u64> {
    let amount = amount.trim();
    let (whole, frac) = match amount.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(SwapError::Amount(format!("not a number: {:?}", amount)));
    }
    if frac.len() > BASE_UNIT_DECIMALS as usize {
        return Err(SwapError::Amount(format!(
            "more than {} decimal places: {}",
            BASE_UNIT_DECIMALS, amount
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| SwapError::Amount(format!("not a number: {:?}", amount)))?
    };
    let frac: u64 = if frac.is_empty() {
        0
    } else {
        let scale = 10u64.pow(BASE_UNIT_DECIMALS - frac.len() as u32);
        let digits: u64 = frac
            .parse()
            .map_err(|_| SwapError::Amount(format!("not a number: {:?}", amount)))?;
        digits * scale
    };

    whole
        .checked_mul(10u64.pow(BASE_UNIT_DECIMALS))
        .and_then(|units| units.checked_add(frac))
        .ok_or_else(|| SwapError::Amount(format!("amount too large: {}", amount)))
}
