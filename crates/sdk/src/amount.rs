use rust_decimal::Decimal;

use crate::constants::NATIVE_DECIMALS;

/// Convert a whole-coin amount to lamports.
///
/// Fails if the amount is negative, has more than 9 fractional digits or
/// does not fit in a `u64`.
pub fn to_lamports(amount: Decimal) -> crate::Result<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(crate::Error::invalid_argument(format!(
            "amount must not be negative: {amount}"
        )));
    }
    let scaled = amount
        .checked_mul(Decimal::from(10u64.pow(NATIVE_DECIMALS)))
        .ok_or_else(|| crate::Error::invalid_argument(format!("amount is too large: {amount}")))?
        .normalize();
    if scaled.scale() != 0 {
        return Err(crate::Error::invalid_argument(format!(
            "amount has more than {NATIVE_DECIMALS} decimal places: {amount}"
        )));
    }
    u64::try_from(scaled)
        .map_err(|_| crate::Error::invalid_argument(format!("amount is too large: {amount}")))
}

/// Convert lamports to a whole-coin amount.
pub fn from_lamports(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(lamports), NATIVE_DECIMALS).normalize()
}
