//! Checked decimal arithmetic.
//!
//! Every operation returns [`ValidationError::UnexpectedCalculationError`]
//! instead of panicking on overflow or division by zero.

use rust_decimal::Decimal;

use crate::error::ValidationError;

pub(crate) fn div(
    numerator: Decimal,
    denominator: Decimal,
    what: &str,
) -> Result<Decimal, ValidationError> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| ValidationError::UnexpectedCalculationError {
            message: format!("cannot compute {}: {} / {}", what, numerator, denominator),
        })
}

pub(crate) fn mul(left: Decimal, right: Decimal, what: &str) -> Result<Decimal, ValidationError> {
    left.checked_mul(right)
        .ok_or_else(|| ValidationError::UnexpectedCalculationError {
            message: format!("cannot compute {}: {} x {} overflows", what, left, right),
        })
}

pub(crate) fn add(left: Decimal, right: Decimal, what: &str) -> Result<Decimal, ValidationError> {
    left.checked_add(right)
        .ok_or_else(|| ValidationError::UnexpectedCalculationError {
            message: format!("cannot compute {}: {} + {} overflows", what, left, right),
        })
}
