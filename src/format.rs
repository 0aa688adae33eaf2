//! French-locale display formatting.
//!
//! Output of these functions is for display only and is never parsed back
//! into a calculation.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a decimal with `precision` fraction digits and a comma separator.
///
/// # Example
///
/// ```
/// use interessement_engine::format::format_decimal_fr;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_decimal_fr(Decimal::from_str("2984.98").unwrap(), 2), "2984,98");
/// assert_eq!(format_decimal_fr(Decimal::from_str("0.5").unwrap(), 2), "0,50");
/// ```
pub fn format_decimal_fr(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", precision as usize, rounded).replace('.', ",")
}

/// Formats a date as `DD/MM/YYYY`.
pub fn format_date_fr(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
