//! Calculation input model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SchemeConstants;

/// The per-request inputs of an estimate.
///
/// Dates are already parsed; turning form strings into dates is the
/// caller's job (see [`parse_form_date`](crate::calculation::parse_form_date)).
///
/// # Example
///
/// ```
/// use interessement_engine::config::SchemeConstants;
/// use interessement_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let constants = SchemeConstants::reference_2024();
/// let input = CalculationInput::full_year(Decimal::from(3000), 0, &constants);
/// assert_eq!(input.entry_date, constants.year_start);
/// assert_eq!(input.exit_date, constants.year_end);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross monthly salary. Must be strictly positive.
    pub monthly_salary: Decimal,
    /// Working days of absence. Must not be negative.
    pub absence_days: i64,
    /// First day of presence in the reference year.
    pub entry_date: NaiveDate,
    /// Last day of presence in the reference year.
    pub exit_date: NaiveDate,
}

impl CalculationInput {
    /// An employee present from the first to the last day of the year.
    pub fn full_year(
        monthly_salary: Decimal,
        absence_days: i64,
        constants: &SchemeConstants,
    ) -> Self {
        Self {
            monthly_salary,
            absence_days,
            entry_date: constants.year_start,
            exit_date: constants.year_end,
        }
    }

    /// An employee who joined during the year and stayed until its end.
    pub fn joined_on(
        monthly_salary: Decimal,
        absence_days: i64,
        entry_date: NaiveDate,
        constants: &SchemeConstants,
    ) -> Self {
        Self {
            monthly_salary,
            absence_days,
            entry_date,
            exit_date: constants.year_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_on_defaults_exit_to_year_end() {
        let constants = SchemeConstants::reference_2024();
        let entry = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let input = CalculationInput::joined_on(Decimal::from(2500), 3, entry, &constants);

        assert_eq!(input.entry_date, entry);
        assert_eq!(input.exit_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(input.absence_days, 3);
    }

    #[test]
    fn test_input_serializes_dates_as_iso() {
        let constants = SchemeConstants::reference_2024();
        let input = CalculationInput::full_year(Decimal::from(3000), 0, &constants);
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["entry_date"], "2024-01-01");
        assert_eq!(json["exit_date"], "2024-12-31");
        assert_eq!(json["absence_days"], 0);
    }
}
