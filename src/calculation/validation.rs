//! Input validation.
//!
//! Checks run before any arithmetic, in a fixed order, and the first failure
//! wins:
//!
//! 1. dates parse as `DD/MM/YYYY` (at the boundary, see [`parse_form_date`])
//! 2. the entry date is in the reference year
//! 3. the entry date is not after the late-entry cutoff
//! 4. the salary is positive and the absence count is not negative
//! 5. the exit date is not before the entry date

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::SchemeConstants;
use crate::error::ValidationError;
use crate::models::CalculationInput;

/// Date format of the form fields.
pub const FORM_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `DD/MM/YYYY` date as typed in the form.
///
/// # Example
///
/// ```
/// use interessement_engine::calculation::parse_form_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_form_date("01/10/2024").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
/// );
/// assert!(parse_form_date("2024-10-01").is_err());
/// ```
pub fn parse_form_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT).map_err(|_| {
        ValidationError::MalformedDate {
            value: value.to_string(),
        }
    })
}

/// Checks an input against the scheme rules.
pub fn validate_input(
    input: &CalculationInput,
    constants: &SchemeConstants,
) -> Result<(), ValidationError> {
    let reference_year = constants.reference_year();
    if input.entry_date.year() != reference_year {
        return Err(ValidationError::EntryOutsideReferenceYear {
            entry_date: input.entry_date,
            reference_year,
        });
    }

    if input.entry_date > constants.late_entry_cutoff {
        return Err(ValidationError::LateEntryDisqualified {
            entry_date: input.entry_date,
            cutoff: constants.late_entry_cutoff,
        });
    }

    if input.monthly_salary <= Decimal::ZERO {
        return Err(ValidationError::InvalidNumericInput {
            field: "monthly_salary".to_string(),
            message: format!("must be greater than zero, got {}", input.monthly_salary),
        });
    }

    if input.absence_days < 0 {
        return Err(ValidationError::InvalidNumericInput {
            field: "absence_days".to_string(),
            message: format!("must not be negative, got {}", input.absence_days),
        });
    }

    if input.exit_date < input.entry_date {
        return Err(ValidationError::ExitBeforeEntry {
            entry_date: input.entry_date,
            exit_date: input.exit_date,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_input() -> CalculationInput {
        CalculationInput {
            monthly_salary: Decimal::from_str("3000").unwrap(),
            absence_days: 0,
            entry_date: date(2024, 1, 1),
            exit_date: date(2024, 12, 31),
        }
    }

    #[test]
    fn test_parse_form_date_accepts_day_month_year() {
        assert_eq!(parse_form_date("31/12/2024").unwrap(), date(2024, 12, 31));
        assert_eq!(parse_form_date(" 01/01/2024 ").unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn test_parse_form_date_rejects_other_formats() {
        for raw in ["2024-01-01", "31/02/2024", "", "demain", "12/31/2024"] {
            match parse_form_date(raw) {
                Err(ValidationError::MalformedDate { value }) => assert_eq!(value, raw),
                other => panic!("Expected MalformedDate for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let constants = SchemeConstants::reference_2024();
        assert!(validate_input(&valid_input(), &constants).is_ok());
    }

    #[test]
    fn test_entry_in_next_year_is_outside_reference_year() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2025, 1, 1);

        assert_eq!(
            validate_input(&input, &constants),
            Err(ValidationError::EntryOutsideReferenceYear {
                entry_date: date(2025, 1, 1),
                reference_year: 2024,
            })
        );
    }

    #[test]
    fn test_entry_in_previous_year_is_outside_reference_year() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2023, 6, 15);

        assert!(matches!(
            validate_input(&input, &constants),
            Err(ValidationError::EntryOutsideReferenceYear { .. })
        ));
    }

    #[test]
    fn test_entry_on_cutoff_is_accepted() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2024, 9, 30);

        assert!(validate_input(&input, &constants).is_ok());
    }

    #[test]
    fn test_entry_day_after_cutoff_is_disqualified() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2024, 10, 1);

        assert_eq!(
            validate_input(&input, &constants),
            Err(ValidationError::LateEntryDisqualified {
                entry_date: date(2024, 10, 1),
                cutoff: date(2024, 9, 30),
            })
        );
    }

    #[test]
    fn test_late_entry_wins_over_invalid_salary() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2024, 11, 1);
        input.monthly_salary = Decimal::ZERO;

        assert!(matches!(
            validate_input(&input, &constants),
            Err(ValidationError::LateEntryDisqualified { .. })
        ));
    }

    #[test]
    fn test_zero_salary_is_invalid() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.monthly_salary = Decimal::ZERO;

        match validate_input(&input, &constants) {
            Err(ValidationError::InvalidNumericInput { field, .. }) => {
                assert_eq!(field, "monthly_salary")
            }
            other => panic!("Expected InvalidNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_absences_are_invalid() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.absence_days = -1;

        match validate_input(&input, &constants) {
            Err(ValidationError::InvalidNumericInput { field, message }) => {
                assert_eq!(field, "absence_days");
                assert!(message.contains("-1"));
            }
            other => panic!("Expected InvalidNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_before_entry_is_rejected() {
        let constants = SchemeConstants::reference_2024();
        let mut input = valid_input();
        input.entry_date = date(2024, 6, 1);
        input.exit_date = date(2024, 5, 31);

        assert!(matches!(
            validate_input(&input, &constants),
            Err(ValidationError::ExitBeforeEntry { .. })
        ));
    }
}
