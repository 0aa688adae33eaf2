//! Request types for the intéressement API.
//!
//! Two entry points feed the estimator:
//!
//! - [`FormSubmission`]: the HTML form posted to `/calculate`, every field a
//!   raw string
//! - [`EstimateRequest`]: the JSON body posted to `/api/estimate`
//!
//! Both convert into a [`CalculationInput`], applying the same defaults:
//! entry on the first day of the reference year unless stated otherwise,
//! exit on its last day.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::parse_form_date;
use crate::config::SchemeConstants;
use crate::error::ValidationError;
use crate::models::CalculationInput;

/// Value of the `entered_in_2024` checkbox when ticked.
pub const ENTERED_DURING_YEAR: &str = "yes";

/// Fields of the HTML form, as posted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Monthly gross salary.
    #[serde(default)]
    pub salaire_mensuel: String,
    /// Working days of absence.
    #[serde(default)]
    pub absences_ouvrees: String,
    /// `"yes"` when the employee joined during the reference year.
    #[serde(default)]
    pub entered_in_2024: Option<String>,
    /// Entry date as `DD/MM/YYYY`, only read when `entered_in_2024` is ticked.
    #[serde(default)]
    pub date_entree_str: Option<String>,
}

/// Why a form submission could not be turned into an estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRejection {
    /// The checkbox is ticked but no entry date was given.
    MissingEntryDate,
    /// The estimator (or number parsing) rejected the input.
    Invalid(ValidationError),
}

impl FormRejection {
    /// The message shown above the form.
    pub fn user_message(&self) -> String {
        match self {
            FormRejection::MissingEntryDate => "Veuillez fournir la date d'entrée.".to_string(),
            FormRejection::Invalid(error) => error.user_message(),
        }
    }

    /// Machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            FormRejection::MissingEntryDate => "MISSING_ENTRY_DATE",
            FormRejection::Invalid(error) => error.code(),
        }
    }
}

impl From<ValidationError> for FormRejection {
    fn from(error: ValidationError) -> Self {
        FormRejection::Invalid(error)
    }
}

impl FormSubmission {
    /// Whether the "joined during the year" checkbox is ticked.
    pub fn entered_during_year(&self) -> bool {
        self.entered_in_2024.as_deref() == Some(ENTERED_DURING_YEAR)
    }

    /// Converts the raw fields into an estimator input.
    ///
    /// Numbers are parsed first, then the entry date; the scheme rules
    /// themselves are left to the estimator.
    pub fn to_input(
        &self,
        constants: &SchemeConstants,
    ) -> Result<CalculationInput, FormRejection> {
        let monthly_salary = parse_salary("salaire_mensuel", &self.salaire_mensuel)?;
        let absence_days = parse_absences("absences_ouvrees", &self.absences_ouvrees)?;

        let entry_date = if self.entered_during_year() {
            match self.date_entree_str.as_deref().map(str::trim) {
                Some(raw) if !raw.is_empty() => parse_form_date(raw)?,
                _ => return Err(FormRejection::MissingEntryDate),
            }
        } else {
            constants.year_start
        };

        Ok(CalculationInput {
            monthly_salary,
            absence_days,
            entry_date,
            exit_date: constants.year_end,
        })
    }
}

/// Request body for the `/api/estimate` endpoint.
///
/// The numeric fields are kept as raw JSON values so that a wrong type is
/// reported as [`ValidationError::InvalidNumericInput`] rather than as a
/// malformed body. Both accept a JSON number or a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Monthly gross salary.
    pub monthly_salary: Value,
    /// Working days of absence; zero when absent or null.
    #[serde(default)]
    pub absence_days: Value,
    /// Entry date as `DD/MM/YYYY`; defaults to the first day of the year.
    #[serde(default)]
    pub entry_date: Option<String>,
    /// Exit date as `DD/MM/YYYY`; defaults to the last day of the year.
    #[serde(default)]
    pub exit_date: Option<String>,
}

impl EstimateRequest {
    /// Converts the request into an estimator input, parsing numbers and dates.
    pub fn to_input(
        &self,
        constants: &SchemeConstants,
    ) -> Result<CalculationInput, ValidationError> {
        let monthly_salary = salary_from_json(&self.monthly_salary)?;
        let absence_days = absences_from_json(&self.absence_days)?;

        let entry_date = match self.entry_date.as_deref() {
            Some(raw) => parse_form_date(raw)?,
            None => constants.year_start,
        };
        let exit_date = match self.exit_date.as_deref() {
            Some(raw) => parse_form_date(raw)?,
            None => constants.year_end,
        };

        Ok(CalculationInput {
            monthly_salary,
            absence_days,
            entry_date,
            exit_date,
        })
    }
}

fn salary_from_json(value: &Value) -> Result<Decimal, ValidationError> {
    match value {
        Value::String(raw) => parse_salary("monthly_salary", raw),
        Value::Number(number) => {
            let raw = number.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|_| not_a_number("monthly_salary", &raw))
        }
        other => Err(not_a_number("monthly_salary", &other.to_string())),
    }
}

fn absences_from_json(value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Null => Ok(0),
        Value::String(raw) => parse_absences("absence_days", raw),
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| not_a_whole_number("absence_days", &number.to_string())),
        other => Err(not_a_whole_number("absence_days", &other.to_string())),
    }
}

fn not_a_number(field: &str, raw: &str) -> ValidationError {
    ValidationError::InvalidNumericInput {
        field: field.to_string(),
        message: format!("'{}' is not a number", raw),
    }
}

/// Parses a typed salary. A comma is accepted as the decimal separator.
fn parse_salary(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    let normalized: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&normalized).map_err(|_| not_a_number(field, raw))
}

fn parse_absences(field: &str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| not_a_whole_number(field, raw))
}

fn not_a_whole_number(field: &str, raw: &str) -> ValidationError {
    ValidationError::InvalidNumericInput {
        field: field.to_string(),
        message: format!("'{}' is not a whole number", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn submission(salary: &str, absences: &str, entry: Option<&str>) -> FormSubmission {
        FormSubmission {
            salaire_mensuel: salary.to_string(),
            absences_ouvrees: absences.to_string(),
            entered_in_2024: entry.map(|_| ENTERED_DURING_YEAR.to_string()),
            date_entree_str: entry.map(str::to_string),
        }
    }

    #[test]
    fn test_form_without_entry_defaults_to_full_year() {
        let constants = SchemeConstants::reference_2024();
        let input = submission("3000", "2", None).to_input(&constants).unwrap();

        assert_eq!(input.monthly_salary, Decimal::from(3000));
        assert_eq!(input.absence_days, 2);
        assert_eq!(input.entry_date, constants.year_start);
        assert_eq!(input.exit_date, constants.year_end);
    }

    #[test]
    fn test_form_with_entry_date_parses_it() {
        let constants = SchemeConstants::reference_2024();
        let input = submission("3000", "0", Some("15/03/2024"))
            .to_input(&constants)
            .unwrap();

        assert_eq!(input.entry_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_form_accepts_comma_salary() {
        let constants = SchemeConstants::reference_2024();
        let input = submission("2 500,50", "0", None).to_input(&constants).unwrap();
        assert_eq!(input.monthly_salary, Decimal::from_str("2500.50").unwrap());
    }

    #[test]
    fn test_ticked_checkbox_without_date_is_rejected() {
        let constants = SchemeConstants::reference_2024();
        let mut form = submission("3000", "0", None);
        form.entered_in_2024 = Some("yes".to_string());
        form.date_entree_str = Some("   ".to_string());

        let rejection = form.to_input(&constants).unwrap_err();
        assert_eq!(rejection, FormRejection::MissingEntryDate);
        assert_eq!(rejection.user_message(), "Veuillez fournir la date d'entrée.");
    }

    #[test]
    fn test_unticked_checkbox_ignores_date_field() {
        let constants = SchemeConstants::reference_2024();
        let mut form = submission("3000", "0", None);
        form.date_entree_str = Some("not a date".to_string());

        let input = form.to_input(&constants).unwrap();
        assert_eq!(input.entry_date, constants.year_start);
    }

    #[test]
    fn test_non_numeric_salary_is_invalid_numeric_input() {
        let constants = SchemeConstants::reference_2024();
        let rejection = submission("beaucoup", "0", None)
            .to_input(&constants)
            .unwrap_err();

        assert_eq!(rejection.code(), "INVALID_NUMERIC_INPUT");
        assert_eq!(
            rejection.user_message(),
            "Veuillez entrer des valeurs numériques valides pour le salaire et les absences."
        );
    }

    #[test]
    fn test_fractional_absences_are_invalid_numeric_input() {
        let constants = SchemeConstants::reference_2024();
        let rejection = submission("3000", "2.5", None)
            .to_input(&constants)
            .unwrap_err();
        assert_eq!(rejection.code(), "INVALID_NUMERIC_INPUT");
    }

    #[test]
    fn test_malformed_entry_date_is_reported() {
        let constants = SchemeConstants::reference_2024();
        let rejection = submission("3000", "0", Some("2024-03-15"))
            .to_input(&constants)
            .unwrap_err();
        assert_eq!(rejection.code(), "MALFORMED_DATE");
    }

    #[test]
    fn test_deserialize_estimate_request_with_defaults() {
        let json = r#"{ "monthly_salary": "3000" }"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        let constants = SchemeConstants::reference_2024();
        let input = request.to_input(&constants).unwrap();

        assert_eq!(input.absence_days, 0);
        assert_eq!(input.entry_date, constants.year_start);
        assert_eq!(input.exit_date, constants.year_end);
    }

    #[test]
    fn test_estimate_request_parses_both_dates() {
        let json = r#"{
            "monthly_salary": 2800,
            "absence_days": 4,
            "entry_date": "01/02/2024",
            "exit_date": "30/11/2024"
        }"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        let input = request.to_input(&SchemeConstants::reference_2024()).unwrap();

        assert_eq!(input.entry_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(input.exit_date, NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
        assert_eq!(input.monthly_salary, Decimal::from(2800));
    }

    #[test]
    fn test_estimate_request_with_malformed_exit_date() {
        let request = EstimateRequest {
            monthly_salary: Value::from("3000"),
            absence_days: Value::from(0),
            entry_date: None,
            exit_date: Some("31-12-2024".to_string()),
        };
        let result = request.to_input(&SchemeConstants::reference_2024());
        assert!(matches!(result, Err(ValidationError::MalformedDate { .. })));
    }

    #[test]
    fn test_estimate_request_non_numeric_salary() {
        let request: EstimateRequest =
            serde_json::from_str(r#"{ "monthly_salary": "abc", "absence_days": 0 }"#).unwrap();
        let result = request.to_input(&SchemeConstants::reference_2024());

        match result {
            Err(ValidationError::InvalidNumericInput { field, .. }) => {
                assert_eq!(field, "monthly_salary")
            }
            other => panic!("Expected InvalidNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_estimate_request_fractional_absences() {
        let request: EstimateRequest =
            serde_json::from_str(r#"{ "monthly_salary": "3000", "absence_days": 2.5 }"#).unwrap();
        let result = request.to_input(&SchemeConstants::reference_2024());

        match result {
            Err(ValidationError::InvalidNumericInput { field, .. }) => {
                assert_eq!(field, "absence_days")
            }
            other => panic!("Expected InvalidNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_estimate_request_accepts_numbers_and_strings() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{ "monthly_salary": 2500.5, "absence_days": "3", "entry_date": null }"#,
        )
        .unwrap();
        let input = request.to_input(&SchemeConstants::reference_2024()).unwrap();

        assert_eq!(input.monthly_salary, Decimal::from_str("2500.5").unwrap());
        assert_eq!(input.absence_days, 3);
    }

    #[test]
    fn test_estimate_request_boolean_salary_is_invalid() {
        let request: EstimateRequest =
            serde_json::from_str(r#"{ "monthly_salary": true }"#).unwrap();
        let result = request.to_input(&SchemeConstants::reference_2024());
        assert!(matches!(
            result,
            Err(ValidationError::InvalidNumericInput { .. })
        ));
    }
}
