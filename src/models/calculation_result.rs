//! Calculation result models for the intéressement engine.
//!
//! This module contains the [`CalculationResult`] type and the audit trace
//! that records how each intermediate amount was derived.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// estimate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate situations that don't prevent the estimate
/// but may surprise the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use interessement_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Ratios and intermediate amounts behind an estimate.
///
/// None of these values are rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceDiagnostics {
    /// Calendar days between entry and exit, both included.
    pub calendar_days_present: i64,
    /// `calendar_days_present / total_calendar_days`.
    pub calendar_presence_ratio: Decimal,
    /// Working days the employee would have worked without absences.
    pub theoretical_working_days: Decimal,
    /// Theoretical working days minus absences, floored at zero.
    pub actual_working_days: Decimal,
    /// `actual_working_days / total_working_days`, clamped to [0, 1].
    pub working_day_presence_ratio: Decimal,
    /// Annual salary prorated by calendar presence.
    pub prorate_annual_salary: Decimal,
    /// Part of the presence pool for this employee.
    pub presence_pool_per_head: Decimal,
    /// Part of the salary pool for this employee.
    pub salary_pool_per_head: Decimal,
}

/// The complete result of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The reference year the estimate covers.
    pub reference_year: i32,
    /// Entry date used for the calculation.
    pub entry_date: NaiveDate,
    /// Exit date used for the calculation.
    pub exit_date: NaiveDate,
    /// Gross estimate, rounded to 2 fraction digits.
    pub gross_estimate: Decimal,
    /// Net estimate, rounded to 2 fraction digits.
    pub net_estimate: Decimal,
    /// Unrounded ratios and intermediate amounts.
    pub diagnostics: PresenceDiagnostics,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Shortcut for `diagnostics.calendar_presence_ratio`.
    pub fn calendar_presence_ratio(&self) -> Decimal {
        self.diagnostics.calendar_presence_ratio
    }

    /// Shortcut for `diagnostics.working_day_presence_ratio`.
    pub fn working_day_presence_ratio(&self) -> Decimal {
        self.diagnostics.working_day_presence_ratio
    }

    /// Shortcut for `diagnostics.prorate_annual_salary`.
    pub fn prorate_annual_salary(&self) -> Decimal {
        self.diagnostics.prorate_annual_salary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> CalculationResult {
        CalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            reference_year: 2024,
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            exit_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            gross_estimate: dec("2984.98"),
            net_estimate: dec("2710.36"),
            diagnostics: PresenceDiagnostics {
                calendar_days_present: 366,
                calendar_presence_ratio: Decimal::ONE,
                theoretical_working_days: dec("231"),
                actual_working_days: dec("231"),
                working_day_presence_ratio: Decimal::ONE,
                prorate_annual_salary: dec("36000"),
                presence_pool_per_head: dec("709.77"),
                salary_pool_per_head: dec("2275.22"),
            },
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 5,
            },
        }
    }

    #[test]
    fn test_shortcuts_read_diagnostics() {
        let result = sample_result();
        assert_eq!(result.calendar_presence_ratio(), Decimal::ONE);
        assert_eq!(result.working_day_presence_ratio(), Decimal::ONE);
        assert_eq!(result.prorate_annual_salary(), dec("36000"));
    }

    #[test]
    fn test_result_serializes_amounts_as_strings() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["gross_estimate"], "2984.98");
        assert_eq!(json["net_estimate"], "2710.36");
        assert_eq!(json["diagnostics"]["calendar_days_present"], 366);
        assert_eq!(json["entry_date"], "2024-01-01");
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
