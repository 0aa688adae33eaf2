//! Presence calculation.
//!
//! Turns entry/exit dates and absences into the two presence ratios:
//! the calendar ratio (days in the company over days in the year) and the
//! working-day ratio (days actually worked over working days in the year).

use rust_decimal::Decimal;

use crate::config::SchemeConstants;
use crate::error::ValidationError;
use crate::models::{AuditStep, AuditWarning, CalculationInput};

use super::checked;

/// Warning code raised when absences exceed the theoretical working days.
pub const ABSENCES_EXCEED_WORKING_DAYS: &str = "absences_exceed_working_days";

/// The result of the presence calculation.
#[derive(Debug, Clone)]
pub struct PresenceResult {
    /// Calendar days between entry and exit, both included.
    pub calendar_days_present: i64,
    /// `calendar_days_present / total_calendar_days`.
    pub calendar_presence_ratio: Decimal,
    /// `total_working_days × calendar_presence_ratio`.
    pub theoretical_working_days: Decimal,
    /// `max(theoretical_working_days − absence_days, 0)`.
    pub actual_working_days: Decimal,
    /// `actual_working_days / total_working_days`, clamped to [0, 1].
    pub working_day_presence_ratio: Decimal,
    /// Audit steps for the calendar and working-day ratios.
    pub audit_steps: Vec<AuditStep>,
    /// Set when the absences wipe out every working day.
    pub warning: Option<AuditWarning>,
}

/// Computes the presence ratios for an already validated input.
///
/// # Example
///
/// ```
/// use interessement_engine::calculation::calculate_presence;
/// use interessement_engine::config::SchemeConstants;
/// use interessement_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let constants = SchemeConstants::reference_2024();
/// let input = CalculationInput::full_year(Decimal::from(3000), 0, &constants);
/// let presence = calculate_presence(&input, &constants, 1).unwrap();
///
/// assert_eq!(presence.calendar_days_present, 366);
/// assert_eq!(presence.calendar_presence_ratio, Decimal::ONE);
/// assert_eq!(presence.working_day_presence_ratio, Decimal::ONE);
/// ```
pub fn calculate_presence(
    input: &CalculationInput,
    constants: &SchemeConstants,
    step_number: u32,
) -> Result<PresenceResult, ValidationError> {
    let total_calendar_days = Decimal::from(constants.total_calendar_days());
    let total_working_days = Decimal::from(constants.total_working_days);
    let absence_days = Decimal::from(input.absence_days);

    let calendar_days_present = (input.exit_date - input.entry_date).num_days() + 1;
    let calendar_presence_ratio = checked::div(
        Decimal::from(calendar_days_present),
        total_calendar_days,
        "calendar presence ratio",
    )?;

    let theoretical_working_days = checked::mul(
        total_working_days,
        calendar_presence_ratio,
        "theoretical working days",
    )?;
    let actual_working_days = (theoretical_working_days - absence_days).max(Decimal::ZERO);

    let working_day_presence_ratio = checked::div(
        actual_working_days,
        total_working_days,
        "working-day presence ratio",
    )?
    .clamp(Decimal::ZERO, Decimal::ONE);

    let calendar_step = AuditStep {
        step_number,
        rule_id: "calendar_presence".to_string(),
        rule_name: "Calendar Presence".to_string(),
        input: serde_json::json!({
            "entry_date": input.entry_date.to_string(),
            "exit_date": input.exit_date.to_string(),
            "total_calendar_days": constants.total_calendar_days()
        }),
        output: serde_json::json!({
            "calendar_days_present": calendar_days_present,
            "calendar_presence_ratio": calendar_presence_ratio.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} days = {}",
            calendar_days_present,
            constants.total_calendar_days(),
            calendar_presence_ratio.round_dp(6).normalize()
        ),
    };

    let working_day_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "working_day_presence".to_string(),
        rule_name: "Working-Day Presence".to_string(),
        input: serde_json::json!({
            "total_working_days": constants.total_working_days,
            "absence_days": input.absence_days,
            "calendar_presence_ratio": calendar_presence_ratio.normalize().to_string()
        }),
        output: serde_json::json!({
            "theoretical_working_days": theoretical_working_days.normalize().to_string(),
            "actual_working_days": actual_working_days.normalize().to_string(),
            "working_day_presence_ratio": working_day_presence_ratio.normalize().to_string()
        }),
        reasoning: format!(
            "max({} - {}, 0) = {} days worked out of {}",
            theoretical_working_days.round_dp(2).normalize(),
            input.absence_days,
            actual_working_days.round_dp(2).normalize(),
            constants.total_working_days
        ),
    };

    let warning = (absence_days > theoretical_working_days).then(|| AuditWarning {
        code: ABSENCES_EXCEED_WORKING_DAYS.to_string(),
        message: format!(
            "{} absence days exceed the {} theoretical working days; presence share is zero",
            input.absence_days,
            theoretical_working_days.round_dp(2).normalize()
        ),
        severity: "medium".to_string(),
    });

    Ok(PresenceResult {
        calendar_days_present,
        calendar_presence_ratio,
        theoretical_working_days,
        actual_working_days,
        working_day_presence_ratio,
        audit_steps: vec![calendar_step, working_day_step],
        warning,
    })
}
