//! The estimate pipeline.
//!
//! Validation, presence, pool shares, then gross and net amounts. The
//! function is pure apart from reading the clock for the result timestamp.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use uuid::Uuid;

use crate::config::SchemeConstants;
use crate::error::ValidationError;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationInput, CalculationResult, PresenceDiagnostics,
};

use super::checked;
use super::pool_shares::{calculate_presence_share, calculate_salary_share};
use super::presence::calculate_presence;
use super::validation::validate_input;

/// Fraction digits kept on the gross and net estimates.
pub const ESTIMATE_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to cents, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(ESTIMATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the gross and net profit-sharing estimate.
///
/// Returns either a complete [`CalculationResult`] or the first
/// [`ValidationError`] encountered; no partial result is ever produced.
///
/// # Example
///
/// ```
/// use interessement_engine::calculation::estimate;
/// use interessement_engine::config::SchemeConstants;
/// use interessement_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let constants = SchemeConstants::reference_2024();
/// let input = CalculationInput::full_year(Decimal::from(3000), 0, &constants);
///
/// let result = estimate(&input, &constants).unwrap();
/// assert_eq!(result.gross_estimate, Decimal::from_str("2984.98").unwrap());
/// assert_eq!(result.net_estimate, Decimal::from_str("2710.36").unwrap());
/// ```
pub fn estimate(
    input: &CalculationInput,
    constants: &SchemeConstants,
) -> Result<CalculationResult, ValidationError> {
    let start_time = Instant::now();
    validate_input(input, constants)?;

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let presence = calculate_presence(input, constants, step_number)?;
    step_number += presence.audit_steps.len() as u32;
    audit_steps.extend(presence.audit_steps);
    warnings.extend(presence.warning);

    let salary = calculate_salary_share(
        input.monthly_salary,
        presence.calendar_presence_ratio,
        constants,
        step_number,
    )?;
    step_number += salary.audit_steps.len() as u32;
    audit_steps.extend(salary.audit_steps);

    let presence_share =
        calculate_presence_share(presence.actual_working_days, constants, step_number)?;
    audit_steps.push(presence_share.audit_step);
    step_number += 1;

    let gross = checked::add(
        presence_share.presence_pool_per_head,
        salary.salary_pool_per_head,
        "gross estimate",
    )?;
    let net = checked::mul(gross, constants.net_factor, "net estimate")?;

    let gross_estimate = round_currency(gross);
    let net_estimate = round_currency(net);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_estimate".to_string(),
        rule_name: "Gross Estimate".to_string(),
        input: serde_json::json!({
            "presence_pool_per_head": presence_share.presence_pool_per_head.normalize().to_string(),
            "salary_pool_per_head": salary.salary_pool_per_head.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "gross_estimate": gross_estimate.to_string()
        }),
        reasoning: format!(
            "€{} + €{} = €{}",
            presence_share.presence_pool_per_head.round_dp(2),
            salary.salary_pool_per_head.round_dp(2),
            gross_estimate
        ),
    });
    step_number += 1;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_estimate".to_string(),
        rule_name: "Net Estimate".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "net_factor": constants.net_factor.normalize().to_string()
        }),
        output: serde_json::json!({
            "net": net.normalize().to_string(),
            "net_estimate": net_estimate.to_string()
        }),
        reasoning: format!(
            "€{} x {} = €{}",
            gross.round_dp(4).normalize(),
            constants.net_factor.normalize(),
            net_estimate
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        gross_estimate = %gross_estimate,
        net_estimate = %net_estimate,
        duration_us,
        "Estimate computed"
    );

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        reference_year: constants.reference_year(),
        entry_date: input.entry_date,
        exit_date: input.exit_date,
        gross_estimate,
        net_estimate,
        diagnostics: PresenceDiagnostics {
            calendar_days_present: presence.calendar_days_present,
            calendar_presence_ratio: presence.calendar_presence_ratio,
            theoretical_working_days: presence.theoretical_working_days,
            actual_working_days: presence.actual_working_days,
            working_day_presence_ratio: presence.working_day_presence_ratio,
            prorate_annual_salary: salary.prorate_annual_salary,
            presence_pool_per_head: presence_share.presence_pool_per_head,
            salary_pool_per_head: salary.salary_pool_per_head,
        },
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}
