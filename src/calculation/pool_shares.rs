//! Pool share calculation.
//!
//! The bonus pool is split in two envelopes:
//!
//! - the presence pool (20%), shared equally per head and weighted by the
//!   working days actually worked
//! - the salary pool (80%), shared in proportion to the prorated annual
//!   salary over the company payroll mass

use rust_decimal::Decimal;

use crate::config::SchemeConstants;
use crate::error::ValidationError;
use crate::models::AuditStep;

use super::checked;

/// Months in a year, used to annualise the monthly salary.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The employee's part of the presence pool.
#[derive(Debug, Clone)]
pub struct PresenceShareResult {
    /// `presence_pool_rate × bonus_pool`.
    pub presence_pool_share: Decimal,
    /// The employee's part of it.
    pub presence_pool_per_head: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The employee's part of the salary pool.
#[derive(Debug, Clone)]
pub struct SalaryShareResult {
    /// `monthly_salary × 12 × calendar_presence_ratio`.
    pub prorate_annual_salary: Decimal,
    /// `salary_pool_rate × bonus_pool`.
    pub salary_pool_share: Decimal,
    /// The employee's part of it.
    pub salary_pool_per_head: Decimal,
    /// Audit steps for the prorated salary and the salary share.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the presence pool part.
///
/// The weighting is `actual_working_days / total_working_days`, recomputed
/// here from the unclamped working days rather than taken from the clamped
/// working-day ratio.
///
/// # Example
///
/// ```
/// use interessement_engine::calculation::calculate_presence_share;
/// use interessement_engine::config::SchemeConstants;
/// use rust_decimal::Decimal;
///
/// let constants = SchemeConstants::reference_2024();
/// let result = calculate_presence_share(Decimal::from(231), &constants, 1).unwrap();
/// assert_eq!(result.presence_pool_per_head.round_dp(2), Decimal::new(70977, 2));
/// ```
pub fn calculate_presence_share(
    actual_working_days: Decimal,
    constants: &SchemeConstants,
    step_number: u32,
) -> Result<PresenceShareResult, ValidationError> {
    let total_working_days = Decimal::from(constants.total_working_days);

    let presence_pool_share = checked::mul(
        constants.presence_pool_rate,
        constants.bonus_pool,
        "presence pool",
    )?;
    let per_beneficiary = checked::div(
        presence_pool_share,
        Decimal::from(constants.beneficiary_count),
        "presence pool per beneficiary",
    )?;
    let worked_fraction = checked::div(
        actual_working_days,
        total_working_days,
        "worked fraction",
    )?;
    let presence_pool_per_head =
        checked::mul(per_beneficiary, worked_fraction, "presence pool per head")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "presence_pool".to_string(),
        rule_name: "Presence Pool Share".to_string(),
        input: serde_json::json!({
            "bonus_pool": constants.bonus_pool.normalize().to_string(),
            "presence_pool_rate": constants.presence_pool_rate.normalize().to_string(),
            "beneficiary_count": constants.beneficiary_count,
            "actual_working_days": actual_working_days.normalize().to_string(),
            "total_working_days": constants.total_working_days
        }),
        output: serde_json::json!({
            "presence_pool_share": presence_pool_share.normalize().to_string(),
            "presence_pool_per_head": presence_pool_per_head.normalize().to_string()
        }),
        reasoning: format!(
            "(€{} / {}) x ({} / {}) = €{}",
            presence_pool_share.normalize(),
            constants.beneficiary_count,
            actual_working_days.round_dp(2).normalize(),
            constants.total_working_days,
            presence_pool_per_head.round_dp(2)
        ),
    };

    Ok(PresenceShareResult {
        presence_pool_share,
        presence_pool_per_head,
        audit_step,
    })
}

/// Computes the prorated annual salary and the salary pool part.
///
/// # Example
///
/// ```
/// use interessement_engine::calculation::calculate_salary_share;
/// use interessement_engine::config::SchemeConstants;
/// use rust_decimal::Decimal;
///
/// let constants = SchemeConstants::reference_2024();
/// let result = calculate_salary_share(Decimal::from(3000), Decimal::ONE, &constants, 1).unwrap();
/// assert_eq!(result.prorate_annual_salary, Decimal::from(36000));
/// assert_eq!(result.salary_pool_per_head.round_dp(2), Decimal::new(227522, 2));
/// ```
pub fn calculate_salary_share(
    monthly_salary: Decimal,
    calendar_presence_ratio: Decimal,
    constants: &SchemeConstants,
    step_number: u32,
) -> Result<SalaryShareResult, ValidationError> {
    let annual_salary = checked::mul(
        monthly_salary,
        Decimal::from(MONTHS_PER_YEAR),
        "annual salary",
    )?;
    let prorate_annual_salary = checked::mul(
        annual_salary,
        calendar_presence_ratio,
        "prorated annual salary",
    )?;

    let salary_pool_share = checked::mul(
        constants.salary_pool_rate,
        constants.bonus_pool,
        "salary pool",
    )?;
    let payroll_fraction = checked::div(
        prorate_annual_salary,
        constants.total_payroll_mass,
        "payroll fraction",
    )?;
    let salary_pool_per_head =
        checked::mul(payroll_fraction, salary_pool_share, "salary pool per head")?;

    let prorate_step = AuditStep {
        step_number,
        rule_id: "prorated_salary".to_string(),
        rule_name: "Prorated Annual Salary".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string(),
            "calendar_presence_ratio": calendar_presence_ratio.normalize().to_string()
        }),
        output: serde_json::json!({
            "prorate_annual_salary": prorate_annual_salary.normalize().to_string()
        }),
        reasoning: format!(
            "€{} x {} x {} = €{}",
            monthly_salary.normalize(),
            MONTHS_PER_YEAR,
            calendar_presence_ratio.round_dp(6).normalize(),
            prorate_annual_salary.round_dp(2).normalize()
        ),
    };

    let share_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "salary_pool".to_string(),
        rule_name: "Salary Pool Share".to_string(),
        input: serde_json::json!({
            "prorate_annual_salary": prorate_annual_salary.normalize().to_string(),
            "total_payroll_mass": constants.total_payroll_mass.normalize().to_string(),
            "salary_pool_rate": constants.salary_pool_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "salary_pool_share": salary_pool_share.normalize().to_string(),
            "salary_pool_per_head": salary_pool_per_head.normalize().to_string()
        }),
        reasoning: format!(
            "(€{} / €{}) x €{} = €{}",
            prorate_annual_salary.round_dp(2).normalize(),
            constants.total_payroll_mass.normalize(),
            salary_pool_share.normalize(),
            salary_pool_per_head.round_dp(2)
        ),
    };

    Ok(SalaryShareResult {
        prorate_annual_salary,
        salary_pool_share,
        salary_pool_per_head,
        audit_steps: vec![prorate_step, share_step],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_presence_pool_is_twenty_percent_of_envelope() {
        let constants = SchemeConstants::reference_2024();
        let result = calculate_presence_share(dec("231"), &constants, 1).unwrap();

        assert_eq!(result.presence_pool_share, dec("2580000"));
        assert_eq!(result.presence_pool_per_head.round_dp(2), dec("709.77"));
    }

    #[test]
    fn test_half_the_working_days_halves_presence_part() {
        let constants = SchemeConstants::reference_2024();
        let full = calculate_presence_share(dec("231"), &constants, 1).unwrap();
        let half = calculate_presence_share(dec("115.5"), &constants, 1).unwrap();

        assert_eq!(
            half.presence_pool_per_head.round_dp(6),
            (full.presence_pool_per_head / Decimal::TWO).round_dp(6)
        );
    }

    #[test]
    fn test_zero_working_days_gives_zero_presence_part() {
        let constants = SchemeConstants::reference_2024();
        let result = calculate_presence_share(Decimal::ZERO, &constants, 1).unwrap();
        assert_eq!(result.presence_pool_per_head, Decimal::ZERO);
    }

    #[test]
    fn test_zero_beneficiaries_is_unexpected_error() {
        let mut constants = SchemeConstants::reference_2024();
        constants.beneficiary_count = 0;

        let result = calculate_presence_share(dec("231"), &constants, 1);
        assert!(matches!(
            result,
            Err(ValidationError::UnexpectedCalculationError { .. })
        ));
    }

    #[test]
    fn test_salary_share_for_full_year() {
        let constants = SchemeConstants::reference_2024();
        let result = calculate_salary_share(dec("3000"), Decimal::ONE, &constants, 1).unwrap();

        assert_eq!(result.prorate_annual_salary, dec("36000"));
        assert_eq!(result.salary_pool_share, dec("10320000"));
        assert_eq!(result.salary_pool_per_head.round_dp(2), dec("2275.22"));
    }

    #[test]
    fn test_salary_share_is_prorated_by_calendar_ratio() {
        let constants = SchemeConstants::reference_2024();
        let ratio = dec("183") / dec("366");
        let result = calculate_salary_share(dec("3000"), ratio, &constants, 1).unwrap();

        assert_eq!(result.prorate_annual_salary.round_dp(6), dec("18000"));
    }

    #[test]
    fn test_zero_payroll_mass_is_unexpected_error() {
        let mut constants = SchemeConstants::reference_2024();
        constants.total_payroll_mass = Decimal::ZERO;

        let result = calculate_salary_share(dec("3000"), Decimal::ONE, &constants, 1);
        assert!(matches!(
            result,
            Err(ValidationError::UnexpectedCalculationError { .. })
        ));
    }

    #[test]
    fn test_salary_audit_steps() {
        let constants = SchemeConstants::reference_2024();
        let result = calculate_salary_share(dec("3000"), Decimal::ONE, &constants, 7).unwrap();

        assert_eq!(result.audit_steps[0].step_number, 7);
        assert_eq!(result.audit_steps[0].rule_id, "prorated_salary");
        assert_eq!(
            result.audit_steps[0].output["prorate_annual_salary"].as_str().unwrap(),
            "36000"
        );
        assert!(result.audit_steps[0].reasoning.contains("€3000 x 12"));
        assert_eq!(result.audit_steps[1].step_number, 8);
        assert_eq!(result.audit_steps[1].rule_id, "salary_pool");
    }
}
