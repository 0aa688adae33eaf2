//! Configuration types for the profit-sharing scheme.
//!
//! [`SchemeConfig`] mirrors the YAML file on disk. [`SchemeConstants`] is the
//! flat, immutable set of values the estimator reads on every call.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// Short identifier (e.g., "interessement_2024").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version of the agreement these figures come from.
    pub version: String,
}

/// The calendar bounds of the reference year.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceYearConfig {
    /// First day of the reference year.
    pub start: NaiveDate,
    /// Last day of the reference year.
    pub end: NaiveDate,
    /// Last entry date still eligible for a payout.
    pub late_entry_cutoff: NaiveDate,
    /// Number of working days in the reference year.
    pub total_working_days: u32,
}

/// Company-wide figures.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkforceConfig {
    /// Number of eligible employees.
    pub beneficiary_count: u32,
    /// Annual payroll of the whole company.
    pub total_payroll_mass: Decimal,
}

/// The bonus envelope and how it is split.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Total amount distributed.
    pub bonus_pool: Decimal,
    /// Share of the pool distributed according to presence.
    pub presence_pool_rate: Decimal,
    /// Share of the pool distributed according to salary.
    pub salary_pool_rate: Decimal,
}

/// Scheme configuration file structure (`scheme.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeConfig {
    /// Scheme metadata.
    pub scheme: SchemeMetadata,
    /// Reference year bounds.
    pub reference_year: ReferenceYearConfig,
    /// Company-wide figures.
    pub workforce: WorkforceConfig,
    /// Bonus pool figures.
    pub pool: PoolConfig,
    /// Multiplier converting gross to net (CSG/CRDS approximation).
    pub net_factor: Decimal,
}

/// The constants of one reference year.
///
/// Built once at start-up and shared read-only between requests.
///
/// # Example
///
/// ```
/// use interessement_engine::config::SchemeConstants;
///
/// let constants = SchemeConstants::reference_2024();
/// assert_eq!(constants.total_calendar_days(), 366);
/// assert_eq!(constants.reference_year(), 2024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeConstants {
    /// Working days in the reference year.
    pub total_working_days: u32,
    /// Number of eligible employees.
    pub beneficiary_count: u32,
    /// Company-wide annual payroll.
    pub total_payroll_mass: Decimal,
    /// Total profit-sharing envelope.
    pub bonus_pool: Decimal,
    /// First day of the reference year.
    pub year_start: NaiveDate,
    /// Last day of the reference year.
    pub year_end: NaiveDate,
    /// Multiplier converting gross to net.
    pub net_factor: Decimal,
    /// Entries after this date are disqualified.
    pub late_entry_cutoff: NaiveDate,
    /// Share of the pool distributed by presence (0.20).
    pub presence_pool_rate: Decimal,
    /// Share of the pool distributed by salary (0.80).
    pub salary_pool_rate: Decimal,
}

impl SchemeConstants {
    /// The 2024 figures of the agreement.
    pub fn reference_2024() -> Self {
        Self {
            total_working_days: 231,
            beneficiary_count: 3635,
            total_payroll_mass: Decimal::from(163_290_000u32),
            bonus_pool: Decimal::from(12_900_000u32),
            year_start: calendar_date(2024, 1, 1),
            year_end: calendar_date(2024, 12, 31),
            net_factor: Decimal::new(908, 3),
            late_entry_cutoff: calendar_date(2024, 9, 30),
            presence_pool_rate: Decimal::new(20, 2),
            salary_pool_rate: Decimal::new(80, 2),
        }
    }

    /// Calendar days in the reference year, both bounds included.
    pub fn total_calendar_days(&self) -> i64 {
        (self.year_end - self.year_start).num_days() + 1
    }

    /// The calendar year the scheme covers.
    pub fn reference_year(&self) -> i32 {
        self.year_start.year()
    }
}

/// Builds one of the literal dates of the built-in scheme.
fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("built-in scheme dates are valid")
}

impl From<&SchemeConfig> for SchemeConstants {
    fn from(config: &SchemeConfig) -> Self {
        Self {
            total_working_days: config.reference_year.total_working_days,
            beneficiary_count: config.workforce.beneficiary_count,
            total_payroll_mass: config.workforce.total_payroll_mass,
            bonus_pool: config.pool.bonus_pool,
            year_start: config.reference_year.start,
            year_end: config.reference_year.end,
            net_factor: config.net_factor,
            late_entry_cutoff: config.reference_year.late_entry_cutoff,
            presence_pool_rate: config.pool.presence_pool_rate,
            salary_pool_rate: config.pool.salary_pool_rate,
        }
    }
}
