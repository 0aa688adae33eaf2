//! Calculation logic for the intéressement engine.
//!
//! This module contains the estimate pipeline: input validation, presence
//! ratios, the presence and salary pool shares, and the final gross and net
//! amounts.

mod checked;
mod estimator;
mod pool_shares;
mod presence;
mod validation;

pub use estimator::{ESTIMATE_DECIMAL_PLACES, estimate, round_currency};
pub use pool_shares::{
    MONTHS_PER_YEAR, PresenceShareResult, SalaryShareResult, calculate_presence_share,
    calculate_salary_share,
};
pub use presence::{ABSENCES_EXCEED_WORKING_DAYS, PresenceResult, calculate_presence};
pub use validation::{FORM_DATE_FORMAT, parse_form_date, validate_input};
