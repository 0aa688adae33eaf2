//! Core data models for the intéressement engine.

mod calculation_input;
mod calculation_result;

pub use calculation_input::CalculationInput;
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, PresenceDiagnostics,
};
