//! Error types for the intéressement engine.
//!
//! Two families of errors live here:
//!
//! - [`ValidationError`]: everything the estimator can return for a single
//!   calculation. These are expected, user-facing outcomes.
//! - [`EngineError`]: start-up failures, such as a missing or inconsistent
//!   scheme configuration file.

use chrono::NaiveDate;
use thiserror::Error;

/// The ways a single estimate can be rejected.
///
/// The estimator never panics and never returns a partial result: it returns
/// either a complete [`CalculationResult`](crate::models::CalculationResult)
/// or exactly one of these variants.
///
/// # Example
///
/// ```
/// use interessement_engine::error::ValidationError;
///
/// let error = ValidationError::MalformedDate {
///     value: "31-12-2024".to_string(),
/// };
/// assert_eq!(error.code(), "MALFORMED_DATE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A date field could not be parsed as `DD/MM/YYYY`.
    #[error("Malformed date '{value}': expected DD/MM/YYYY")]
    MalformedDate {
        /// The raw value that failed to parse.
        value: String,
    },

    /// The entry date is not in the reference year.
    #[error("Entry date {entry_date} is outside the reference year {reference_year}")]
    EntryOutsideReferenceYear {
        /// The rejected entry date.
        entry_date: NaiveDate,
        /// The year all ratios are computed over.
        reference_year: i32,
    },

    /// The employee joined after the late-entry cutoff and receives nothing.
    #[error("Entry date {entry_date} is after the cutoff {cutoff}: no payout")]
    LateEntryDisqualified {
        /// The rejected entry date.
        entry_date: NaiveDate,
        /// The last entry date still eligible.
        cutoff: NaiveDate,
    },

    /// Salary or absence count is not a valid number for the calculation.
    #[error("Invalid numeric input for '{field}': {message}")]
    InvalidNumericInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The exit date precedes the entry date.
    #[error("Exit date {exit_date} is before entry date {entry_date}")]
    ExitBeforeEntry {
        /// The entry date.
        entry_date: NaiveDate,
        /// The exit date.
        exit_date: NaiveDate,
    },

    /// Arithmetic failed in a way not covered above (division by a zero
    /// constant, overflow).
    #[error("Unexpected calculation error: {message}")]
    UnexpectedCalculationError {
        /// A description of the failure.
        message: String,
    },
}

impl ValidationError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedDate { .. } => "MALFORMED_DATE",
            ValidationError::EntryOutsideReferenceYear { .. } => "ENTRY_OUTSIDE_REFERENCE_YEAR",
            ValidationError::LateEntryDisqualified { .. } => "LATE_ENTRY_DISQUALIFIED",
            ValidationError::InvalidNumericInput { .. } => "INVALID_NUMERIC_INPUT",
            ValidationError::ExitBeforeEntry { .. } => "EXIT_BEFORE_ENTRY",
            ValidationError::UnexpectedCalculationError { .. } => "UNEXPECTED_CALCULATION_ERROR",
        }
    }

    /// The message shown to the user next to the form, in French.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MalformedDate { value } => format!(
                "Format de date invalide : « {} ». Utilisez le format JJ/MM/AAAA.",
                value
            ),
            ValidationError::EntryOutsideReferenceYear { reference_year, .. } => {
                format!("La date d'entrée doit être en {}.", reference_year)
            }
            ValidationError::LateEntryDisqualified { cutoff, .. } => format!(
                "Selon les règles définies, aucun intéressement n'est versé pour une date \
                 d'entrée dans l'entreprise postérieure au {}.",
                cutoff.format("%d/%m/%Y")
            ),
            ValidationError::InvalidNumericInput { .. } => {
                "Veuillez entrer des valeurs numériques valides pour le salaire et les absences."
                    .to_string()
            }
            ValidationError::ExitBeforeEntry { .. } => {
                "La date de sortie ne peut pas précéder la date d'entrée.".to_string()
            }
            ValidationError::UnexpectedCalculationError { message } => format!(
                "Une erreur inattendue est survenue lors du calcul : {}",
                message
            ),
        }
    }

    /// Whether this error is the caller's fault (as opposed to a broken
    /// constant set).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ValidationError::UnexpectedCalculationError { .. })
    }
}

/// Start-up and configuration errors.
///
/// # Example
///
/// ```
/// use interessement_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheme.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheme.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
