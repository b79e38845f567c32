//! Error types for the tariff rate engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a pricing call can surface. Nothing is retried inside
//! the engine; a failure discards all partial results.

use thiserror::Error;

/// The main error type for the tariff rate engine.
///
/// # Example
///
/// ```
/// use tariff_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::Validation {
///     field: "ContractCode".to_string(),
///     message: "is required".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid ContractCode: is required");
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A required input was missing or invalid.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The request field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The rate catalog (or parameter source) had no matching record.
    #[error("{message}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// A description of the failed lookup.
        message: String,
    },

    /// The rate catalog had more than one record where exactly one is required.
    #[error("Expected exactly one {entity} for {key}, found {count}")]
    AmbiguousMatch {
        /// The kind of record that was looked up.
        entity: String,
        /// The lookup key, rendered for humans.
        key: String,
        /// How many rows matched.
        count: usize,
    },

    /// A parameter was present but held a value of a different type.
    #[error("Param {key} has type {actual}, expected {expected}")]
    TypeMismatch {
        /// The parameter key.
        key: String,
        /// The type the adapter asked for.
        expected: String,
        /// The type actually stored.
        actual: String,
    },

    /// No pricer is registered for the service code.
    #[error("No pricer implemented for service code {service_code}")]
    NotImplemented {
        /// The unmapped service code.
        service_code: String,
    },

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

    /// An arithmetic result could not be represented.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// Coarse classification of an [`EngineError`], for callers that only need
/// to tell bad input from missing tariff data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing input.
    Validation,
    /// No (or no unique) tariff data for otherwise valid input.
    NotFound,
    /// A parameter of the wrong declared type.
    TypeMismatch,
    /// The tariff family itself is unknown.
    NotImplemented,
    /// The tariff configuration could not be loaded.
    Configuration,
    /// Arithmetic overflow or similar defect.
    Calculation,
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::NotFound`].
    pub fn not_found(entity: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::NotFound { .. } | EngineError::AmbiguousMatch { .. } => {
                ErrorKind::NotFound
            }
            EngineError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            EngineError::NotImplemented { .. } => ErrorKind::NotImplemented,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            EngineError::CalculationError { .. } => ErrorKind::Calculation,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
