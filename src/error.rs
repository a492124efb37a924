//! Error types for the Tip-Pool Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can reject an allocation run. All validation
//! failures name the offending entity and field.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Tip-Pool Engine.
///
/// # Example
///
/// ```
/// use tip_pool_engine::error::EngineError;
///
/// let error = EngineError::PoolNotFound {
///     pool_id: "dish".to_string(),
/// };
/// assert_eq!(error.to_string(), "Pool not found: dish");
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

    /// A pool id was not found in the configuration.
    #[error("Pool not found: {pool_id}")]
    PoolNotFound {
        /// The pool id that was not found.
        pool_id: String,
    },

    /// A server earning record was invalid.
    #[error("Invalid server '{employee_id}' field '{field}': {message}")]
    InvalidServer {
        /// The server's employee id.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pool worker record was invalid.
    #[error("Invalid worker '{employee_id}' field '{field}': {message}")]
    InvalidWorker {
        /// The worker's employee id.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pool definition was invalid.
    #[error("Invalid pool '{pool_id}' field '{field}': {message}")]
    InvalidPool {
        /// The pool id.
        pool_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pool's contribution percentage was outside [0, 100].
    #[error("Invalid contribution percentage {value} for pool '{pool_id}': must be between 0 and 100")]
    InvalidPercentage {
        /// The pool id.
        pool_id: String,
        /// The rejected percentage.
        value: Decimal,
    },

    /// The pools' percentages together take more than all of a server's tips.
    #[error("Combined contribution percentage {total} exceeds 100")]
    CombinedPercentageExceeded {
        /// The sum of every pool's contribution percentage.
        total: Decimal,
    },

    /// The same id appeared more than once in an input collection.
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId {
        /// The kind of entity ("server", "worker" or "pool").
        entity: String,
        /// The repeated id.
        id: String,
    },

    /// A tip period was invalid.
    #[error("Invalid tip period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
