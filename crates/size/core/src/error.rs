//! Common error infrastructure for size-core.
//!
//! This module provides the shared classification trait used across all error
//! types in size-core. Domain-specific errors (e.g. `UnitParseError`,
//! `ChangeError`) are defined in their respective modules alongside the
//! operations they validate.
//!
//! Every error is a terminal rejection of a single request. Nothing in the
//! engine retries, and no error leaves a record partially mutated.

/// Severity level of an error, used for categorization and log levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid user input (unknown unit, degenerate change operand).
    Validation,

    /// An arithmetic operation has no defined result (division by zero).
    Arithmetic,

    /// A referenced record does not exist.
    NotFound,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Arithmetic => "arithmetic",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the error was caused by the request itself rather
    /// than by engine state.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation | Self::Arithmetic | Self::NotFound)
    }
}

/// Common trait for all size-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by cause, not by impact
pub trait SizeError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and for asserting on error kinds in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure of a checked arithmetic operation on a quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArithmeticError {
    /// Division of a quantity by the zero scalar.
    #[error("division by zero")]
    DivisionByZero,
}

impl SizeError for ArithmeticError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Arithmetic
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "ARITHMETIC_DIVISION_BY_ZERO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_errors_are_user_errors() {
        let err = ArithmeticError::DivisionByZero;
        assert_eq!(err.severity(), ErrorSeverity::Arithmetic);
        assert!(err.severity().is_user_error());
        assert_eq!(err.error_code(), "ARITHMETIC_DIVISION_BY_ZERO");
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn internal_is_not_user_error() {
        assert!(!ErrorSeverity::Internal.is_user_error());
        assert_eq!(ErrorSeverity::NotFound.as_str(), "not_found");
    }
}
