//! # Error Types
//!
//! Domain-specific error types for invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoice-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  invoice-pdf errors (separate crate)                                   │
//! │  └── RenderError      - Encoding failures, amounts too large to print  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr/stdout          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The arithmetic cannot fail on validated input. `ValidationError` comes
//! out of the optional caller-side checks in [`crate::validation`];
//! `CoreError::AmountOverflow` comes out of the checked totals for input
//! that skipped them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A specific line item failed validation.
    ///
    /// `index` is zero-based; the message shows the row as the user sees it.
    #[error("Item {}: {source}", .index + 1)]
    InvalidItem {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A derived amount left the range money can represent.
    ///
    /// Only reachable with inputs outside the validated bounds.
    #[error("Amount is too large to compute")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when collaborator-supplied values don't meet the
/// input contract. Used for early validation before rendering runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "invoice number".to_string(),
        };
        assert_eq!(err.to_string(), "invoice number is required");

        let err = ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "tax rate must be between 0 and 100");
    }

    #[test]
    fn test_item_error_uses_one_based_row() {
        let err = CoreError::InvalidItem {
            index: 2,
            source: ValidationError::MustBePositive {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Item 3: quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "rate".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
