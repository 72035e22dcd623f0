//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Document editing / session failures            │
//! │  └── ValidationError  - Form rule failures before submission           │
//! │                                                                         │
//! │  tally-editor errors (app)                                             │
//! │  └── ApiError         - What the screen sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The totals engine has no error type: it never fails.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Document editing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line index does not exist in the document.
    #[error("Line {index} does not exist (document has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// An authenticated operation was attempted without a session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// A template was applied to a document that is not a quote.
    #[error("Templates can only be applied to quotes, not {kind}")]
    TemplateNotApplicable { kind: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form validation errors.
///
/// `field` names use the wire spelling (`unit_price`, `items[2].discount`)
/// so the screen can attach the message to the right input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: f64 },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Discount is larger than the line's pre-tax subtotal.
    #[error("{field} ({discount}) exceeds the line subtotal ({subtotal})")]
    DiscountExceedsSubtotal {
        field: String,
        discount: f64,
        subtotal: f64,
    },

    /// Document has no line items.
    #[error("At least one line item is required")]
    NoLineItems,
}

impl ValidationError {
    /// Returns the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooSmall { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::DiscountExceedsSubtotal { field, .. } => Some(field),
            ValidationError::NoLineItems => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Line 4 does not exist (document has 2 lines)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "client_id".to_string(),
        };
        assert_eq!(err.to_string(), "client_id is required");

        let err = ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "tax_rate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoLineItems.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::TooSmall {
            field: "items[0].quantity".to_string(),
            min: 1.0,
        };
        assert_eq!(err.field(), Some("items[0].quantity"));
        assert_eq!(ValidationError::NoLineItems.field(), None);
    }
}
