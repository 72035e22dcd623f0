//! # Validation Module
//!
//! Form rules checked before a document is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Totals engine (totals.rs)                                    │
//! │  └── NO validation: computes through anything, never fails             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before submit)                                  │
//! │  ├── Line rules: description, quantity ≥ 1, price ≥ 0, tax 0..100      │
//! │  ├── Header rules: required client / currency / dates / name           │
//! │  └── Strict rule: discount ≤ line subtotal (opt-in)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                       │
//! │  └── Authoritative validation and totals                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::types::LineItem;
//! use tally_core::validation::validate_line_item;
//!
//! assert!(validate_line_item(0, &LineItem::new("Audit", 1.0, 900.0)).is_ok());
//! assert!(validate_line_item(0, &LineItem::new("Audit", 0.0, 900.0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DocumentHeader, LineItem};
use crate::MAX_TAX_RATE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Line Validators
// =============================================================================

fn line_field(index: usize, name: &str) -> String {
    format!("items[{}].{}", index, name)
}

/// A typed-in number: `Err(())` when the input is not a number at all.
fn number(value: Option<f64>) -> Result<Option<f64>, ()> {
    match value {
        Some(v) if v.is_nan() => Err(()),
        v => Ok(v),
    }
}

/// Every form rule a line breaks, in field order.
///
/// ## Rules
/// - `description` must not be blank
/// - `quantity` must be present and ≥ 1
/// - `unit_price` must be present and ≥ 0
/// - `tax_rate`, if present, must be within 0..=100
/// - `discount`, if present, must be ≥ 0
///
/// A NaN in any numeric field is reported as `Required`: the input holds
/// something, but not a number.
pub fn line_item_errors(index: usize, item: &LineItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let required = |name: &str| ValidationError::Required {
        field: line_field(index, name),
    };

    if item.description.trim().is_empty() {
        errors.push(required("description"));
    }

    match number(item.quantity) {
        Ok(Some(q)) if q < 1.0 => errors.push(ValidationError::TooSmall {
            field: line_field(index, "quantity"),
            min: 1.0,
        }),
        Ok(Some(_)) => {}
        Ok(None) | Err(()) => errors.push(required("quantity")),
    }

    match number(item.unit_price) {
        Ok(Some(p)) if p < 0.0 => errors.push(ValidationError::TooSmall {
            field: line_field(index, "unit_price"),
            min: 0.0,
        }),
        Ok(Some(_)) => {}
        Ok(None) | Err(()) => errors.push(required("unit_price")),
    }

    match number(item.tax_rate) {
        Ok(Some(rate)) if !(0.0..=MAX_TAX_RATE).contains(&rate) => {
            errors.push(ValidationError::OutOfRange {
                field: line_field(index, "tax_rate"),
                min: 0.0,
                max: MAX_TAX_RATE,
            })
        }
        Ok(_) => {}
        Err(()) => errors.push(required("tax_rate")),
    }

    match number(item.discount) {
        Ok(Some(discount)) if discount < 0.0 => errors.push(ValidationError::TooSmall {
            field: line_field(index, "discount"),
            min: 0.0,
        }),
        Ok(_) => {}
        Err(()) => errors.push(required("discount")),
    }

    errors
}

/// Validates one line against the form rules, returning the first failure.
///
/// See [`line_item_errors`] for the rules.
pub fn validate_line_item(index: usize, item: &LineItem) -> ValidationResult<()> {
    match line_item_errors(index, item).into_iter().next() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Rejects a discount larger than the line's pre-tax subtotal.
///
/// Both amounts are compared in whole cents, so a discount equal to the
/// subtotal passes even when the f64 product is a hair under it.
/// Not part of the form rules and never applied by the totals engine; the
/// editor applies it when submitting.
///
/// ## Example
/// ```rust
/// use tally_core::types::LineItem;
/// use tally_core::validation::validate_discount_within_subtotal;
///
/// let ok = LineItem::new("Hours", 2.0, 50.0).with_discount(100.0);
/// assert!(validate_discount_within_subtotal(0, &ok).is_ok());
///
/// let too_much = LineItem::new("Hours", 2.0, 50.0).with_discount(100.01);
/// assert!(validate_discount_within_subtotal(0, &too_much).is_err());
/// ```
pub fn validate_discount_within_subtotal(index: usize, item: &LineItem) -> ValidationResult<()> {
    let subtotal = item.quantity() * item.unit_price();
    let discount = item.discount();
    if Money::from_amount(discount) > Money::from_amount(subtotal) {
        return Err(ValidationError::DiscountExceedsSubtotal {
            field: line_field(index, "discount"),
            discount,
            subtotal,
        });
    }
    Ok(())
}

/// Validates every line; a document needs at least one.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| validate_line_item(i, item))
}

// =============================================================================
// Header Validators
// =============================================================================

fn require<T>(errors: &mut Vec<ValidationError>, value: &Option<T>, field: &str) {
    if value.is_none() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
    }
}

/// Every missing header field.
///
/// ## Rules
/// - Invoice: client, currency, due date
/// - Quote: client, currency, expiry date
/// - Quote template: name, currency
pub fn header_errors(header: &DocumentHeader) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match header {
        DocumentHeader::Invoice(h) => {
            require(&mut errors, &h.client_id, "client_id");
            require(&mut errors, &h.currency_id, "currency_id");
            require(&mut errors, &h.due_date, "due_date");
        }
        DocumentHeader::Quote(h) => {
            require(&mut errors, &h.client_id, "client_id");
            require(&mut errors, &h.currency_id, "currency_id");
            require(&mut errors, &h.expiry_date, "expiry_date");
        }
        DocumentHeader::QuoteTemplate(h) => {
            if h.name.trim().is_empty() {
                errors.push(ValidationError::Required {
                    field: "name".to_string(),
                });
            }
            require(&mut errors, &h.currency_id, "currency_id");
        }
    }
    errors
}

/// Validates the required header fields of any document kind, returning
/// the first missing one.
pub fn validate_header(header: &DocumentHeader) -> ValidationResult<()> {
    match header_errors(header).into_iter().next() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Collects every failure instead of stopping at the first, so a form can
/// flag all of its invalid inputs at once.
pub fn collect_errors(header: &DocumentHeader, items: &[LineItem]) -> Vec<ValidationError> {
    let mut errors = header_errors(header);
    if items.is_empty() {
        errors.push(ValidationError::NoLineItems);
    }
    for (i, item) in items.iter().enumerate() {
        errors.extend(line_item_errors(i, item));
    }
    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InvoiceHeader, QuoteHeader, TemplateHeader};
    use chrono::NaiveDate;

    #[test]
    fn test_valid_line() {
        let item = LineItem::new("Audit", 1.0, 900.0)
            .with_tax_rate(100.0)
            .with_discount(0.0);
        assert!(validate_line_item(0, &item).is_ok());
    }

    #[test]
    fn test_blank_description() {
        let err = validate_line_item(2, &LineItem::new("   ", 1.0, 1.0)).unwrap_err();
        assert_eq!(err.field(), Some("items[2].description"));
    }

    #[test]
    fn test_quantity_rules() {
        assert!(validate_line_item(0, &LineItem::new("a", 0.0, 1.0)).is_err());
        assert!(validate_line_item(0, &LineItem::new("a", -1.0, 1.0)).is_err());
        assert!(validate_line_item(0, &LineItem::new("a", 1.0, 1.0)).is_ok());

        let mut missing = LineItem::new("a", 1.0, 1.0);
        missing.quantity = None;
        assert!(matches!(
            validate_line_item(0, &missing),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_price_rules() {
        assert!(validate_line_item(0, &LineItem::new("free", 1.0, 0.0)).is_ok());
        assert!(validate_line_item(0, &LineItem::new("bad", 1.0, -0.01)).is_err());
    }

    #[test]
    fn test_tax_rate_range() {
        let line = LineItem::new("a", 1.0, 1.0);
        assert!(validate_line_item(0, &line.clone().with_tax_rate(0.0)).is_ok());
        assert!(validate_line_item(0, &line.clone().with_tax_rate(101.0)).is_err());
        assert!(validate_line_item(0, &line.with_tax_rate(-1.0)).is_err());
    }

    #[test]
    fn test_negative_discount() {
        let line = LineItem::new("a", 1.0, 1.0).with_discount(-5.0);
        let err = validate_line_item(1, &line).unwrap_err();
        assert_eq!(err.field(), Some("items[1].discount"));
    }

    #[test]
    fn test_form_rules_allow_large_discount() {
        let line = LineItem::new("a", 1.0, 10.0).with_discount(50.0);
        assert!(validate_line_item(0, &line).is_ok());
        assert!(validate_discount_within_subtotal(0, &line).is_err());
    }

    #[test]
    fn test_empty_line_list() {
        assert_eq!(validate_line_items(&[]), Err(ValidationError::NoLineItems));
    }

    #[test]
    fn test_header_rules() {
        let mut invoice = InvoiceHeader::default();
        let err = validate_header(&DocumentHeader::Invoice(invoice.clone())).unwrap_err();
        assert_eq!(err.field(), Some("client_id"));

        invoice.client_id = Some(1);
        invoice.currency_id = Some(1);
        invoice.due_date = NaiveDate::from_ymd_opt(2026, 12, 31);
        assert!(validate_header(&DocumentHeader::Invoice(invoice)).is_ok());

        let template = TemplateHeader {
            name: "Retainer".to_string(),
            currency_id: None,
            notes: None,
        };
        let err = validate_header(&DocumentHeader::QuoteTemplate(template)).unwrap_err();
        assert_eq!(err.field(), Some("currency_id"));
    }

    #[test]
    fn test_collect_errors_reports_everything() {
        let header = DocumentHeader::Quote(QuoteHeader::default());
        let items = vec![
            LineItem::new("", 1.0, 1.0),
            LineItem::new("ok", 1.0, 1.0),
            LineItem::new("x", 0.0, -1.0),
        ];
        let errors = collect_errors(&header, &items);
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                "client_id",
                "currency_id",
                "expiry_date",
                "items[0].description",
                "items[2].quantity",
                "items[2].unit_price",
            ]
        );
    }

    #[test]
    fn test_blank_quote_header_lists_every_missing_field() {
        let header = DocumentHeader::Quote(QuoteHeader::default());
        let errors = collect_errors(&header, &[LineItem::new("Audit", 1.0, 900.0)]);
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::Required { .. })));
    }

    #[test]
    fn test_line_reports_every_broken_rule() {
        let line = LineItem::new("", 0.0, -2.0)
            .with_tax_rate(150.0)
            .with_discount(-1.0);
        let errors = line_item_errors(4, &line);
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[4].field(), Some("items[4].discount"));

        // the single-error form still returns the first one
        assert_eq!(
            validate_line_item(4, &line).unwrap_err().field(),
            Some("items[4].description")
        );
    }

    #[test]
    fn test_nan_fields_are_required() {
        let line = LineItem {
            description: "Widgets".to_string(),
            quantity: Some(f64::NAN),
            unit_price: Some(f64::NAN),
            discount: Some(f64::NAN),
            tax_rate: Some(f64::NAN),
        };
        let errors = line_item_errors(0, &line);
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::Required { .. })));
    }

    #[test]
    fn test_full_discount_is_within_subtotal() {
        // 3 × 0.7 is 2.0999999999999996 in f64
        let line = LineItem::new("Widgets", 3.0, 0.7).with_discount(2.1);
        assert!(validate_discount_within_subtotal(0, &line).is_ok());

        let over = LineItem::new("Widgets", 3.0, 0.7).with_discount(2.11);
        assert!(validate_discount_within_subtotal(0, &over).is_err());
    }
}
