//! # Totals Module
//!
//! The line-item totals engine shared by invoices, quotes and quote templates.
//!
//! ## Per-Line Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity × unit_price ────────────────► pre_discount                   │
//! │                                              │                          │
//! │                              − discount      │  (absolute amount)       │
//! │                                              ▼                          │
//! │                                          discounted                     │
//! │                                              │                          │
//! │                   × tax_rate / 100           │  (percent)               │
//! │                                              ▼                          │
//! │                                             tax                         │
//! │                                                                         │
//! │  line total = discounted + tax                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Aggregates
//! - `subtotal`       = Σ pre_discount
//! - `total_discount` = Σ discount
//! - `total_tax`      = Σ tax (each line's tax, recomputed per line)
//! - `grand_total`    = subtotal − total_discount + total_tax
//!
//! `grand_total` equals Σ `line_total` up to floating-point error.
//!
//! ## Numbers
//! Everything is `f64` and nothing is rounded here. Rounding to cents is a
//! display concern, see [`crate::money::Money::from_amount`].
//! Blank fields read as zero, and out-of-range inputs (negative quantity,
//! discount above the line subtotal) are computed through as-is. Nothing in
//! this module can fail.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::LineItem;

// =============================================================================
// Per-Line Breakdown
// =============================================================================

/// Every intermediate value of one line's computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineBreakdown {
    /// quantity × unit_price
    pub pre_discount: f64,
    pub discount: f64,
    /// pre_discount − discount; negative when the discount is too large.
    pub discounted: f64,
    /// discounted × tax_rate / 100
    pub tax: f64,
    /// discounted + tax
    pub total: f64,
}

impl LineBreakdown {
    /// Computes the breakdown of a single line.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::totals::LineBreakdown;
    /// use tally_core::types::LineItem;
    ///
    /// let line = LineItem::new("Consulting", 1.0, 100.0)
    ///     .with_discount(10.0)
    ///     .with_tax_rate(15.0);
    ///
    /// let b = LineBreakdown::of(&line);
    /// assert_eq!(b.discounted, 90.0);
    /// assert_eq!(b.tax, 13.5);
    /// assert_eq!(b.total, 103.5);
    /// ```
    pub fn of(item: &LineItem) -> Self {
        let pre_discount = item.quantity() * item.unit_price();
        let discount = item.discount();
        let discounted = pre_discount - discount;
        let tax = discounted * (item.tax_rate() / 100.0);

        LineBreakdown {
            pre_discount,
            discount,
            discounted,
            tax,
            total: discounted + tax,
        }
    }
}

// =============================================================================
// Scalar Operations
// =============================================================================

/// Final amount of one line: discounted amount plus its tax.
///
/// ## Example
/// ```rust
/// use tally_core::totals::line_total;
/// use tally_core::types::LineItem;
///
/// assert_eq!(line_total(&LineItem::new("Widget", 2.0, 10.0)), 20.0);
/// ```
#[inline]
pub fn line_total(item: &LineItem) -> f64 {
    LineBreakdown::of(item).total
}

/// Σ quantity × unit_price. Zero for an empty sequence.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.quantity() * i.unit_price()).sum()
}

/// Σ discount. Zero for an empty sequence.
pub fn total_discount(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::discount).sum()
}

/// Σ of each line's tax on its discounted amount. Zero for an empty sequence.
pub fn total_tax(items: &[LineItem]) -> f64 {
    items.iter().map(|i| LineBreakdown::of(i).tax).sum()
}

/// subtotal − total_discount + total_tax.
///
/// ## Example
/// ```rust
/// use tally_core::totals::grand_total;
/// use tally_core::types::LineItem;
///
/// let items = vec![
///     LineItem::new("Setup", 1.0, 50.0).with_tax_rate(10.0),
///     LineItem::new("Hours", 3.0, 20.0).with_discount(5.0),
/// ];
/// assert_eq!(grand_total(&items), 110.0);
/// ```
pub fn grand_total(items: &[LineItem]) -> f64 {
    subtotal(items) - total_discount(items) + total_tax(items)
}

// =============================================================================
// Document Totals
// =============================================================================

/// All totals of a document, derived from its current lines.
///
/// Never stored: recompute it whenever a line changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    /// One total per line, in line order.
    pub line_totals: Vec<f64>,
    pub subtotal: f64,
    pub total_discount: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

impl DocumentTotals {
    /// Computes every total in a single pass over `items`.
    ///
    /// The aggregates are summed in the same order and with the same
    /// per-line formula as the scalar functions, so each field equals its
    /// scalar counterpart exactly.
    pub fn compute(items: &[LineItem]) -> Self {
        let mut totals = DocumentTotals {
            line_totals: Vec::with_capacity(items.len()),
            ..Default::default()
        };

        for item in items {
            let line = LineBreakdown::of(item);
            totals.line_totals.push(line.total);
            totals.subtotal += line.pre_discount;
            totals.total_discount += line.discount;
            totals.total_tax += line.tax;
        }

        totals.grand_total = totals.subtotal - totals.total_discount + totals.total_tax;
        totals
    }

    /// Σ of the per-line totals.
    pub fn sum_of_lines(&self) -> f64 {
        self.line_totals.iter().sum()
    }
}

impl From<&[LineItem]> for DocumentTotals {
    fn from(items: &[LineItem]) -> Self {
        DocumentTotals::compute(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * (1.0 + a.abs().max(b.abs()))
    }

    fn two_lines() -> Vec<LineItem> {
        vec![
            LineItem::new("Setup", 1.0, 50.0).with_tax_rate(10.0),
            LineItem::new("Hours", 3.0, 20.0).with_discount(5.0),
        ]
    }

    #[test]
    fn test_empty_sequence_is_zero() {
        let items: Vec<LineItem> = Vec::new();
        assert_eq!(subtotal(&items), 0.0);
        assert_eq!(total_discount(&items), 0.0);
        assert_eq!(total_tax(&items), 0.0);
        assert_eq!(grand_total(&items), 0.0);

        let totals = DocumentTotals::compute(&items);
        assert!(totals.line_totals.is_empty());
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_plain_line() {
        let item = LineItem::new("Widget", 2.0, 10.0);
        assert_eq!(line_total(&item), 20.0);
        assert_eq!(grand_total(&[item]), 20.0);
    }

    #[test]
    fn test_discount_then_tax() {
        let item = LineItem::new("Consulting", 1.0, 100.0)
            .with_discount(10.0)
            .with_tax_rate(15.0);
        let b = LineBreakdown::of(&item);
        assert_eq!(b.pre_discount, 100.0);
        assert_eq!(b.discounted, 90.0);
        assert_eq!(b.tax, 13.5);
        assert_eq!(line_total(&item), 103.5);
    }

    #[test]
    fn test_two_line_aggregates() {
        let items = two_lines();
        assert_eq!(subtotal(&items), 110.0);
        assert_eq!(total_discount(&items), 5.0);
        assert_eq!(total_tax(&items), 5.0);
        assert_eq!(grand_total(&items), 110.0);
    }

    #[test]
    fn test_compute_matches_scalar_functions() {
        let items = vec![
            LineItem::new("a", 3.0, 19.99).with_discount(2.5).with_tax_rate(8.25),
            LineItem::new("b", 7.0, 0.33).with_tax_rate(21.0),
            LineItem::new("c", 1.0, 1234.56).with_discount(100.0).with_tax_rate(5.0),
        ];
        let totals = DocumentTotals::compute(&items);
        assert_eq!(totals.subtotal, subtotal(&items));
        assert_eq!(totals.total_discount, total_discount(&items));
        assert_eq!(totals.total_tax, total_tax(&items));
        assert_eq!(totals.grand_total, grand_total(&items));
        assert_eq!(totals.line_totals.len(), 3);
        for (item, total) in items.iter().zip(&totals.line_totals) {
            assert_eq!(*total, line_total(item));
        }
    }

    #[test]
    fn test_grand_total_equals_sum_of_lines() {
        let sets = vec![
            two_lines(),
            vec![LineItem::new("x", 0.5, 0.1).with_tax_rate(33.3)],
            vec![
                LineItem::new("y", 12.0, 4.75).with_discount(3.1).with_tax_rate(7.5),
                LineItem::new("z", 1.0, 9.99).with_discount(20.0).with_tax_rate(19.0),
                LineItem::blank(),
            ],
        ];
        for items in sets {
            let by_lines: f64 = items.iter().map(line_total).sum();
            assert!(approx(grand_total(&items), by_lines));
            assert!(approx(DocumentTotals::compute(&items).sum_of_lines(), by_lines));
        }
    }

    #[test]
    fn test_missing_quantity_behaves_as_zero() {
        let missing: LineItem = serde_json::from_str(r#"{"unit_price": 5}"#).unwrap();
        let mut zero = missing.clone();
        zero.quantity = Some(0.0);

        assert_eq!(line_total(&missing), 0.0);
        assert_eq!(line_total(&missing), line_total(&zero));
        assert_eq!(
            DocumentTotals::compute(&[missing]),
            DocumentTotals::compute(&[zero])
        );
    }

    #[test]
    fn test_discount_above_subtotal_gives_negative_tax() {
        let item = LineItem::new("Over-discounted", 1.0, 10.0)
            .with_discount(20.0)
            .with_tax_rate(10.0);
        let b = LineBreakdown::of(&item);
        assert_eq!(b.discounted, -10.0);
        assert_eq!(b.tax, -1.0);
        assert_eq!(b.total, -11.0);
    }

    #[test]
    fn test_negative_quantity_is_computed_through() {
        let item = LineItem::new("Return", -2.0, 10.0);
        assert_eq!(line_total(&item), -20.0);
    }

    #[test]
    fn test_idempotent() {
        let items = two_lines();
        assert_eq!(DocumentTotals::compute(&items), DocumentTotals::compute(&items));
        assert_eq!(grand_total(&items), grand_total(&items));
        assert_eq!(total_tax(&items), total_tax(&items));
    }

    #[test]
    fn test_from_slice() {
        let items = two_lines();
        let totals = DocumentTotals::from(items.as_slice());
        assert_eq!(totals.line_totals, vec![55.0, 55.0]);
    }
}
