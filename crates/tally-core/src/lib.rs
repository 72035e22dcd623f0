//! # tally-core: Pure Document Logic for Tally
//!
//! This crate holds the logic shared by the invoice, quote and quote template
//! screens. Everything here is a pure function or a plain value; there is no
//! I/O and no global state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (web / mobile)                       │   │
//! │  │    Invoices ─── Quotes ─── Quote Templates                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ every keystroke                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-editor (state + commands)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  totals   │  │ document  │  │ validation│  │  session  │  │   │
//! │  │   │ line_total│  │ LineItems │  │   rules   │  │  Session  │  │   │
//! │  │   │ grand_tot │  │ templates │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`totals`] - Line-item totals engine (subtotal, discount, tax, grand total)
//! - [`types`] - Domain types (LineItem, statuses, document headers)
//! - [`document`] - The ordered line-item sequence a document owns
//! - [`validation`] - Form rules applied before submission
//! - [`session`] - Explicit session context for authenticated calls
//! - [`listing`] - Search, filters, sorting, selection and pagination of fetched lists
//! - [`money`] - Integer cents for display rounding
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::totals::{grand_total, line_total};
//! use tally_core::types::LineItem;
//!
//! let items = vec![
//!     LineItem::new("Design work", 1.0, 100.0).with_discount(10.0).with_tax_rate(15.0),
//! ];
//!
//! assert_eq!(line_total(&items[0]), 103.5);
//! assert_eq!(grand_total(&items), 103.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod listing;
pub mod money;
pub mod session;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::LineItems;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::Session;
pub use totals::DocumentTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size the list endpoints are queried with.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound of a line's tax rate, in percent.
pub const MAX_TAX_RATE: f64 = 100.0;
