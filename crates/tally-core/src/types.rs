//! # Domain Types
//!
//! Core domain types shared by the invoice, quote and quote template screens.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  InvoiceHeader  │   │   QuoteHeader   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  description    │   │  client_id      │   │  client_id      │       │
//! │  │  quantity       │   │  currency_id    │   │  currency_id    │       │
//! │  │  unit_price     │   │  due_date       │   │  expiry_date    │       │
//! │  │  discount       │   │  status         │   │  status         │       │
//! │  │  tax_rate (%)   │   │  notes          │   │  notes          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ TemplateHeader  │   │  CatalogItem    │   │  QuoteTemplate  │       │
//! │  │  name           │   │  name           │   │  name, items    │       │
//! │  │  currency_id    │   │  unit_price ... │   │  currency_id    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are snake_case, exactly as the backend sends and expects them.
//! Numeric line-item fields are optional: a blank input arrives as `null` or
//! is missing altogether, and the totals engine reads it as zero.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Line Item
// =============================================================================

/// One row of a quote, invoice or quote template.
///
/// `discount` is an absolute amount subtracted from `quantity × unit_price`;
/// `tax_rate` is a percentage applied to what remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub unit_price: Option<f64>,

    #[serde(default)]
    pub discount: Option<f64>,

    /// Percentage in [0, 100].
    #[serde(default)]
    pub tax_rate: Option<f64>,
}

impl LineItem {
    /// Creates a line with no discount and no tax.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            discount: Some(0.0),
            tax_rate: Some(0.0),
        }
    }

    /// The line a new document starts with: empty description, quantity 1,
    /// everything else 0.
    pub fn blank() -> Self {
        LineItem::new("", 1.0, 0.0)
    }

    /// Sets the absolute discount.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the tax rate in percent.
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Quantity, with a blank field read as zero.
    #[inline]
    pub fn quantity(&self) -> f64 {
        or_zero(self.quantity)
    }

    /// Unit price, with a blank field read as zero.
    #[inline]
    pub fn unit_price(&self) -> f64 {
        or_zero(self.unit_price)
    }

    /// Discount, with a blank field read as zero.
    #[inline]
    pub fn discount(&self) -> f64 {
        or_zero(self.discount)
    }

    /// Tax rate, with a blank field read as zero.
    #[inline]
    pub fn tax_rate(&self) -> f64 {
        or_zero(self.tax_rate)
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: &LineItemPatch) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = Some(unit_price);
        }
        if let Some(discount) = patch.discount {
            self.discount = Some(discount);
        }
        if let Some(tax_rate) = patch.tax_rate {
            self.tax_rate = Some(tax_rate);
        }
    }

    /// Copies the loaded line the way the quote screen does when it receives
    /// items from a template or the server: missing tax rate and discount
    /// become explicit zeros.
    pub fn normalized(&self) -> Self {
        LineItem {
            description: self.description.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount: Some(self.discount()),
            tax_rate: Some(self.tax_rate()),
        }
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::blank()
    }
}

/// Blank, null and NaN inputs all count as zero.
#[inline]
fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// A partial update to one line, sent by the screen on each input change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tax_rate: Option<f64>,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A saved product or service that can be picked into a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
}

// =============================================================================
// Document Kind
// =============================================================================

/// Which screen a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quote,
    QuoteTemplate,
}

impl DocumentKind {
    /// REST collection the document is created in.
    pub const fn collection(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoices",
            DocumentKind::Quote => "quotes",
            DocumentKind::QuoteTemplate => "quote-templates",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::QuoteTemplate => "quote template",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Unpaid,
    Paid,
    Overdue,
    Partial,
}

impl InvoiceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Partial => "partial",
        }
    }
}

/// Lifecycle status of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    /// Turned into an invoice by the backend.
    Converted,
}

impl QuoteStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Converted => "converted",
        }
    }
}

// =============================================================================
// Document Headers
// =============================================================================

/// Non-line-item fields of the invoice form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceHeader {
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub currency_id: Option<i64>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Non-line-item fields of the quote form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteHeader {
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub currency_id: Option<i64>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Non-line-item fields of the quote template form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Header of any document, tagged by kind on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentHeader {
    Invoice(InvoiceHeader),
    Quote(QuoteHeader),
    QuoteTemplate(TemplateHeader),
}

impl DocumentHeader {
    /// An empty header for a new document of `kind`.
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => DocumentHeader::Invoice(InvoiceHeader::default()),
            DocumentKind::Quote => DocumentHeader::Quote(QuoteHeader::default()),
            DocumentKind::QuoteTemplate => DocumentHeader::QuoteTemplate(TemplateHeader::default()),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentHeader::Invoice(_) => DocumentKind::Invoice,
            DocumentHeader::Quote(_) => DocumentKind::Quote,
            DocumentHeader::QuoteTemplate(_) => DocumentKind::QuoteTemplate,
        }
    }
}

// =============================================================================
// Fetched Records
// =============================================================================

/// A saved quote template as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub currency_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Client reference embedded in list rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientRef {
    pub id: i64,
    pub name: String,
}

/// One row of the invoice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSummary {
    pub id: i64,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

// =============================================================================
// Expenses
// =============================================================================

/// Expense category reference embedded in expense rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// One row of the expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseSummary {
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expense_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Account the expense was paid from, e.g. "Cash".
    #[serde(default)]
    pub paid_through: Option<String>,
}
