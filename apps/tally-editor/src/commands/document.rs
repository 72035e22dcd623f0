//! # Document Commands
//!
//! Line editing for the invoice, quote and quote template forms. Every
//! command returns the full document with freshly computed totals, so the
//! screen can redraw the live total after each keystroke.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  new_document / load_document                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌──────────────┐  add_line, update_line, remove_line,                  │
//! │  │   Editing    │  select_catalog_item, apply_template,                 │
//! │  │              │◄─ update_header                                       │
//! │  └──────┬───────┘                                                       │
//! │         │ prepare_submission (submit.rs)                                │
//! │         ▼                                                               │
//! │   SubmitRequest ──► transport                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use tally_core::document::Document;
use tally_core::listing::format_expiry;
use tally_core::totals::DocumentTotals;
use tally_core::types::{
    CatalogItem, DocumentHeader, DocumentKind, LineItem, LineItemPatch, QuoteTemplate,
};

use crate::error::{ApiError, ErrorCode};
use crate::state::{ConfigState, DocumentState};

// =============================================================================
// Response Types
// =============================================================================

/// Totals formatted with the configured currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTotals {
    pub line_totals: Vec<String>,
    pub subtotal: String,
    pub total_discount: String,
    pub total_tax: String,
    pub grand_total: String,
}

impl DisplayTotals {
    pub fn new(totals: &DocumentTotals, config: &ConfigState) -> Self {
        DisplayTotals {
            line_totals: totals
                .line_totals
                .iter()
                .map(|t| config.format_amount(*t))
                .collect(),
            subtotal: config.format_amount(totals.subtotal),
            total_discount: config.format_amount(totals.total_discount),
            total_tax: config.format_amount(totals.total_tax),
            grand_total: config.format_amount(totals.grand_total),
        }
    }
}

/// Document contents plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentResponse {
    pub kind: DocumentKind,
    pub editing_id: Option<i64>,
    pub header: DocumentHeader,
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
    pub display: DisplayTotals,
    /// Quotes only: "Expired" or e.g. "22nd November, 2026".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_label: Option<String>,
}

impl DocumentResponse {
    pub fn build(
        document: &Document,
        editing_id: Option<i64>,
        config: &ConfigState,
        today: NaiveDate,
    ) -> Self {
        let totals = document.totals();
        let expiry_label = match &document.header {
            DocumentHeader::Quote(q) => q.expiry_date.map(|d| format_expiry(d, today)),
            _ => None,
        };

        DocumentResponse {
            kind: document.kind(),
            editing_id,
            header: document.header.clone(),
            items: document.items.as_slice().to_vec(),
            display: DisplayTotals::new(&totals, config),
            totals,
            expiry_label,
        }
    }
}

fn respond(doc: &DocumentState, config: &ConfigState) -> DocumentResponse {
    let today = Local::now().date_naive();
    let editing_id = doc.editing_id();
    doc.with_document(|d| DocumentResponse::build(d, editing_id, config, today))
}

// =============================================================================
// Commands
// =============================================================================

/// Opens a blank document of `kind` with one empty line.
pub fn new_document(doc: &DocumentState, config: &ConfigState, kind: DocumentKind) -> DocumentResponse {
    debug!(%kind, "new_document command");
    doc.replace(Document::new(kind), None);
    respond(doc, config)
}

/// Loads a saved document for editing.
pub fn load_document(
    doc: &DocumentState,
    config: &ConfigState,
    document: Document,
    id: i64,
) -> DocumentResponse {
    debug!(id, kind = %document.kind(), lines = document.items.len(), "load_document command");
    doc.replace(document, Some(id));
    respond(doc, config)
}

/// Returns the current document and its totals.
pub fn get_document(doc: &DocumentState, config: &ConfigState) -> DocumentResponse {
    debug!("get_document command");
    respond(doc, config)
}

/// Replaces the header fields. The kind cannot change.
pub fn update_header(
    doc: &DocumentState,
    config: &ConfigState,
    header: DocumentHeader,
) -> Result<DocumentResponse, ApiError> {
    debug!("update_header command");
    doc.with_document_mut(|d| {
        if d.kind() != header.kind() {
            return Err(ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Cannot turn a {} into a {}", d.kind(), header.kind()),
            ));
        }
        d.header = header;
        Ok(())
    })?;
    Ok(respond(doc, config))
}

/// Appends an empty line.
pub fn add_line(doc: &DocumentState, config: &ConfigState) -> DocumentResponse {
    let index = doc.with_document_mut(|d| d.items.push_default());
    debug!(index, "add_line command");
    respond(doc, config)
}

/// Applies a field change to one line.
pub fn update_line(
    doc: &DocumentState,
    config: &ConfigState,
    index: usize,
    patch: LineItemPatch,
) -> Result<DocumentResponse, ApiError> {
    debug!(index, ?patch, "update_line command");
    doc.with_document_mut(|d| d.items.update(index, &patch))?;
    Ok(respond(doc, config))
}

/// Removes a line; the last remaining line is kept.
pub fn remove_line(
    doc: &DocumentState,
    config: &ConfigState,
    index: usize,
) -> Result<DocumentResponse, ApiError> {
    let removed = doc.with_document_mut(|d| d.items.remove(index))?;
    debug!(index, removed, "remove_line command");
    Ok(respond(doc, config))
}

/// Prefills a line from a saved catalog item.
pub fn select_catalog_item(
    doc: &DocumentState,
    config: &ConfigState,
    index: usize,
    item: &CatalogItem,
) -> Result<DocumentResponse, ApiError> {
    debug!(index, catalog_id = item.id, "select_catalog_item command");
    doc.with_document_mut(|d| d.items.apply_catalog_item(index, item))?;
    Ok(respond(doc, config))
}

/// Copies a quote template onto the open quote.
pub fn apply_template(
    doc: &DocumentState,
    config: &ConfigState,
    template: &QuoteTemplate,
) -> Result<DocumentResponse, ApiError> {
    doc.with_document_mut(|d| d.apply_template(template))?;
    info!(
        template_id = template.id,
        lines = template.items.len(),
        "Template applied"
    );
    Ok(respond(doc, config))
}
