//! # Document Module
//!
//! The ordered line-item sequence a document owns, and the document itself.
//!
//! ## Line Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line-Item Operations                                 │
//! │                                                                         │
//! │  Screen Action            Operation               Sequence Change       │
//! │  ─────────────            ─────────               ───────────────       │
//! │                                                                         │
//! │  Open new form ──────────► LineItems::new() ─────► [blank]             │
//! │                                                                         │
//! │  Click "Add item" ───────► push_default() ──────► lines.push(blank)    │
//! │                                                                         │
//! │  Type in a field ────────► update(i, patch) ────► lines[i] patched     │
//! │                                                                         │
//! │  Pick catalog item ──────► apply_catalog_item() ► lines[i] prefilled   │
//! │                                                                         │
//! │  Click trash ────────────► remove(i) ───────────► refused on last line │
//! │                                                                         │
//! │  Every change ───────────► totals() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::totals::DocumentTotals;
use crate::types::{
    CatalogItem, DocumentHeader, DocumentKind, LineItem, LineItemPatch, QuoteTemplate,
};

// =============================================================================
// Line Items
// =============================================================================

/// Ordered, never-empty sequence of line items.
///
/// ## Invariants
/// - Starts with one blank line
/// - The last remaining line cannot be removed
/// - Order is the order lines were added in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct LineItems(Vec<LineItem>);

impl LineItems {
    /// Creates a sequence holding one blank line.
    pub fn new() -> Self {
        LineItems(vec![LineItem::blank()])
    }

    /// Builds a sequence from loaded lines; an empty list gives one blank line.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut lines = LineItems::new();
        lines.replace_all(items);
        lines
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a sequence built through this API.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    /// Appends a blank line and returns its index.
    pub fn push_default(&mut self) -> usize {
        self.push(LineItem::blank())
    }

    /// Appends `item` and returns its index.
    pub fn push(&mut self, item: LineItem) -> usize {
        self.0.push(item);
        self.0.len() - 1
    }

    /// Removes the line at `index`.
    ///
    /// ## Returns
    /// - `Ok(true)` if the line was removed
    /// - `Ok(false)` if it is the only line (kept)
    /// - `Err(LineOutOfRange)` if `index` does not exist
    pub fn remove(&mut self, index: usize) -> CoreResult<bool> {
        self.check_index(index)?;
        if self.0.len() <= 1 {
            return Ok(false);
        }
        self.0.remove(index);
        Ok(true)
    }

    /// Applies a partial update to one line.
    pub fn update(&mut self, index: usize, patch: &LineItemPatch) -> CoreResult<()> {
        self.line_mut(index)?.apply(patch);
        Ok(())
    }

    /// Prefills a line from a saved catalog item.
    ///
    /// The catalog name becomes the description; price, tax rate and
    /// discount are copied as they are. Quantity is left alone.
    pub fn apply_catalog_item(&mut self, index: usize, catalog: &CatalogItem) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.description = catalog.name.clone();
        line.unit_price = catalog.unit_price;
        line.tax_rate = catalog.tax_rate;
        line.discount = catalog.discount;
        Ok(())
    }

    /// Replaces every line. An empty list resets to one blank line.
    pub fn replace_all(&mut self, items: Vec<LineItem>) {
        if items.is_empty() {
            self.0 = vec![LineItem::blank()];
        } else {
            self.0 = items;
        }
    }

    /// Current totals of the sequence.
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(&self.0)
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.0.len();
        self.0
            .get_mut(index)
            .ok_or(CoreError::LineOutOfRange { index, len })
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.0.len() {
            return Err(CoreError::LineOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(())
    }
}

impl Default for LineItems {
    fn default() -> Self {
        LineItems::new()
    }
}

impl From<Vec<LineItem>> for LineItems {
    fn from(items: Vec<LineItem>) -> Self {
        LineItems::from_items(items)
    }
}

impl From<LineItems> for Vec<LineItem> {
    fn from(lines: LineItems) -> Self {
        lines.0
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Document
// =============================================================================

/// An invoice, quote or quote template being edited.
///
/// On the wire the header fields sit next to `items`, with a `kind` tag:
/// ```json
/// { "kind": "quote", "client_id": 3, "expiry_date": "2026-12-01",
///   "items": [{ "description": "Audit", "quantity": 1, "unit_price": 900 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub header: DocumentHeader,
    #[serde(default)]
    pub items: LineItems,
}

impl Document {
    /// A new, empty document of `kind` with one blank line.
    pub fn new(kind: DocumentKind) -> Self {
        Document {
            header: DocumentHeader::empty(kind),
            items: LineItems::new(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.header.kind()
    }

    pub fn totals(&self) -> DocumentTotals {
        self.items.totals()
    }

    /// Copies a saved template onto a quote: currency, notes and every line.
    ///
    /// Template lines without a tax rate or discount get explicit zeros.
    /// A template with no lines leaves the quote with one blank line.
    pub fn apply_template(&mut self, template: &QuoteTemplate) -> CoreResult<()> {
        let DocumentHeader::Quote(header) = &mut self.header else {
            return Err(CoreError::TemplateNotApplicable {
                kind: self.header.kind().to_string(),
            });
        };

        header.currency_id = template.currency_id;
        header.notes = template.notes.clone();
        self.items
            .replace_all(template.items.iter().map(LineItem::normalized).collect());
        Ok(())
    }

    /// Body sent to the create/update endpoints: header fields plus the raw
    /// line items. Computed totals are never included; the backend computes
    /// its own.
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        let mut body = match &self.header {
            DocumentHeader::Invoice(h) => serde_json::to_value(h)?,
            DocumentHeader::Quote(h) => serde_json::to_value(h)?,
            DocumentHeader::QuoteTemplate(h) => serde_json::to_value(h)?,
        };
        if let Value::Object(map) = &mut body {
            map.insert("items".to_string(), serde_json::to_value(&self.items)?);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuoteHeader, TemplateHeader};

    fn template(items: Vec<LineItem>) -> QuoteTemplate {
        QuoteTemplate {
            id: 9,
            name: "Website package".to_string(),
            currency_id: Some(2),
            notes: Some("Valid for 30 days".to_string()),
            items,
        }
    }

    #[test]
    fn test_new_sequence_has_one_blank_line() {
        let lines = LineItems::new();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get(0), Some(&LineItem::blank()));
    }

    #[test]
    fn test_push_and_remove() {
        let mut lines = LineItems::new();
        assert_eq!(lines.push_default(), 1);
        assert_eq!(lines.push(LineItem::new("Hosting", 1.0, 20.0)), 2);

        assert!(lines.remove(0).unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.get(1).unwrap().description, "Hosting");
    }

    #[test]
    fn test_last_line_is_kept() {
        let mut lines = LineItems::new();
        assert!(!lines.remove(0).unwrap());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut lines = LineItems::new();
        let err = lines.remove(3).unwrap_err();
        assert!(matches!(err, CoreError::LineOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_update_recomputes_totals() {
        let mut lines = LineItems::new();
        lines
            .update(
                0,
                &LineItemPatch {
                    description: Some("Consulting".to_string()),
                    unit_price: Some(100.0),
                    discount: Some(10.0),
                    tax_rate: Some(15.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(lines.totals().grand_total, 103.5);
        assert!(lines.update(5, &LineItemPatch::default()).is_err());
    }

    #[test]
    fn test_apply_catalog_item() {
        let mut lines = LineItems::new();
        lines.update(0, &LineItemPatch { quantity: Some(4.0), ..Default::default() }).unwrap();

        let catalog = CatalogItem {
            id: 1,
            name: "Logo design".to_string(),
            description: None,
            unit_price: Some(250.0),
            tax_rate: Some(5.0),
            discount: None,
        };
        lines.apply_catalog_item(0, &catalog).unwrap();

        let line = lines.get(0).unwrap();
        assert_eq!(line.description, "Logo design");
        assert_eq!(line.quantity(), 4.0);
        assert_eq!(line.unit_price(), 250.0);
        assert_eq!(line.discount, None);
    }

    #[test]
    fn test_replace_all_with_empty_list() {
        let mut lines = LineItems::new();
        lines.push(LineItem::new("a", 1.0, 1.0));
        lines.replace_all(Vec::new());
        assert_eq!(lines, LineItems::new());
        assert_eq!(LineItems::from_items(Vec::new()).len(), 1);
    }

    #[test]
    fn test_apply_template_to_quote() {
        let mut doc = Document::new(DocumentKind::Quote);
        let raw: LineItem =
            serde_json::from_str(r#"{"description":"Pages","quantity":5,"unit_price":80}"#)
                .unwrap();
        doc.apply_template(&template(vec![raw])).unwrap();

        match &doc.header {
            DocumentHeader::Quote(QuoteHeader { currency_id, notes, .. }) => {
                assert_eq!(*currency_id, Some(2));
                assert_eq!(notes.as_deref(), Some("Valid for 30 days"));
            }
            other => panic!("unexpected header {:?}", other),
        }
        let line = doc.items.get(0).unwrap();
        assert_eq!(line.tax_rate, Some(0.0));
        assert_eq!(line.discount, Some(0.0));
        assert_eq!(doc.totals().grand_total, 400.0);
    }

    #[test]
    fn test_apply_empty_template_keeps_one_line() {
        let mut doc = Document::new(DocumentKind::Quote);
        doc.items.push(LineItem::new("old", 1.0, 1.0));
        doc.apply_template(&template(Vec::new())).unwrap();
        assert_eq!(doc.items, LineItems::new());
    }

    #[test]
    fn test_template_only_applies_to_quotes() {
        let mut doc = Document::new(DocumentKind::Invoice);
        let err = doc.apply_template(&template(Vec::new())).unwrap_err();
        assert!(matches!(err, CoreError::TemplateNotApplicable { .. }));
    }

    #[test]
    fn test_payload_has_raw_items_and_no_totals() {
        let mut doc = Document {
            header: DocumentHeader::QuoteTemplate(TemplateHeader {
                name: "Retainer".to_string(),
                currency_id: Some(1),
                notes: None,
            }),
            items: LineItems::new(),
        };
        doc.items
            .update(0, &LineItemPatch { unit_price: Some(500.0), ..Default::default() })
            .unwrap();

        let body = doc.to_payload().unwrap();
        assert_eq!(body["name"], "Retainer");
        assert_eq!(body["items"][0]["unit_price"], 500.0);
        assert!(body.get("kind").is_none());
        assert!(body.get("grand_total").is_none());
    }

    #[test]
    fn test_document_json_round_trip_shape() {
        let doc: Document = serde_json::from_str(
            r#"{"kind":"invoice","client_id":4,"currency_id":1,"due_date":"2026-11-30",
                "items":[{"description":"Support","quantity":2,"unit_price":45.5,"tax_rate":10}]}"#,
        )
        .unwrap();
        assert_eq!(doc.kind(), DocumentKind::Invoice);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.totals().subtotal, 91.0);
    }

    #[test]
    fn test_empty_items_array_gets_blank_line() {
        let lines: LineItems = serde_json::from_str("[]").unwrap();
        assert_eq!(lines, LineItems::new());
    }

    #[test]
    fn test_document_without_items_gets_blank_line() {
        let doc: Document = serde_json::from_str(r#"{"kind":"quote"}"#).unwrap();
        assert_eq!(doc.items.len(), 1);
    }
}
