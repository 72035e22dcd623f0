//! # Submission Command
//!
//! Builds the create/update request for the open document. Sending it is
//! the transport's job; this command only decides what to send.
//!
//! ## Checks, In Order
//! 1. A session is present (otherwise `UNAUTHORIZED`)
//! 2. Header and line form rules (all failures reported together)
//! 3. Discount ≤ line subtotal, when `strict_discounts` is on
//!
//! The body carries the raw line items and no totals; the backend computes
//! its own.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use tally_core::validation::{collect_errors, validate_discount_within_subtotal};
use tally_core::ValidationError;

use crate::error::ApiError;
use crate::state::{ConfigState, DocumentState, SessionState};

/// HTTP method of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Put,
}

/// A ready-to-send request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitRequest {
    pub method: Method,
    pub url: String,
    pub authorization: String,
    pub body: Value,
}

/// Validates the open document and builds its create or update request.
///
/// A new document is POSTed to its collection; a loaded one is PUT to
/// `{collection}/{id}`.
pub fn prepare_submission(
    doc: &DocumentState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<SubmitRequest, ApiError> {
    debug!("prepare_submission command");

    let authorization = session.snapshot().require_authorization()?;

    let (kind, body) = doc.with_document(|d| {
        let items = d.items.as_slice();
        let mut errors = collect_errors(&d.header, items);
        if config.strict_discounts {
            errors.extend(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| validate_discount_within_subtotal(i, item).err()),
            );
        }
        reject_if_invalid(&errors)?;
        Ok::<_, ApiError>((d.kind(), d.to_payload()?))
    })?;

    let editing_id = doc.editing_id();
    let (method, path) = match editing_id {
        Some(id) => (Method::Put, format!("{}/{}", kind.collection(), id)),
        None => (Method::Post, kind.collection().to_string()),
    };

    info!(%kind, ?method, %path, "Submission prepared");

    Ok(SubmitRequest {
        method,
        url: config.url(&path),
        authorization,
        body,
    })
}

fn reject_if_invalid(errors: &[ValidationError]) -> Result<(), ApiError> {
    if errors.is_empty() {
        return Ok(());
    }
    warn!(count = errors.len(), "Submission rejected by form rules");
    Err(ApiError::validation(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use tally_core::document::Document;
    use tally_core::types::{DocumentHeader, DocumentKind, InvoiceHeader, LineItem};

    fn valid_invoice() -> Document {
        let mut doc = Document::new(DocumentKind::Invoice);
        doc.header = DocumentHeader::Invoice(InvoiceHeader {
            client_id: Some(3),
            currency_id: Some(1),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 30),
            ..Default::default()
        });
        doc.items.replace_all(vec![
            LineItem::new("Consulting", 1.0, 100.0)
                .with_discount(10.0)
                .with_tax_rate(15.0),
        ]);
        doc
    }

    fn logged_in() -> SessionState {
        let session = SessionState::new();
        session.login("tok", None);
        session
    }

    #[test]
    fn test_requires_session() {
        let doc = DocumentState::new(DocumentKind::Invoice);
        doc.replace(valid_invoice(), None);
        let err = prepare_submission(&doc, &SessionState::new(), &ConfigState::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_new_invoice_is_posted() {
        let doc = DocumentState::new(DocumentKind::Invoice);
        doc.replace(valid_invoice(), None);

        let req = prepare_submission(&doc, &logged_in(), &ConfigState::default()).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "http://localhost:8000/api/invoices");
        assert_eq!(req.authorization, "Bearer tok");
        assert_eq!(req.body["client_id"], 3);
        assert_eq!(req.body["status"], "draft");
        assert_eq!(req.body["items"][0]["discount"], 10.0);
        assert!(req.body.get("grand_total").is_none());
    }

    #[test]
    fn test_loaded_document_is_put() {
        let doc = DocumentState::new(DocumentKind::Invoice);
        doc.replace(valid_invoice(), Some(17));

        let req = prepare_submission(&doc, &logged_in(), &ConfigState::default()).unwrap();
        assert_eq!(req.method, Method::Put);
        assert!(req.url.ends_with("/invoices/17"));
    }

    #[test]
    fn test_blank_form_reports_all_fields() {
        let doc = DocumentState::new(DocumentKind::Invoice);
        let err = prepare_submission(&doc, &logged_in(), &ConfigState::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields: Vec<_> = err.fields.iter().filter_map(|f| f.field.as_deref()).collect();
        assert_eq!(
            fields,
            vec!["client_id", "currency_id", "due_date", "items[0].description"]
        );
    }

    #[test]
    fn test_strict_discount_check_is_configurable() {
        let mut document = valid_invoice();
        document.items.replace_all(vec![
            LineItem::new("Over-discounted", 1.0, 10.0).with_discount(20.0),
        ]);
        let doc = DocumentState::new(DocumentKind::Invoice);
        doc.replace(document, None);

        let strict = ConfigState::default();
        let err = prepare_submission(&doc, &logged_in(), &strict).unwrap_err();
        assert_eq!(err.fields[0].field.as_deref(), Some("items[0].discount"));

        let mut exact = valid_invoice();
        exact.items.replace_all(vec![
            LineItem::new("Widgets", 3.0, 0.7).with_discount(2.1),
        ]);
        doc.replace(exact, None);
        assert!(prepare_submission(&doc, &logged_in(), &strict).is_ok());

        let lenient = ConfigState {
            strict_discounts: false,
            ..ConfigState::default()
        };
        assert!(prepare_submission(&doc, &logged_in(), &lenient).is_ok());
    }
}
