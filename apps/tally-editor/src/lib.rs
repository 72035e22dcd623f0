//! # Tally Editor Library
//!
//! The layer the invoice, quote and quote template screens talk to.
//!
//! ## Module Organization
//! ```text
//! tally_editor/
//! ├── lib.rs          ◄─── You are here (tracing setup, file loading)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── document.rs ◄─── Document being edited
//! │   ├── session.rs  ◄─── Explicit session
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── document.rs ◄─── Line editing and totals
//! │   ├── submit.rs   ◄─── Create/update request building
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::Path;

use tally_core::document::Document;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use error::ApiError;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_editor=trace` - Show trace for this crate only
/// - Default: INFO, DEBUG for tally crates
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_editor=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses a document from its JSON text.
pub fn parse_document(json: &str) -> Result<Document, ApiError> {
    let document: Document = serde_json::from_str(json)?;
    debug!(kind = %document.kind(), lines = document.items.len(), "Document parsed");
    Ok(document)
}

/// Reads and parses a document JSON file.
pub fn load_document_file(path: &Path) -> Result<Document, ApiError> {
    let json = std::fs::read_to_string(path)?;
    parse_document(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_document() {
        let doc = parse_document(
            r#"{"kind":"quote_template","name":"Retainer","currency_id":1,
                "items":[{"description":"Support","quantity":1,"unit_price":400}]}"#,
        )
        .unwrap();
        assert_eq!(doc.totals().grand_total, 400.0);
    }

    #[test]
    fn test_parse_document_unknown_kind() {
        let err = parse_document(r#"{"kind":"receipt"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_missing_file() {
        let err = load_document_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
