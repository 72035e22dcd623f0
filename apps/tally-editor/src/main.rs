//! # Tally Editor Entry Point
//!
//! Prints the totals of a document JSON file:
//!
//! ```text
//! $ tally-editor invoice.json
//! { "kind": "invoice", ..., "totals": { "subtotal": 110.0, ... },
//!   "display": { "grand_total": "$110.00", ... } }
//! ```
//!
//! Exit codes: 0 on success, 1 if the document cannot be read or parsed,
//! 2 on bad usage.

use std::path::PathBuf;
use std::process::ExitCode;

use tally_editor::commands::document::get_document;
use tally_editor::state::{ConfigState, DocumentState};
use tracing::{error, info};

fn main() -> ExitCode {
    tally_editor::init_tracing();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: tally-editor <document.json>");
        return ExitCode::from(2);
    };

    let config = ConfigState::from_env();
    info!(path = %path.display(), "Computing document totals");

    let document = match tally_editor::load_document_file(&path) {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "Could not load document");
            return ExitCode::FAILURE;
        }
    };

    let state = DocumentState::new(document.kind());
    state.replace(document, None);
    let response = get_document(&state, &config);

    match serde_json::to_string_pretty(&response) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Could not serialize totals");
            ExitCode::FAILURE
        }
    }
}
