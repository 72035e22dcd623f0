//! # Commands Module
//!
//! Everything the invoice, quote and quote template screens call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── document.rs  ◄─── Line editing, templates, totals
//! ├── submit.rs    ◄─── Outbound create/update request
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the document
//! fn add_line(doc: &DocumentState, config: &ConfigState)
//!
//! // Needs document, session and config
//! fn prepare_submission(doc: &DocumentState, session: &SessionState, config: &ConfigState)
//! ```

pub mod config;
pub mod document;
pub mod submit;
