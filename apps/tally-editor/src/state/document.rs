//! # Document State
//!
//! The document currently open in an editing screen.
//!
//! Commands may run from different threads, so the document sits behind
//! `Arc<Mutex<_>>`. Every operation is a short, synchronous edit followed by
//! a totals recompute, so a plain mutex is enough.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::document::Document;
use tally_core::DocumentKind;

/// Shared handle to the document being edited.
#[derive(Debug, Clone)]
pub struct DocumentState {
    document: Arc<Mutex<Document>>,
    /// Backend id when editing an existing document.
    editing_id: Arc<Mutex<Option<i64>>>,
}

impl DocumentState {
    /// Opens a new document of `kind`.
    pub fn new(kind: DocumentKind) -> Self {
        DocumentState {
            document: Arc::new(Mutex::new(Document::new(kind))),
            editing_id: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs `f` with read access to the document.
    pub fn with_document<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Document) -> R,
    {
        f(&self.lock())
    }

    /// Runs `f` with write access to the document.
    pub fn with_document_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Document) -> R,
    {
        f(&mut self.lock())
    }

    /// Swaps in a different document, e.g. one loaded for editing.
    pub fn replace(&self, document: Document, editing_id: Option<i64>) {
        *self.lock() = document;
        *self
            .editing_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = editing_id;
    }

    /// Id of the saved document being edited, `None` for a new one.
    pub fn editing_id(&self) -> Option<i64> {
        *self
            .editing_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Poisoning is ignored: every completed edit leaves a valid document.
    fn lock(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        DocumentState::new(DocumentKind::Invoice)
    }
}
