//! # State Module
//!
//! Separate state types, each handed only to the commands that need it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │  DocumentState   │  │  SessionState    │  │   ConfigState    │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  Arc<Mutex<      │  │  Arc<Mutex<      │  │  api_base_url    │      │
//! │  │    Document      │  │    Session       │  │  currency        │      │
//! │  │  >>              │  │  >>              │  │  strict discounts│      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  • DocumentState: one writer at a time, every command is short         │
//! │  • SessionState: set on login, cleared on logout                       │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod document;
mod session;

pub use config::ConfigState;
pub use document::DocumentState;
pub use session::SessionState;
