//! Terminal host for the command engine.
//!
//! The console opens a single conversation and reads lines from standard
//! input, the way a chat window reads its entry box.
//!
//! # Architecture
//!
//! ```text
//!  stdin ──► repl::run ──► repl::handle_line ──► CommandRegistry::dispatch
//!                │                 │                      │
//!                │                 └── send ──────┐       ▼
//!                │                                ▼  builtins (say, me, ...)
//!                │                      ConsoleConversation
//!                ◄──────── take_pending ──────────┘
//!  stdout ◄──────┘
//! ```
//!
//! # Module Organization
//!
//! - [`conversation`] - In-memory conversation and its scrollback
//! - [`builtins`] - Commands registered by the host
//! - [`repl`] - Line handling and the input loop
//! - [`responses`] - Notices and help texts

pub mod builtins;
pub mod conversation;
pub mod repl;
pub mod responses;

pub use crate::console::conversation::{ConsoleConversation, ConsoleEntry};
