//! imcmd - Slash-command registry and dispatcher for instant-messaging
//! conversations.
//!
//! Plugins and protocol backends register named commands with an argument
//! format, a priority and applicability flags. When a user types
//! `/name args` in a conversation, the dispatcher picks the registered
//! commands with that name, checks the conversation kind and protocol,
//! splits the arguments and runs the handlers in priority order.
//!
//! # Modules
//!
//! - [`commands`] - Registration, argument parsing, dispatch, listing and help
//! - [`conversation`] - The conversation trait handlers act upon
//! - [`markup`] - Visible-character aware markup helpers
//! - [`config`] - Configuration of the console host
//! - [`console`] - Terminal host with the built-in commands

pub mod commands;
pub mod config;
pub mod console;
pub mod conversation;
pub mod markup;
