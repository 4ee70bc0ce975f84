//! Slash-command registration, parsing and dispatch.
//!
//! This module provides the complete command pipeline used by conversation
//! windows, protocol plugins and scripting bridges.
//!
//! # Overview
//!
//! 1. **Registration** - Plugins describe commands with a [`CommandBuilder`]
//!    and add them to a [`CommandRegistry`], which keeps them sorted by
//!    descending priority
//! 2. **Parsing** - The argument part of a command line is split according to
//!    the command's argument format (see [`args`])
//! 3. **Dispatch** - Every command registered under the typed name is tried
//!    in priority order until one handler accepts or rejects the line
//! 4. **Listing** - [`CommandRegistry::list`] and [`CommandRegistry::help`]
//!    describe what is available in a conversation
//!
//! # Architecture
//!
//! ```text
//! "/nick <b>bob</b>"
//!      │
//!      ▼
//! ┌──────────────────┐   same name, priority order
//! │ CommandRegistry  │ ─────────────────────────────┐
//! │   ::dispatch()   │                              ▼
//! └──────────────────┘                 ┌────────────────────────┐
//!      │                               │ type / prpl check      │
//!      │                               │ args::parse_args       │
//!      │                               │ handler(CommandContext)│
//!      │                               └────────────────────────┘
//!      │                                        │ Ok / Failed / Continue
//!      ▼                                        ▼
//! CommandStatus ◄──────────────────── Continue tries the next one
//! ```
//!
//! # Examples
//!
//! ```
//! use imcmd::commands::{
//!     CommandBuilder, CommandFlags, CommandRegistry, CommandReturn, CommandStatus,
//! };
//! use imcmd::conversation::{ConversationKind, MockConversation};
//!
//! let mut registry = CommandRegistry::new();
//! registry
//!     .register(
//!         CommandBuilder::new("shout")
//!             .arg_format("s")
//!             .flags(CommandFlags::IM | CommandFlags::CHAT)
//!             .help("shout &lt;text&gt;: Send a message in capitals.")
//!             .handler(|ctx| {
//!                 let text = ctx.args.get(0).unwrap_or_default().to_uppercase();
//!                 ctx.conversation.send(&text);
//!                 CommandReturn::Ok
//!             }),
//!     )
//!     .unwrap();
//!
//! let mut conversation = MockConversation::new();
//! conversation.expect_kind().return_const(ConversationKind::Im);
//! conversation.expect_protocol_id().return_const(None::<String>);
//! conversation.expect_send().withf(|m| m == "HELLO").times(1).return_const(());
//!
//! let status = registry.dispatch(&mut conversation, "shout hello", "shout hello");
//! assert_eq!(status, CommandStatus::Ok);
//! ```
//!
//! # Module Organization
//!
//! - [`registry`] - Priority-ordered storage, listing and help
//! - [`dispatch`] - Command line dispatch
//! - [`command`] - Registered commands and their builder
//! - [`args`] - Argument formats and parsing
//! - [`flags`] - Applicability flags and priority levels

pub mod args;
pub mod command;
pub mod dispatch;
pub mod flags;
pub mod registry;

pub use crate::commands::{
    args::{ArgKind, Args},
    command::{Command, CommandBuilder, CommandId, Handler, RegisterError},
    flags::{CommandFlags, priority},
    registry::CommandRegistry,
};
use crate::conversation::Conversation;

/// Everything a handler gets to work with.
///
/// # Fields
///
/// * `conversation` - The conversation the command was typed in
/// * `registry` - The registry dispatching the command, for listing or help
/// * `command` - The command word as typed
/// * `args` - Arguments parsed according to the command's format
pub struct CommandContext<'a> {
    /// Conversation the command was typed in
    pub conversation: &'a mut dyn Conversation,
    /// Registry running the dispatch
    pub registry: &'a CommandRegistry,
    /// Command word as typed
    pub command: &'a str,
    /// Parsed arguments
    pub args: Args,
}

/// What a handler reports back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReturn {
    /// Handled; stop looking.
    Ok,
    /// Handled and failed; stop looking and surface the message.
    Failed(Option<String>),
    /// Declined; try the next command registered under the same name.
    Continue,
}

impl CommandReturn {
    /// Shorthand for a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        CommandReturn::Failed(Some(message.into()))
    }
}

/// Outcome of [`CommandRegistry::dispatch`].
///
/// Only [`CommandStatus::Failed`] carries a message, and only when the
/// handler that failed supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// A handler ran and succeeded.
    Ok,
    /// A handler ran and failed, or the conversation cannot run commands.
    Failed(Option<String>),
    /// No command with that name, or every candidate declined.
    NotFound,
    /// Candidates exist but none accepted the arguments.
    WrongArgs,
    /// Candidates exist but none is available on this protocol.
    WrongPrpl,
    /// Candidates exist but none runs in this kind of conversation.
    WrongType,
}

impl CommandStatus {
    /// Error message of a failed command, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            CommandStatus::Failed(message) => message.as_deref(),
            _ => None,
        }
    }
}
