//! Command line dispatch.
//!
//! This module implements [`CommandRegistry::dispatch`], which takes a command
//! line typed in a conversation (without the leading `/`) and runs it.
//!
//! # Flow
//!
//! ```text
//! "nick bob" ─► split word / rest ─► strip word from markup
//!                                           │
//!          ┌────────────────────────────────┘
//!          ▼
//!   for each command named "nick", highest priority first:
//!     wrong conversation type?  skip
//!     wrong protocol?           skip
//!     arguments don't parse?    skip
//!     run handler ─► Continue: next candidate
//!                 ─► Ok / Failed: stop
//! ```

use log::{debug, warn};

use crate::{
    commands::{
        CommandContext, CommandReturn, CommandStatus, args::parse_args, command::Applicability,
        registry::CommandRegistry,
    },
    conversation::{Conversation, ConversationKind},
    markup,
};

impl CommandRegistry {
    /// Runs a command line in `conversation`.
    ///
    /// `line` is the plain text after the command character and `markup` is
    /// the markup rendition of the same text. Candidates sharing the typed
    /// name are tried in priority order; a handler returning
    /// [`CommandReturn::Continue`] passes the line on to the next one.
    ///
    /// # Returns
    ///
    /// - [`CommandStatus::NotFound`] - nothing is registered under that name,
    ///   or every handler that ran returned `Continue`
    /// - [`CommandStatus::WrongType`] - no candidate runs in this kind of
    ///   conversation
    /// - [`CommandStatus::WrongPrpl`] - no candidate runs on this protocol
    /// - [`CommandStatus::WrongArgs`] - no candidate accepted the arguments
    /// - [`CommandStatus::Ok`] / [`CommandStatus::Failed`] - what the last
    ///   handler returned
    ///
    /// Conversations that are neither IM nor chat get
    /// `CommandStatus::Failed(None)` without any lookup.
    pub fn dispatch(
        &self,
        conversation: &mut dyn Conversation,
        line: &str,
        markup: &str,
    ) -> CommandStatus {
        let kind = conversation.kind();
        if !matches!(kind, ConversationKind::Im | ConversationKind::Chat) {
            debug!("commands are not available in {:?} conversations", kind);
            return CommandStatus::Failed(None);
        }

        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let markup_rest = markup::strip_command(markup).unwrap_or_else(|e| {
            warn!("malformed command markup {:?}: {}, using plain text", markup, e);
            markup::escape_text(rest)
        });
        let protocol_id = conversation.protocol_id();

        debug!(
            "dispatching {:?} with {:?} in {:?} conversation on {:?}",
            word, rest, kind, protocol_id
        );

        let mut found = false;
        let mut right_type = false;
        let mut right_prpl = false;
        let mut last_return = None;

        for command in self.iter().filter(|c| c.name() == word) {
            found = true;

            match command.applicability(kind, protocol_id.as_deref()) {
                Applicability::WrongType => continue,
                Applicability::WrongPrpl => {
                    right_type = true;
                    continue;
                }
                Applicability::Applies => {
                    right_type = true;
                    right_prpl = true;
                }
            }

            let Some(args) = parse_args(
                &command.format,
                command.flags().tolerates_wrong_args(),
                rest,
                &markup_rest,
            ) else {
                continue;
            };

            let mut context = CommandContext {
                conversation: &mut *conversation,
                registry: self,
                command: word,
                args,
            };
            let result = (command.handler)(&mut context);
            debug!("command {} {:?} returned {:?}", command.id(), word, result);

            let stop = result != CommandReturn::Continue;
            last_return = Some(result);
            if stop {
                break;
            }
        }

        if !found {
            return CommandStatus::NotFound;
        }
        if !right_type {
            return CommandStatus::WrongType;
        }
        if !right_prpl {
            return CommandStatus::WrongPrpl;
        }

        match last_return {
            None => CommandStatus::WrongArgs,
            Some(CommandReturn::Ok) => CommandStatus::Ok,
            Some(CommandReturn::Failed(message)) => CommandStatus::Failed(message),
            // Every candidate declined
            Some(CommandReturn::Continue) => CommandStatus::NotFound,
        }
    }
}
