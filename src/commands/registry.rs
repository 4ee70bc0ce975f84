//! Priority-ordered command storage.
//!
//! This module provides the [`CommandRegistry`], the one object the host
//! application creates and shares with everything that registers or runs
//! commands.

use log::debug;

use crate::{
    commands::command::{Applicability, Command, CommandBuilder, CommandId, RegisterError},
    conversation::Conversation,
};

/// Registry of slash-commands.
///
/// Commands are kept sorted by descending priority. Commands with the same
/// priority stay in registration order, so dispatch order is deterministic.
/// Several commands may share a name; dispatch tries all of them.
///
/// # Thread Safety
///
/// The registry has no internal locking. Handlers are `Send + Sync`, so a
/// multi-threaded host can keep the registry behind a single `Mutex`.
///
/// # Examples
///
/// ```
/// use imcmd::commands::{CommandBuilder, CommandFlags, CommandRegistry, CommandReturn};
///
/// let mut registry = CommandRegistry::new();
/// let id = registry
///     .register(
///         CommandBuilder::new("clear")
///             .arg_format("")
///             .flags(CommandFlags::IM | CommandFlags::CHAT)
///             .handler(|ctx| {
///                 ctx.conversation.clear_history();
///                 CommandReturn::Ok
///             }),
///     )
///     .unwrap();
///
/// assert_eq!(registry.list(None), vec!["clear"]);
/// assert!(registry.unregister(id));
/// assert!(registry.is_empty());
/// ```
pub struct CommandRegistry {
    /// Registered commands, highest priority first
    commands: Vec<Command>,
    /// Id handed to the next registered command
    next_id: u32,
}

impl CommandRegistry {
    /// Creates an empty registry. The first registered command gets id 1.
    pub fn new() -> Self {
        CommandRegistry {
            commands: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a command and returns its id.
    ///
    /// The command is placed after every command of higher or equal
    /// priority.
    ///
    /// # Errors
    ///
    /// Returns a [`RegisterError`] when the name is empty or contains
    /// whitespace, when the argument format is missing or contains an
    /// unknown kind, or when there is no handler. The registry is left
    /// unchanged and no id is consumed.
    pub fn register(&mut self, builder: CommandBuilder) -> Result<CommandId, RegisterError> {
        let command = builder.build(CommandId(self.next_id))?;
        self.next_id += 1;

        let id = command.id;
        let index = self
            .commands
            .partition_point(|c| c.priority >= command.priority);

        debug!(
            "registering command {} {:?} ({:?}, priority {}) at position {}",
            id,
            command.name,
            command.arg_format(),
            command.priority,
            index
        );

        self.commands.insert(index, command);

        Ok(id)
    }

    /// Removes the command with `id`.
    ///
    /// Returns `false`, and does nothing else, when no such command exists.
    pub fn unregister(&mut self, id: CommandId) -> bool {
        let Some(index) = self.commands.iter().position(|c| c.id == id) else {
            debug!("unregister of unknown command {}", id);
            return false;
        };

        let command = self.commands.remove(index);
        debug!("unregistered command {} {:?}", id, command.name);

        true
    }

    /// Looks up a command by id.
    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Registered commands in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Names of the commands available in `conversation`, sorted.
    ///
    /// Without a conversation every command is listed. Names registered
    /// several times are listed several times.
    pub fn list(&self, conversation: Option<&dyn Conversation>) -> Vec<String> {
        let mut names: Vec<String> = self
            .available(conversation)
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Help texts of the commands available in `conversation`, sorted.
    ///
    /// With a `name`, only commands registered under that exact name are
    /// considered. Commands registered without help text are skipped.
    pub fn help(&self, conversation: Option<&dyn Conversation>, name: Option<&str>) -> Vec<String> {
        let mut texts: Vec<String> = self
            .available(conversation)
            .filter(|c| name.is_none_or(|name| c.name == name))
            .filter_map(|c| c.help.clone())
            .collect();
        texts.sort();
        texts
    }

    fn available<'a>(
        &'a self,
        conversation: Option<&dyn Conversation>,
    ) -> impl Iterator<Item = &'a Command> {
        let context = conversation.map(|conv| (conv.kind(), conv.protocol_id()));

        self.commands.iter().filter(move |c| match &context {
            Some((kind, protocol_id)) => {
                c.applicability(*kind, protocol_id.as_deref()) == Applicability::Applies
            }
            None => true,
        })
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
