//! Registered commands and their builder.

use std::fmt;

use thiserror::Error;

use crate::{
    commands::{
        CommandContext, CommandReturn,
        args::{self, ArgKind},
        flags::{CommandFlags, priority},
    },
    conversation::ConversationKind,
};

/// Callback run when a command is dispatched.
///
/// Whatever state the handler needs is captured by the closure.
pub type Handler = Box<dyn Fn(&mut CommandContext<'_>) -> CommandReturn + Send + Sync>;

/// Unique handle of a registered command.
///
/// Ids start at 1 and are never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) u32);

impl CommandId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reasons a registration is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("command name is empty")]
    EmptyName,
    #[error("command name {0:?} contains whitespace")]
    InvalidName(String),
    #[error("command {0:?} has no argument format")]
    MissingArgFormat(String),
    #[error("command {name:?} has an unknown argument kind {kind:?}")]
    InvalidArgFormat { name: String, kind: char },
    #[error("command {0:?} has no handler")]
    MissingHandler(String),
}

/// A command entry stored in the registry.
pub struct Command {
    pub(crate) id: CommandId,
    pub(crate) name: String,
    pub(crate) format: Vec<ArgKind>,
    pub(crate) priority: i32,
    pub(crate) flags: CommandFlags,
    pub(crate) protocol_id: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) handler: Handler,
}

/// Result of checking a command against a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Applicability {
    Applies,
    WrongType,
    WrongPrpl,
}

impl Command {
    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument format as it was registered, e.g. `"ws"`.
    pub fn arg_format(&self) -> String {
        self.format.iter().map(|kind| kind.as_char()).collect()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    pub fn protocol_id(&self) -> Option<&str> {
        self.protocol_id.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Checks the conversation kind first, then the protocol restriction.
    ///
    /// Kinds other than IM and chat pass the type check; dispatch rejects
    /// them before getting here.
    pub(crate) fn applicability(
        &self,
        kind: ConversationKind,
        protocol_id: Option<&str>,
    ) -> Applicability {
        let right_type = match kind {
            ConversationKind::Im => self.flags.applies_to_im(),
            ConversationKind::Chat => self.flags.applies_to_chat(),
            ConversationKind::Misc => true,
        };
        if !right_type {
            return Applicability::WrongType;
        }

        if self.flags.is_prpl_restricted() {
            if let Some(required) = self.protocol_id.as_deref() {
                if protocol_id != Some(required) {
                    return Applicability::WrongPrpl;
                }
            }
        }

        Applicability::Applies
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("format", &self.arg_format())
            .field("priority", &self.priority)
            .field("flags", &self.flags)
            .field("protocol_id", &self.protocol_id)
            .finish_non_exhaustive()
    }
}

/// Describes a command to register.
///
/// The name, the argument format and the handler are required; everything
/// else has a default (priority [`priority::DEFAULT`], no flags, no protocol
/// restriction, no help).
///
/// # Examples
///
/// ```
/// use imcmd::commands::{CommandBuilder, CommandFlags, CommandReturn, priority};
///
/// let builder = CommandBuilder::new("nick")
///     .arg_format("s")
///     .priority(priority::PRPL)
///     .flags(CommandFlags::CHAT | CommandFlags::PRPL_ONLY)
///     .protocol_id("prpl-jabber")
///     .help("nick &lt;new nickname&gt;:  Change your nickname.")
///     .handler(|_ctx| CommandReturn::Ok);
/// ```
pub struct CommandBuilder {
    name: String,
    arg_format: Option<String>,
    priority: i32,
    flags: CommandFlags,
    protocol_id: Option<String>,
    help: Option<String>,
    handler: Option<Handler>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        CommandBuilder {
            name: name.into(),
            arg_format: None,
            priority: priority::DEFAULT,
            flags: CommandFlags::empty(),
            protocol_id: None,
            help: None,
            handler: None,
        }
    }

    /// Argument format, one character per argument. Use `""` for none.
    pub fn arg_format(mut self, format: impl Into<String>) -> Self {
        self.arg_format = Some(format.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn flags(mut self, flags: CommandFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Protocol the command is restricted to when [`CommandFlags::PRPL_ONLY`] is set.
    pub fn protocol_id(mut self, protocol_id: impl Into<String>) -> Self {
        self.protocol_id = Some(protocol_id.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> CommandReturn + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Validates the description and turns it into a command with `id`.
    pub(crate) fn build(self, id: CommandId) -> Result<Command, RegisterError> {
        if self.name.is_empty() {
            return Err(RegisterError::EmptyName);
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(RegisterError::InvalidName(self.name));
        }

        let Some(arg_format) = self.arg_format else {
            return Err(RegisterError::MissingArgFormat(self.name));
        };
        let format = match args::parse_format(&arg_format) {
            Ok(format) => format,
            Err(kind) => {
                return Err(RegisterError::InvalidArgFormat {
                    name: self.name,
                    kind,
                });
            }
        };

        let Some(handler) = self.handler else {
            return Err(RegisterError::MissingHandler(self.name));
        };

        Ok(Command {
            id,
            name: self.name,
            format,
            priority: self.priority,
            flags: self.flags,
            protocol_id: self.protocol_id,
            help: self.help,
            handler,
        })
    }
}
