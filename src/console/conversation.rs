//! In-memory conversation backing the console host.

use std::fmt;

use log::debug;

use crate::{
    conversation::{Conversation, ConversationKind},
    markup,
};

/// One line of the console scrollback. Bodies are markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEntry {
    /// A message sent by the local account.
    Message { sender: String, markup: String },
    /// A local notice, never sent to the other side.
    System(String),
}

impl fmt::Display for ConsoleEntry {
    /// Renders the entry as terminal text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleEntry::Message { sender, markup } => match markup.strip_prefix("/me ") {
                Some(action) => write!(f, "*** {} {}", sender, markup::to_plain(action)),
                None => write!(f, "{}: {}", sender, markup::to_plain(markup)),
            },
            ConsoleEntry::System(markup) => write!(f, "{}", markup::to_plain(markup)),
        }
    }
}

/// Conversation shown in the terminal.
///
/// Everything sent or written lands in the scrollback and in a pending queue
/// that the host drains with [`ConsoleConversation::take_pending`] to print.
#[derive(Debug, Clone)]
pub struct ConsoleConversation {
    kind: ConversationKind,
    name: String,
    account: String,
    protocol_id: Option<String>,
    scrollback: Vec<ConsoleEntry>,
    pending: Vec<ConsoleEntry>,
}

impl ConsoleConversation {
    pub fn new(
        kind: ConversationKind,
        name: impl Into<String>,
        account: impl Into<String>,
        protocol_id: Option<String>,
    ) -> Self {
        ConsoleConversation {
            kind,
            name: name.into(),
            account: account.into(),
            protocol_id,
            scrollback: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Every entry since the last clear, oldest first.
    pub fn scrollback(&self) -> &[ConsoleEntry] {
        &self.scrollback
    }

    /// Drains the entries added since the previous call.
    pub fn take_pending(&mut self) -> Vec<ConsoleEntry> {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, entry: ConsoleEntry) {
        self.scrollback.push(entry.clone());
        self.pending.push(entry);
    }
}

impl Conversation for ConsoleConversation {
    fn kind(&self) -> ConversationKind {
        self.kind
    }

    fn protocol_id(&self) -> Option<String> {
        self.protocol_id.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn send(&mut self, message: &str) {
        debug!("sending {:?} to {}", message, self.name);
        let sender = self.account.clone();
        self.push(ConsoleEntry::Message {
            sender,
            markup: message.to_owned(),
        });
    }

    fn write_system(&mut self, message: &str) {
        self.push(ConsoleEntry::System(message.to_owned()));
    }

    fn clear_history(&mut self) {
        debug!("clearing scrollback of {}", self.name);
        self.scrollback.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> ConsoleConversation {
        ConsoleConversation::new(
            ConversationKind::Chat,
            "room@conference",
            "alice",
            Some("prpl-jabber".to_owned()),
        )
    }

    #[test]
    fn test_accessors() {
        let conversation = conversation();
        assert_eq!(conversation.kind(), ConversationKind::Chat);
        assert_eq!(conversation.name(), "room@conference");
        assert_eq!(conversation.protocol_id().as_deref(), Some("prpl-jabber"));
        assert_eq!(conversation.account(), "alice");
    }

    #[test]
    fn test_take_pending_drains() {
        let mut conversation = conversation();
        conversation.send("hello");
        conversation.write_system("notice");

        let pending = conversation.take_pending();
        assert_eq!(pending.len(), 2);
        assert!(conversation.take_pending().is_empty());
        assert_eq!(conversation.scrollback().len(), 2);
    }

    #[test]
    fn test_clear_history() {
        let mut conversation = conversation();
        conversation.send("hello");
        conversation.clear_history();

        assert!(conversation.scrollback().is_empty());
        assert!(conversation.take_pending().is_empty());
    }

    #[test]
    fn test_render_entries() {
        let message = ConsoleEntry::Message {
            sender: "alice".to_owned(),
            markup: "<b>a &lt; b</b>".to_owned(),
        };
        assert_eq!(message.to_string(), "alice: a < b");

        let action = ConsoleEntry::Message {
            sender: "alice".to_owned(),
            markup: "/me waves".to_owned(),
        };
        assert_eq!(action.to_string(), "*** alice waves");

        let notice = ConsoleEntry::System("No such command.".to_owned());
        assert_eq!(notice.to_string(), "No such command.");
    }
}
