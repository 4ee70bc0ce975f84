//! Conversation abstraction consumed by the command engine.
//!
//! The engine never owns a conversation. It only reads the conversation kind
//! and the protocol of the account behind it to decide which commands apply,
//! then hands the conversation to the matching handler.

use mockall::automock;

/// Kind of an open conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// One-to-one instant messaging.
    Im,
    /// Multi-user chat room.
    Chat,
    /// Anything else (debug windows, system notices). Commands never run here.
    Misc,
}

/// An open IM or chat session, as seen by command handlers.
///
/// Implemented by the host UI. Message bodies are markup.
#[automock]
pub trait Conversation {
    /// Kind of the conversation.
    fn kind(&self) -> ConversationKind;
    /// Protocol id of the account used by the conversation, e.g. `prpl-jabber`.
    fn protocol_id(&self) -> Option<String>;
    /// Name of the buddy or room on the other side.
    fn name(&self) -> String;
    /// Sends a message to the other side.
    fn send(&mut self, message: &str);
    /// Writes a local, unlogged notice into the conversation.
    fn write_system(&mut self, message: &str);
    /// Clears the conversation scrollback.
    fn clear_history(&mut self);
}
