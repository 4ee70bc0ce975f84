//! Response texts written by the console host.
//!
//! All texts are markup, so literal angle brackets are written as entities.

use crate::{commands::CommandStatus, conversation::ConversationKind, markup};

/// Formats the notice shown after a dispatch.
///
/// # Arguments
///
/// * `status` - Outcome of the dispatch
/// * `kind` - Kind of the conversation the command was typed in
///
/// # Returns
///
/// `None` for [`CommandStatus::Ok`], the notice to write otherwise.
///
/// # Examples
///
/// ```
/// use imcmd::commands::CommandStatus;
/// use imcmd::console::responses::format_status;
/// use imcmd::conversation::ConversationKind;
///
/// assert_eq!(format_status(&CommandStatus::Ok, ConversationKind::Im), None);
/// assert_eq!(
///     format_status(&CommandStatus::NotFound, ConversationKind::Im).as_deref(),
///     Some("No such command.")
/// );
/// ```
pub fn format_status(status: &CommandStatus, kind: ConversationKind) -> Option<String> {
    let text = match status {
        CommandStatus::Ok => return None,
        CommandStatus::NotFound => "No such command.".to_owned(),
        CommandStatus::WrongArgs => {
            "Syntax Error:  You typed the wrong number of arguments to that command.".to_owned()
        }
        CommandStatus::Failed(message) => message
            .clone()
            .unwrap_or_else(|| "Your command failed for an unknown reason.".to_owned()),
        CommandStatus::WrongType => match kind {
            ConversationKind::Im => "That command only works in chats, not IMs.".to_owned(),
            _ => "That command only works in IMs, not chats.".to_owned(),
        },
        CommandStatus::WrongPrpl => "That command doesn't work on this protocol.".to_owned(),
    };

    Some(text)
}

/// Formats the help texts of one command, one per line.
pub fn format_command_help(texts: &[String]) -> String {
    if texts.is_empty() {
        return "No such command (in this context).".to_owned();
    }

    texts.join("\n")
}

/// Formats the list of commands available in a conversation.
///
/// # Examples
///
/// ```
/// use imcmd::console::responses::format_command_list;
///
/// let list = format_command_list(&["help".to_owned(), "me".to_owned()]);
/// assert!(list.ends_with("available in this context:\nhelp, me."));
/// ```
pub fn format_command_list(names: &[String]) -> String {
    let mut text = "Use \"/help &lt;command&gt;\" for help on a specific command.\n\
                    The following commands are available in this context:\n"
        .to_owned();

    if !names.is_empty() {
        text.push_str(&names.join(", "));
        text.push('.');
    }

    text
}

/// Formats the answer to `/debug version`, escaped for sending.
pub fn format_version() -> String {
    markup::escape_text(&format!(
        "Using imcmd v{}.",
        env!("CARGO_PKG_VERSION")
    ))
}

pub fn format_debug_options() -> String {
    "Supported debug options are: version".to_owned()
}
