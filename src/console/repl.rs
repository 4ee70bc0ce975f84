//! Input loop of the console host.
//!
//! Each input line is either a command or a message:
//!
//! ```text
//! "/nick bob"   ─► dispatch "nick bob", notice on failure
//! "//etc/hosts" ─► send "/etc/hosts"
//! "hello"       ─► send "hello"
//! ```
//!
//! Plain input is escaped into markup before being dispatched or sent.

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    commands::{CommandRegistry, CommandStatus},
    console::{ConsoleConversation, responses},
    conversation::Conversation,
    markup,
};

/// Handles one input line typed in `conversation`.
///
/// # Returns
///
/// The dispatch status when the line was a command, `None` when it was sent
/// as a message or ignored.
pub fn handle_line(
    registry: &CommandRegistry,
    conversation: &mut dyn Conversation,
    line: &str,
) -> Option<CommandStatus> {
    if line.is_empty() {
        return None;
    }

    match line.strip_prefix('/') {
        Some(command_line) if !command_line.starts_with('/') => {
            let escaped = markup::escape_text(command_line);
            let status = registry.dispatch(conversation, command_line, &escaped);

            if let Some(notice) = responses::format_status(&status, conversation.kind()) {
                conversation.write_system(&notice);
            }
            Some(status)
        }
        // "//text" sends "/text"
        Some(message) => {
            conversation.send(&markup::escape_text(message));
            None
        }
        None => {
            conversation.send(&markup::escape_text(line));
            None
        }
    }
}

/// Runs the console until `reader` reaches end of input.
///
/// # Arguments
///
/// * `registry` - Commands available in the conversation
/// * `conversation` - The conversation input goes to
/// * `prompt` - Written before each input line
/// * `reader` - Input lines, usually stdin
/// * `writer` - Rendered conversation output, usually stdout
pub async fn run<R, W>(
    registry: &CommandRegistry,
    conversation: &mut ConsoleConversation,
    prompt: &str,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(
        "Console open with {} as {}",
        conversation.name(),
        conversation.account()
    );

    let mut lines = reader.lines();
    writer.write_all(prompt.as_bytes()).await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if let Some(status) = handle_line(registry, conversation, line.trim_end_matches('\r')) {
            debug!("{:?} -> {:?}", line, status);
        }

        for entry in conversation.take_pending() {
            writer.write_all(format!("{}\n", entry).as_bytes()).await?;
        }
        writer.write_all(prompt.as_bytes()).await?;
        writer.flush().await?;
    }

    info!("End of input, closing console");
    Ok(())
}
