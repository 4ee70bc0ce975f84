//! Commands every console conversation understands.
//!
//! | Command | Format | Action |
//! |---------|--------|--------|
//! | `/say <message>` | `S` | sends the message as if no command was used |
//! | `/me <action>` | `S` | sends an IRC style action |
//! | `/debug <option>` | `w` | sends debug information (`version`) |
//! | `/clear` | | clears the scrollback |
//! | `/help [command]` | `w` | lists commands or shows help on one |

use log::debug;

use crate::{
    commands::{
        CommandBuilder, CommandContext, CommandFlags, CommandId, CommandRegistry, CommandReturn,
        RegisterError, priority,
    },
    console::responses,
};

const EVERYWHERE: CommandFlags = CommandFlags::IM.union(CommandFlags::CHAT);

/// Registers the built-in commands.
///
/// # Returns
///
/// The ids of the registered commands, in registration order.
pub fn register_builtins(registry: &mut CommandRegistry) -> Result<Vec<CommandId>, RegisterError> {
    let builtins = [
        CommandBuilder::new("say")
            .arg_format("S")
            .flags(EVERYWHERE)
            .help("say &lt;message&gt;:  Send a message normally as if you weren't using a command.")
            .handler(say),
        CommandBuilder::new("me")
            .arg_format("S")
            .flags(EVERYWHERE)
            .help("me &lt;action&gt;:  Send an IRC style action to a buddy or chat.")
            .handler(me),
        CommandBuilder::new("debug")
            .arg_format("w")
            .flags(EVERYWHERE)
            .help("debug &lt;option&gt;:  Send various debug information to the current conversation.")
            .handler(debug_info),
        CommandBuilder::new("clear")
            .arg_format("")
            .flags(EVERYWHERE)
            .help("clear: Clears the conversation scrollback.")
            .handler(clear),
        CommandBuilder::new("help")
            .arg_format("w")
            .flags(EVERYWHERE | CommandFlags::ALLOW_WRONG_ARGS)
            .help("help &lt;command&gt;:  Help on a specific command.")
            .handler(help),
    ];

    let ids = builtins
        .into_iter()
        .map(|builder| registry.register(builder.priority(priority::DEFAULT)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("registered {} built-in commands", ids.len());
    Ok(ids)
}

fn say(ctx: &mut CommandContext<'_>) -> CommandReturn {
    let message = ctx.args.get(0).unwrap_or_default().to_owned();
    ctx.conversation.send(&message);
    CommandReturn::Ok
}

fn me(ctx: &mut CommandContext<'_>) -> CommandReturn {
    let action = format!("/me {}", ctx.args.get(0).unwrap_or_default());
    ctx.conversation.send(&action);
    CommandReturn::Ok
}

fn debug_info(ctx: &mut CommandContext<'_>) -> CommandReturn {
    match ctx.args.get(0) {
        Some(option) if option.eq_ignore_ascii_case("version") => {
            ctx.conversation.send(&responses::format_version());
        }
        _ => ctx
            .conversation
            .write_system(&responses::format_debug_options()),
    }
    CommandReturn::Ok
}

fn clear(ctx: &mut CommandContext<'_>) -> CommandReturn {
    ctx.conversation.clear_history();
    CommandReturn::Ok
}

fn help(ctx: &mut CommandContext<'_>) -> CommandReturn {
    let conversation = Some(&*ctx.conversation);
    let text = match ctx.args.get(0) {
        Some(name) => responses::format_command_help(&ctx.registry.help(conversation, Some(name))),
        None => responses::format_command_list(&ctx.registry.list(conversation)),
    };

    ctx.conversation.write_system(&text);
    CommandReturn::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::CommandStatus,
        console::{ConsoleConversation, ConsoleEntry},
        conversation::{Conversation, ConversationKind},
    };

    fn setup() -> (CommandRegistry, ConsoleConversation) {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry).unwrap();
        let conversation = ConsoleConversation::new(
            ConversationKind::Im,
            "bob",
            "alice",
            Some("prpl-jabber".to_owned()),
        );
        (registry, conversation)
    }

    fn system(text: &str) -> ConsoleEntry {
        ConsoleEntry::System(text.to_owned())
    }

    fn sent(markup: &str) -> ConsoleEntry {
        ConsoleEntry::Message {
            sender: "alice".to_owned(),
            markup: markup.to_owned(),
        }
    }

    #[test]
    fn test_register_builtins() {
        let (registry, _) = setup();
        assert_eq!(
            registry.list(None),
            vec!["clear", "debug", "help", "me", "say"]
        );
        for command in registry.iter() {
            assert_eq!(command.priority(), priority::DEFAULT);
            assert!(command.flags().contains(EVERYWHERE));
        }
    }

    #[test]
    fn test_only_help_tolerates_wrong_args() {
        let (registry, _) = setup();
        let tolerant: Vec<_> = registry
            .iter()
            .filter(|c| c.flags().tolerates_wrong_args())
            .map(|c| c.name())
            .collect();
        assert_eq!(tolerant, vec!["help"]);
    }

    #[test]
    fn test_say_keeps_markup() {
        let (registry, mut conversation) = setup();
        let status = registry.dispatch(&mut conversation, "say hi there", "say <b>hi</b> there");
        assert_eq!(status, CommandStatus::Ok);
        assert_eq!(conversation.take_pending(), vec![sent("<b>hi</b> there")]);
    }

    #[test]
    fn test_me() {
        let (registry, mut conversation) = setup();
        registry.dispatch(&mut conversation, "me waves", "me waves");
        assert_eq!(conversation.take_pending(), vec![sent("/me waves")]);
    }

    #[test]
    fn test_debug_version() {
        let (registry, mut conversation) = setup();
        registry.dispatch(&mut conversation, "debug VERSION", "debug VERSION");
        assert_eq!(
            conversation.take_pending(),
            vec![sent(&responses::format_version())]
        );
    }

    #[test]
    fn test_debug_unknown_option() {
        let (registry, mut conversation) = setup();
        registry.dispatch(&mut conversation, "debug plugins", "debug plugins");
        assert_eq!(
            conversation.take_pending(),
            vec![system("Supported debug options are: version")]
        );
    }

    #[test]
    fn test_debug_without_option_is_wrong_args() {
        let (registry, mut conversation) = setup();
        assert_eq!(
            registry.dispatch(&mut conversation, "debug", "debug"),
            CommandStatus::WrongArgs
        );
    }

    #[test]
    fn test_clear() {
        let (registry, mut conversation) = setup();
        conversation.send("hello");
        registry.dispatch(&mut conversation, "clear", "clear");
        assert!(conversation.scrollback().is_empty());
    }

    #[test]
    fn test_help_lists_commands() {
        let (registry, mut conversation) = setup();
        assert_eq!(registry.dispatch(&mut conversation, "help", "help"), CommandStatus::Ok);
        assert_eq!(
            conversation.take_pending(),
            vec![system(
                "Use \"/help &lt;command&gt;\" for help on a specific command.\n\
                 The following commands are available in this context:\n\
                 clear, debug, help, me, say."
            )]
        );
    }

    #[test]
    fn test_help_on_command() {
        let (registry, mut conversation) = setup();
        registry.dispatch(&mut conversation, "help me", "help me");
        assert_eq!(
            conversation.take_pending(),
            vec![system(
                "me &lt;action&gt;:  Send an IRC style action to a buddy or chat."
            )]
        );
    }

    #[test]
    fn test_help_on_unknown_command() {
        let (registry, mut conversation) = setup();
        registry.dispatch(&mut conversation, "help nope", "help nope");
        assert_eq!(
            conversation.take_pending(),
            vec![system("No such command (in this context).")]
        );
    }

    #[test]
    fn test_help_includes_other_commands() {
        let (mut registry, mut conversation) = setup();
        registry
            .register(
                CommandBuilder::new("topic")
                    .arg_format("s")
                    .flags(CommandFlags::CHAT)
                    .handler(|_| CommandReturn::Ok),
            )
            .unwrap();

        // Chat-only commands are hidden in an IM
        registry.dispatch(&mut conversation, "help", "help");
        let pending = conversation.take_pending();
        assert!(!pending[0].to_string().contains("topic"));
    }
}
