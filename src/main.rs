//! imcmd - Console host for the slash-command engine.
//!
//! Opens one conversation in the terminal and runs every input line through
//! the command registry, with the built-in `say`, `me`, `debug`, `clear` and
//! `help` commands registered.
//!
//! # Configuration
//!
//! An optional `config.yaml` describes the account and the conversation:
//!
//! ```yaml
//! account:
//!   name: "alice@localhost"
//!   protocol_id: "prpl-jabber"
//!
//! conversation:
//!   name: "room@conference.localhost"
//!   kind: "chat"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `IMCMD_` prefix:
//!
//! ```bash
//! export IMCMD_ACCOUNT__PROTOCOL_ID="prpl-irc"
//! export IMCMD_CONVERSATION__KIND="im"
//! ```
//!
//! # Usage
//!
//! ```bash
//! imcmd --config config.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` to trace registration and dispatch

use clap::Parser;
use env_logger::Env;
use imcmd::{
    commands::CommandRegistry,
    config::Config,
    console::{ConsoleConversation, builtins::register_builtins, repl},
};
use log::{error, info};
use tokio::io::{BufReader, stdin, stdout};

/// Command-line arguments for the console host.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Every key has a default, so the file is optional. Environment
    /// variables prefixed with `IMCMD_` override it.
    #[arg(short, long)]
    config: Option<String>,
}

/// Main entry point.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: parses command-line arguments using `clap`
/// 3. **Configuration Loading**: file, then environment overrides
/// 4. **Registry Setup**: registers the built-in commands
/// 5. **Console Loop**: reads stdin until end of input
///
/// Errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting imcmd {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            return;
        }
    };

    let mut registry = CommandRegistry::new();
    if let Err(e) = register_builtins(&mut registry) {
        error!("Failed to register built-in commands: {}", e);
        return;
    }

    let mut conversation = ConsoleConversation::new(
        config.conversation.kind,
        config.conversation.name,
        config.account.name,
        config.account.protocol_id,
    );

    if let Err(e) = repl::run(
        &registry,
        &mut conversation,
        &config.console.prompt,
        BufReader::new(stdin()),
        stdout(),
    )
    .await
    {
        error!("Console stopped: {:#}", e);
    }
}
