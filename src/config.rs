//! Configuration of the console host.
//!
//! The configuration is read from an optional YAML file and then overridden
//! by environment variables. Every key has a default, so the host runs with
//! no file at all.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Account the console conversation belongs to
//! account:
//!   name: "me@localhost"
//!   # Protocol id checked by protocol-restricted commands
//!   protocol_id: "prpl-jabber"
//!
//! # Conversation opened at start-up
//! conversation:
//!   name: "buddy@localhost"
//!   # One of im, chat, misc
//!   kind: "chat"
//!
//! console:
//!   prompt: "> "
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any key can be overridden with the `IMCMD_` prefix, nested keys being
//! separated by `__`:
//!
//! ```bash
//! export IMCMD_ACCOUNT__PROTOCOL_ID="prpl-irc"
//! export IMCMD_CONVERSATION__KIND="im"
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::conversation::ConversationKind;

/// Prefix of the environment variables overriding the file.
pub const ENV_PREFIX: &str = "IMCMD_";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local account settings
    pub account: Account,
    /// Conversation opened at start-up
    pub conversation: ConversationConfig,
    /// Terminal settings
    pub console: Console,
}

/// Local account the console conversation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Display name of the account.
    pub name: String,

    /// Protocol id of the account, e.g. `prpl-jabber`.
    ///
    /// Commands registered as protocol-only for another protocol answer
    /// with "That command doesn't work on this protocol.".
    pub protocol_id: Option<String>,
}

impl Default for Account {
    fn default() -> Self {
        Account {
            name: "me@localhost".to_owned(),
            protocol_id: Some("prpl-console".to_owned()),
        }
    }
}

/// Conversation opened at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Name of the buddy or room.
    pub name: String,
    /// Kind of the conversation: `im`, `chat` or `misc`.
    pub kind: ConversationKind,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        ConversationConfig {
            name: "buddy@localhost".to_owned(),
            kind: ConversationKind::Im,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Console {
    /// Prompt written before each input line.
    pub prompt: String,
}

impl Default for Console {
    fn default() -> Self {
        Console {
            prompt: "> ".to_owned(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional YAML file. When given, it must exist.
    ///
    /// # Returns
    ///
    /// The defaults, overridden by the file, overridden by `IMCMD_*`
    /// environment variables.
    pub fn load(path: Option<&str>) -> anyhow::Result<Config> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !Path::new(path).is_file() {
                bail!("configuration file {} does not exist", path);
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.conversation.kind, ConversationKind::Im);
        assert_eq!(config.console.prompt, "> ");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "account:\n  name: alice\n  protocol_id: prpl-jabber\n\
             conversation:\n  name: room@conference\n  kind: chat\n",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.account.name, "alice");
        assert_eq!(config.account.protocol_id.as_deref(), Some("prpl-jabber"));
        assert_eq!(config.conversation.name, "room@conference");
        assert_eq!(config.conversation.kind, ConversationKind::Chat);
        // Missing section keeps its defaults
        assert_eq!(config.console, Console::default());
    }

    #[test]
    #[serial]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = format!("{}/nonexistent.yaml", dir.path().to_string_lossy());

        let result = Config::load(Some(&path));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    #[serial]
    fn test_load_invalid_kind_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "conversation:\n  kind: group\n");

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "account:\n  protocol_id: prpl-jabber\n");

        // SAFETY: serialized with every other test touching the environment
        unsafe {
            std::env::set_var("IMCMD_ACCOUNT__PROTOCOL_ID", "prpl-irc");
            std::env::set_var("IMCMD_CONSOLE__PROMPT", "imcmd>");
        }
        let config = Config::load(Some(&path));
        unsafe {
            std::env::remove_var("IMCMD_ACCOUNT__PROTOCOL_ID");
            std::env::remove_var("IMCMD_CONSOLE__PROMPT");
        }

        let config = config.unwrap();
        assert_eq!(config.account.protocol_id.as_deref(), Some("prpl-irc"));
        assert_eq!(config.console.prompt, "imcmd>");
    }
}
