//! Command applicability flags and priority levels.

bitflags::bitflags! {
    /// Where a command applies and how strictly its arguments are checked.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u32 {
        /// Runs in IM conversations.
        const IM               = 1 << 0;
        /// Runs in chat conversations.
        const CHAT             = 1 << 1;
        /// Restricted to the protocol id given at registration.
        const PRPL_ONLY        = 1 << 2;
        /// Runs even with missing or extra arguments.
        const ALLOW_WRONG_ARGS = 1 << 3;
    }
}

impl CommandFlags {
    pub fn applies_to_im(self) -> bool {
        self.contains(Self::IM)
    }

    pub fn applies_to_chat(self) -> bool {
        self.contains(Self::CHAT)
    }

    pub fn is_prpl_restricted(self) -> bool {
        self.contains(Self::PRPL_ONLY)
    }

    pub fn tolerates_wrong_args(self) -> bool {
        self.contains(Self::ALLOW_WRONG_ARGS)
    }
}

/// Named priority levels. Any `i32` is accepted; higher runs first.
pub mod priority {
    /// Tried after everything else.
    pub const VERY_LOW: i32 = -1000;
    /// Below the default.
    pub const LOW: i32 = 0;
    /// Used when no priority is given.
    pub const DEFAULT: i32 = 1000;
    /// Commands registered by protocol plugins.
    pub const PRPL: i32 = 2000;
    /// Commands registered by regular plugins.
    pub const PLUGIN: i32 = 3000;
    /// User-defined aliases.
    pub const ALIAS: i32 = 4000;
    /// Above aliases.
    pub const HIGH: i32 = 5000;
    /// Tried before everything else.
    pub const VERY_HIGH: i32 = 6000;
}
