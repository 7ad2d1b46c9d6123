//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::types::SendOptions;

/// Default persona to talk to.
const DEFAULT_BOT: &str = "general";

/// Command-line arguments for the parley-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Persona to talk to.
    #[arrrg(optional, "Chatbot persona id (default: general)", "BOT")]
    pub bot: Option<String>,

    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default: PARLEY_BASE_URL)", "URL")]
    pub base_url: Option<String>,

    /// Typing delay before each request.
    #[arrrg(optional, "Typing delay before dispatch, in milliseconds", "MILLIS")]
    pub typing_delay_ms: Option<u64>,

    /// Serve repeated identical messages from the response cache.
    #[arrrg(flag, "Serve repeated identical messages from the cache")]
    pub cache: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// The persona id to talk to.
    pub bot_id: String,

    /// Explicit backend base URL, if any.
    pub base_url: Option<String>,

    /// Optional typing delay applied before each request.
    pub typing_delay: Option<Duration>,

    /// Whether to serve repeated identical messages from the cache.
    pub use_cache: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Bot: general
    /// - Base URL: taken from the environment by the client
    /// - Typing delay: none
    /// - Caching: disabled (real-time conversations)
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            bot_id: DEFAULT_BOT.to_string(),
            base_url: None,
            typing_delay: None,
            use_cache: false,
            use_color: true,
        }
    }

    /// Returns the per-call options this configuration implies.
    pub fn send_options(&self) -> SendOptions {
        let mut options = SendOptions::new();
        if self.use_cache {
            options = options.with_cache();
        }
        if let Some(delay) = self.typing_delay {
            options = options.with_typing_delay(delay);
        }
        options
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        Self {
            bot_id: args.bot.unwrap_or_else(|| DEFAULT_BOT.to_string()),
            base_url: args.base_url,
            typing_delay: args.typing_delay_ms.map(Duration::from_millis),
            use_cache: args.cache,
            use_color: !args.no_color,
        }
    }
}
