//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the conversation history.
    Clear,

    /// Switch to another persona.
    Bot(String),

    /// List the available personas.
    Bots,

    /// Display session statistics.
    Stats,

    /// Show cache contents.
    CacheStats,

    /// Clear the response cache.
    CacheClear,

    /// Show the current connection status.
    Status,

    /// Fetch the backend health report.
    Health,

    /// Measure a round trip to the backend.
    Ping,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use parley::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/bot medical").is_some());
/// assert!(parse_command("What's the weather like?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "bot" => match argument {
            Some(bot) => ChatCommand::Bot(bot.to_string()),
            None => ChatCommand::Invalid("/bot requires a persona id".to_string()),
        },
        "bots" => ChatCommand::Bots,
        "stats" => ChatCommand::Stats,
        "cache" => match argument {
            None => ChatCommand::CacheStats,
            Some(arg) if arg.eq_ignore_ascii_case("clear") => ChatCommand::CacheClear,
            Some(_) => {
                ChatCommand::Invalid("/cache takes no argument or 'clear'".to_string())
            }
        },
        "status" => ChatCommand::Status,
        "health" => ChatCommand::Health,
        "ping" => ChatCommand::Ping,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /bot <id>              Switch to another persona (e.g., /bot medical)
  /bots                  List available personas
  /clear                 Clear conversation history
  /cache                 Show cached response keys
  /cache clear           Clear the response cache
  /status                Show the current connection status
  /health                Fetch the backend health report
  /ping                  Measure a round trip to the backend
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_bot() {
        assert_eq!(
            parse_command("/bot medical"),
            Some(ChatCommand::Bot("medical".to_string()))
        );
        assert_eq!(
            parse_command("/bot   mental-health  "),
            Some(ChatCommand::Bot("mental-health".to_string()))
        );
        assert_eq!(
            parse_command("/bot"),
            Some(ChatCommand::Invalid("/bot requires a persona id".to_string()))
        );
        assert_eq!(parse_command("/bots"), Some(ChatCommand::Bots));
    }

    #[test]
    fn parse_cache_commands() {
        assert_eq!(parse_command("/cache"), Some(ChatCommand::CacheStats));
        assert_eq!(parse_command("/cache clear"), Some(ChatCommand::CacheClear));
        assert!(matches!(
            parse_command("/cache everything"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_probes() {
        assert_eq!(parse_command("/status"), Some(ChatCommand::Status));
        assert_eq!(parse_command("/health"), Some(ChatCommand::Health));
        assert_eq!(parse_command("/ping"), Some(ChatCommand::Ping));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/model haiku"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("Unknown command")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello there!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/bot"));
        assert!(help.contains("/cache"));
    }
}
