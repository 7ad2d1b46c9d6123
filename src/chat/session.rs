//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which manages conversation
//! state and forwards user messages to the client.

use time::OffsetDateTime;

use crate::chat::config::ChatConfig;
use crate::client::Parley;
use crate::error::{Error, Result};
use crate::types::{ApiResponse, Bot, ChatResponse};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The human user.
    User,
    /// The active persona.
    Bot,
}

/// One line of the conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    /// Who produced this entry.
    pub role: ChatRole,
    /// The entry text.
    pub content: String,
    /// When the entry was recorded, client-side.
    pub timestamp: OffsetDateTime,
    /// True when the reply came from the response cache.
    pub from_cache: bool,
    /// Server-side processing time in seconds, for bot entries.
    pub duration: Option<f64>,
}

impl ChatEntry {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: OffsetDateTime::now_utc(),
            from_cache: false,
            duration: None,
        }
    }

    fn bot(content: impl Into<String>, from_cache: bool, duration: Option<f64>) -> Self {
        Self {
            role: ChatRole::Bot,
            content: content.into(),
            timestamp: OffsetDateTime::now_utc(),
            from_cache,
            duration,
        }
    }
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// The active persona id.
    pub bot_id: String,
    /// The active persona display name.
    pub bot_name: String,
    /// The number of transcript entries, welcome line included.
    pub message_count: usize,
    /// Total requests forwarded to the client.
    pub request_count: u64,
    /// Replies served from the cache.
    pub cache_hits: u64,
    /// Requests that ended in a failure result.
    pub failed_requests: u64,
}

/// A chat session holding the transcript and the active persona.
///
/// The session validates input, forwards messages through the [`Parley`]
/// client, and records both sides of the conversation. A failed request
/// leaves the transcript untouched so a retry re-sends cleanly.
#[derive(Debug)]
pub struct ChatSession {
    client: Parley,
    config: ChatConfig,
    bot: Bot,
    transcript: Vec<ChatEntry>,
    request_count: u64,
    cache_hits: u64,
    failed_requests: u64,
}

impl ChatSession {
    /// Creates a new chat session with the given client and configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured persona id is unknown.
    pub fn new(client: Parley, config: ChatConfig) -> Result<Self> {
        let bot = client
            .bots()
            .find(&config.bot_id)
            .ok_or_else(|| {
                Error::validation(
                    format!("unknown chatbot id: {}", config.bot_id),
                    Some("chatbot_id".to_string()),
                )
            })?
            .clone();

        let mut session = Self {
            client,
            config,
            bot,
            transcript: Vec::new(),
            request_count: 0,
            cache_hits: 0,
            failed_requests: 0,
        };
        session.seed_welcome();
        Ok(session)
    }

    fn welcome_text(&self) -> String {
        format!(
            "Hello! I'm your {}. {} How can I help you today?",
            self.bot.name, self.bot.description
        )
    }

    fn seed_welcome(&mut self) {
        let welcome = self.welcome_text();
        self.transcript.push(ChatEntry::bot(welcome, false, None));
    }

    /// Sends a user message and records both sides of the exchange.
    ///
    /// Session state is only touched after the request resolves, so the
    /// returned future can be dropped mid-flight without corrupting the
    /// transcript.
    ///
    /// # Errors
    ///
    /// Returns the classified error on failure; the transcript is left
    /// untouched.
    pub async fn send(&mut self, text: &str) -> Result<ApiResponse<ChatResponse>> {
        let result = self
            .client
            .send_message(&self.bot.id, text, None, self.config.send_options())
            .await;
        self.request_count += 1;

        match result {
            Ok(response) => {
                self.transcript.push(ChatEntry::user(text.trim()));
                if response.from_cache {
                    self.cache_hits += 1;
                }
                self.transcript.push(ChatEntry::bot(
                    response.data.response.clone(),
                    response.from_cache,
                    Some(response.data.duration),
                ));
                Ok(response)
            }
            Err(err) => {
                self.failed_requests += 1;
                Err(err)
            }
        }
    }

    /// Switches to another persona, reseeding the welcome line.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the id is unknown; the session keeps
    /// its current persona.
    pub fn set_bot(&mut self, bot_id: &str) -> Result<()> {
        let bot = self
            .client
            .bots()
            .find(bot_id)
            .ok_or_else(|| {
                Error::validation(
                    format!("unknown chatbot id: {bot_id}"),
                    Some("chatbot_id".to_string()),
                )
            })?
            .clone();
        self.bot = bot;
        self.config.bot_id = bot_id.to_string();
        self.seed_welcome();
        Ok(())
    }

    /// Clears the conversation history and reseeds the welcome line.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.seed_welcome();
    }

    /// Returns the active persona.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Parley {
        &self.client
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    /// Returns the number of transcript entries.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            bot_id: self.bot.id.clone(),
            bot_name: self.bot.name.clone(),
            message_count: self.message_count(),
            request_count: self.request_count,
            cache_hits: self.cache_hits,
            failed_requests: self.failed_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Parley {
        Parley::new(Some("http://chat.example.com".to_string())).unwrap()
    }

    #[test]
    fn new_session_seeds_welcome() {
        let session = ChatSession::new(test_client(), ChatConfig::default()).unwrap();
        assert_eq!(session.message_count(), 1);
        let welcome = &session.transcript()[0];
        assert_eq!(welcome.role, ChatRole::Bot);
        assert!(welcome.content.contains("General Assistant"));
    }

    #[test]
    fn unknown_bot_is_rejected() {
        let mut config = ChatConfig::default();
        config.bot_id = "astrology".to_string();
        let err = ChatSession::new(test_client(), config).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn clear_reseeds_welcome() {
        let mut session = ChatSession::new(test_client(), ChatConfig::default()).unwrap();
        session.transcript.push(ChatEntry::user("hi"));
        assert_eq!(session.message_count(), 2);

        session.clear();
        assert_eq!(session.message_count(), 1);
        assert_eq!(session.transcript()[0].role, ChatRole::Bot);
    }

    #[test]
    fn set_bot_switches_persona() {
        let mut session = ChatSession::new(test_client(), ChatConfig::default()).unwrap();
        session.set_bot("medical").unwrap();
        assert_eq!(session.bot().id, "medical");
        assert!(
            session
                .transcript()
                .last()
                .unwrap()
                .content
                .contains("Medical Assistant")
        );

        let err = session.set_bot("astrology").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.bot().id, "medical");
    }

    #[tokio::test]
    async fn failed_send_leaves_transcript_untouched() {
        // An empty message fails validation before any network I/O.
        let mut session = ChatSession::new(test_client(), ChatConfig::default()).unwrap();
        let before = session.message_count();
        let err = session.send("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.message_count(), before);
        assert_eq!(session.stats().failed_requests, 1);
        assert_eq!(session.stats().request_count, 1);
    }
}
