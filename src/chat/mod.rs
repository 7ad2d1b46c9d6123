//! Chat application module for interactive conversations with Parley bots.
//!
//! This module provides a REPL chat interface built on top of the parley
//! client library. It supports:
//!
//! - Persona selection and switching mid-session
//! - Connection-status notices when reachability flips
//! - Slash commands for session control
//! - Optional response caching and typing-delay pacing
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatEntry, ChatRole, ChatSession, SessionStats};
