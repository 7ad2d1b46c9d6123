//! Interactive chat application for conversing with the chatbot backend.
//!
//! This binary provides a REPL interface over the persona endpoints, with
//! response caching and automatic retry handled by the client.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! parley-chat
//!
//! # Pick a persona
//! parley-chat --bot medical
//!
//! # Point at a non-default backend
//! parley-chat --base-url http://10.0.0.7:8000
//!
//! # Disable colors (useful for piping output)
//! parley-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/bot <id>` - Switch personas
//! - `/bots` - List available personas
//! - `/clear` - Clear conversation history
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use parley::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use parley::{Parley, SendOptions};

/// Main entry point for the parley-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("parley-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Parley::new(config.base_url.clone())?;

    // Print a banner whenever the backend flips between reachable and not.
    // The handle must outlive the loop or the callback goes away with it.
    let _connection_watch = client.on_connection_change(move |reachable| {
        let mut renderer = PlainTextRenderer::with_color(use_color);
        renderer.print_connection(reachable);
    });

    let mut session = match ChatSession::new(client, config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("parley-chat: {err}");
            process::exit(1);
        }
    };
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupt handling while a request is in flight
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Parley Chat (persona: {})", session.bot().name);
    println!("Backend: {}", session.client().base_url());
    println!("Type /help for commands, /quit to exit\n");

    if let Some(welcome) = session.transcript().first() {
        renderer.print_reply(&session.bot().name, &welcome.content, false, None);
    }

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Bot(bot_id) => match session.set_bot(&bot_id) {
                            Ok(()) => {
                                let name = session.bot().name.clone();
                                renderer.print_info(&format!("Switched to: {name}"));
                                if let Some(welcome) = session.transcript().last() {
                                    let content = welcome.content.clone();
                                    renderer.print_reply(&name, &content, false, None);
                                }
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Bots => {
                            print_bots(&session);
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::CacheStats => {
                            print_cache_stats(&session);
                        }
                        ChatCommand::CacheClear => {
                            session.client().clear_cache();
                            renderer.print_info("Response cache cleared.");
                        }
                        ChatCommand::Status => {
                            renderer.print_connection(session.client().is_reachable());
                        }
                        ChatCommand::Health => {
                            match session.client().health(SendOptions::new()).await {
                                Ok(health) => {
                                    renderer.print_info(&format!(
                                        "Backend status: {}{}",
                                        health.data.status,
                                        if health.from_cache { " (cached)" } else { "" }
                                    ));
                                }
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        ChatCommand::Ping => {
                            let probe = session.client().test_connection().await;
                            if probe.reachable {
                                renderer.print_info(&format!(
                                    "Backend reachable ({} ms)",
                                    probe.latency_ms()
                                ));
                            } else {
                                renderer.print_error(&format!(
                                    "Backend unreachable after {} ms: {}",
                                    probe.latency_ms(),
                                    probe.error.as_deref().unwrap_or("unknown error")
                                ));
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend, abandoning the
                // request if Ctrl+C arrives while it is in flight.
                match send_interruptible(&mut session, line, &interrupted).await {
                    None => renderer.print_info("Request interrupted."),
                    Some(Ok(response)) => {
                        renderer.print_reply(
                            &session.bot().name,
                            &response.data.response,
                            response.from_cache,
                            Some(response.data.duration),
                        );
                    }
                    Some(Err(err)) => renderer.print_error(&err.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Runs `session.send`, abandoning it if the interrupt flag is raised.
///
/// Dropping the send future cancels the underlying HTTP request; the
/// session mutates no state until the request resolves, so abandonment is
/// safe.
async fn send_interruptible(
    session: &mut ChatSession,
    line: &str,
    interrupted: &Arc<AtomicBool>,
) -> Option<parley::Result<parley::ApiResponse<parley::ChatResponse>>> {
    let mut send = std::pin::pin!(session.send(line));
    loop {
        if interrupted.load(Ordering::Relaxed) {
            return None;
        }
        tokio::select! {
            result = &mut send => return Some(result),
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {}
        }
    }
}

fn print_bots(session: &ChatSession) {
    println!("    Available personas:");
    for bot in session.client().bots().list() {
        let marker = if bot.id == session.bot().id { "*" } else { " " };
        println!("      {marker} {:<14} {} ({})", bot.id, bot.name, bot.category);
    }
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Persona: {} ({})", stats.bot_name, stats.bot_id);
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Requests: {} ({} cached, {} failed)",
        stats.request_count, stats.cache_hits, stats.failed_requests
    );
    println!(
        "      Backend: {} ({})",
        session.client().base_url(),
        if session.client().is_reachable() {
            "reachable"
        } else {
            "unreachable"
        }
    );
}

fn print_cache_stats(session: &ChatSession) {
    let stats = session.client().cache_stats();
    if stats.entries == 0 {
        println!("    Response cache: (empty)");
    } else {
        println!("    Response cache: {} entries", stats.entries);
        for key in &stats.keys {
            println!("      - {}", key);
        }
    }
}
