//! Output rendering for the chat application.
//!
//! This module provides a renderer trait and a plain-text implementation
//! with optional ANSI styling for bot replies, status lines, and errors.

use std::io::{self, Stdout, Write};

/// ANSI escape code for dim text (used for reply metadata).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for bot names).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for connection-restored notices).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for connection-lost notices).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, plain text without styling (for piping/redirecting),
/// or a TUI.
pub trait Renderer: Send {
    /// Print a complete bot reply with its metadata.
    fn print_reply(&mut self, bot_name: &str, text: &str, from_cache: bool, duration: Option<f64>);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print a reachability change notice.
    fn print_connection(&mut self, reachable: bool);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_reply(&mut self, bot_name: &str, text: &str, from_cache: bool, duration: Option<f64>) {
        if self.use_color {
            print!("{ANSI_CYAN}{bot_name}:{ANSI_RESET} ");
        } else {
            print!("{bot_name}: ");
        }
        println!("{text}");

        let mut meta: Vec<String> = Vec::new();
        if let Some(duration) = duration {
            meta.push(format!("responded in {duration:.2}s"));
        }
        if from_cache {
            meta.push("cached".to_string());
        }
        if !meta.is_empty() {
            let line = meta.join(", ");
            if self.use_color {
                println!("{ANSI_DIM}[{line}]{ANSI_RESET}");
            } else {
                println!("[{line}]");
            }
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn print_connection(&mut self, reachable: bool) {
        if reachable {
            if self.use_color {
                println!("{ANSI_GREEN}[connection restored]{ANSI_RESET}");
            } else {
                println!("[connection restored]");
            }
        } else if self.use_color {
            println!("{ANSI_YELLOW}[connection lost, messages will fail until it returns]{ANSI_RESET}");
        } else {
            println!("[connection lost, messages will fail until it returns]");
        }
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }
}
