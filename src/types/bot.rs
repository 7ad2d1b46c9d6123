use serde::{Deserialize, Serialize};

/// A chatbot persona descriptor.
///
/// Each persona is a named endpoint target on the backend. Descriptors are
/// defined once at client creation from the built-in set and never mutated;
/// the `id` is the unique, stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Unique, stable identifier; becomes the endpoint path segment.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description shown in selection UIs.
    pub description: String,
    /// Endpoint path for this persona, e.g. `/api/chatbots/general`.
    pub path: String,
    /// Grouping category for selection UIs.
    pub category: String,
    /// Display color as a hex string.
    pub color: String,
    /// Display icon (emoji).
    pub icon: String,
}

impl Bot {
    fn builtin(
        id: &str,
        name: &str,
        description: &str,
        category: &str,
        color: &str,
        icon: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            path: format!("/api/chatbots/{id}"),
            category: category.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The immutable set of known personas.
///
/// Constructed once per client; lookups resolve user-supplied ids to
/// descriptors before any network I/O happens.
#[derive(Debug, Clone)]
pub struct BotRegistry {
    bots: Vec<Bot>,
}

impl BotRegistry {
    /// Creates the registry with the nine built-in personas.
    pub fn builtin() -> Self {
        let bots = vec![
            Bot::builtin(
                "medical",
                "Medical Assistant",
                "Answers general medical and health questions.",
                "Health",
                "#ef4444",
                "🏥",
            ),
            Bot::builtin(
                "mental-health",
                "Mental Health Companion",
                "Supportive conversation around mental wellbeing.",
                "Health",
                "#8b5cf6",
                "🧠",
            ),
            Bot::builtin(
                "education",
                "Education Tutor",
                "Explains concepts and helps you learn.",
                "Learning",
                "#3b82f6",
                "📚",
            ),
            Bot::builtin(
                "finance",
                "Finance Advisor",
                "Budgeting, saving, and personal finance guidance.",
                "Finance",
                "#10b981",
                "💰",
            ),
            Bot::builtin(
                "legal",
                "Legal Information",
                "General legal information, not legal advice.",
                "Professional",
                "#6b7280",
                "⚖️",
            ),
            Bot::builtin(
                "career",
                "Career Coach",
                "Resumes, interviews, and career development.",
                "Professional",
                "#f59e0b",
                "💼",
            ),
            Bot::builtin(
                "developer",
                "Developer Helper",
                "Programming questions and code review.",
                "Technology",
                "#06b6d4",
                "💻",
            ),
            Bot::builtin(
                "entertainment",
                "Entertainment Guide",
                "Movies, games, and fun suggestions.",
                "Lifestyle",
                "#ec4899",
                "🎮",
            ),
            Bot::builtin(
                "general",
                "General Assistant",
                "A general-purpose assistant for anything else.",
                "General",
                "#64748b",
                "🤖",
            ),
        ];
        Self { bots }
    }

    /// Resolves a persona id to its descriptor.
    pub fn find(&self, id: &str) -> Option<&Bot> {
        self.bots.iter().find(|bot| bot.id == id)
    }

    /// Returns all personas in declaration order.
    pub fn list(&self) -> &[Bot] {
        &self.bots
    }

    /// Returns the distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for bot in &self.bots {
            if !categories.contains(&bot.category.as_str()) {
                categories.push(&bot.category);
            }
        }
        categories
    }

    /// Returns the number of personas.
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

impl Default for BotRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
