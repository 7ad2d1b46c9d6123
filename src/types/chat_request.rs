use serde::{Deserialize, Serialize};

/// The POST body for a persona endpoint.
///
/// Constructed per user action and consumed once. The message is stored
/// already trimmed; an empty message never reaches the wire because the
/// client validates before dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user message text.
    pub message: String,
    /// Optional caller-supplied context, serialized as `null` when absent.
    pub context: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Creates a request with the given message, trimmed.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into().trim().to_string(),
            context: None,
        }
    }

    /// Creates a request with message and context.
    pub fn with_context(message: impl Into<String>, context: serde_json::Value) -> Self {
        Self {
            message: message.into().trim().to_string(),
            context: Some(context),
        }
    }

    /// Returns true if the message is non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_trimmed() {
        let request = ChatRequest::new("  hello  ");
        assert_eq!(request.message, "hello");
    }

    #[test]
    fn validity_requires_non_whitespace() {
        assert!(ChatRequest::new("hi").is_valid());
        assert!(!ChatRequest::new("").is_valid());
        assert!(!ChatRequest::new("   \t ").is_valid());
    }

    #[test]
    fn context_serializes_as_null_when_absent() {
        let request = ChatRequest::new("hi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hi", "context": null}));
    }

    #[test]
    fn context_round_trips() {
        let request = ChatRequest::with_context("hi", serde_json::json!({"lang": "en"}));
        let json = serde_json::to_string(&request).unwrap();
        let back: ChatRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
