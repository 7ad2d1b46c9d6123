use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The 200 body of a persona endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated reply text.
    pub response: String,
    /// Server-side timestamp of the reply.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,
    /// Server-side processing time in seconds.
    pub duration: f64,
    /// Whether the backend considered the request successful.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "response": "Hello! How can I assist you?",
            "timestamp": "2025-06-01T12:00:00Z",
            "duration": 0.42,
            "success": true
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "Hello! How can I assist you?");
        assert!(response.success);
        assert!((response.duration - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_epoch_timestamp() {
        let json = r#"{
            "response": "hi",
            "timestamp": 1735787045.25,
            "duration": 0.1,
            "success": true
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.timestamp.unix_timestamp(), 1735787045);
    }
}
