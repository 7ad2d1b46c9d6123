use serde::{Deserialize, Serialize};

/// The GET `/api/health` payload.
///
/// The backend has grown this payload over time, so only `status` is
/// required; everything else is optional and unknown fields are preserved in
/// `extra` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status line, e.g. "ok" or a human-readable banner.
    pub status: String,
    /// Optional detail message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Persona endpoints the backend reports as operational.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
    /// Backend version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Any additional fields the backend includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload() {
        let status: HealthStatus = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(status.status, "ok");
        assert!(status.endpoints.is_empty());
        assert!(status.extra.is_empty());
    }

    #[test]
    fn full_payload_preserves_unknown_fields() {
        let json = r#"{
            "status": "online",
            "message": "All chatbot endpoints operational",
            "endpoints": ["medical", "education", "general"],
            "version": "1.0.0",
            "debug": {"detected_route": null}
        }"#;
        let status: HealthStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.endpoints.len(), 3);
        assert_eq!(status.version.as_deref(), Some("1.0.0"));
        assert!(status.extra.contains_key("debug"));
    }
}
