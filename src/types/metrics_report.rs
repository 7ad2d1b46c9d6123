use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The GET `/api/metrics` payload.
///
/// The backend never settled on one metrics shape, so all fields are
/// optional and unrecognized ones land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Total requests served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
    /// Total failed requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_errors: Option<u64>,
    /// Backend uptime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<f64>,
    /// Request counts broken down by persona id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_by_bot: Option<HashMap<String, u64>>,
    /// Any additional fields the backend includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
