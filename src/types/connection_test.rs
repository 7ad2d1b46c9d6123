use std::time::Duration;

/// The outcome of an explicit round-trip measurement.
///
/// Unlike the other operations this is not a `Result`: both outcomes carry
/// the elapsed time, so failure is folded into the struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTest {
    /// Whether the backend answered.
    pub reachable: bool,
    /// Round-trip time of the probe, failure included.
    pub latency: Duration,
    /// HTTP status of the probe response, when one arrived.
    pub status: Option<u16>,
    /// Failure description, when the probe failed.
    pub error: Option<String>,
}

impl ConnectionTest {
    /// Records a successful probe.
    pub fn success(latency: Duration, status: u16) -> Self {
        Self {
            reachable: true,
            latency,
            status: Some(status),
            error: None,
        }
    }

    /// Records a failed probe.
    pub fn failure(latency: Duration, error: impl Into<String>) -> Self {
        Self {
            reachable: false,
            latency,
            status: None,
            error: Some(error.into()),
        }
    }

    /// Round-trip time in whole milliseconds.
    pub fn latency_ms(&self) -> u128 {
        self.latency.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_outcomes_carry_latency() {
        let ok = ConnectionTest::success(Duration::from_millis(42), 200);
        assert!(ok.reachable);
        assert_eq!(ok.latency_ms(), 42);
        assert_eq!(ok.status, Some(200));

        let failed = ConnectionTest::failure(Duration::from_millis(30_000), "timed out");
        assert!(!failed.reachable);
        assert_eq!(failed.latency_ms(), 30_000);
        assert_eq!(failed.error.as_deref(), Some("timed out"));
    }
}
