//! Integration tests for the Parley library.
//! These tests require a running backend whose URL is in the environment.

#[cfg(test)]
mod tests {
    use parley::{Parley, SendOptions};

    #[tokio::test]
    async fn test_live_health_check() {
        // This test requires PARLEY_BASE_URL to be set
        let base_url = std::env::var("PARLEY_BASE_URL").ok();
        if base_url.is_none() {
            eprintln!("Skipping test: PARLEY_BASE_URL not set");
            return;
        }

        let client = Parley::new(base_url).expect("Failed to create client");

        let health = client.health(SendOptions::new()).await;
        assert!(
            health.is_ok(),
            "Health check should succeed against a live backend"
        );
    }

    #[tokio::test]
    async fn test_live_send_message() {
        let base_url = std::env::var("PARLEY_BASE_URL").ok();
        if base_url.is_none() {
            eprintln!("Skipping test: PARLEY_BASE_URL not set");
            return;
        }

        let client = Parley::new(base_url).expect("Failed to create client");

        let reply = client
            .send_message("general", "Say 'test passed'", None, SendOptions::new())
            .await;
        assert!(
            reply.is_ok(),
            "Message should succeed against a live backend"
        );
    }

    #[tokio::test]
    async fn test_live_connection_probe() {
        let base_url = std::env::var("PARLEY_BASE_URL").ok();
        if base_url.is_none() {
            eprintln!("Skipping test: PARLEY_BASE_URL not set");
            return;
        }

        let client = Parley::new(base_url).expect("Failed to create client");

        let probe = client.test_connection().await;
        assert!(probe.reachable, "Live backend should answer the probe");
        assert!(client.is_reachable());
    }
}
