use std::time::Duration;

/// Per-call options recognized by the message and health operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Pause this long before dispatch. Pure UX pacing for "typing"
    /// indicators, never a correctness mechanism.
    pub typing_delay: Option<Duration>,
    /// Consult and populate the response cache for this call.
    pub use_cache: bool,
}

impl SendOptions {
    /// Creates options with no delay and caching disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the response cache for this call.
    pub fn with_cache(mut self) -> Self {
        self.use_cache = true;
        self
    }

    /// Sets a typing delay applied before dispatch.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = Some(delay);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let options = SendOptions::new();
        assert!(!options.use_cache);
        assert!(options.typing_delay.is_none());
    }

    #[test]
    fn builders_compose() {
        let options = SendOptions::new()
            .with_cache()
            .with_typing_delay(Duration::from_millis(200));
        assert!(options.use_cache);
        assert_eq!(options.typing_delay, Some(Duration::from_millis(200)));
    }
}
