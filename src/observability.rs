use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("parley.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("parley.client.request_errors");
pub(crate) static CLIENT_REQUEST_RETRIES: Counter = Counter::new("parley.client.retries");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("parley.client.request_duration_seconds");
pub(crate) static CLIENT_RETRY_BACKOFF: Moments =
    Moments::new("parley.client.retry_backoff_seconds");

pub(crate) static CACHE_HITS: Counter = Counter::new("parley.cache.hits");
pub(crate) static CACHE_MISSES: Counter = Counter::new("parley.cache.misses");
pub(crate) static CACHE_EVICTIONS: Counter = Counter::new("parley.cache.evictions");

pub(crate) static CONNECTION_FLIPS: Counter = Counter::new("parley.connection.flips");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_REQUEST_RETRIES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_moments(&CLIENT_RETRY_BACKOFF);

    collector.register_counter(&CACHE_HITS);
    collector.register_counter(&CACHE_MISSES);
    collector.register_counter(&CACHE_EVICTIONS);

    collector.register_counter(&CONNECTION_FLIPS);
}
