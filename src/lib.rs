// Public modules
pub mod cache;
pub mod chat;
pub mod client;
pub mod connection;
pub mod error;
pub mod observability;
pub mod render;
pub mod retry;
pub mod types;
pub mod utils;

// Re-exports
pub use cache::CacheStats;
pub use client::Parley;
pub use connection::{ConnectionSubscription, ConnectionTracker};
pub use error::{Error, ErrorKind, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use retry::RetryPolicy;
pub use types::*;
