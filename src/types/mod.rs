// Public modules
pub mod api_response;
pub mod bot;
pub mod chat_request;
pub mod chat_response;
pub mod connection_test;
pub mod health_status;
pub mod metrics_report;
pub mod send_options;

// Re-exports
pub use api_response::ApiResponse;
pub use bot::{Bot, BotRegistry};
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use connection_test::ConnectionTest;
pub use health_status::HealthStatus;
pub use metrics_report::MetricsReport;
pub use send_options::SendOptions;
