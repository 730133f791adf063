pub mod config;
pub mod http_client;
pub mod tracing_init;

pub use config::{Config, ConfigError};
pub use http_client::{UpstreamClient, UpstreamError};
pub use tracing_init::init_tracing;
