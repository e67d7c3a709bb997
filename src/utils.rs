use crate::constants::{DEFAULT_BASE_URL, DEFAULT_DATA_SIZE, DEFAULT_PORT};
use std::str::FromStr;

/// Get server port from environment variable or use default
pub fn get_port() -> u16 {
    parse_or(std::env::var("STOCKCHART_PORT").ok(), DEFAULT_PORT)
}

/// Get mock dataset size from environment variable or use default
pub fn get_data_size() -> usize {
    parse_or(std::env::var("STOCKCHART_DATA_SIZE").ok(), DEFAULT_DATA_SIZE)
}

/// Get API base URL from environment variable or use default
pub fn get_base_url() -> String {
    std::env::var("STOCKCHART_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Initialize tracing with `RUST_LOG`, defaulting to info
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
