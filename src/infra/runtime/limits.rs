use std::time::Duration;

use crate::infra::config::ToolConfig;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 6_000;

/// Build a reqwest client with sane defaults (bounded timeouts).
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS))
        .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .build()
        .expect("reqwest client")
}

/// Same as `make_http_client`, with per-backend timeout overrides.
pub fn make_http_client_with(cfg: &ToolConfig) -> reqwest::Client {
    let connect_ms = cfg.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS);
    let total_ms = cfg.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(connect_ms))
        .timeout(Duration::from_millis(total_ms))
        .build()
        .expect("reqwest client")
}
