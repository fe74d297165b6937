use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport;
use crate::tools::headlines::tool_router::factory_from_env;
use crate::tools::registry::Registry;

/// Default app: `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default() -> Router {
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let mcp_service = mcp_transport::make_streamable_http_service(factory_from_env, session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// Default app **plus** deprecated REST route at `/v1/news/headlines`.
pub fn build_app_with_deprecated_api(registry: Registry) -> Router {
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let mcp_service = mcp_transport::make_streamable_http_service(factory_from_env, session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/v1/news/headlines", post(crate::api::mcp::http))
        .with_state(registry)
}
