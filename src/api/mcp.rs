use axum::Json;
use serde_json::{json, Value as J};

use crate::core::mcp::{RpcReq, RpcResp};
use crate::infra::http::json as http_json;
use crate::tools::registry::Registry;

fn tools_list(reg: &Registry) -> J {
    let tools: Vec<J> = reg
        .list()
        .into_iter()
        .map(|t| {
            json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema })
        })
        .collect();
    json!({ "tools": tools })
}

async fn call_tool(reg: &Registry, params: &J) -> Result<J, String> {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or("missing tool name")?;
    let args = params.get("arguments").unwrap_or(&J::Null);
    reg.call(name, args).await
}

pub async fn http(
    axum::extract::State(reg): axum::extract::State<Registry>,
    Json(req): Json<RpcReq>,
) -> Json<RpcResp> {
    tracing::debug!(method = %req.method, id = ?req.id, "REST shim invoked");
    let id = req.id.clone();
    let resp = match req.method.as_str() {
        "initialize" => http_json::ok(
            id.clone(),
            json!({ "serverInfo": { "name": "news-mcp-gateway", "version": env!("CARGO_PKG_VERSION") }, "capabilities": {} }),
        )
        .0,
        "shutdown" => http_json::ok(id.clone(), J::Null).0,
        "tools.list" | "tools/list" => http_json::ok(id.clone(), tools_list(&reg)).0,
        "tools.call" | "tools/call" => match call_tool(&reg, &req.params).await {
            Ok(out) => http_json::ok(id.clone(), out).0,
            Err(e) => {
                let resp = http_json::error(id.clone(), -32000, e).0;
                tracing::warn!(response = ?resp, "tools.call error response");
                resp
            }
        },
        _ => http_json::error(id.clone(), -32601, format!("unknown method: {}", req.method)).0,
    };
    Json(resp)
}
