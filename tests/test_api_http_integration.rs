use axum::body::{to_bytes, Body};
use axum::{routing::post, Router};
use hyper::Request;
use serde_json::{json, Value as J};
use std::sync::Arc;
use tower::ServiceExt;

use news_mcp_gateway::api::mcp;
use news_mcp_gateway::clients::newsapi::NewsApiRemote;
use news_mcp_gateway::tools::headlines::HeadlinesTool;
use news_mcp_gateway::tools::registry::Registry;

const BODY_LIMIT: usize = 1024 * 1024;

fn app_for(base: &str, key: Option<&str>) -> Router {
    let fetcher = NewsApiRemote::new(base, key.map(str::to_owned));
    let reg = Registry::with_tools([Arc::new(HeadlinesTool::new(fetcher))]);
    Router::new()
        .route("/v1/news/headlines", post(mcp::http))
        .with_state(reg)
}

async fn rpc(app: &Router, body: String) -> J {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/news/headlines")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn http_e2e_tools_list_and_call() {
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/v2/top-headlines")
            .query_param("country", "gb");
        then.status(200).json_body(json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"name": "BBC"}, "title": "A", "description": "d",
                 "url": "https://example.com/a", "publishedAt": "2024-05-01T10:00:00Z"},
                {"source": {"name": "Sky"}, "title": "B", "description": null,
                 "url": "https://example.com/b", "publishedAt": "2024-05-01T09:00:00Z"}
            ]
        }));
    });

    let app = app_for(&server.base_url(), Some("k-test"));

    // list
    let v = rpc(
        &app,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools.list"}"#.to_string(),
    )
    .await;
    let tools = v["result"]["tools"].as_array().unwrap();
    assert_eq!(tools[0]["name"], "news.latest_headlines");

    // call
    let v = rpc(
        &app,
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools.call",
            "params": {"name": "news.latest_headlines", "arguments": {"country": "gb"}}
        })
        .to_string(),
    )
    .await;
    let articles = v["result"]["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "A");
    assert_eq!(articles[1]["source"], "Sky");
    assert!(articles[1]["description"].is_null());
}

#[tokio::test]
async fn http_e2e_upstream_down_yields_empty_list() {
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/v2/top-headlines");
        then.status(500).body("boom");
    });

    let app = app_for(&server.base_url(), Some("k-test"));
    let v = rpc(
        &app,
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools.call",
            "params": {"name": "news.latest_headlines", "arguments": {}}
        })
        .to_string(),
    )
    .await;
    assert_eq!(v["result"]["articles"], json!([]));
}

#[tokio::test]
async fn http_e2e_missing_key_is_an_rpc_error() {
    let app = app_for("http://localhost:0", None);
    let v = rpc(
        &app,
        json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools.call",
            "params": {"name": "news.latest_headlines", "arguments": {}}
        })
        .to_string(),
    )
    .await;
    assert_eq!(v["error"]["code"], -32000);
    assert!(v["error"]["message"]
        .as_str()
        .unwrap()
        .contains("NEWS_API_KEY"));
}
