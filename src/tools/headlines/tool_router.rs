use std::future::Future;

use rmcp::handler::server::tool::ToolRouter;

use crate::clients::newsapi::NewsApiRemote;
use crate::domain::HeadlinesQuery;
use crate::infra::config::AppConfig;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::headlines::fetch_or_empty;

#[derive(Clone)]
pub struct HeadlinesSvc<TFetcher> {
    pub fetcher: TFetcher,
}

impl<TFetcher: Send + Sync + 'static> ServerHandler for HeadlinesSvc<TFetcher> {}

#[rmcp::tool_router]
impl HeadlinesSvc<NewsApiRemote> {
    #[rmcp::tool(
        name = "news.latest_headlines",
        description = "Fetch the latest news headlines (NewsAPI top-headlines) filtered by country and optional category"
    )]
    async fn latest_headlines(
        &self,
        params: rmcp::handler::server::tool::Parameters<rmcp::model::JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, rmcp::ErrorData> {
        let query = HeadlinesQuery::from_args(&params.0)
            .map_err(|e| rmcp::ErrorData::invalid_params(e, None))?;
        let articles = fetch_or_empty(&self.fetcher, &query)
            .await
            .map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))?;
        Ok(rmcp::Json(serde_json::json!({ "articles": articles })))
    }
}

pub type HeadlinesRouter = ToolRouter<HeadlinesSvc<NewsApiRemote>>;

impl HeadlinesSvc<NewsApiRemote> {
    pub fn router() -> HeadlinesRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}

/// Factory for the rmcp transports. An unconfigured key still yields a
/// serving handler; each call then fails with an actionable configuration
/// error instead of the process refusing to boot.
pub fn factory_from_env() -> (HeadlinesSvc<NewsApiRemote>, HeadlinesRouter) {
    let cfg = AppConfig::from_env_and_toml();
    let fetcher = NewsApiRemote::from_config(&cfg.headlines);
    (HeadlinesSvc { fetcher }, HeadlinesSvc::router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rmcp::handler::server::tool::Parameters;
    use serde_json::json;

    fn params(v: serde_json::Value) -> Parameters<rmcp::model::JsonObject> {
        Parameters(v.as_object().unwrap().clone())
    }

    fn svc_for(base: &str, key: Option<&str>) -> HeadlinesSvc<NewsApiRemote> {
        HeadlinesSvc {
            fetcher: NewsApiRemote::new(base, key.map(str::to_owned)),
        }
    }

    #[test]
    fn tool_router_contains_latest_headlines() {
        let router: HeadlinesRouter = HeadlinesSvc::router();
        let names: Vec<String> = router.into_iter().map(|r| r.name().to_string()).collect();
        assert!(
            names.iter().any(|n| n == "news.latest_headlines"),
            "missing tool 'news.latest_headlines', got: {:?}",
            names
        );
    }

    #[tokio::test]
    async fn tool_call_success_returns_structured_articles() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/v2/top-headlines")
                .query_param("country", "us")
                .query_param("pageSize", "2");
            then.status(200).json_body(json!({
                "status": "ok",
                "totalResults": 2,
                "articles": [
                    {"source": {"name": "A"}, "title": "first", "description": "d1",
                     "url": "https://example.com/1", "publishedAt": "2024-05-01T10:00:00Z"},
                    {"source": {"name": "B"}, "title": "second", "description": null,
                     "url": "https://example.com/2", "publishedAt": "2024-05-01T09:00:00Z"}
                ]
            }));
        });

        let svc = svc_for(&server.base_url(), Some("k-test"));
        let rmcp::Json(val) = svc
            .latest_headlines(params(json!({"page_size": 2})))
            .await
            .expect("tool should succeed");

        let articles = val["articles"].as_array().expect("articles array");
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0]["title"], "first");
        assert_eq!(articles[1]["title"], "second");
        assert!(articles[1]["description"].is_null());
    }

    #[tokio::test]
    async fn tool_call_invalid_page_size_is_invalid_params() {
        let svc = svc_for("http://localhost:0", Some("k-test"));
        let res = svc.latest_headlines(params(json!({"page_size": 0}))).await;

        let err = match res {
            Err(e) => e,
            Ok(_) => panic!("expected invalid params error, got Ok"),
        };

        // JSON-RPC invalid params is -32602
        assert_eq!(err.code.0, -32602, "expected invalid params code");
        assert!(
            err.message.contains("page_size"),
            "message should mention page_size, got: {}",
            err.message
        );
    }

    #[tokio::test]
    async fn tool_call_without_key_is_internal_error() {
        let svc = svc_for("http://localhost:0", None);
        let err = match svc.latest_headlines(params(json!({}))).await {
            Err(e) => e,
            Ok(_) => panic!("expected configuration error, got Ok"),
        };
        assert!(err.message.contains("NEWS_API_KEY"));
    }

    #[tokio::test]
    async fn tool_call_upstream_down_returns_empty_articles() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/top-headlines");
            then.status(500).body("boom");
        });

        let svc = svc_for(&server.base_url(), Some("k-test"));
        let rmcp::Json(val) = svc
            .latest_headlines(params(json!({})))
            .await
            .expect("fail-soft should not raise");
        assert_eq!(val["articles"], json!([]));
    }
}
