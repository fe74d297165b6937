pub mod tool_router;

use async_trait::async_trait;
use serde_json::json;

use crate::clients::newsapi::NewsApiRemote;
use crate::domain::{Article, FetchError, HeadlinesQuery, Tool, ToolError, CATEGORIES};
use crate::infra::config::AppConfig;

/// Fail-soft policy shared by both hosting surfaces: upstream unavailability
/// becomes an empty list (one warn diagnostic), while configuration and
/// payload-shape failures propagate to the caller.
pub async fn fetch_or_empty(
    fetcher: &NewsApiRemote,
    query: &HeadlinesQuery,
) -> Result<Vec<Article>, FetchError> {
    match fetcher.top_headlines(query).await {
        Ok(articles) => Ok(articles),
        Err(e @ FetchError::MissingApiKey) => Err(e),
        Err(e @ FetchError::Decode(_)) => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "top_headlines fetch failed; returning empty list");
            Ok(Vec::new())
        }
    }
}

pub fn input_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "enum": CATEGORIES },
            "country": { "type": "string", "default": HeadlinesQuery::DEFAULT_COUNTRY },
            "page_size": {
                "type": "integer",
                "minimum": 1,
                "maximum": HeadlinesQuery::MAX_PAGE_SIZE,
                "default": HeadlinesQuery::DEFAULT_PAGE_SIZE
            }
        },
        "required": []
    })
}

#[derive(Clone)]
pub struct HeadlinesTool {
    fetcher: NewsApiRemote,
}

impl HeadlinesTool {
    pub fn new(fetcher: NewsApiRemote) -> Self {
        Self { fetcher }
    }

    pub fn from_env() -> Self {
        let cfg = AppConfig::from_env_and_toml();
        Self::new(NewsApiRemote::from_config(&cfg.headlines))
    }
}

#[async_trait]
impl Tool for HeadlinesTool {
    fn name(&self) -> &'static str {
        "news.latest_headlines"
    }
    fn description(&self) -> &'static str {
        "Latest news headlines (NewsAPI top-headlines) filtered by country and optional category"
    }
    fn input_schema(&self) -> serde_json::Value {
        input_schema()
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let empty = serde_json::Map::new();
        let obj = arguments.as_object().unwrap_or(&empty);
        let query = HeadlinesQuery::from_args(obj).map_err(ToolError::Message)?;
        let articles = fetch_or_empty(&self.fetcher, &query)
            .await
            .map_err(|e| ToolError::Message(e.to_string()))?;
        Ok(json!({ "articles": articles }))
    }
}
