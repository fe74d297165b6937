use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

use crate::domain::{Article, FetchError, HeadlinesQuery};
use crate::infra::config::ToolConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::{make_http_client, make_http_client_with};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

const TOOL: &str = "news.latest_headlines";

#[derive(Clone)]
pub struct NewsApiRemote {
    base: String,
    http: Client,
    api_key: Option<String>,
}

impl NewsApiRemote {
    /// The key is injected here rather than read from the environment so the
    /// client stays testable without process-level env mutation.
    pub fn new(base: impl Into<String>, api_key: Option<String>) -> Self {
        let http = make_http_client();
        Self {
            base: base.into(),
            http,
            api_key,
        }
    }

    pub fn from_config(cfg: &ToolConfig) -> Self {
        let base = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http = make_http_client_with(cfg);
        Self {
            base,
            http,
            api_key: cfg.api_key.clone(),
        }
    }

    /// One GET to `/v2/top-headlines`. No retries: a single invocation issues
    /// at most one upstream call.
    pub async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(FetchError::MissingApiKey)?;

        let url = format!("{}/v2/top-headlines", self.base.trim_end_matches('/'));
        let mut params: Vec<(&str, String)> = vec![
            ("country", query.country.clone()),
            ("pageSize", query.page_size.to_string()),
            ("apiKey", api_key.to_owned()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }

        // The key travels only in the query params; never log it.
        tracing::debug!(
            endpoint = %url,
            country = %query.country,
            category = query.category.as_deref(),
            page_size = query.page_size,
            "newsapi.top_headlines request"
        );
        let req_id = generate_request_id();
        let start = Instant::now();

        let (builder, _rid) = add_standard_headers(self.http.get(&url), Some(req_id));
        let resp = builder
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            crate::infra::logging::log_metric(TOOL, "remote_error_total", 1.0);
            return Err(FetchError::UpstreamStatus(resp.status().as_u16()));
        }

        let wire = resp.json::<HeadlinesWire>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let elapsed_ms = start.elapsed().as_millis() as f64;
        crate::infra::logging::log_metric(TOOL, "remote_latency_ms", elapsed_ms);

        Ok(wire.articles.into_iter().map(Article::from).collect())
    }
}

#[derive(Deserialize)]
struct HeadlinesWire {
    articles: Vec<ArticleWire>,
}

// Upstream article shape. Only `description` is optional; any other missing
// field fails the whole payload decode.
#[derive(Deserialize)]
struct ArticleWire {
    source: SourceWire,
    title: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
}

#[derive(Deserialize)]
struct SourceWire {
    name: String,
}

impl From<ArticleWire> for Article {
    fn from(w: ArticleWire) -> Self {
        Article {
            title: w.title,
            description: w.description,
            source: w.source.name,
            url: w.url,
            published_at: w.published_at,
        }
    }
}
