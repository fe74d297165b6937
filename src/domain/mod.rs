use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Message(String),
}

/// Failure classes for an upstream headline fetch. The split matters: the
/// policy layer swallows upstream unavailability but must let configuration
/// and payload-shape failures reach the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("NEWS_API_KEY not configured; set it to enable news.latest_headlines")]
    MissingApiKey,
    #[error("upstream status {0}")]
    UpstreamStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed upstream payload: {0}")]
    Decode(String),
}

/// One projected headline. `published_at` carries the upstream timestamp
/// string verbatim; `description` serializes as `null` when upstream has none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub source: String,
    pub url: String,
    pub published_at: String,
}

/// Category vocabulary recognized by the upstream top-headlines endpoint.
/// Advertised in the tool schema only; unknown values are passed through and
/// rejected upstream.
pub const CATEGORIES: [&str; 7] = [
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesQuery {
    pub category: Option<String>,
    pub country: String,
    pub page_size: u32,
}

impl Default for HeadlinesQuery {
    fn default() -> Self {
        Self {
            category: None,
            country: Self::DEFAULT_COUNTRY.to_owned(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl HeadlinesQuery {
    pub const DEFAULT_COUNTRY: &'static str = "us";
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Normalize raw tool arguments. Absent, null and empty-string optionals
    /// collapse to their defaults; `page_size` must be an integer in
    /// 1..=MAX_PAGE_SIZE (the upstream per-call ceiling).
    pub fn from_args(args: &serde_json::Map<String, serde_json::Value>) -> Result<Self, String> {
        let category = match args.get("category") {
            None => None,
            Some(v) if v.is_null() => None,
            Some(v) => {
                let s = v
                    .as_str()
                    .ok_or_else(|| "category must be a string".to_string())?
                    .trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_owned())
                }
            }
        };

        let country = match args.get("country") {
            None => Self::DEFAULT_COUNTRY.to_owned(),
            Some(v) if v.is_null() => Self::DEFAULT_COUNTRY.to_owned(),
            Some(v) => {
                let s = v
                    .as_str()
                    .ok_or_else(|| "country must be a string".to_string())?
                    .trim();
                if s.is_empty() {
                    Self::DEFAULT_COUNTRY.to_owned()
                } else {
                    s.to_owned()
                }
            }
        };

        let page_size = match args.get("page_size") {
            None => Self::DEFAULT_PAGE_SIZE,
            Some(v) if v.is_null() => Self::DEFAULT_PAGE_SIZE,
            Some(v) => {
                let n = v
                    .as_u64()
                    .ok_or_else(|| "page_size must be a positive integer".to_string())?;
                if n < 1 || n > Self::MAX_PAGE_SIZE as u64 {
                    return Err(format!(
                        "page_size must be between 1 and {}",
                        Self::MAX_PAGE_SIZE
                    ));
                }
                n as u32
            }
        };

        Ok(Self {
            category,
            country,
            page_size,
        })
    }
}

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError>;
}
