use serde::Deserialize;

pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub deprecate_rest: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let deprecate_rest = std::env::var("DEPRECATE_REST")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        Self {
            mode,
            port,
            deprecate_rest,
        }
    }
}

/// Per-backend settings for the NewsAPI client. All fields optional; missing
/// values fall back to the client defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub headlines: ToolConfig,
}

impl AppConfig {
    /// Load the optional TOML file named by `NEWS_GATEWAY_CONFIG`, then let
    /// environment variables override it. Env always wins so a deployed
    /// container can keep the file static and rotate the key separately.
    pub fn from_env_and_toml() -> Self {
        let mut cfg = match std::env::var("NEWS_GATEWAY_CONFIG") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(raw) => match toml::from_str::<AppConfig>(&raw) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "ignoring unparseable config file");
                        AppConfig::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "ignoring unreadable config file");
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        };

        if let Ok(v) = std::env::var("NEWSAPI_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.headlines.base_url = Some(v);
            }
        }
        if let Ok(v) = std::env::var("NEWS_API_KEY") {
            if !v.trim().is_empty() {
                cfg.headlines.api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("NEWSAPI_TIMEOUT_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                cfg.headlines.timeout_ms = Some(ms);
            }
        }
        if let Ok(v) = std::env::var("NEWSAPI_CONNECT_TIMEOUT_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                cfg.headlines.connect_timeout_ms = Some(ms);
            }
        }

        cfg
    }
}
