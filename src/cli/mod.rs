use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::newsapi::NewsApiRemote;
use crate::domain::HeadlinesQuery;
use crate::infra::config::AppConfig;

#[derive(Parser)]
#[command(name = "news-mcp-gateway")]
#[command(about = "News MCP Gateway - serves the news.latest_headlines tool; admin subcommands")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and configuration summary
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Fetch headlines once against the configured upstream
    TestFetch {
        /// 2-letter country code
        #[arg(short, long, default_value = "us")]
        country: String,
        /// Optional category filter
        #[arg(long)]
        category: Option<String>,
        /// Number of headlines to request
        #[arg(short, long, default_value_t = 10)]
        page_size: u32,
    },
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::TestFetch {
            country,
            category,
            page_size,
        } => match test_fetch(country, category, page_size).await {
            Ok(_) => {
                println!("✅ Headline fetch test passed");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Headline fetch test failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let _config = crate::infra::config::Config::from_env();

    let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
    if !matches!(mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", mode).into());
    }

    if mode == "server" {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        if port == 0 {
            return Err("PORT cannot be 0".into());
        }
    }

    // Startup-class check: without the key every fetch fails.
    let app_cfg = AppConfig::from_env_and_toml();
    if app_cfg
        .headlines
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .is_none()
    {
        return Err("NEWS_API_KEY is not set; news.latest_headlines cannot fetch without it".into());
    }

    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    // Health check
    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    // Try to get tools list
    let tools_response = client
        .post(format!("{}/mcp", url))
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            println!("🔧 Tools: ✅ Available");
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    // Configuration summary. The key itself is never printed.
    let app_cfg = AppConfig::from_env_and_toml();
    println!("\n📋 Configuration:");
    println!(
        "  Mode: {}",
        std::env::var("MODE").unwrap_or_else(|_| "server".into())
    );
    println!(
        "  Port: {}",
        std::env::var("PORT").unwrap_or_else(|_| "8080".into())
    );
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    println!(
        "  NewsAPI Base: {}",
        app_cfg
            .headlines
            .base_url
            .unwrap_or_else(|| crate::clients::newsapi::DEFAULT_BASE_URL.into())
    );
    println!(
        "  NewsAPI Key: {}",
        if app_cfg.headlines.api_key.is_some() {
            "configured"
        } else {
            "missing"
        }
    );

    Ok(())
}

async fn test_fetch(
    country: String,
    category: Option<String>,
    page_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    // Route the CLI inputs through the same normalization as a tool call.
    let mut args = serde_json::Map::new();
    args.insert("country".into(), country.into());
    if let Some(category) = category {
        args.insert("category".into(), category.into());
    }
    args.insert("page_size".into(), page_size.into());
    let query = HeadlinesQuery::from_args(&args)?;

    let app_cfg = AppConfig::from_env_and_toml();
    let client = NewsApiRemote::from_config(&app_cfg.headlines);
    let articles = client.top_headlines(&query).await?;

    println!(
        "📰 Top headlines (country={}, page_size={}):",
        query.country, query.page_size
    );
    println!("🔍 Got {} articles:", articles.len());

    for (i, article) in articles.iter().enumerate() {
        println!(
            "  {}. {} — {} ({})",
            i + 1,
            article.title,
            article.source,
            article.published_at
        );
    }

    Ok(())
}
