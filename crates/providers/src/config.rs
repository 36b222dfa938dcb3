use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org";
const DEFAULT_FOOTBALL_BASE_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_LEAGUE_ID: u32 = 39; // Premier League
const DEFAULT_SEASON: u32 = 2025;
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Provider endpoints and credentials. Keys are opaque: they are attached to
/// outbound requests and never logged or echoed anywhere else.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub news_api_key: String,
    pub news_base_url: String,
    pub football_api_key: String,
    pub football_base_url: String,
    pub league_id: u32,
    pub season: u32,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            news_api_key: env::var("TOUCHLINE_NEWS_API_KEY").unwrap_or_default(),
            news_base_url: env::var("TOUCHLINE_NEWS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NEWS_BASE_URL.to_string()),
            football_api_key: env::var("TOUCHLINE_FOOTBALL_API_KEY").unwrap_or_default(),
            football_base_url: env::var("TOUCHLINE_FOOTBALL_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FOOTBALL_BASE_URL.to_string()),
            league_id: env::var("TOUCHLINE_LEAGUE_ID")
                .ok()
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(DEFAULT_LEAGUE_ID),
            season: env::var("TOUCHLINE_SEASON")
                .ok()
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(DEFAULT_SEASON),
            timeout: Duration::from_secs(
                env::var("TOUCHLINE_PROVIDER_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|value| value.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
        }
    }

    /// One shared client for both providers; the total timeout bounds how long
    /// a chat turn can block on an outbound call.
    pub fn build_http_client(&self) -> Result<Client> {
        Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(self.timeout)
            .build()
            .context("failed to build provider HTTP client")
    }
}
