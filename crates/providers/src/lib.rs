mod config;
mod fixtures;
mod news;

use touchline_core::{ExternalArticle, ExternalFixture, FailureKind};

pub use config::ProviderConfig;
pub use fixtures::ApiFootballClient;
pub use news::NewsApiClient;

/// Live source of transfer-news articles. The engine is generic over this so
/// tests can inject canned results without a network.
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self, limit: usize) -> Result<Vec<ExternalArticle>, FailureKind>;
}

/// Live source of upcoming fixtures for the configured league and season.
pub trait FixtureSource: Send + Sync {
    async fn fetch_fixtures(&self, limit: usize) -> Result<Vec<ExternalFixture>, FailureKind>;
}
