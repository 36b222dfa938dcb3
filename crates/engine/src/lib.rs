use std::sync::Arc;
use std::time::Instant;

use touchline_core::{
    classify, format, normalize_text, pattern_reply, EngineError, FailureKind, Intent,
    KnowledgeBase, QueryResult, FALLBACK_GUIDANCE,
};
use touchline_observability::AppMetrics;
use touchline_providers::{FixtureSource, NewsSource};
use tracing::{info, instrument};

const NEWS_LIMIT: usize = 3;
const FIXTURE_LIMIT: usize = 3;

/// Orchestrates one pass per query: classify, dispatch to exactly one handler,
/// format. Holds only process-wide immutable state, so concurrent requests
/// need no locking.
#[derive(Clone)]
pub struct QueryEngine<N, F>
where
    N: NewsSource,
    F: FixtureSource,
{
    knowledge: Arc<KnowledgeBase>,
    news: N,
    fixtures: F,
    metrics: Arc<AppMetrics>,
}

impl<N, F> QueryEngine<N, F>
where
    N: NewsSource,
    F: FixtureSource,
{
    pub fn new(knowledge: KnowledgeBase, news: N, fixtures: F, metrics: Arc<AppMetrics>) -> Self {
        Self {
            knowledge: Arc::new(knowledge),
            news,
            fixtures,
            metrics,
        }
    }

    /// Answers one query. Fails only for blank input; provider and knowledge
    /// misses degrade into valid text, never into an error.
    #[instrument(skip(self, query))]
    pub async fn respond(&self, query: &str) -> Result<String, EngineError> {
        let started = Instant::now();
        self.metrics.inc_request();

        let normalized = normalize_text(query);
        if normalized.is_empty() {
            return Err(EngineError::InvalidInput);
        }

        let intent = classify(&normalized);
        let result = match intent {
            Intent::TransferNews => self.transfer_news(NEWS_LIMIT).await,
            Intent::Fixtures => self.upcoming_fixtures(FIXTURE_LIMIT).await,
            Intent::KnowledgeLookup => self.local_answer(&normalized),
        };

        let reply = format::render(&result);
        self.metrics.observe_latency(started.elapsed());
        info!(intent = ?intent, reply_chars = reply.len(), "query answered");

        Ok(reply)
    }

    /// Diagnostic path for the transfer-news handler, bypassing classification.
    pub async fn news_digest(&self, limit: usize) -> String {
        format::render(&self.transfer_news(limit).await)
    }

    /// Diagnostic path for the fixture handler, bypassing classification.
    pub async fn fixtures_digest(&self, limit: usize) -> String {
        format::render(&self.upcoming_fixtures(limit).await)
    }

    async fn transfer_news(&self, limit: usize) -> QueryResult {
        self.metrics.inc_provider_call();
        match self.news.fetch_news(limit).await {
            Ok(articles) => QueryResult::Articles(articles),
            // an empty provider renders the news-specific empty message
            Err(FailureKind::NoData) => {
                self.metrics.inc_provider_failure();
                QueryResult::Articles(Vec::new())
            }
            Err(kind) => {
                self.metrics.inc_provider_failure();
                QueryResult::Failure(kind)
            }
        }
    }

    async fn upcoming_fixtures(&self, limit: usize) -> QueryResult {
        self.metrics.inc_provider_call();
        match self.fixtures.fetch_fixtures(limit).await {
            Ok(fixtures) => QueryResult::Fixtures(fixtures),
            Err(FailureKind::NoData) => {
                self.metrics.inc_provider_failure();
                QueryResult::Fixtures(Vec::new())
            }
            Err(kind) => {
                self.metrics.inc_provider_failure();
                QueryResult::Failure(kind)
            }
        }
    }

    fn local_answer(&self, query: &str) -> QueryResult {
        if let Some(text) = self.knowledge.lookup(query) {
            self.metrics.inc_knowledge_hit();
            return QueryResult::Text(text.to_string());
        }

        if let Some(text) = pattern_reply(query) {
            return QueryResult::Text(text.to_string());
        }

        self.metrics.inc_fallback();
        QueryResult::Text(FALLBACK_GUIDANCE.to_string())
    }
}
