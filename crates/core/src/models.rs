use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response strategy selected for a query. `KnowledgeLookup` is also the
/// default when no rule matches; its handler falls through to the pattern
/// responder and finally to static guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TransferNews,
    Fixtures,
    KnowledgeLookup,
}

/// One routing rule: if any keyword occurs in the lower-cased query, the rule
/// matches. Rule order is significant, first match wins.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub keywords: &'static [&'static str],
    pub intent: Intent,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeEntry {
    pub category: String,
    pub key: String,
    pub text: String,
}

impl KnowledgeEntry {
    pub fn new(category: &str, key: &str, text: &str) -> Self {
        Self {
            category: category.to_string(),
            key: key.to_string(),
            text: text.to_string(),
        }
    }
}

/// Normalized projection of a news-provider item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalArticle {
    pub title: String,
    pub source_name: String,
}

/// Normalized projection of a fixture-provider item. Kickoff time is optional:
/// some providers publish date-only fixtures until kickoff is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFixture {
    pub home_team: String,
    pub away_team: String,
    pub kickoff_date: NaiveDate,
    pub kickoff_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport error or non-2xx status from the provider.
    Unreachable,
    /// Provider answered but had no usable items.
    NoData,
}

/// What a handler produced for one query; consumed only by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResult {
    Text(String),
    Articles(Vec<ExternalArticle>),
    Fixtures(Vec<ExternalFixture>),
    Failure(FailureKind),
}

/// The only engine-level error. Everything else degrades into valid text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("query must not be empty or blank")]
    InvalidInput,
}
