use reqwest::Client;
use serde::Deserialize;
use touchline_core::{ExternalArticle, FailureKind};
use tracing::warn;

use crate::config::ProviderConfig;
use crate::NewsSource;

const NEWS_TOPIC: &str = "football transfers premier league";

/// Client for the news provider (`/v2/everything` shape). One GET per call,
/// no retry: a chat turn gets at most one attempt so latency stays bounded.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: Client,
    config: ProviderConfig,
}

impl NewsApiClient {
    pub fn new(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }
}

impl NewsSource for NewsApiClient {
    async fn fetch_news(&self, limit: usize) -> Result<Vec<ExternalArticle>, FailureKind> {
        let url = format!("{}/v2/everything", self.config.news_base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", NEWS_TOPIC.to_string()),
                ("language", "en".to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", limit.to_string()),
                ("apiKey", self.config.news_api_key.clone()),
            ])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<NewsBody>().await {
                    Ok(body) => normalize_news(body, limit),
                    Err(err) => {
                        // without_url: the query string carries the api key
                        warn!(error = %err.without_url(), "news provider body was not decodable");
                        Err(FailureKind::Unreachable)
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "news provider returned an error status");
                Err(FailureKind::Unreachable)
            }
            Err(err) => {
                warn!(error = %err.without_url(), "news provider unreachable");
                Err(FailureKind::Unreachable)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsBody {
    articles: Option<Vec<NewsItem>>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    title: Option<String>,
    source: Option<NewsOutlet>,
}

#[derive(Debug, Deserialize)]
struct NewsOutlet {
    name: Option<String>,
}

/// Truncates to `limit` preserving provider order and drops everything not in
/// the normalized shape. An absent or empty article list is `NoData`.
pub(crate) fn normalize_news(
    body: NewsBody,
    limit: usize,
) -> Result<Vec<ExternalArticle>, FailureKind> {
    let items = body.articles.unwrap_or_default();
    if items.is_empty() {
        return Err(FailureKind::NoData);
    }

    Ok(items
        .into_iter()
        .take(limit)
        .map(|item| ExternalArticle {
            title: item.title.unwrap_or_else(|| "(untitled)".to_string()),
            source_name: item
                .source
                .and_then(|outlet| outlet.name)
                .unwrap_or_else(|| "unknown".to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> NewsBody {
        serde_json::from_str(body).expect("valid test body")
    }

    #[test]
    fn normalizes_and_truncates_preserving_order() {
        let body = parse(
            r#"{"articles": [
                {"title": "First", "source": {"name": "Sky Sports"}},
                {"title": "Second", "source": {"name": "BBC Sport"}},
                {"title": "Third", "source": {"name": "Guardian"}},
                {"title": "Fourth", "source": {"name": "Athletic"}}
            ]}"#,
        );

        let articles = normalize_news(body, 3).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "First");
        assert_eq!(articles[0].source_name, "Sky Sports");
        assert_eq!(articles[2].title, "Third");
    }

    #[test]
    fn absent_article_list_is_no_data() {
        let body = parse(r#"{"status": "ok"}"#);
        assert_eq!(normalize_news(body, 3), Err(FailureKind::NoData));
    }

    #[test]
    fn empty_article_list_is_no_data() {
        let body = parse(r#"{"articles": []}"#);
        assert_eq!(normalize_news(body, 3), Err(FailureKind::NoData));
    }

    #[test]
    fn missing_fields_get_placeholder_values() {
        let body = parse(r#"{"articles": [{"source": {}}]}"#);
        let articles = normalize_news(body, 3).unwrap();
        assert_eq!(articles[0].title, "(untitled)");
        assert_eq!(articles[0].source_name, "unknown");
    }
}
