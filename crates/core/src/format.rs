use crate::models::{ExternalArticle, ExternalFixture, FailureKind, QueryResult};

pub const NEWS_HEADER: &str = "Latest transfer news:";
pub const NO_NEWS: &str = "No recent transfer news right now. Check back soon.";
pub const FIXTURES_HEADER: &str = "Upcoming fixtures:";
pub const NO_FIXTURES: &str = "No upcoming fixtures found.";
pub const SOURCE_UNREACHABLE: &str =
    "The live data source is temporarily unavailable. Please try again in a little while.";
pub const SOURCE_EMPTY: &str = "The live data source has nothing available right now.";

/// Renders a result into one plain-text block. Pure and deterministic: the
/// same input always yields byte-identical output.
pub fn render(result: &QueryResult) -> String {
    match result {
        QueryResult::Text(text) => text.clone(),
        QueryResult::Articles(articles) if articles.is_empty() => NO_NEWS.to_string(),
        QueryResult::Articles(articles) => render_articles(articles),
        QueryResult::Fixtures(fixtures) if fixtures.is_empty() => NO_FIXTURES.to_string(),
        QueryResult::Fixtures(fixtures) => render_fixtures(fixtures),
        QueryResult::Failure(FailureKind::Unreachable) => SOURCE_UNREACHABLE.to_string(),
        QueryResult::Failure(FailureKind::NoData) => SOURCE_EMPTY.to_string(),
    }
}

fn render_articles(articles: &[ExternalArticle]) -> String {
    let items = articles
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            format!(
                "{}. {}\n   source: {}",
                idx + 1,
                article.title,
                article.source_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{NEWS_HEADER}\n\n{items}")
}

fn render_fixtures(fixtures: &[ExternalFixture]) -> String {
    let items = fixtures
        .iter()
        .enumerate()
        .map(|(idx, fixture)| {
            let when = match fixture.kickoff_time {
                Some(time) => format!("{} at {}", fixture.kickoff_date, time.format("%H:%M")),
                None => fixture.kickoff_date.to_string(),
            };
            format!(
                "{}. {} vs {}\n   {}",
                idx + 1,
                fixture.home_team,
                fixture.away_team,
                when
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{FIXTURES_HEADER}\n\n{items}")
}
