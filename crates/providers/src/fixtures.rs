use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use touchline_core::{ExternalFixture, FailureKind};
use tracing::warn;

use crate::config::ProviderConfig;
use crate::FixtureSource;

/// Client for the fixture provider (`/fixtures` shape, header-based API key).
/// One GET per call, no retry.
#[derive(Debug, Clone)]
pub struct ApiFootballClient {
    http: Client,
    config: ProviderConfig,
}

impl ApiFootballClient {
    pub fn new(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    pub async fn fetch_fixtures_for(
        &self,
        league_id: u32,
        season: u32,
        limit: usize,
    ) -> Result<Vec<ExternalFixture>, FailureKind> {
        let url = format!("{}/fixtures", self.config.football_base_url);
        let response = self
            .http
            .get(&url)
            .header("x-apisports-key", &self.config.football_api_key)
            .query(&[
                ("league", league_id.to_string()),
                ("season", season.to_string()),
                ("next", limit.to_string()),
            ])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<FixtureBody>().await {
                    Ok(body) => normalize_fixtures(body, limit),
                    Err(err) => {
                        warn!(error = %err.without_url(), "fixture provider body was not decodable");
                        Err(FailureKind::Unreachable)
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "fixture provider returned an error status");
                Err(FailureKind::Unreachable)
            }
            Err(err) => {
                warn!(error = %err.without_url(), "fixture provider unreachable");
                Err(FailureKind::Unreachable)
            }
        }
    }
}

impl FixtureSource for ApiFootballClient {
    async fn fetch_fixtures(&self, limit: usize) -> Result<Vec<ExternalFixture>, FailureKind> {
        self.fetch_fixtures_for(self.config.league_id, self.config.season, limit)
            .await
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FixtureBody {
    response: Option<Vec<FixtureItem>>,
}

#[derive(Debug, Deserialize)]
struct FixtureItem {
    teams: Option<FixtureTeams>,
    fixture: Option<FixtureDetails>,
}

#[derive(Debug, Deserialize)]
struct FixtureTeams {
    home: Option<FixtureTeam>,
    away: Option<FixtureTeam>,
}

#[derive(Debug, Deserialize)]
struct FixtureTeam {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureDetails {
    date: Option<String>,
}

/// Normalizes into `ExternalFixture`, truncating to `limit` in provider order.
/// Items missing a team name or a parseable date are dropped; an absent or
/// empty response list, or one with no usable item, is `NoData`.
pub(crate) fn normalize_fixtures(
    body: FixtureBody,
    limit: usize,
) -> Result<Vec<ExternalFixture>, FailureKind> {
    let items = body.response.unwrap_or_default();
    if items.is_empty() {
        return Err(FailureKind::NoData);
    }

    let fixtures = items
        .into_iter()
        .filter_map(normalize_item)
        .take(limit)
        .collect::<Vec<_>>();

    if fixtures.is_empty() {
        return Err(FailureKind::NoData);
    }
    Ok(fixtures)
}

fn normalize_item(item: FixtureItem) -> Option<ExternalFixture> {
    let teams = item.teams?;
    let home_team = teams.home.and_then(|team| team.name)?;
    let away_team = teams.away.and_then(|team| team.name)?;
    let raw_date = item.fixture.and_then(|details| details.date)?;
    let (kickoff_date, kickoff_time) = parse_kickoff(&raw_date)?;

    Some(ExternalFixture {
        home_team,
        away_team,
        kickoff_date,
        kickoff_time,
    })
}

/// Providers publish ISO8601 kickoff timestamps; some fixtures carry only a
/// date until kickoff is confirmed.
fn parse_kickoff(raw: &str) -> Option<(NaiveDate, Option<chrono::NaiveTime>)> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some((datetime.date_naive(), Some(datetime.time())));
    }

    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|date| (date, None))
}
