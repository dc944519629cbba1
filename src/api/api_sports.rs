use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::SportsConfig;
use crate::error::ProviderError;
use crate::models::{FallbackReason, SlateGame, SlateOutcome, SlateSource, Sport};
use crate::utils::dates::slate_date;
use crate::utils::fields::{self, FieldChain, TimeField};

const API_KEY_HEADER: &str = "x-apisports-key";
const ENVELOPE_KEYS: &[&str] = &["response", "data"];

/// Start time candidates shared by every API-Sports league
pub const START_TIME: &[TimeField] = &[
    TimeField::Text("/date"),
    TimeField::Text("/date/start"),
    TimeField::UnixSeconds("/date/timestamp"),
];

/// Field precedence for turning one raw `/games` record into a `SlateGame`
#[derive(Debug, Clone, Copy)]
pub struct GameFieldTable {
    pub id: FieldChain,
    /// Used as `{prefix}-{index}` when no id path resolves
    pub id_prefix: &'static str,
    pub home_team: FieldChain,
    pub away_team: FieldChain,
    pub start_time: &'static [TimeField],
    pub venue: FieldChain,
    pub status: Option<FieldChain>,
}

impl GameFieldTable {
    pub fn map_game(
        &self,
        league: Sport,
        raw: &Value,
        idx: usize,
        now: DateTime<Utc>,
    ) -> SlateGame {
        SlateGame {
            id: self
                .id
                .id(raw)
                .unwrap_or_else(|| format!("{}-{}", self.id_prefix, idx)),
            home_team: self.home_team.text(raw).unwrap_or_default(),
            away_team: self.away_team.text(raw).unwrap_or_default(),
            start_time: fields::start_time(self.start_time, raw, now),
            league,
            venue: self.venue.text(raw),
            status: self.status.and_then(|chain| chain.text(raw)),
        }
    }

    pub fn map_games(&self, league: Sport, raw: &[Value], now: DateTime<Utc>) -> Vec<SlateGame> {
        raw.iter()
            .enumerate()
            .map(|(idx, game)| self.map_game(league, game, idx, now))
            .collect()
    }
}

/// Everything that differs between the NFL, NBA and MLB adapters
pub struct SportProfile {
    pub sport: Sport,
    pub table: GameFieldTable,
    /// Parenthetical used in the "no games today" message
    pub off_day: &'static str,
    /// Retry once without `season` (and with `live=all`) when the first query is empty
    pub retry_without_season: bool,
    pub mock_slate: fn(DateTime<Utc>) -> Vec<SlateGame>,
}

impl SportProfile {
    pub fn fallback(&self, reason: FallbackReason, now: DateTime<Utc>) -> SlateOutcome {
        SlateOutcome::Fallback {
            sport: self.sport,
            games: (self.mock_slate)(now),
            reason,
        }
    }

    fn empty(&self) -> SlateOutcome {
        SlateOutcome::Empty {
            reason: format!(
                "No {} games scheduled today per API-Sports ({}).",
                self.sport, self.off_day
            ),
        }
    }
}

/// Thin `/games` client for one API-Sports host
pub struct ApiSportsClient<'a> {
    client: &'a Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> ApiSportsClient<'a> {
    pub fn new(client: &'a Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/'),
            api_key,
        }
    }

    /// GET `/games` and return the raw record list from the envelope
    pub async fn fetch_games(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, ProviderError> {
        let url = format!("{}/games", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(fields::envelope_items(&body, ENVELOPE_KEYS))
    }
}

/// Query for "today": date, timezone, then league and season
pub fn games_query(
    date: &str,
    timezone: &str,
    league: &str,
    season: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("date", date.to_string()),
        ("timezone", timezone.to_string()),
        ("league", league.to_string()),
        ("season", season.to_string()),
    ]
}

/// Tonight's slate for one sport, never failing.
///
/// Missing configuration short-circuits to the mock slate without touching
/// the network. HTTP and decode failures also land on the mock slate, while a
/// well-formed empty answer is reported as `Empty`.
pub async fn fetch_tonight_slate(
    client: &Client,
    config: &SportsConfig,
    profile: &SportProfile,
    now: DateTime<Utc>,
) -> SlateOutcome {
    let sport = profile.sport;

    let Some(api_key) = config.api_key.as_deref() else {
        warn!(%sport, "SPORTS_API_KEY missing, using mock slate");
        return profile.fallback(FallbackReason::MissingApiKey, now);
    };

    let league = config.league(sport);
    let (Some(league_id), Some(season)) = (league.league_id.as_deref(), league.season.as_deref())
    else {
        warn!(
            %sport,
            "missing {}_LEAGUE_ID or {}_SEASON, using mock slate", sport, sport
        );
        return profile.fallback(FallbackReason::MissingLeagueConfig, now);
    };

    let date = match slate_date(config, now) {
        Ok(date) => date,
        Err(e) => {
            error!(%sport, error = %e, "could not compute slate date");
            return profile.fallback(FallbackReason::InvalidDate(e.to_string()), now);
        }
    };

    let api = ApiSportsClient::new(client, &league.base_url, api_key);
    let query = games_query(&date, &config.timezone, league_id, season);

    let mut raw = match api.fetch_games(&query).await {
        Ok(raw) => raw,
        Err(e) => return fallback_for_error(profile, e, now),
    };

    if raw.is_empty() && profile.retry_without_season {
        warn!(
            %sport,
            %date,
            "empty slate with date/season, retrying without season and with live=all"
        );
        let retry_query = without_season(&query);
        raw = match api.fetch_games(&retry_query).await {
            Ok(raw) => raw,
            Err(e) => return fallback_for_error(profile, e, now),
        };
    }

    let games = profile.table.map_games(sport, &raw, now);
    if games.is_empty() {
        info!(%sport, %date, "provider reports no games");
        return profile.empty();
    }

    debug!(%sport, count = games.len(), "mapped live slate");
    SlateOutcome::Live {
        games,
        source: SlateSource::ApiSports,
        note: None,
    }
}

fn without_season(query: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
    let mut retry: Vec<_> = query
        .iter()
        .filter(|(key, _)| *key != "season")
        .cloned()
        .collect();
    retry.push(("live", "all".to_string()));
    retry
}

fn fallback_for_error(
    profile: &SportProfile,
    err: ProviderError,
    now: DateTime<Utc>,
) -> SlateOutcome {
    let sport = profile.sport;
    let reason = match err {
        ProviderError::Status { status, body } => {
            error!(%sport, status, %body, "API-Sports response error");
            FallbackReason::UpstreamStatus(status)
        }
        other => {
            error!(%sport, error = %other, "error fetching slate from API-Sports");
            FallbackReason::RequestFailed(other.to_string())
        }
    };
    profile.fallback(reason, now)
}

/// Shared builder for mock rows
pub fn mock_game(
    id: &str,
    home_team: &str,
    away_team: &str,
    venue: &str,
    league: Sport,
    now: DateTime<Utc>,
) -> SlateGame {
    SlateGame {
        id: id.to_string(),
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        start_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        league,
        venue: Some(venue.to_string()),
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_query_order() {
        let query = games_query("2025-10-01", "America/New_York", "1", "2025");
        let keys: Vec<_> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["date", "timezone", "league", "season"]);
    }

    #[test]
    fn test_retry_query_drops_season_and_adds_live() {
        let query = games_query("2025-10-01", "UTC", "12", "2024-2025");
        let retry = without_season(&query);
        assert!(retry.iter().all(|(k, _)| *k != "season"));
        assert_eq!(retry.last(), Some(&("live", "all".to_string())));
        assert_eq!(retry.len(), 4);
    }
}
