//! ESPN's public site API, used as the secondary provider.
//!
//! No key is needed. The payloads are large and loosely versioned, so only
//! the handful of fields the dashboard shows are pulled out of raw JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::error::ProviderError;
use crate::models::{SlateGame, Sport};
use crate::utils::fields::{self, FieldChain};

const TEAM_NAME: FieldChain = FieldChain::new(&[
    "/team/shortDisplayName",
    "/team/abbreviation",
    "/team/name",
    "/team/displayName",
]);
const EVENT_STATUS: FieldChain = FieldChain::or(
    &["/status/type/shortDetail", "/status/type/description"],
    "SCHEDULED",
);
const EVENT_VENUE: FieldChain = FieldChain::new(&[
    "/competitions/0/venue/fullName",
    "/venue/fullName",
]);

const ATHLETE_NAME: FieldChain = FieldChain::new(&["/fullName", "/displayName", "/name"]);
const ATHLETE_TEAM: FieldChain = FieldChain::new(&[
    "/team/displayName",
    "/team/shortDisplayName",
    "/team/name",
]);
const ATHLETE_POSITION: FieldChain = FieldChain::new(&[
    "/position/abbreviation",
    "/position/displayName",
    "/position/name",
]);

/// First athlete match from a search, before fallback rules are applied
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteMatch {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
}

pub struct EspnClient<'a> {
    client: &'a Client,
    base_url: &'a str,
}

impl<'a> EspnClient<'a> {
    pub fn new(client: &'a Client, base_url: &'a str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    /// Scoreboard for one day (`dates=YYYYMMDD`)
    pub async fn fetch_scoreboard(
        &self,
        sport: Sport,
        compact_date: &str,
    ) -> Result<Vec<SlateGame>, ProviderError> {
        let (group, league) = sport.espn_path();
        let url = format!(
            "{}/apis/site/v2/sports/{}/{}/scoreboard",
            self.base_url, group, league
        );
        let body = self.get_json(&url, &[("dates", compact_date)]).await?;
        let events = fields::envelope_items(&body, &["events"]);
        Ok(map_scoreboard(sport, &events, Utc::now()))
    }

    /// Athlete search; `Ok(None)` when ESPN has no match
    pub async fn search_athlete(
        &self,
        sport: Sport,
        name: &str,
    ) -> Result<Option<AthleteMatch>, ProviderError> {
        let (group, league) = sport.espn_path();
        let url = format!(
            "{}/apis/common/v3/sports/{}/{}/athletes",
            self.base_url, group, league
        );
        let body = self.get_json(&url, &[("search", name)]).await?;

        // ESPN sometimes uses `items`, sometimes `athletes`
        let athletes = fields::envelope_items(&body, &["athletes", "items"]);
        let Some(first) = athletes.first() else {
            warn!(%sport, query = name, "no ESPN athletes for search");
            return Ok(None);
        };

        Ok(Some(AthleteMatch {
            id: fields::id_at(first, "/id"),
            full_name: ATHLETE_NAME.text(first),
            team: ATHLETE_TEAM.text(first),
            position: ATHLETE_POSITION.text(first),
        }))
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Map scoreboard `events` into slate games
pub fn map_scoreboard(sport: Sport, events: &[Value], now: DateTime<Utc>) -> Vec<SlateGame> {
    events
        .iter()
        .enumerate()
        .map(|(idx, event)| map_event(sport, event, idx, now))
        .collect()
}

fn map_event(sport: Sport, event: &Value, idx: usize, now: DateTime<Utc>) -> SlateGame {
    let competitors = event
        .pointer("/competitions/0/competitors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let side = |home_away: &str, fallback_idx: usize| {
        competitors
            .iter()
            .find(|c| c.get("homeAway").and_then(Value::as_str) == Some(home_away))
            .or_else(|| competitors.get(fallback_idx))
    };

    let team_name = |competitor: Option<&Value>, default: &str| {
        competitor
            .and_then(|c| TEAM_NAME.text(c))
            .unwrap_or_else(|| default.to_string())
    };

    SlateGame {
        id: fields::id_at(event, "/id").unwrap_or_else(|| format!("espn-{}", idx)),
        home_team: team_name(side("home", 0), "Home"),
        away_team: team_name(side("away", 1), "Away"),
        start_time: fields::string_at(event, "/date")
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        league: sport,
        venue: EVENT_VENUE.text(event),
        status: EVENT_STATUS.text(event),
    }
}
