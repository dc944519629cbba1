use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leagues the dashboard knows how to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    #[serde(rename = "NFL")]
    Nfl,
    #[serde(rename = "NBA")]
    Nba,
    #[serde(rename = "MLB")]
    Mlb,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Nfl, Sport::Nba, Sport::Mlb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Nfl => "NFL",
            Sport::Nba => "NBA",
            Sport::Mlb => "MLB",
        }
    }

    /// Case-insensitive parse; `None` for anything outside NFL/NBA/MLB
    pub fn parse(value: &str) -> Option<Sport> {
        match value.trim().to_uppercase().as_str() {
            "NFL" => Some(Sport::Nfl),
            "NBA" => Some(Sport::Nba),
            "MLB" => Some(Sport::Mlb),
            _ => None,
        }
    }

    /// Query-string parse used by the read routes: unknown or missing means NFL
    pub fn parse_or_default(value: Option<&str>) -> Sport {
        value.and_then(Sport::parse).unwrap_or(Sport::Nfl)
    }

    /// ESPN path segments (`sports/{group}/{league}`)
    pub fn espn_path(&self) -> (&'static str, &'static str) {
        match self {
            Sport::Nfl => ("football", "nfl"),
            Sport::Nba => ("basketball", "nba"),
            Sport::Mlb => ("baseball", "mlb"),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display density for a dashboard; passed through untouched by the fetch layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Beginner,
    Advanced,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Beginner => "BEGINNER",
            Mode::Advanced => "ADVANCED",
        }
    }

    /// Strict parse, only exact upper-case names are accepted
    pub fn parse(value: &str) -> Option<Mode> {
        match value {
            "BEGINNER" => Some(Mode::Beginner),
            "ADVANCED" => Some(Mode::Advanced),
            _ => None,
        }
    }

    pub fn parse_or_default(value: Option<&str>) -> Mode {
        value
            .and_then(|v| Mode::parse(&v.trim().to_uppercase()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled game, normalized from whatever the provider sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlateGame {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    /// ISO-8601 as received (or RFC 3339 when derived from a timestamp)
    pub start_time: String,
    pub league: Sport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Where a slate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlateSource {
    #[serde(rename = "api-sports")]
    ApiSports,
    #[serde(rename = "espn")]
    Espn,
    #[serde(rename = "mock")]
    Mock,
}

impl SlateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlateSource::ApiSports => "api-sports",
            SlateSource::Espn => "espn",
            SlateSource::Mock => "mock",
        }
    }
}

/// Wire shape handed to route handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlateFetchResult {
    pub games: Vec<SlateGame>,
    pub source: SlateSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Why an adapter served its mock slate instead of live data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingApiKey,
    MissingLeagueConfig,
    UpstreamStatus(u16),
    RequestFailed(String),
    InvalidDate(String),
}

impl FallbackReason {
    /// Human-readable message for the UI, phrased per sport
    pub fn message(&self, sport: Sport) -> String {
        match self {
            FallbackReason::MissingApiKey => format!(
                "Missing SPORTS_API_KEY. Showing demo {} slate until the key is configured.",
                sport
            ),
            FallbackReason::MissingLeagueConfig => format!(
                "{0} league/season are not configured. Add {0}_LEAGUE_ID and {0}_SEASON to pull API-Sports data.",
                sport
            ),
            FallbackReason::UpstreamStatus(status) => format!(
                "API-Sports responded with {}. Showing demo {} slate instead.",
                status, sport
            ),
            FallbackReason::RequestFailed(_) => {
                format!("API-Sports request failed. Showing demo {} slate.", sport)
            }
            FallbackReason::InvalidDate(detail) => format!(
                "Could not determine today's date ({}). Showing demo {} slate.",
                detail, sport
            ),
        }
    }
}

/// Three-tier result of a slate fetch.
///
/// `Live` is provider data, `Empty` is a provider that answered with no games,
/// `Fallback` is the static mock list. Callers can branch on the variant
/// instead of parsing `message` strings.
#[derive(Debug, Clone, PartialEq)]
pub enum SlateOutcome {
    Live {
        games: Vec<SlateGame>,
        source: SlateSource,
        note: Option<String>,
    },
    Empty {
        reason: String,
    },
    Fallback {
        sport: Sport,
        games: Vec<SlateGame>,
        reason: FallbackReason,
    },
}

impl SlateOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, SlateOutcome::Live { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SlateOutcome::Fallback { .. })
    }

    pub fn games(&self) -> &[SlateGame] {
        match self {
            SlateOutcome::Live { games, .. } | SlateOutcome::Fallback { games, .. } => games,
            SlateOutcome::Empty { .. } => &[],
        }
    }

    pub fn into_fetch_result(self) -> SlateFetchResult {
        match self {
            SlateOutcome::Live {
                games,
                source,
                note,
            } => SlateFetchResult {
                games,
                source,
                message: note,
            },
            SlateOutcome::Empty { reason } => SlateFetchResult {
                games: Vec::new(),
                source: SlateSource::ApiSports,
                message: Some(reason),
            },
            SlateOutcome::Fallback {
                sport,
                games,
                reason,
            } => SlateFetchResult {
                games,
                source: SlateSource::Mock,
                message: Some(reason.message(sport)),
            },
        }
    }
}

/// Player card payload; stats stay `None` until a provider supplies them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub next_game: Option<String>,
    pub ppg: Option<f64>,
    pub apg: Option<f64>,
    pub rpg: Option<f64>,
    pub provider: String,
    pub source_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub user_id: String,
    pub sport: Sport,
    pub mode: Mode,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    pub id: String,
    pub dashboard_id: String,
    pub widget_key: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}
