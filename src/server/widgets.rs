use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::AppState;
use crate::models::{Mode, SlateGame, SlateSource, Sport};
use crate::player::resolve_player;
use crate::projection::sample_projection;
use crate::widgets::{widgets_for, WidgetDefinition, WIDGET_DEFINITIONS};

const SLATE_CACHE_CONTROL: &str = "public, max-age=15";
const PLAYER_CACHE_CONTROL: &str = "public, max-age=60";

#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    pub sport: Option<String>,
    pub mode: Option<String>,
    pub name: Option<String>,
}

/// Slate game as the widget reads it: `home`/`away` mirror the team names
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGame {
    #[serde(flatten)]
    pub game: SlateGame,
    pub home: String,
    pub away: String,
    pub provider: SlateSource,
}

impl WireGame {
    fn new(game: SlateGame, provider: SlateSource) -> Self {
        Self {
            home: game.home_team.clone(),
            away: game.away_team.clone(),
            game,
            provider,
        }
    }
}

#[derive(Debug, Serialize)]
struct SlateResponse {
    sport: Sport,
    mode: Mode,
    date: String,
    games: Vec<WireGame>,
    source: SlateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

async fn load_slate(
    state: &AppState,
    sport: Sport,
    mode: Mode,
    now: DateTime<Utc>,
) -> SlateResponse {
    // the adapter resolves a bad timezone to the mock slate on its own
    let date = state.slates.date(now).unwrap_or_else(|e| {
        warn!(%sport, error = %e, "slate date unavailable, reporting UTC date");
        now.format("%Y-%m-%d").to_string()
    });
    let result = state.slates.tonight_at(sport, now).await.into_fetch_result();
    let source = result.source;

    SlateResponse {
        sport,
        mode,
        date,
        games: result
            .games
            .into_iter()
            .map(|game| WireGame::new(game, source))
            .collect(),
        source,
        message: result.message,
    }
}

/// GET /api/widgets/tonights-slate
///
/// Always answers 200 so the widget can render something.
pub async fn tonights_slate(
    State(state): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    let sport = Sport::parse_or_default(query.sport.as_deref());
    let mode = Mode::parse_or_default(query.mode.as_deref());

    let slate = load_slate(&state, sport, mode, Utc::now()).await;
    ([(header::CACHE_CONTROL, SLATE_CACHE_CONTROL)], Json(slate)).into_response()
}

/// GET /api/widgets/player-card
pub async fn player_card(
    State(state): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    let raw_sport = query
        .sport
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(Sport::Nba.as_str());
    let sport = Sport::parse(raw_sport);
    let mode = Mode::parse_or_default(query.mode.as_deref());
    let name = query.name.as_deref().unwrap_or_default();

    let player = resolve_player(
        state.slates.client(),
        &state.slates.config().espn_base_url,
        sport,
        name,
    )
    .await;

    let body = json!({
        "sport": raw_sport.trim().to_uppercase(),
        "mode": mode,
        "player": player,
    });

    ([(header::CACHE_CONTROL, PLAYER_CACHE_CONTROL)], Json(body)).into_response()
}

/// GET /api/widgets/metadata
pub async fn metadata(Query(query): Query<WidgetQuery>) -> Json<serde_json::Value> {
    let widgets: Vec<&WidgetDefinition> = match query.sport.as_deref() {
        None => WIDGET_DEFINITIONS.iter().collect(),
        Some(raw) => match Sport::parse(raw) {
            Some(sport) => widgets_for(sport),
            None => Vec::new(),
        },
    };
    Json(json!({ "widgets": widgets }))
}

/// GET /api/widgets/rb-vs-dline
pub async fn rb_vs_dline(Query(query): Query<WidgetQuery>) -> Json<serde_json::Value> {
    let mode = Mode::parse_or_default(query.mode.as_deref());
    Json(json!({
        "projection": sample_projection(),
        "mode": mode,
    }))
}
