use chrono::{DateTime, Utc};
use reqwest::Client;

use super::api_sports::{self, mock_game, GameFieldTable, SportProfile, START_TIME};
use crate::config::SportsConfig;
use crate::models::{SlateGame, SlateOutcome, Sport};
use crate::utils::fields::FieldChain;

pub const DEFAULT_BASE_URL: &str = "https://v1.american-football.api-sports.io";

/// American-football records nest most fields under `game`
pub const FIELDS: GameFieldTable = GameFieldTable {
    id: FieldChain::new(&["/id", "/gameId", "/game/id"]),
    id_prefix: "nfl",
    home_team: FieldChain::or(&["/teams/home/name", "/teams/home/nickname"], "Home"),
    away_team: FieldChain::or(&["/teams/away/name", "/teams/away/nickname"], "Away"),
    start_time: START_TIME,
    // league name is a last resort; read first it would hide every real venue
    venue: FieldChain::new(&["/game/venue/name", "/game/venue", "/venue/name", "/league/name"]),
    status: None,
};

pub static PROFILE: SportProfile = SportProfile {
    sport: Sport::Nfl,
    table: FIELDS,
    off_day: "off week or offseason",
    retry_without_season: false,
    mock_slate,
};

pub fn mock_slate(now: DateTime<Utc>) -> Vec<SlateGame> {
    vec![mock_game(
        "mock-nfl-1",
        "Giants",
        "Eagles",
        "MetLife Stadium",
        Sport::Nfl,
        now,
    )]
}

pub async fn fetch_tonight_nfl_slate(client: &Client, config: &SportsConfig) -> SlateOutcome {
    api_sports::fetch_tonight_slate(client, config, &PROFILE, Utc::now()).await
}
