use chrono::{DateTime, Utc};
use reqwest::Client;

use super::api_sports::{self, mock_game, GameFieldTable, SportProfile, START_TIME};
use crate::config::SportsConfig;
use crate::models::{SlateGame, SlateOutcome, Sport};
use crate::utils::fields::FieldChain;

pub const DEFAULT_BASE_URL: &str = "https://v1.baseball.api-sports.io";

pub const FIELDS: GameFieldTable = GameFieldTable {
    id: FieldChain::new(&["/id", "/gameId"]),
    id_prefix: "mlb",
    home_team: FieldChain::or(&["/teams/home/name", "/teams/home/nickname"], "Home"),
    away_team: FieldChain::or(&["/teams/away/name", "/teams/away/nickname"], "Away"),
    start_time: START_TIME,
    venue: FieldChain::new(&["/venue/name", "/league/name"]),
    status: None,
};

pub static PROFILE: SportProfile = SportProfile {
    sport: Sport::Mlb,
    table: FIELDS,
    off_day: "off day or offseason",
    retry_without_season: false,
    mock_slate,
};

pub fn mock_slate(now: DateTime<Utc>) -> Vec<SlateGame> {
    vec![mock_game(
        "mock-mlb-1",
        "Yankees",
        "Red Sox",
        "Yankee Stadium",
        Sport::Mlb,
        now,
    )]
}

pub async fn fetch_tonight_mlb_slate(client: &Client, config: &SportsConfig) -> SlateOutcome {
    api_sports::fetch_tonight_slate(client, config, &PROFILE, Utc::now()).await
}
