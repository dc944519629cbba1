pub mod api_sports;
pub mod espn;
pub mod mlb;
pub mod nba;
pub mod nfl;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::config::SportsConfig;
use crate::models::{SlateOutcome, Sport};
use api_sports::SportProfile;

impl Sport {
    /// Adapter profile for this league
    pub fn profile(&self) -> &'static SportProfile {
        match self {
            Sport::Nfl => &nfl::PROFILE,
            Sport::Nba => &nba::PROFILE,
            Sport::Mlb => &mlb::PROFILE,
        }
    }
}

/// Run the primary adapter for `sport`
pub async fn fetch_tonight_slate(
    client: &Client,
    config: &SportsConfig,
    sport: Sport,
    now: DateTime<Utc>,
) -> SlateOutcome {
    api_sports::fetch_tonight_slate(client, config, sport.profile(), now).await
}
