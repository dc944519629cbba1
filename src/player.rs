//! Player card resolution. Every path ends in a renderable `PlayerPayload`.

use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use tracing::{error, warn};

use crate::api::espn::{AthleteMatch, EspnClient};
use crate::models::{PlayerPayload, Sport};

pub const FALLBACK_PROVIDER: &str = "fallback";
pub const ESPN_PROVIDER: &str = "espn";

/// Title-case each whitespace-separated part: `"  leBRON   james"` -> `"Lebron James"`
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable id derived from a display name
pub fn slug(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));
    re.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// Placeholder card; same input always gives the same card
pub fn fallback_player(raw_name: &str, reason: &str) -> PlayerPayload {
    let trimmed = raw_name.trim();
    let name = normalize_name(if trimmed.is_empty() {
        "Unknown Player"
    } else {
        trimmed
    });

    PlayerPayload {
        id: slug(&name),
        name: name.clone(),
        display_name: name,
        team: None,
        position: None,
        next_game: None,
        ppg: None,
        apg: None,
        rpg: None,
        provider: FALLBACK_PROVIDER.to_string(),
        source_label: format!("Fallback ({})", reason),
    }
}

fn from_athlete(athlete: AthleteMatch, query: &str) -> PlayerPayload {
    let full_name = athlete
        .full_name
        .unwrap_or_else(|| normalize_name(query));

    PlayerPayload {
        id: athlete.id.unwrap_or_else(|| slug(&full_name)),
        name: full_name.clone(),
        display_name: full_name,
        team: athlete.team,
        position: athlete.position,
        next_game: None,
        ppg: None,
        apg: None,
        rpg: None,
        provider: ESPN_PROVIDER.to_string(),
        source_label: "Live data - ESPN".to_string(),
    }
}

/// Resolve a player card.
///
/// `sport` is `None` when the request named a league we don't cover.
pub async fn resolve_player(
    client: &Client,
    espn_base_url: &str,
    sport: Option<Sport>,
    raw_name: &str,
) -> PlayerPayload {
    let name = raw_name.trim();
    if name.is_empty() {
        return fallback_player("", "missing name");
    }

    let Some(sport) = sport else {
        return fallback_player(name, "unsupported sport");
    };

    let espn = EspnClient::new(client, espn_base_url);
    match espn.search_athlete(sport, name).await {
        Ok(Some(athlete)) => from_athlete(athlete, name),
        Ok(None) => fallback_player(name, "no ESPN match"),
        Err(e) => {
            match &e {
                crate::error::ProviderError::Status { status, .. } => {
                    warn!(%sport, status, "ESPN athlete search not OK")
                }
                _ => error!(%sport, error = %e, "ESPN athlete search failed"),
            }
            fallback_player(name, "no ESPN match")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  leBRON   james "), "Lebron James");
        assert_eq!(normalize_name("shohei"), "Shohei");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Lebron James"), "lebron-james");
        assert_eq!(slug("Ja'Marr Chase"), "ja-marr-chase");
        assert_eq!(slug("Unknown Player"), "unknown-player");
    }

    #[test]
    fn test_fallback_player_is_deterministic() {
        let a = fallback_player("  leBRON   james ", "no ESPN match");
        let b = fallback_player("lebron james", "no ESPN match");
        assert_eq!(a, b);
        assert_eq!(a.id, "lebron-james");
        assert_eq!(a.provider, "fallback");
        assert_eq!(a.source_label, "Fallback (no ESPN match)");
        assert!(a.ppg.is_none());
    }

    #[test]
    fn test_missing_name_uses_unknown_player() {
        let player = fallback_player("", "missing name");
        assert_eq!(player.name, "Unknown Player");
        assert_eq!(player.id, "unknown-player");
    }

    #[test]
    fn test_from_athlete_fills_gaps_from_query() {
        let athlete = AthleteMatch {
            id: None,
            full_name: None,
            team: Some("Denver Nuggets".to_string()),
            position: Some("C".to_string()),
        };
        let player = from_athlete(athlete, "nikola jokic");
        assert_eq!(player.name, "Nikola Jokic");
        assert_eq!(player.id, "nikola-jokic");
        assert_eq!(player.provider, "espn");
        assert_eq!(player.team.as_deref(), Some("Denver Nuggets"));
    }

    #[tokio::test]
    async fn test_unsupported_sport_skips_network() {
        let client = Client::new();
        let player = resolve_player(&client, "http://127.0.0.1:9", None, "Connor McDavid").await;
        assert_eq!(player.provider, "fallback");
        assert_eq!(player.source_label, "Fallback (unsupported sport)");
    }
}
