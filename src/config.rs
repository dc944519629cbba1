use std::env;
use std::path::PathBuf;

use crate::models::Sport;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_ESPN_BASE_URL: &str = "http://site.api.espn.com";

/// Per-league API-Sports settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub league_id: Option<String>,
    pub season: Option<String>,
    pub base_url: String,
}

impl LeagueConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            league_id: None,
            season: None,
            base_url: base_url.into(),
        }
    }

    pub fn with_league(mut self, league_id: &str, season: &str) -> Self {
        self.league_id = Some(league_id.to_string());
        self.season = Some(season.to_string());
        self
    }
}

/// Everything the fetch layer reads from the environment
#[derive(Debug, Clone)]
pub struct SportsConfig {
    pub api_key: Option<String>,
    pub timezone: String,
    pub date_override: Option<String>,
    pub nfl: LeagueConfig,
    pub nba: LeagueConfig,
    pub mlb: LeagueConfig,
    pub espn_base_url: String,
    pub espn_slate_fallback: bool,
}

impl Default for SportsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            date_override: None,
            nfl: LeagueConfig::new(crate::api::nfl::DEFAULT_BASE_URL),
            nba: LeagueConfig::new(crate::api::nba::DEFAULT_BASE_URL),
            mlb: LeagueConfig::new(crate::api::mlb::DEFAULT_BASE_URL),
            espn_base_url: DEFAULT_ESPN_BASE_URL.to_string(),
            espn_slate_fallback: false,
        }
    }
}

impl SportsConfig {
    /// Read `.env` and the process environment. Missing values are left as
    /// `None` so the adapters can decide to serve mock data.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            api_key: non_empty_var("SPORTS_API_KEY"),
            timezone: non_empty_var("SPORTS_API_TIMEZONE").unwrap_or(defaults.timezone),
            date_override: non_empty_var("SPORTS_API_DATE_OVERRIDE"),
            nfl: league_from_env(Sport::Nfl, defaults.nfl.base_url),
            nba: league_from_env(Sport::Nba, defaults.nba.base_url),
            mlb: league_from_env(Sport::Mlb, defaults.mlb.base_url),
            espn_base_url: non_empty_var("ESPN_BASE_URL").unwrap_or(defaults.espn_base_url),
            espn_slate_fallback: non_empty_var("SPORTS_SLATE_ESPN_FALLBACK")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }

    pub fn league(&self, sport: Sport) -> &LeagueConfig {
        match sport {
            Sport::Nfl => &self.nfl,
            Sport::Nba => &self.nba,
            Sport::Mlb => &self.mlb,
        }
    }

    pub fn league_mut(&mut self, sport: Sport) -> &mut LeagueConfig {
        match sport {
            Sport::Nfl => &mut self.nfl,
            Sport::Nba => &mut self.nba,
            Sport::Mlb => &mut self.mlb,
        }
    }
}

fn league_from_env(sport: Sport, default_base_url: String) -> LeagueConfig {
    LeagueConfig {
        league_id: non_empty_var(&format!("{}_LEAGUE_ID", sport)),
        season: non_empty_var(&format!("{}_SEASON", sport)),
        base_url: non_empty_var(&format!("SPORTS_API_{}_BASE_URL", sport))
            .unwrap_or(default_base_url),
    }
}

/// HTTP server settings for the `web` binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port = match non_empty_var("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "PORT is not a number, using 3000");
                3000
            }),
            None => 3000,
        };

        Self {
            host: non_empty_var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            data_file: non_empty_var("NASHBOARD_DATA_FILE").map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SportsConfig::default();
        assert_eq!(config.timezone, "America/New_York");
        assert!(config.api_key.is_none());
        assert_eq!(config.nba.base_url, "https://v2.nba.api-sports.io");
        assert!(!config.espn_slate_fallback);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("nope"));
    }

    #[test]
    fn test_league_lookup() {
        let mut config = SportsConfig::default();
        config.league_mut(Sport::Mlb).season = Some("2025".to_string());
        assert_eq!(config.league(Sport::Mlb).season.as_deref(), Some("2025"));
        assert!(config.league(Sport::Nfl).season.is_none());
    }
}
