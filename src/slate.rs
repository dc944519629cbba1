use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{info, warn};

use crate::api::{self, espn::EspnClient};
use crate::config::SportsConfig;
use crate::error::ProviderError;
use crate::models::{SlateOutcome, SlateSource, Sport};
use crate::utils::dates::{compact_date, slate_date};

/// Entry point for "tonight's games": dispatches to the sport's adapter and,
/// when enabled, tries ESPN before settling for the mock slate.
#[derive(Clone)]
pub struct SlateService {
    client: Client,
    config: Arc<SportsConfig>,
}

impl SlateService {
    pub fn new(client: Client, config: SportsConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &SportsConfig {
        &self.config
    }

    /// The `YYYY-MM-DD` every provider is queried for
    pub fn date(&self, now: DateTime<Utc>) -> Result<String, ProviderError> {
        slate_date(&self.config, now)
    }

    pub async fn tonight(&self, sport: Sport) -> SlateOutcome {
        self.tonight_at(sport, Utc::now()).await
    }

    pub async fn tonight_at(&self, sport: Sport, now: DateTime<Utc>) -> SlateOutcome {
        let primary = api::fetch_tonight_slate(&self.client, &self.config, sport, now).await;

        if !primary.is_fallback() || !self.config.espn_slate_fallback {
            return primary;
        }

        match self.espn_slate(sport, now).await {
            Some(outcome) => outcome,
            None => primary,
        }
    }

    async fn espn_slate(&self, sport: Sport, now: DateTime<Utc>) -> Option<SlateOutcome> {
        let date = self.date(now).ok()?;
        let espn = EspnClient::new(&self.client, &self.config.espn_base_url);

        match espn.fetch_scoreboard(sport, &compact_date(&date)).await {
            Ok(games) if !games.is_empty() => {
                info!(%sport, count = games.len(), "using ESPN scoreboard");
                Some(SlateOutcome::Live {
                    games,
                    source: SlateSource::Espn,
                    note: Some(format!(
                        "API-Sports unavailable; showing ESPN {} scoreboard.",
                        sport
                    )),
                })
            }
            Ok(_) => {
                info!(%sport, %date, "ESPN scoreboard empty, keeping mock slate");
                None
            }
            Err(e) => {
                warn!(%sport, error = %e, "ESPN scoreboard failed, keeping mock slate");
                None
            }
        }
    }
}
