use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::models::SlateGame;

/// Save any serializable value as pretty JSON, creating parent directories
pub fn save_to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize data")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load a value previously written by `save_to_json`
pub fn load_from_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&json).context("Failed to deserialize data")?;
    Ok(value)
}

#[derive(Serialize)]
struct SlateRow<'a> {
    id: &'a str,
    league: &'a str,
    away_team: &'a str,
    home_team: &'a str,
    start_time: &'a str,
    venue: &'a str,
    status: &'a str,
}

/// Save a slate to CSV, one row per game
pub fn save_slate_to_csv(games: &[SlateGame], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    for game in games {
        writer.serialize(SlateRow {
            id: &game.id,
            league: game.league.as_str(),
            away_team: &game.away_team,
            home_team: &game.home_team,
            start_time: &game.start_time,
            venue: game.venue.as_deref().unwrap_or(""),
            status: game.status.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}
