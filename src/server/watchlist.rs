use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::WatchlistItem;
use crate::store::NewWatchlistItem;

#[derive(Debug, Default, Deserialize)]
pub struct WatchlistInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub position: String,
    pub note: Option<String>,
}

/// GET /api/watchlist
pub async fn list_items(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<WatchlistItem>>> {
    let user = state.current_user(&jar).await?;
    let items = state.store.list_watchlist(&user.id).await?;
    Ok(Json(items))
}

/// POST /api/watchlist
pub async fn create_item(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<WatchlistInput>,
) -> Result<(StatusCode, Json<WatchlistItem>)> {
    if input.name.is_empty() || input.team.is_empty() || input.position.is_empty() {
        return Err(AppError::bad_request(
            "name, team, and position are required",
        ));
    }

    let user = state.current_user(&jar).await?;
    let item = state
        .store
        .create_watchlist_item(NewWatchlistItem {
            user_id: user.id,
            name: input.name,
            team: input.team,
            position: input.position,
            note: input.note.unwrap_or_default(),
        })
        .await?;

    info!(item_id = %item.id, "watchlist item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/watchlist/:id
pub async fn delete_item(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if id.trim().is_empty() {
        return Err(AppError::bad_request("Missing favorite id"));
    }

    let user = state.current_user(&jar).await?;
    let removed = state.store.delete_watchlist_items(&id, &user.id).await?;
    info!(item_id = %id, removed, "watchlist delete");
    Ok(Json(json!({ "ok": true })))
}
