use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use super::AppState;
use crate::error::{AppError, Result, StoreError};
use crate::models::{Mode, Sport};
use crate::store::{get_or_create_dashboard, NewWidget};
use crate::widgets::find_widget;

/// New widgets land at the bottom of the grid; the UI compacts the layout
const APPEND_ROW: i32 = 9999;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub sport: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModeUpdate {
    pub sport: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWidget {
    pub widget_key: Option<String>,
    pub sport: Option<String>,
}

async fn load_dashboard(
    state: &AppState,
    jar: &CookieJar,
    sport: Sport,
) -> std::result::Result<Value, StoreError> {
    let user = state.current_user(jar).await?;
    let dashboard =
        get_or_create_dashboard(state.store.as_ref(), &user.id, sport, Mode::Beginner).await?;
    let widgets = state.store.list_widgets(&dashboard.id).await?;
    Ok(json!({ "dashboard": dashboard, "widgets": widgets }))
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Json<Value> {
    let sport = Sport::parse_or_default(query.sport.as_deref());

    match load_dashboard(&state, &jar, sport).await {
        Ok(body) => Json(body),
        Err(e) => {
            error!(%sport, error = %e, "failed to load dashboard, serving fallback");
            Json(json!({
                "dashboard": {
                    "id": "fallback-dashboard",
                    "title": format!("{} NashBoard", sport),
                    "sport": sport,
                    "mode": Mode::Beginner,
                    "description": format!("Fallback {} dashboard", sport),
                },
                "widgets": [],
            }))
        }
    }
}

/// PATCH /api/dashboard/mode
pub async fn update_mode(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ModeUpdate>,
) -> Result<Json<Value>> {
    let mode = body
        .mode
        .as_deref()
        .and_then(Mode::parse)
        .ok_or_else(|| AppError::bad_request("Invalid mode"))?;
    let sport = Sport::parse_or_default(body.sport.as_deref());

    let user = state.current_user(&jar).await?;
    let dashboard = get_or_create_dashboard(state.store.as_ref(), &user.id, sport, mode).await?;
    let updated = state.store.set_dashboard_mode(&dashboard.id, mode).await?;

    info!(%sport, %mode, dashboard_id = %updated.id, "dashboard mode updated");
    Ok(Json(json!({ "dashboard": updated })))
}

/// POST /api/dashboard/widgets
pub async fn add_widget(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AddWidget>,
) -> Result<Json<Value>> {
    let definition = body
        .widget_key
        .as_deref()
        .and_then(find_widget)
        .ok_or_else(|| AppError::bad_request("Unknown widget"))?;
    let sport = Sport::parse_or_default(body.sport.as_deref());

    let user = state.current_user(&jar).await?;
    let dashboard =
        get_or_create_dashboard(state.store.as_ref(), &user.id, sport, Mode::Beginner).await?;

    let widget = state
        .store
        .create_widget(NewWidget {
            dashboard_id: dashboard.id,
            widget_key: definition.key.to_string(),
            x: 0,
            y: APPEND_ROW,
            w: definition.default_size.w,
            h: definition.default_size.h,
            settings: json!({}),
        })
        .await?;

    info!(%sport, widget_key = definition.key, "widget added");
    Ok(Json(json!({ "widget": widget })))
}

/// DELETE /api/dashboard/widgets/:id
pub async fn remove_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = id.trim();
    if id.is_empty() || id == "undefined" || id == "null" {
        return Err(AppError::bad_request("Missing widget id"));
    }

    match state.store.delete_widget(id).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(StoreError::NotFound { .. }) => Err(AppError::not_found("Widget not found")),
        Err(e) => Err(e.into()),
    }
}
