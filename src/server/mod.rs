//! JSON API consumed by the dashboard UI.

pub mod auth;
pub mod dashboard;
pub mod watchlist;
pub mod widgets;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::StoreError;
use crate::models::User;
use crate::slate::SlateService;
use crate::store::{get_or_create_demo_user, Store};

pub const USER_COOKIE: &str = "nashboard_user_id";

#[derive(Clone)]
pub struct AppState {
    pub slates: SlateService,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(slates: SlateService, store: Arc<dyn Store>) -> Self {
        Self { slates, store }
    }

    /// User named by the session cookie, else the shared demo user
    pub async fn current_user(&self, jar: &CookieJar) -> Result<User, StoreError> {
        if let Some(cookie) = jar.get(USER_COOKIE) {
            let id = cookie.value().trim();
            if !id.is_empty() {
                if let Some(user) = self.store.find_user(id).await? {
                    return Ok(user);
                }
                debug!(user_id = id, "session cookie names an unknown user");
            }
        }
        get_or_create_demo_user(self.store.as_ref()).await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/widgets/tonights-slate", get(widgets::tonights_slate))
        .route("/api/widgets/player-card", get(widgets::player_card))
        .route("/api/widgets/metadata", get(widgets::metadata))
        .route("/api/widgets/rb-vs-dline", get(widgets::rb_vs_dline))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/dashboard/mode", patch(dashboard::update_mode))
        .route("/api/dashboard/widgets", post(dashboard::add_widget))
        .route("/api/dashboard/widgets/:id", delete(dashboard::remove_widget))
        .route(
            "/api/watchlist",
            get(watchlist::list_items).post(watchlist::create_item),
        )
        .route("/api/watchlist/:id", delete(watchlist::delete_item))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
