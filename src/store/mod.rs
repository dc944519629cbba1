//! Persistence seam for users, dashboards, widgets and watchlist items.
//!
//! Handlers only see `Arc<dyn Store>`; the process builds one at startup and
//! hands it down through the router state.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Dashboard, DashboardWidget, Mode, Sport, User, WatchlistItem};

pub const DEMO_EMAIL: &str = "demo@nashboard.local";
pub const DEMO_NAME: &str = "Demo User";

#[derive(Debug, Clone)]
pub struct NewDashboard {
    pub user_id: String,
    pub sport: Sport,
    pub mode: Mode,
    pub title: String,
    pub description: Option<String>,
}

impl NewDashboard {
    /// Default dashboard for a sport: "NBA NashBoard"
    pub fn default_for(user_id: &str, sport: Sport, mode: Mode) -> Self {
        Self {
            user_id: user_id.to_string(),
            sport,
            mode,
            title: format!("{} NashBoard", sport),
            description: Some(format!("Default {} dashboard", sport)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewWidget {
    pub dashboard_id: String,
    pub widget_key: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct NewWatchlistItem {
    pub user_id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub note: String,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Create a user; returns the existing row when the email is taken
    async fn create_user(&self, email: &str, name: Option<&str>) -> Result<User, StoreError>;

    async fn update_user_name(&self, id: &str, name: &str) -> Result<User, StoreError>;

    async fn find_dashboard(
        &self,
        user_id: &str,
        sport: Sport,
    ) -> Result<Option<Dashboard>, StoreError>;

    /// Create a dashboard; returns the existing row for the same (user, sport)
    async fn create_dashboard(&self, new: NewDashboard) -> Result<Dashboard, StoreError>;

    async fn set_dashboard_mode(&self, id: &str, mode: Mode) -> Result<Dashboard, StoreError>;

    /// Widgets of a dashboard ordered by `(y, x)`
    async fn list_widgets(&self, dashboard_id: &str) -> Result<Vec<DashboardWidget>, StoreError>;

    async fn create_widget(&self, new: NewWidget) -> Result<DashboardWidget, StoreError>;

    /// Hard delete; `StoreError::NotFound` when the id is unknown
    async fn delete_widget(&self, id: &str) -> Result<(), StoreError>;

    /// Watchlist of a user, newest first
    async fn list_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>, StoreError>;

    async fn create_watchlist_item(
        &self,
        new: NewWatchlistItem,
    ) -> Result<WatchlistItem, StoreError>;

    /// Delete items matching both ids; returns how many went away
    async fn delete_watchlist_items(&self, id: &str, user_id: &str) -> Result<usize, StoreError>;
}

pub async fn get_or_create_demo_user(store: &dyn Store) -> Result<User, StoreError> {
    match store.find_user_by_email(DEMO_EMAIL).await? {
        Some(user) => Ok(user),
        None => store.create_user(DEMO_EMAIL, Some(DEMO_NAME)).await,
    }
}

/// Login upsert: create the user or refresh its name when one is given
pub async fn upsert_user(
    store: &dyn Store,
    email: &str,
    name: Option<&str>,
) -> Result<User, StoreError> {
    match store.find_user_by_email(email).await? {
        Some(user) => match name {
            Some(name) => store.update_user_name(&user.id, name).await,
            None => Ok(user),
        },
        None => store.create_user(email, name).await,
    }
}

pub async fn get_or_create_dashboard(
    store: &dyn Store,
    user_id: &str,
    sport: Sport,
    mode: Mode,
) -> Result<Dashboard, StoreError> {
    match store.find_dashboard(user_id, sport).await? {
        Some(dashboard) => Ok(dashboard),
        None => {
            store
                .create_dashboard(NewDashboard::default_for(user_id, sport, mode))
                .await
        }
    }
}
