use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{NewDashboard, NewWatchlistItem, NewWidget, Store};
use crate::error::StoreError;
use crate::models::{Dashboard, DashboardWidget, Mode, Sport, User, WatchlistItem};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Tables {
    users: Vec<User>,
    dashboards: Vec<Dashboard>,
    widgets: Vec<DashboardWidget>,
    watchlist: Vec<WatchlistItem>,
}

/// In-process store. With a snapshot path every write is mirrored to a JSON
/// file, which is read back on `open`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory store backed by a JSON snapshot; a missing file starts empty
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let tables: Tables = serde_json::from_slice(&bytes)?;
                info!(
                    path = %path.display(),
                    users = tables.users.len(),
                    dashboards = tables.dashboards.len(),
                    "loaded store snapshot"
                );
                tables
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            tables: RwLock::new(tables),
            snapshot: Some(path),
        })
    }

    async fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(tables)?;
        tokio::fs::write(path, json).await?;
        debug!(path = %path.display(), "store snapshot written");
        Ok(())
    }

    /// Writes `next` to the snapshot and only then makes it the live state.
    async fn commit(&self, live: &mut Tables, next: Tables) -> Result<(), StoreError> {
        self.persist(&next).await?;
        *live = next;
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, email: &str, name: Option<&str>) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.users.iter().find(|u| u.email == email) {
            return Ok(existing.clone());
        }

        let user = User {
            id: new_id(),
            email: email.to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        };
        let mut next = tables.clone();
        next.users.push(user.clone());
        self.commit(&mut tables, next).await?;
        Ok(user)
    }

    async fn update_user_name(&self, id: &str, name: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        let user = next
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        user.name = Some(name.to_string());
        let user = user.clone();
        self.commit(&mut tables, next).await?;
        Ok(user)
    }

    async fn find_dashboard(
        &self,
        user_id: &str,
        sport: Sport,
    ) -> Result<Option<Dashboard>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dashboards
            .iter()
            .find(|d| d.user_id == user_id && d.sport == sport)
            .cloned())
    }

    async fn create_dashboard(&self, new: NewDashboard) -> Result<Dashboard, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .dashboards
            .iter()
            .find(|d| d.user_id == new.user_id && d.sport == new.sport)
        {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let dashboard = Dashboard {
            id: new_id(),
            user_id: new.user_id,
            sport: new.sport,
            mode: new.mode,
            title: new.title,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        let mut next = tables.clone();
        next.dashboards.push(dashboard.clone());
        self.commit(&mut tables, next).await?;
        Ok(dashboard)
    }

    async fn set_dashboard_mode(&self, id: &str, mode: Mode) -> Result<Dashboard, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        let dashboard = next
            .dashboards
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found("dashboard", id))?;
        dashboard.mode = mode;
        dashboard.updated_at = Utc::now();
        let dashboard = dashboard.clone();
        self.commit(&mut tables, next).await?;
        Ok(dashboard)
    }

    async fn list_widgets(&self, dashboard_id: &str) -> Result<Vec<DashboardWidget>, StoreError> {
        let tables = self.tables.read().await;
        let mut widgets: Vec<_> = tables
            .widgets
            .iter()
            .filter(|w| w.dashboard_id == dashboard_id)
            .cloned()
            .collect();
        widgets.sort_by_key(|w| (w.y, w.x));
        Ok(widgets)
    }

    async fn create_widget(&self, new: NewWidget) -> Result<DashboardWidget, StoreError> {
        let mut tables = self.tables.write().await;
        let widget = DashboardWidget {
            id: new_id(),
            dashboard_id: new.dashboard_id,
            widget_key: new.widget_key,
            x: new.x,
            y: new.y,
            w: new.w,
            h: new.h,
            settings: new.settings,
            created_at: Utc::now(),
        };
        let mut next = tables.clone();
        next.widgets.push(widget.clone());
        self.commit(&mut tables, next).await?;
        Ok(widget)
    }

    async fn delete_widget(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        next.widgets.retain(|w| w.id != id);
        if next.widgets.len() == tables.widgets.len() {
            return Err(StoreError::not_found("widget", id));
        }
        self.commit(&mut tables, next).await
    }

    async fn list_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>, StoreError> {
        let tables = self.tables.read().await;
        let mut items: Vec<_> = tables
            .watchlist
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        // ties on created_at: later inserts first
        items.reverse();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn create_watchlist_item(
        &self,
        new: NewWatchlistItem,
    ) -> Result<WatchlistItem, StoreError> {
        let mut tables = self.tables.write().await;
        let item = WatchlistItem {
            id: new_id(),
            user_id: new.user_id,
            name: new.name,
            team: new.team,
            position: new.position,
            note: new.note,
            created_at: Utc::now(),
        };
        let mut next = tables.clone();
        next.watchlist.push(item.clone());
        self.commit(&mut tables, next).await?;
        Ok(item)
    }

    async fn delete_watchlist_items(&self, id: &str, user_id: &str) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        next.watchlist
            .retain(|item| !(item.id == id && item.user_id == user_id));
        let removed = tables.watchlist.len() - next.watchlist.len();
        if removed > 0 {
            self.commit(&mut tables, next).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{get_or_create_dashboard, get_or_create_demo_user, upsert_user, DEMO_EMAIL};
    use serde_json::json;

    fn widget(dashboard_id: &str, key: &str, x: i32, y: i32) -> NewWidget {
        NewWidget {
            dashboard_id: dashboard_id.to_string(),
            widget_key: key.to_string(),
            x,
            y,
            w: 3,
            h: 3,
            settings: json!({}),
        }
    }

    #[tokio::test]
    async fn test_demo_user_is_created_once() {
        let store = MemoryStore::new();
        let first = get_or_create_demo_user(&store).await.unwrap();
        let second = get_or_create_demo_user(&store).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.email, DEMO_EMAIL);
        assert_eq!(first.name.as_deref(), Some("Demo User"));
    }

    #[tokio::test]
    async fn test_upsert_user_refreshes_name() {
        let store = MemoryStore::new();
        let created = upsert_user(&store, "fan@example.com", None).await.unwrap();
        assert!(created.name.is_none());
        let updated = upsert_user(&store, "fan@example.com", Some("Sam")).await.unwrap();
        assert_eq!(created.id, updated.id);
        assert_eq!(updated.name.as_deref(), Some("Sam"));
    }

    #[tokio::test]
    async fn test_dashboard_get_or_create_is_idempotent() {
        let store = MemoryStore::new();
        let a = get_or_create_dashboard(&store, "u1", Sport::Mlb, Mode::Beginner)
            .await
            .unwrap();
        let b = get_or_create_dashboard(&store, "u1", Sport::Mlb, Mode::Advanced)
            .await
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(b.mode, Mode::Beginner);
        assert_eq!(a.title, "MLB NashBoard");

        let other = get_or_create_dashboard(&store, "u1", Sport::Nfl, Mode::Beginner)
            .await
            .unwrap();
        assert_ne!(a.id, other.id);
    }

    #[tokio::test]
    async fn test_widgets_ordered_by_row_then_column() {
        let store = MemoryStore::new();
        store.create_widget(widget("d1", "watchlist", 4, 1)).await.unwrap();
        store.create_widget(widget("d1", "player_card", 0, 9999)).await.unwrap();
        store.create_widget(widget("d1", "tonights_slate", 0, 1)).await.unwrap();
        store.create_widget(widget("d2", "rb_vs_dline", 0, 0)).await.unwrap();

        let keys: Vec<_> = store
            .list_widgets("d1")
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.widget_key)
            .collect();
        assert_eq!(keys, vec!["tonights_slate", "watchlist", "player_card"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_widget_is_not_found() {
        let store = MemoryStore::new();
        let created = store.create_widget(widget("d1", "watchlist", 0, 0)).await.unwrap();
        assert!(matches!(
            store.delete_widget("nope").await,
            Err(StoreError::NotFound { .. })
        ));
        store.delete_widget(&created.id).await.unwrap();
        assert!(store.list_widgets("d1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watchlist_delete_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let item = store
            .create_watchlist_item(NewWatchlistItem {
                user_id: "u1".to_string(),
                name: "Jalen Hurts".to_string(),
                team: "Eagles".to_string(),
                position: "QB".to_string(),
                note: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(store.delete_watchlist_items(&item.id, "u2").await.unwrap(), 0);
        assert_eq!(store.delete_watchlist_items(&item.id, "u1").await.unwrap(), 1);
        assert!(store.list_watchlist("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let user_id = {
            let store = MemoryStore::open(&path).await.unwrap();
            let user = get_or_create_demo_user(&store).await.unwrap();
            get_or_create_dashboard(&store, &user.id, Sport::Nba, Mode::Advanced)
                .await
                .unwrap();
            user.id
        };

        let reopened = MemoryStore::open(&path).await.unwrap();
        let user = get_or_create_demo_user(&reopened).await.unwrap();
        assert_eq!(user.id, user_id);
        let dashboard = reopened.find_dashboard(&user_id, Sport::Nba).await.unwrap();
        assert_eq!(dashboard.map(|d| d.mode), Some(Mode::Advanced));
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_tables_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = MemoryStore::open(&path).await.unwrap();
        let kept = store.create_widget(widget("d1", "watchlist", 0, 0)).await.unwrap();

        // a directory in place of the snapshot file makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.create_widget(widget("d1", "player_card", 0, 1)).await.is_err());
        assert!(store.delete_widget(&kept.id).await.is_err());
        assert!(store.create_user("fan@example.com", None).await.is_err());

        let keys: Vec<_> = store
            .list_widgets("d1")
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.widget_key)
            .collect();
        assert_eq!(keys, vec!["watchlist"]);
        assert!(store.find_user_by_email("fan@example.com").await.unwrap().is_none());
    }
}
