pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod player;
pub mod projection;
pub mod server;
pub mod slate;
pub mod store;
pub mod utils;
pub mod widgets;

pub use config::{LeagueConfig, ServerConfig, SportsConfig};
pub use error::{AppError, ProviderError, StoreError};
pub use models::*;
pub use server::{build_router, AppState};
pub use slate::SlateService;
pub use store::{MemoryStore, Store};
