use std::sync::Arc;

use adboard_meta::AdsApi;

use crate::config::ServerConfig;
use crate::store::SnapshotStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (UI preference blobs).
    pub pool: adboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory snapshot of the entity collections.
    pub store: Arc<SnapshotStore>,
    /// Ads platform client (real Graph client in production, stub in tests).
    pub ads: Arc<dyn AdsApi>,
}
