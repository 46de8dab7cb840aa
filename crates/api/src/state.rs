use std::sync::Arc;

use resort_core::images::ImageStore;
use resort_db::store::ResortStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Data access for amenities, bookings, sales and feedback.
    pub store: Arc<dyn ResortStore>,
    /// Amenity image files.
    pub images: Arc<dyn ImageStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
