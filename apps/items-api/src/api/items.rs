//! Items API routes

use axum::Router;
use domain_items::{handlers, InMemoryItemRepository, ItemService, PgItemRepository};
use tracing::{info, warn};

use crate::state::AppState;

/// Build the items router on PostgreSQL when a pool is configured, in memory otherwise.
///
/// The PostgreSQL path creates the `items` table first if it is missing.
pub async fn router(state: &AppState) -> eyre::Result<Router> {
    match &state.db {
        Some(db) => {
            let repository = PgItemRepository::new(db.clone());
            repository.ensure_schema().await?;
            info!("Serving items from PostgreSQL");
            Ok(handlers::router(ItemService::new(repository)))
        }
        None => {
            warn!("DATABASE_URL not set: items are kept in memory and lost on restart");
            Ok(handlers::router(ItemService::new(
                InMemoryItemRepository::new(),
            )))
        }
    }
}
