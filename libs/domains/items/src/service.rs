//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemInput};
use crate::repository::ItemRepository;

/// Validates input and turns missing ids into `NotFound` before touching the store.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// `None` when no item has this id; the HTTP layer decides what that means.
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Option<Item>> {
        self.repository.get(id).await
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: ItemInput) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let item = self.repository.save(None, input).await?;
        tracing::info!(item_id = item.id, "Created item");
        Ok(item)
    }

    /// Replace every field of item `id` except the id itself.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: ItemInput) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if self.repository.get(id).await?.is_none() {
            return Err(ItemError::NotFound(id));
        }

        let item = self.repository.save(Some(id), input).await?;
        tracing::info!(item_id = id, "Updated item");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        if self.repository.get(id).await?.is_none() {
            return Err(ItemError::NotFound(id));
        }

        self.repository.delete(id).await?;
        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search_by_name(&self, substring: &str) -> ItemResult<Vec<Item>> {
        self.repository.find_by_name_contains(substring).await
    }

    /// `max` must be finite; NaN and infinities are rejected before the store is queried.
    #[instrument(skip(self))]
    pub async fn items_by_max_price(&self, max: f64) -> ItemResult<Vec<Item>> {
        if !max.is_finite() {
            return Err(ItemError::Validation(format!(
                "max must be a finite number, got {}",
                max
            )));
        }

        self.repository.find_by_max_price(max).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
