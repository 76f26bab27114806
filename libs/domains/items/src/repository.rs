use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemInput};

/// Repository trait for Item persistence
///
/// Implementations return lists in ascending `id` order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Get an item by ID
    async fn get(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Insert when `id` is `None`, otherwise replace the record with that id.
    ///
    /// Returns `NotFound` when replacing an id that does not exist.
    async fn save(&self, id: Option<i64>, input: ItemInput) -> ItemResult<Item>;

    /// Delete an item by ID, `NotFound` if absent
    async fn delete(&self, id: i64) -> ItemResult<()>;

    /// Case-insensitive substring match on `name`; `%` and `_` match literally
    async fn find_by_name_contains(&self, substring: &str) -> ItemResult<Vec<Item>>;

    /// Items with `price <= max`
    async fn find_by_max_price(&self, max: f64) -> ItemResult<Vec<Item>>;
}

#[derive(Debug)]
struct Inner {
    items: BTreeMap<i64, Item>,
    next_id: i64,
}

/// Process-local store used when no database is configured.
///
/// Ids come from a counter starting at 1 and are never handed out twice,
/// even after the item holding one is deleted.
#[derive(Debug)]
pub struct InMemoryItemRepository {
    inner: RwLock<Inner>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    async fn filtered(&self, keep: impl Fn(&Item) -> bool) -> Vec<Item> {
        let inner = self.inner.read().await;
        inner.items.values().filter(|item| keep(item)).cloned().collect()
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn get(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn save(&self, id: Option<i64>, input: ItemInput) -> ItemResult<Item> {
        let mut inner = self.inner.write().await;

        let id = match id {
            Some(id) if inner.items.contains_key(&id) => id,
            Some(id) => return Err(ItemError::NotFound(id)),
            None => {
                let id = inner.next_id;
                inner.next_id = id
                    .checked_add(1)
                    .ok_or_else(|| ItemError::Internal("item id space exhausted".to_string()))?;
                id
            }
        };

        let item = Item::from_input(id, input);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> ItemResult<()> {
        self.inner
            .write()
            .await
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(ItemError::NotFound(id))
    }

    async fn find_by_name_contains(&self, substring: &str) -> ItemResult<Vec<Item>> {
        let needle = substring.to_lowercase();
        Ok(self
            .filtered(|item| item.name.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_max_price(&self, max: f64) -> ItemResult<Vec<Item>> {
        Ok(self.filtered(|item| item.price <= max).await)
    }
}
