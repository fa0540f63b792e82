//! Client-side view of the item collection.
//!
//! # Design
//! `ItemCollectionManager` owns the ordered `items` list and is its only
//! mutator: `refresh` replaces it wholesale, `add` appends the backend's copy
//! of a new item. The list is only updated after the backend confirms, so a
//! failed call leaves the last confirmed state in place.
//!
//! Methods take `&self` and never hold the lock across an `.await`, so
//! several operations can be in flight on one manager. They are not
//! serialized: overlapping `add` calls derive their id from the same snapshot
//! and can collide, and a `refresh` racing an `add` may land in either order.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::{IdError, SyncError};
use crate::id;
use crate::remote::RemoteItemClient;
use crate::types::Item;

pub struct ItemCollectionManager<C> {
    client: C,
    items: RwLock<Vec<Item>>,
}

impl<C: RemoteItemClient> ItemCollectionManager<C> {
    /// Starts with an empty list; call `refresh` to load the backend's view.
    pub fn new(client: C) -> Self {
        Self {
            client,
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Snapshot of the current list.
    pub fn items(&self) -> Vec<Item> {
        self.read().clone()
    }

    /// The id the next `add` would use, given the current list.
    pub fn next_id(&self) -> Result<String, IdError> {
        id::next_id(&self.read())
    }

    /// Replace the list with the backend's. On failure the list is untouched.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let items = self.client.list_items().await.map_err(|e| {
            warn!(error = %e, "refresh failed, keeping last known items");
            e
        })?;
        debug!(count = items.len(), "replacing item list");
        *self.write() = items;
        Ok(())
    }

    /// Create an item called `name` (trimmed) and append the backend's copy.
    ///
    /// Returns `Ok(None)` without contacting the backend when the trimmed name
    /// is empty.
    pub async fn add(&self, name: &str) -> Result<Option<Item>, SyncError> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring blank item name");
            return Ok(None);
        }

        let id = self.next_id()?;
        let created = self
            .client
            .create_item(&Item::new(id.as_str(), name))
            .await
            .map_err(|e| {
                warn!(%id, error = %e, "create failed, item not added");
                e
            })?;
        debug!(id = %created.id, "appending created item");
        self.write().push(created.clone());
        Ok(Some(created))
    }

    /// Delete `item` remotely, then reload the whole list.
    ///
    /// If the delete succeeds but the reload fails, the error is returned and
    /// the list still shows the deleted item until the next `refresh`.
    pub async fn remove(&self, item: &Item) -> Result<(), SyncError> {
        self.client.delete_item(&item.id).await.map_err(|e| {
            warn!(id = %item.id, error = %e, "delete failed, item kept");
            e
        })?;
        debug!(id = %item.id, "item deleted, resynchronizing");
        self.refresh().await
    }

    /// Look up a single item on the backend. Does not touch the list.
    pub async fn fetch_item(&self, id: &str) -> Result<Item, SyncError> {
        Ok(self.client.get_item(id).await?)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}
