//! Wishlist store.
//!
//! Same speculative discipline as the cart, but persisted locally under
//! the fixed `wishlist-storage` key so the list survives restarts.
//! Additions roll back when the server rejects them; removals and clears
//! are deliberately fire-and-forget (the local removal stands even if the
//! sync fails) - see DESIGN.md for the rationale.

use std::sync::Arc;

use tracing::{instrument, warn};

use saffron_core::ProductId;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::persist::{StateStore, keys, load_json, save_json};
use crate::speculative::Speculative;
use crate::types::Product;

/// Outcome of an add, distinguishing the idempotent duplicate case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAdd {
    /// The product was added.
    Added,
    /// The product was already wishlisted; nothing was sent.
    AlreadyPresent,
}

/// Store for the customer's wishlist.
pub struct WishlistStore {
    api: ApiClient,
    storage: Arc<dyn StateStore>,
    items: Speculative<Vec<Product>>,
}

impl WishlistStore {
    /// Create the store, restoring any persisted items.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn StateStore>) -> Self {
        let items: Vec<Product> =
            load_json(storage.as_ref(), keys::WISHLIST).unwrap_or_default();
        Self {
            api,
            storage,
            items: Speculative::new(items),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The wishlisted products in order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        self.items.get()
    }

    /// Whether a product is wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.items
            .get()
            .iter()
            .any(|product| product.id == *product_id)
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.get().len()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the local list with server truth.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error; the local list is unchanged on
    /// failure.
    #[instrument(skip(self))]
    pub async fn fetch_wishlist(&mut self) -> Result<(), ApiError> {
        let items: Vec<Product> = self.api.get("/wishlist").await?;
        self.items.commit(items);
        self.persist();
        Ok(())
    }

    /// Add a product to the wishlist.
    ///
    /// Idempotent by product id: a duplicate is a no-op that reports
    /// [`WishlistAdd::AlreadyPresent`] without touching the network. The
    /// product is appended optimistically and removed again if the server
    /// rejects the sync.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error; the
    /// optimistic append has been rolled back when this happens.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_wishlist(&mut self, product: Product) -> Result<WishlistAdd, ApiError> {
        if self.is_in_wishlist(&product.id) {
            return Ok(WishlistAdd::AlreadyPresent);
        }

        let product_id = product.id.clone();
        let checkpoint = self.items.checkpoint();
        self.items.apply(|items| items.push(product));
        self.persist();

        let result = self
            .api
            .post_unit(
                "/wishlist/add",
                &serde_json::json!({ "productId": product_id }),
            )
            .await;

        match result {
            Ok(()) => Ok(WishlistAdd::Added),
            Err(err) => {
                self.items.restore(checkpoint);
                self.persist();
                Err(err)
            }
        }
    }

    /// Remove a product from the wishlist.
    ///
    /// Fire-and-forget: the local removal stands even if the sync fails,
    /// which is only logged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_from_wishlist(&mut self, product_id: &ProductId) {
        self.items
            .apply(|items| items.retain(|product| product.id != *product_id));
        self.persist();

        if let Err(err) = self
            .api
            .delete_unit(&format!("/wishlist/remove/{product_id}"))
            .await
        {
            warn!(error = %err, "Failed to sync wishlist removal");
        }
    }

    /// Empty the wishlist.
    ///
    /// Fire-and-forget, like removal.
    #[instrument(skip(self))]
    pub async fn clear_wishlist(&mut self) {
        self.items.apply(Vec::clear);
        self.persist();

        if let Err(err) = self.api.delete_unit("/wishlist/clear").await {
            warn!(error = %err, "Failed to sync wishlist clear");
        }
    }

    fn persist(&self) {
        save_json(self.storage.as_ref(), keys::WISHLIST, self.items.get());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::persist::MemoryStore;
    use rust_decimal::Decimal;

    fn product(id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Product {id}"),
            "price": 100,
        }))
        .unwrap()
    }

    fn store() -> WishlistStore {
        let config = ClientConfig::new("http://localhost:1/api".parse().unwrap());
        WishlistStore::new(
            ApiClient::new(&config).unwrap(),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_duplicate_add_is_a_local_no_op() {
        // The API client points at a closed port, so a network call would
        // error; AlreadyPresent proves none was made.
        let mut store = store();
        store.items.commit(vec![product("p1")]);

        let result = store.add_to_wishlist(product("p1")).await.unwrap();
        assert_eq!(result, WishlistAdd::AlreadyPresent);
        assert_eq!(store.item_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_rolls_back_the_append() {
        let mut store = store();
        let result = store.add_to_wishlist(product("p1")).await;
        assert!(result.is_err());
        assert_eq!(store.item_count(), 0);
        assert!(!store.is_in_wishlist(&ProductId::new("p1")));
    }

    #[tokio::test]
    async fn test_remove_keeps_local_removal_on_sync_failure() {
        let mut store = store();
        store.items.commit(vec![product("p1"), product("p2")]);

        store.remove_from_wishlist(&ProductId::new("p1")).await;
        assert_eq!(store.item_count(), 1);
        assert!(store.is_in_wishlist(&ProductId::new("p2")));
    }

    #[test]
    fn test_restores_persisted_items() {
        let storage = Arc::new(MemoryStore::new());
        let items = vec![product("p1")];
        let json = serde_json::to_string(&items).unwrap();
        storage.save(keys::WISHLIST, &json).unwrap();

        let config = ClientConfig::new("http://localhost:1/api".parse().unwrap());
        let store = WishlistStore::new(ApiClient::new(&config).unwrap(), storage);
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.items()[0].price, Decimal::from(100));
    }
}
