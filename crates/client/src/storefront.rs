//! The assembled storefront: every store and client wired to one API
//! gateway.
//!
//! Stores are explicitly constructed and injected rather than ambient
//! globals; the bundle is created at application start and dropped at
//! shutdown. Cross-store coordination goes through public operations only
//! (checkout clears the cart via [`crate::cart::CartStore::clear_cart`],
//! never by reaching into its state).

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::orders::OrdersClient;
use crate::payments::PaymentsClient;
use crate::persist::{FileStore, MemoryStore, StateStore};
use crate::session::SessionStore;
use crate::wishlist::WishlistStore;

/// All storefront services, sharing one API gateway.
pub struct Storefront {
    /// The shared API gateway.
    pub api: ApiClient,
    /// Authentication session store.
    pub session: SessionStore,
    /// Cart store.
    pub cart: CartStore,
    /// Wishlist store.
    pub wishlist: WishlistStore,
    /// Order creation and history.
    pub orders: OrdersClient,
    /// Product catalog.
    pub catalog: CatalogClient,
    /// Payment gateway.
    pub payments: PaymentsClient,
}

impl Storefront {
    /// Assemble the storefront from configuration.
    ///
    /// State persists under `config.state_dir` when set, and only in
    /// memory otherwise. A persisted session is restored here, so the
    /// customer stays logged in across restarts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the state
    /// directory cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, StorefrontError> {
        let storage: Arc<dyn StateStore> = match &config.state_dir {
            Some(dir) => Arc::new(FileStore::new(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Assemble the storefront with an injected state store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(
        config: &ClientConfig,
        storage: Arc<dyn StateStore>,
    ) -> Result<Self, StorefrontError> {
        let api = ApiClient::new(config)?;

        Ok(Self {
            session: SessionStore::new(api.clone(), Arc::clone(&storage)),
            cart: CartStore::new(api.clone()),
            wishlist: WishlistStore::new(api.clone(), storage),
            orders: OrdersClient::new(api.clone()),
            catalog: CatalogClient::new(api.clone()),
            payments: PaymentsClient::new(api.clone(), config.razorpay_key_id.clone()),
            api,
        })
    }

    /// Refresh server-held state after login or restart.
    ///
    /// The cart is always re-fetched (it is never persisted locally); the
    /// wishlist replaces its persisted copy with server truth. Failures
    /// are returned so the caller can decide what is fatal.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn sync(&mut self) -> Result<(), ApiError> {
        self.cart.fetch_cart().await?;
        self.wishlist.fetch_wishlist().await?;
        Ok(())
    }
}

/// Errors from assembling the storefront.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The state directory could not be prepared.
    #[error(transparent)]
    Persist(#[from] crate::persist::PersistError),
}
