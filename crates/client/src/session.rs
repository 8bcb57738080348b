//! Authentication session store.
//!
//! Holds the current user and bearer token, derives admin authorization,
//! and persists across restarts under the fixed `auth-storage` key. The
//! session store is the only writer of the token; the API gateway reads it
//! on every request and clears it on an authorization failure.
//!
//! Mutations take `&mut self`; the embedding application drives the store
//! from one logical task, so no further synchronization is needed.

use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use saffron_core::{Address, AddressId};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::persist::{StateStore, keys, load_json, save_json};
use crate::types::{
    AddressRequest, AuthPayload, LoginRequest, RegisterRequest, ResetPasswordRequest, UserProfile,
};

/// Persisted session state, mirroring what the browser client kept in
/// local storage.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    user: Option<UserProfile>,
    token: Option<String>,
    is_authenticated: bool,
}

/// Store for the authentication session.
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn StateStore>,
    user: Option<UserProfile>,
    token: Option<SecretString>,
}

impl SessionStore {
    /// Create the store, restoring any persisted session.
    ///
    /// A restored token is installed into the API client so the first
    /// request after a restart is already authenticated.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn StateStore>) -> Self {
        let persisted: Option<PersistedSession> = load_json(storage.as_ref(), keys::AUTH);

        let mut store = Self {
            api,
            storage,
            user: None,
            token: None,
        };

        if let Some(persisted) = persisted
            && let Some(token) = persisted.token
        {
            debug!("Restored persisted session");
            store.user = persisted.user;
            store.install_token(SecretString::from(token));
        }

        store
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current user profile, if logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether a session token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether the current user holds a privileged role
    /// (ADMIN, MANAGER, or STAFF).
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(UserProfile::is_privileged)
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Exchange credentials for a session.
    ///
    /// On success the session is set atomically (user and token together)
    /// and persisted. On failure the session is left cleared.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message on bad credentials, or a
    /// transport error.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<(), ApiError> {
        match self.api.post::<_, AuthPayload>("/auth/login", credentials).await {
            Ok(payload) => {
                self.establish(payload);
                Ok(())
            }
            Err(err) => {
                self.clear_local();
                Err(err)
            }
        }
    }

    /// Create an account and log straight in.
    ///
    /// Same contract as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message (for example, an email
    /// already in use) or a transport error.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&mut self, data: &RegisterRequest) -> Result<(), ApiError> {
        match self.api.post::<_, AuthPayload>("/auth/register", data).await {
            Ok(payload) => {
                self.establish(payload);
                Ok(())
            }
            Err(err) => {
                self.clear_local();
                Err(err)
            }
        }
    }

    /// Request a one-time passcode for a password reset.
    ///
    /// Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_unit("/auth/forgot-password", &serde_json::json!({ "email": email }))
            .await
    }

    /// Exchange a one-time passcode for a short-lived reset token.
    ///
    /// Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<String, ApiError> {
        self.api
            .post(
                "/auth/verify-otp",
                &serde_json::json!({ "email": email, "otp": otp }),
            )
            .await
    }

    /// Finalize a password reset.
    ///
    /// Does not touch the session; the customer logs in afterward.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.api.post_unit("/auth/reset-password", request).await
    }

    /// Clear the session. Idempotent; never fails.
    pub fn logout(&mut self) {
        self.clear_local();
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Refresh the profile from the server.
    ///
    /// No-op without a token. Failures are logged, not surfaced - a stale
    /// profile is acceptable.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&mut self) {
        if self.token.is_none() {
            return;
        }

        match self.api.get::<UserProfile>("/users/profile").await {
            Ok(user) => {
                self.user = Some(user);
                self.persist();
            }
            Err(err) => {
                warn!(error = %err, "Failed to refresh profile");
            }
        }
    }

    /// Update the profile.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip_all)]
    pub async fn update_profile(&mut self, data: &serde_json::Value) -> Result<(), ApiError> {
        let user: UserProfile = self.api.put("/users/profile", data).await?;
        self.user = Some(user);
        self.persist();
        Ok(())
    }

    // =========================================================================
    // Address Book
    // =========================================================================

    /// Fetch the saved address book.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    pub async fn addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.api.get("/users/addresses").await
    }

    /// Save a new address, returning the refreshed address book.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    pub async fn add_address(&self, request: &AddressRequest) -> Result<Vec<Address>, ApiError> {
        self.api.post_unit("/users/addresses", request).await?;
        self.addresses().await
    }

    /// Update a saved address, returning the refreshed address book.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    pub async fn update_address(
        &self,
        id: &AddressId,
        request: &AddressRequest,
    ) -> Result<Vec<Address>, ApiError> {
        self.api
            .put_unit(&format!("/users/addresses/{id}"), request)
            .await?;
        self.addresses().await
    }

    /// Delete a saved address, returning the refreshed address book.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    pub async fn delete_address(&self, id: &AddressId) -> Result<Vec<Address>, ApiError> {
        self.api
            .delete_unit(&format!("/users/addresses/{id}"))
            .await?;
        self.addresses().await
    }

    /// Mark an address as the default, returning the refreshed book.
    ///
    /// Default uniqueness is enforced server-side, which is why the list is
    /// re-fetched instead of patching flags locally.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    pub async fn set_default_address(&self, id: &AddressId) -> Result<Vec<Address>, ApiError> {
        self.api
            .put_unit(&format!("/users/addresses/{id}/default"), &serde_json::json!({}))
            .await?;
        self.addresses().await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn establish(&mut self, payload: AuthPayload) {
        self.user = Some(payload.user);
        self.install_token(SecretString::from(payload.token.clone()));
        self.persist_with_token(Some(payload.token));
    }

    fn install_token(&mut self, token: SecretString) {
        self.api.set_token(token.clone());
        self.token = Some(token);
    }

    fn clear_local(&mut self) {
        self.user = None;
        self.token = None;
        self.api.clear_token();
        self.persist_with_token(None);
    }

    fn persist(&self) {
        use secrecy::ExposeSecret;
        let token = self
            .token
            .as_ref()
            .map(|token| token.expose_secret().to_string());
        self.persist_with_token(token);
    }

    fn persist_with_token(&self, token: Option<String>) {
        let state = PersistedSession {
            user: self.user.clone(),
            is_authenticated: token.is_some(),
            token,
        };
        save_json(self.storage.as_ref(), keys::AUTH, &state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::persist::MemoryStore;

    #[allow(clippy::unwrap_used)]
    fn api() -> ApiClient {
        let config = ClientConfig::new("http://localhost:1/api".parse().unwrap());
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let store = SessionStore::new(api(), Arc::new(MemoryStore::new()));
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_session_restores_from_storage() {
        let storage = Arc::new(MemoryStore::new());
        let persisted = r#"{
            "user": {
                "id": "u-1",
                "firstName": "Asha",
                "lastName": "Rao",
                "email": "asha@example.com",
                "roles": ["USER", "ADMIN"]
            },
            "token": "tok-123",
            "isAuthenticated": true
        }"#;
        storage
            .save(keys::AUTH, persisted)
            .expect("seed storage");

        let client = api();
        let store = SessionStore::new(client.clone(), storage);
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert!(client.has_token());
    }

    #[test]
    fn test_logout_is_idempotent_and_persists_cleared_state() {
        let storage = Arc::new(MemoryStore::new());
        let client = api();
        let storage_port: Arc<dyn StateStore> = storage.clone();
        let mut store = SessionStore::new(client.clone(), storage_port);

        store.logout();
        store.logout();

        assert!(!store.is_authenticated());
        assert!(!client.has_token());
        let raw = storage.load(keys::AUTH).expect("load").expect("present");
        assert!(raw.contains("\"isAuthenticated\":false"));
    }
}
