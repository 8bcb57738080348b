//! API gateway client.
//!
//! Single point of outbound HTTP communication. Every request carries the
//! current session token as a bearer credential and a generated
//! `x-request-id` header. Responses use a uniform envelope:
//!
//! ```json
//! { "success": true, "message": "Item added to cart", "data": { ... } }
//! ```
//!
//! An authorization failure (HTTP 401) tears the session down: the shared
//! token is cleared and the registered unauthorized hook fires once, so the
//! embedding application can route the customer back to login. The hook is
//! only invoked when a token was actually held, which keeps an already
//! logged-out client from looping.

use std::sync::{Arc, RwLock};

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Callback invoked when the server rejects the session.
pub type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

/// Uniform response envelope returned by every API endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, present on most responses.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload; absent for acknowledgement-only responses.
    pub data: Option<T>,
}

/// Client for the Saffron REST API.
///
/// Cheap to clone; all clones share the same connection pool, token, and
/// unauthorized hook. The token is written only by the session store;
/// everything else just reads it.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
    on_unauthorized: RwLock<Option<UnauthorizedHook>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(None),
                on_unauthorized: RwLock::new(None),
            }),
        })
    }

    /// Register the hook fired when the server rejects the session.
    ///
    /// The embedding application typically logs the session store out and
    /// navigates to its login entry point here.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.on_unauthorized.write() {
            *guard = Some(Box::new(hook));
        }
    }

    /// Install the session token attached to subsequent requests.
    ///
    /// Only the session store should call this.
    pub fn set_token(&self, token: SecretString) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = Some(token);
        }
    }

    /// Drop the session token.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = None;
        }
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    // =========================================================================
    // Request Methods
    // =========================================================================

    /// GET a payload-carrying endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None)
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// POST a JSON body, expecting a payload back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body))
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// POST a JSON body where only the acknowledgement matters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send::<serde_json::Value>(Method::POST, path, Some(body))
            .await?;
        Ok(())
    }

    /// POST without a body, expecting a payload back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, None)
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// PUT without a body (parameters ride in the path/query), expecting a
    /// payload back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::PUT, path, None)
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// PUT a JSON body, expecting a payload back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(body))
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// PUT where only the acknowledgement matters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn put_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send::<serde_json::Value>(Method::PUT, path, Some(body))
            .await?;
        Ok(())
    }

    /// DELETE, expecting a payload back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// missing payload.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, None)
            .await?
            .ok_or(ApiError::MissingData)
    }

    /// DELETE where only the acknowledgement matters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(Method::DELETE, path, None)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Core Execution
    // =========================================================================

    /// Execute a request and unwrap the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self
            .inner
            .http
            .request(method.clone(), &url)
            .header("x-request-id", Uuid::new_v4().to_string());

        {
            let token = self
                .inner
                .token
                .read()
                .ok()
                .and_then(|guard| guard.clone());
            if let Some(token) = token {
                request = request.bearer_auth(token.expose_secret());
            }
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;

        debug!(%method, path, status = status.as_u16(), "API request");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            let message =
                envelope_message(&text).unwrap_or_else(|| "Session expired".to_string());
            return Err(ApiError::Unauthorized(message));
        }

        if !status.is_success() {
            let message = envelope_message(&text)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)?;
        if !envelope.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        Ok(envelope.data)
    }

    /// Tear down the session after an authorization failure.
    ///
    /// Clears the token and fires the hook, but only when a token was held,
    /// so repeated 401s while logged out stay quiet.
    fn handle_unauthorized(&self) {
        let had_token = self
            .inner
            .token
            .write()
            .map(|mut guard| guard.take().is_some())
            .unwrap_or(false);

        if !had_token {
            return;
        }

        warn!("Session rejected by server; clearing token");
        if let Ok(guard) = self.inner.on_unauthorized.read()
            && let Some(hook) = guard.as_ref()
        {
            hook();
        }
    }
}

/// Pull the `message` field out of an error-response envelope, if any.
fn envelope_message(text: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorEnvelope>(text)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_full_response() {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"success": true, "message": "Login successful", "data": {"token": "t"}}"#,
        )
        .expect("parse");
        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Login successful"));
        assert!(envelope.data.is_some());
    }

    #[test]
    fn test_envelope_tolerates_null_data() {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"success": true, "message": "OTP sent to your email", "data": null}"#,
        )
        .expect("parse");
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_message_extraction() {
        assert_eq!(
            envelope_message(r#"{"success": false, "message": "Invalid coupon code"}"#),
            Some("Invalid coupon code".to_string())
        );
        assert_eq!(envelope_message(r#"{"success": false, "message": ""}"#), None);
        assert_eq!(envelope_message("not json"), None);
    }
}
