//! Bridge between the external identity provider and the backend bearer token.
//!
//! The provider's session (popup/redirect mechanics, user records) lives
//! outside this crate; all we consume is the ability to mint a short-lived
//! signed ID token on demand, plus a stream of signed-in/signed-out changes.
//! One GET against the exchange endpoint turns that ID token into the bearer
//! credential every config call carries.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::DhError;
use crate::session::SessionStore;

/// Default token-exchange endpoint.
pub const EXCHANGE_URL: &str = "https://api-voice.botnoi.ai/api/dashboard/firebase_auth";

/// Header carrying the provider ID token on the exchange request.
const EXCHANGE_HEADER: &str = "botnoi-token";

/// A signed-in identity able to mint short-lived signed ID tokens.
///
/// Implemented over whatever user handle the identity provider exposes;
/// tests supply a canned token.
#[async_trait]
pub trait IdentityAssertion: Send + Sync {
    /// Produces a fresh signed ID token for this user.
    async fn id_token(&self) -> Result<String, DhError>;
}

/// What the identity provider currently reports.
#[derive(Clone)]
pub enum AuthState {
    /// A user is signed in with the provider (its session may have outlived
    /// ours, e.g. across a page reload).
    SignedIn(Arc<dyn IdentityAssertion>),
    SignedOut,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthState::SignedIn(_) => f.write_str("SignedIn"),
            AuthState::SignedOut => f.write_str("SignedOut"),
        }
    }
}

#[derive(Debug)]
struct AuthConfig {
    exchange_url: String,
}

/// Exchanges identity-provider assertions for the backend bearer token.
///
/// The only writer of the [`SessionStore`] besides [`AuthBridge::sign_out`].
#[derive(Debug, Clone)]
pub struct AuthBridge {
    config: Arc<AuthConfig>,
    client: Client,
    session: SessionStore,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    token: Option<String>,
}

impl AuthBridge {
    /// Creates a bridge against the production exchange endpoint.
    pub fn new(session: SessionStore) -> Self {
        Self::with_url(session, EXCHANGE_URL)
    }

    /// Creates a bridge against a custom exchange endpoint.
    pub fn with_url(session: SessionStore, exchange_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), session, exchange_url)
    }

    /// Creates a bridge reusing an existing `reqwest::Client`.
    pub fn with_client(
        client: Client,
        session: SessionStore,
        exchange_url: impl Into<String>,
    ) -> Self {
        Self {
            config: Arc::new(AuthConfig {
                exchange_url: exchange_url.into(),
            }),
            client,
            session,
        }
    }

    /// Trades a fresh ID token from `assertion` for the backend bearer token,
    /// storing it in the session on success.
    ///
    /// No retry is attempted; a non-2xx response or a body without a `token`
    /// field fails with [`DhError::ExchangeFailed`] and leaves the session
    /// untouched.
    pub async fn exchange(&self, assertion: &dyn IdentityAssertion) -> Result<String, DhError> {
        let id_token = assertion.id_token().await?;

        let response = self
            .client
            .get(&self.config.exchange_url)
            .header(EXCHANGE_HEADER, format!("Bearer {id_token}"))
            .send()
            .await
            .map_err(|e| DhError::ExchangeFailed(e.to_string()))?;

        let status = response.status();
        log::debug!("token exchange: HTTP {status}");
        if !status.is_success() {
            return Err(DhError::ExchangeFailed(
                status.canonical_reason().unwrap_or(status.as_str()).to_string(),
            ));
        }

        let body: ExchangeResponse = response
            .json()
            .await
            .map_err(|e| DhError::ExchangeFailed(e.to_string()))?;
        let token = body
            .token
            .ok_or_else(|| DhError::ExchangeFailed("No token received from API".to_string()))?;

        self.session.put(token.clone());
        Ok(token)
    }

    /// Signs out locally: drops the bearer token. The identity provider's own
    /// session is the caller's to end.
    pub fn sign_out(&self) {
        self.session.clear();
        log::debug!("session cleared");
    }

    /// The session store this bridge writes into.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// Background task keeping the bearer token in step with provider auth state.
///
/// Covers reload recovery: the provider's session can persist while the
/// bearer token (volatile by design) does not, so whenever the provider
/// reports a signed-in user and the store is empty, a re-exchange runs.
/// Exchange failures are logged, not retried; the next state change tries
/// again.
#[derive(Debug)]
pub struct SessionKeeper {
    handle: JoinHandle<()>,
}

impl SessionKeeper {
    /// Subscribes to `states` and spawns the watcher. The current state is
    /// handled immediately, then every change until shutdown.
    pub fn spawn(bridge: AuthBridge, mut states: watch::Receiver<AuthState>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                let state = states.borrow_and_update().clone();
                if let AuthState::SignedIn(assertion) = state {
                    if !bridge.session().is_authenticated() {
                        if let Err(err) = bridge.exchange(assertion.as_ref()).await {
                            log::warn!("token re-exchange failed: {err}");
                        }
                    }
                }
                if states.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Tears the watcher down.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for SessionKeeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
