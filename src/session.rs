//! Session-scoped storage for the backend bearer token.
//!
//! The dashboard holds exactly one credential at a time: the token returned by
//! the identity exchange. It is intentionally volatile: nothing is written to
//! disk, and a fresh process starts signed out until the auth watcher or an
//! interactive sign-in re-exchanges.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};

/// Shared holder for the single bearer credential.
///
/// Cloning is cheap; all clones observe the same token. Written by the
/// identity bridge and by sign-out, read by every API call. There is no
/// client-side expiry: a stale token is only discovered when a request
/// comes back unauthorized.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl SessionStore {
    /// Creates an empty (signed-out) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the bearer token, replacing any previous one.
    pub fn put(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(SecretString::new(token.into()));
    }

    /// Returns the current token, if any.
    pub fn get(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|t| t.expose_secret().clone())
    }

    /// Removes the token. Idempotent.
    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Whether a token is currently present.
    pub fn is_authenticated(&self) -> bool {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }
}
