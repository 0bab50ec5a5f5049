//! Stateless REST client for the per-category config endpoints.
//!
//! Four operations (list, fetch, upsert, delete), each against one of three
//! fixed base URLs selected by [`ConfigCategory`]. Every call requires a
//! bearer token in the [`SessionStore`] and fails with
//! [`DhError::NotAuthenticated`] before touching the network when there is
//! none. No retries, no pagination; list responses are assumed small.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ConfigCategory;
use crate::error::DhError;
use crate::session::SessionStore;

/// Base URLs for the three config services.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub dh: String,
    pub a2f: String,
    pub customize: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dh: "https://dhconfig-zb2xurnl2a-as.a.run.app/dhConfig".to_string(),
            a2f: "https://dha2fconfig-zb2xurnl2a-as.a.run.app/dhA2fConfig".to_string(),
            customize: "https://dhcustomize-zb2xurnl2a-as.a.run.app/dhCustomize".to_string(),
        }
    }
}

impl Endpoints {
    /// All three services rooted under one base, as mock servers expose them.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            dh: format!("{base}/dhConfig"),
            a2f: format!("{base}/dhA2fConfig"),
            customize: format!("{base}/dhCustomize"),
        }
    }

    fn url_for(&self, category: ConfigCategory) -> &str {
        match category {
            ConfigCategory::Dh => &self.dh,
            ConfigCategory::A2f => &self.a2f,
            ConfigCategory::Customize => &self.customize,
        }
    }
}

/// The four config operations, abstracted so the editor can run against an
/// in-memory double in tests.
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Returns every config id known for the category.
    async fn list(&self, category: ConfigCategory) -> Result<Vec<String>, DhError>;

    /// Loads one document, unnormalized, exactly as the backend stored it.
    async fn fetch(&self, category: ConfigCategory, config_id: &str) -> Result<Value, DhError>;

    /// Creates or updates a document; the backend does not distinguish.
    /// Last write wins; there is no optimistic concurrency.
    async fn upsert(&self, category: ConfigCategory, document: &Value) -> Result<(), DhError>;

    /// Deletes one document by id.
    async fn delete(&self, category: ConfigCategory, config_id: &str) -> Result<(), DhError>;
}

/// HTTP implementation of [`ConfigService`].
///
/// Holds no document state of its own; the session store supplies the bearer
/// token per request. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ConfigApi {
    endpoints: Arc<Endpoints>,
    client: Client,
    session: SessionStore,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    configs: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ConfigApi {
    /// Creates a client against the production endpoints.
    pub fn new(session: SessionStore) -> Self {
        Self::with_endpoints(session, Endpoints::default())
    }

    /// Creates a client against custom endpoints.
    pub fn with_endpoints(session: SessionStore, endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), session, endpoints)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, session: SessionStore, endpoints: Endpoints) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            client,
            session,
        }
    }

    fn bearer_token(&self) -> Result<String, DhError> {
        self.session.get().ok_or(DhError::NotAuthenticated)
    }

    /// Maps a non-2xx response to `DhError::Api`, preferring the server's
    /// structured `error` message over the transport status text.
    async fn api_error(response: reqwest::Response, action: &str) -> DhError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        match message {
            Some(msg) => DhError::Api(msg),
            None => DhError::Api(format!(
                "Failed to {action}: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )),
        }
    }
}

#[async_trait]
impl ConfigService for ConfigApi {
    async fn list(&self, category: ConfigCategory) -> Result<Vec<String>, DhError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.endpoints.url_for(category))
            .query(&[("config_id", "listall")])
            .bearer_auth(&token)
            .send()
            .await?;

        log::debug!("list {category}: HTTP {}", response.status());
        if !response.status().is_success() {
            return Err(Self::api_error(response, "fetch configs").await);
        }
        let body: ListResponse = response.json().await?;
        Ok(body.configs)
    }

    async fn fetch(&self, category: ConfigCategory, config_id: &str) -> Result<Value, DhError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.endpoints.url_for(category))
            .query(&[("config_id", config_id)])
            .bearer_auth(&token)
            .send()
            .await?;

        log::debug!("fetch {category}/{config_id}: HTTP {}", response.status());
        if !response.status().is_success() {
            return Err(Self::api_error(response, "load config").await);
        }
        Ok(response.json().await?)
    }

    async fn upsert(&self, category: ConfigCategory, document: &Value) -> Result<(), DhError> {
        let token = self.bearer_token()?;
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(document) {
                log::trace!("upsert {category} payload: {json}");
            }
        }
        let response = self
            .client
            .post(self.endpoints.url_for(category))
            .bearer_auth(&token)
            .json(document)
            .send()
            .await?;

        log::debug!("upsert {category}: HTTP {}", response.status());
        if !response.status().is_success() {
            return Err(Self::api_error(response, "save config").await);
        }
        Ok(())
    }

    async fn delete(&self, category: ConfigCategory, config_id: &str) -> Result<(), DhError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .delete(self.endpoints.url_for(category))
            .query(&[("config_id", config_id)])
            .bearer_auth(&token)
            .send()
            .await?;

        log::debug!("delete {category}/{config_id}: HTTP {}", response.status());
        if !response.status().is_success() {
            return Err(Self::api_error(response, "delete config").await);
        }
        Ok(())
    }
}
