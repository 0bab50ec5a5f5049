//! Client library for the Botnoi Digital Human configuration dashboard.
//!
//! Manages the three categories of named JSON configuration documents the
//! avatar-streaming SDK consumes (`dh`, `a2f`, `customize`), plus the bridge
//! that trades an identity-provider ID token for the backend bearer token.
//!
//! The pieces, leaf to root:
//! - [`SessionStore`] holds the single volatile bearer credential.
//! - [`AuthBridge`] performs the token exchange; [`SessionKeeper`] keeps the
//!   credential in step with identity-provider state changes.
//! - [`ConfigApi`] is the stateless REST client for list/fetch/upsert/delete,
//!   behind the [`ConfigService`] trait.
//! - [`config::normalize`] shapes edit state into the wire document at save
//!   time.
//! - [`ConfigEditor`] owns the one open document and its state machine,
//!   surfacing outcomes as [`Notice`]s.
//! - [`AvatarHandle`] guards the optional avatar SDK control surface.
//!
//! # Example
//!
//! ```no_run
//! use dhconfig::{AuthBridge, ConfigApi, ConfigCategory, ConfigEditor, SessionStore};
//! # use dhconfig::{DhError, IdentityAssertion};
//! # async fn run(user: &dyn IdentityAssertion) -> Result<(), DhError> {
//! let session = SessionStore::new();
//! let bridge = AuthBridge::new(session.clone());
//! bridge.exchange(user).await?;
//!
//! let (editor, _notices) = ConfigEditor::new(ConfigApi::new(session));
//! editor.select_category(ConfigCategory::Dh).await;
//! editor.start_new();
//! editor.mutate_field("config_id", "my_bot".into())?;
//! editor.mutate_field("botid", "68ef116e8596ddfa50f9ce64".into())?;
//! editor.mutate_field("destinationflow", "IN_greeting".into())?;
//! editor.save().await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod avatar;
pub mod config;
mod editor;
mod error;
mod session;

pub use api::{ConfigApi, ConfigService, Endpoints};
pub use auth::{AuthBridge, AuthState, IdentityAssertion, SessionKeeper, EXCHANGE_URL};
pub use avatar::{AvatarHandle, AvatarInitOptions, AvatarSdk};
pub use config::ConfigCategory;
pub use editor::{ConfigEditor, EditorSnapshot, Notice, NoticeLevel, Phase};
pub use error::DhError;
pub use session::SessionStore;

/// Initializes `env_logger` for binaries embedding the library.
#[cfg(feature = "logging")]
pub fn init_logging() {
    env_logger::init();
}
