//! Boundary to the avatar-streaming SDK.
//!
//! The SDK itself ships separately and may not be present at all; this module
//! only defines the control surface the dashboard drives and a guard that
//! degrades every call to a logged warning when the SDK is missing or not yet
//! initialized. Nothing here ever panics over an absent SDK.

use std::sync::Arc;

use serde_json::Value;

/// Options passed to the SDK on init.
#[derive(Debug, Clone)]
pub struct AvatarInitOptions {
    pub auto_unmute: bool,
    pub show_ui: bool,
    pub look_at: bool,
    pub microphone: bool,
}

impl Default for AvatarInitOptions {
    fn default() -> Self {
        Self {
            auto_unmute: false,
            show_ui: true,
            look_at: false,
            microphone: true,
        }
    }
}

/// The control surface the external avatar SDK exposes.
pub trait AvatarSdk: Send + Sync {
    fn init(&self, app_id: &str, options: &AvatarInitOptions);
    fn disconnect(&self);
    fn set_config_id(&self, config_id: &str);
    /// Queues a TTS job; `custom_params` rides along to the TTS provider.
    fn send_job(&self, text: &str, callback_url: &str, auth_token: &str, custom_params: &Value);
    fn send_message(&self, message: &str);
    /// Directs the avatar's gaze toward `(x, y)` for the given face count.
    fn look_at(&self, faces: u32, x: f64, y: f64);
}

/// Presence-checked wrapper around an optionally available [`AvatarSdk`].
///
/// Mirrors the dashboard's behavior when the SDK script has not loaded:
/// every control call is a no-op with a warning, and `init` is applied at
/// most once until a disconnect.
pub struct AvatarHandle {
    sdk: Option<Arc<dyn AvatarSdk>>,
    initialized: bool,
}

impl AvatarHandle {
    /// A handle over a loaded SDK.
    pub fn new(sdk: Arc<dyn AvatarSdk>) -> Self {
        Self {
            sdk: Some(sdk),
            initialized: false,
        }
    }

    /// A handle for when the SDK never loaded. All calls warn and return.
    pub fn absent() -> Self {
        Self {
            sdk: None,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initializes the SDK for a stream. Repeat calls are ignored until a
    /// disconnect.
    pub fn init(&mut self, app_id: &str, options: &AvatarInitOptions) {
        if app_id.is_empty() || self.initialized {
            return;
        }
        match &self.sdk {
            Some(sdk) => {
                sdk.init(app_id, options);
                self.initialized = true;
            }
            None => log::warn!("avatar SDK not loaded; init skipped"),
        }
    }

    /// Disconnects the stream if one was initialized. Idempotent.
    pub fn disconnect(&mut self) {
        if !self.initialized {
            return;
        }
        if let Some(sdk) = &self.sdk {
            sdk.disconnect();
        }
        self.initialized = false;
    }

    pub fn set_config_id(&self, config_id: &str) {
        if let Some(sdk) = self.ready() {
            sdk.set_config_id(config_id);
        }
    }

    pub fn send_job(&self, text: &str, callback_url: &str, auth_token: &str, custom_params: &Value) {
        if let Some(sdk) = self.ready() {
            sdk.send_job(text, callback_url, auth_token, custom_params);
        }
    }

    pub fn send_message(&self, message: &str) {
        if let Some(sdk) = self.ready() {
            sdk.send_message(message);
        }
    }

    pub fn look_at(&self, faces: u32, x: f64, y: f64) {
        if let Some(sdk) = self.ready() {
            sdk.look_at(faces, x, y);
        }
    }

    fn ready(&self) -> Option<&Arc<dyn AvatarSdk>> {
        if !self.initialized {
            log::warn!("avatar SDK not initialized");
            return None;
        }
        self.sdk.as_ref()
    }
}

impl Drop for AvatarHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSdk {
        inits: AtomicUsize,
        disconnects: AtomicUsize,
        config_ids: Mutex<Vec<String>>,
        messages: Mutex<Vec<String>>,
    }

    impl AvatarSdk for RecordingSdk {
        fn init(&self, _app_id: &str, _options: &AvatarInitOptions) {
            self.inits.fetch_add(1, Ordering::SeqCst);
        }
        fn disconnect(&self) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
        fn set_config_id(&self, config_id: &str) {
            self.config_ids.lock().unwrap().push(config_id.to_string());
        }
        fn send_job(&self, _text: &str, _cb: &str, _token: &str, _params: &Value) {}
        fn send_message(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
        fn look_at(&self, _faces: u32, _x: f64, _y: f64) {}
    }

    #[test]
    fn absent_sdk_never_panics() {
        let mut handle = AvatarHandle::absent();
        handle.init("stream-1", &AvatarInitOptions::default());
        handle.set_config_id("cfg1");
        handle.send_message("hi");
        handle.look_at(1, 0.5, 0.5);
        handle.disconnect();
        assert!(!handle.is_initialized());
    }

    #[test]
    fn init_is_applied_once_until_disconnect() {
        let sdk = Arc::new(RecordingSdk::default());
        let mut handle = AvatarHandle::new(sdk.clone());

        handle.init("stream-1", &AvatarInitOptions::default());
        handle.init("stream-1", &AvatarInitOptions::default());
        assert_eq!(sdk.inits.load(Ordering::SeqCst), 1);

        handle.disconnect();
        handle.disconnect();
        assert_eq!(sdk.disconnects.load(Ordering::SeqCst), 1);

        handle.init("stream-1", &AvatarInitOptions::default());
        assert_eq!(sdk.inits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn control_calls_before_init_are_dropped() {
        let sdk = Arc::new(RecordingSdk::default());
        let handle = AvatarHandle::new(sdk.clone());
        handle.set_config_id("cfg1");
        assert!(sdk.config_ids.lock().unwrap().is_empty());
    }

    #[test]
    fn control_calls_flow_through_after_init() {
        let sdk = Arc::new(RecordingSdk::default());
        let mut handle = AvatarHandle::new(sdk.clone());
        handle.init("stream-1", &AvatarInitOptions::default());
        handle.set_config_id("cfg1");
        handle.send_message("hello");
        assert_eq!(*sdk.config_ids.lock().unwrap(), vec!["cfg1"]);
        assert_eq!(*sdk.messages.lock().unwrap(), vec!["hello"]);
    }

    #[test]
    fn drop_disconnects_an_active_stream() {
        let sdk = Arc::new(RecordingSdk::default());
        {
            let mut handle = AvatarHandle::new(sdk.clone());
            handle.init("stream-1", &AvatarInitOptions::default());
        }
        assert_eq!(sdk.disconnects.load(Ordering::SeqCst), 1);
    }
}
