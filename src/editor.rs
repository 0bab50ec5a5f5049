//! The edit-state controller: one open document at a time.
//!
//! A state machine over `Idle -> Loading -> Editing -> Saving/Deleting`,
//! driving the [`ConfigService`] operations and reporting outcomes as
//! [`Notice`]s for the presentation layer's toasts. State sits behind a sync
//! mutex that is never held across an await; network results are applied
//! under the lock, guarded by a generation counter so a response from a
//! superseded load is discarded instead of clobbering newer state.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::api::ConfigService;
use crate::config::{
    default_document, idle_config_template, normalize, sheet_template, tts_inject_template,
    validate_delete_confirmation, validate_for_save, ConfigCategory,
};
use crate::error::DhError;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, toast-style notification for the presentation layer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Where the controller currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No document selected.
    Idle,
    /// A document is being fetched.
    Loading,
    /// A document is open; `is_creating` marks one that has never been saved.
    Editing,
    Saving,
    Deleting,
}

#[derive(Debug)]
struct EditorState {
    category: ConfigCategory,
    configs: Vec<String>,
    a2f_ids: Vec<String>,
    customize_ids: Vec<String>,
    selected: Option<String>,
    phase: Phase,
    document: Option<Value>,
    is_creating: bool,
    /// Bumped whenever a newer selection supersedes in-flight work.
    generation: u64,
}

impl EditorState {
    fn new() -> Self {
        Self {
            category: ConfigCategory::Dh,
            configs: Vec::new(),
            a2f_ids: Vec::new(),
            customize_ids: Vec::new(),
            selected: None,
            phase: Phase::Idle,
            document: None,
            is_creating: false,
            generation: 0,
        }
    }
}

/// A point-in-time copy of the controller state for rendering.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub category: ConfigCategory,
    pub configs: Vec<String>,
    pub a2f_ids: Vec<String>,
    pub customize_ids: Vec<String>,
    pub selected: Option<String>,
    pub phase: Phase,
    pub document: Option<Value>,
    pub is_creating: bool,
}

/// Owns the single document being created or edited and orchestrates
/// load/save/delete against the config service.
///
/// Two sessions editing the same id will silently overwrite each other; the
/// last upsert wins. That is the backend contract, not a controller bug.
pub struct ConfigEditor<S: ConfigService> {
    service: Arc<S>,
    state: Mutex<EditorState>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl<S: ConfigService> ConfigEditor<S> {
    /// Creates a controller and the notice stream its errors and successes
    /// surface on.
    pub fn new(service: S) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                service: Arc::new(service),
                state: Mutex::new(EditorState::new()),
                notices: tx,
            },
            rx,
        )
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        // The receiver side may have gone away; notices are best-effort.
        let _ = self.notices.send(Notice {
            level,
            message: message.into(),
        });
    }

    fn notify_error(&self, err: &DhError) {
        self.notify(NoticeLevel::Error, err.to_string());
    }

    /// Copies the current state for rendering.
    pub fn snapshot(&self) -> EditorSnapshot {
        let state = self.lock();
        EditorSnapshot {
            category: state.category,
            configs: state.configs.clone(),
            a2f_ids: state.a2f_ids.clone(),
            customize_ids: state.customize_ids.clone(),
            selected: state.selected.clone(),
            phase: state.phase.clone(),
            document: state.document.clone(),
            is_creating: state.is_creating,
        }
    }

    /// Switches categories: drops the open document, returns to `Idle`, and
    /// refreshes the id list. A list failure leaves the list empty and emits
    /// an error notice; nothing is retried.
    pub async fn select_category(&self, category: ConfigCategory) {
        let generation = {
            let mut state = self.lock();
            state.category = category;
            state.generation += 1;
            state.selected = None;
            state.document = None;
            state.is_creating = false;
            state.phase = Phase::Idle;
            state.configs.clear();
            state.generation
        };
        self.refresh_list(category, generation).await;
    }

    async fn refresh_list(&self, category: ConfigCategory, generation: u64) {
        let result = self.service.list(category).await;
        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("discarding stale list response for {category}");
            return;
        }
        match result {
            Ok(ids) => state.configs = ids,
            Err(err) => {
                state.configs.clear();
                drop(state);
                self.notify_error(&err);
            }
        }
    }

    /// Loads an existing document into the editor. On failure the controller
    /// reports the error and returns to `Idle`.
    pub async fn select_existing(&self, config_id: &str) -> Result<(), DhError> {
        let (category, generation) = {
            let mut state = self.lock();
            state.generation += 1;
            state.phase = Phase::Loading;
            state.document = None;
            state.is_creating = false;
            (state.category, state.generation)
        };

        let result = self.service.fetch(category, config_id).await;
        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("discarding stale load of {category}/{config_id}");
            return Ok(());
        }
        match result {
            Ok(document) => {
                state.document = Some(document);
                state.selected = Some(config_id.to_string());
                state.phase = Phase::Editing;
                Ok(())
            }
            Err(err) => {
                state.selected = None;
                state.phase = Phase::Idle;
                drop(state);
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Opens a fresh document from the category template. No network call.
    pub fn start_new(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.selected = None;
        state.document = Some(default_document(state.category));
        state.is_creating = true;
        state.phase = Phase::Editing;
    }

    /// Replaces the value at a dotted `path` ("botid",
    /// "idle_config.min_interval", ...), creating intermediate objects as
    /// needed. No validation happens here; that is save's job.
    pub fn mutate_field(&self, path: &str, value: Value) -> Result<(), DhError> {
        let mut state = self.lock();
        let document = editing_document(&mut state)?;
        set_at_path(document, path, value)
    }

    /// Appends to the list at `path` (e.g. `idle_config.sentences`),
    /// creating it when absent.
    pub fn push_list_item(&self, path: &str, value: Value) -> Result<(), DhError> {
        let mut state = self.lock();
        let document = editing_document(&mut state)?;
        list_at_path(document, path, true)?.push(value);
        Ok(())
    }

    /// Replaces one entry of the list at `path`.
    pub fn set_list_item(&self, path: &str, index: usize, value: Value) -> Result<(), DhError> {
        let mut state = self.lock();
        let document = editing_document(&mut state)?;
        let list = list_at_path(document, path, false)?;
        match list.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DhError::Generic(format!("no item {index} at {path}"))),
        }
    }

    /// Removes one entry of the list at `path`.
    pub fn remove_list_item(&self, path: &str, index: usize) -> Result<(), DhError> {
        let mut state = self.lock();
        let document = editing_document(&mut state)?;
        let list = list_at_path(document, path, false)?;
        if index >= list.len() {
            return Err(DhError::Generic(format!("no item {index} at {path}")));
        }
        list.remove(index);
        Ok(())
    }

    /// Enables or disables one of the optional `dh` blocks (`sheet`,
    /// `idle_config`, `tts_inject_config`), inserting its template when
    /// turned on and nulling it when turned off.
    pub fn toggle_section(&self, section: &str, enabled: bool) -> Result<(), DhError> {
        let template = match section {
            "sheet" => sheet_template(),
            "idle_config" => idle_config_template(),
            "tts_inject_config" => tts_inject_template(),
            other => {
                return Err(DhError::Generic(format!("unknown section: {other}")));
            }
        };
        let mut state = self.lock();
        let document = editing_document(&mut state)?;
        let map = document
            .as_object_mut()
            .ok_or_else(|| DhError::Generic("document is not an object".to_string()))?;
        map.insert(
            section.to_string(),
            if enabled { template } else { Value::Null },
        );
        Ok(())
    }

    /// Validates, normalizes, and upserts the open document, then refreshes
    /// the id list. A successful create re-fetches the new id so the editor
    /// continues on the stored version. Failures keep the edits intact.
    pub async fn save(&self) -> Result<(), DhError> {
        let (category, generation, document, is_creating) = {
            let mut state = self.lock();
            let document = match &state.document {
                Some(doc) if state.phase == Phase::Editing => doc.clone(),
                _ => {
                    let err = DhError::Generic("no document is being edited".to_string());
                    drop(state);
                    self.notify_error(&err);
                    return Err(err);
                }
            };
            if let Err(err) = validate_for_save(state.category, &document) {
                drop(state);
                self.notify_error(&err);
                return Err(err);
            }
            state.phase = Phase::Saving;
            (state.category, state.generation, document, state.is_creating)
        };

        let payload = normalize(category, &document);
        let result = self.service.upsert(category, &payload).await;

        {
            let mut state = self.lock();
            if state.generation == generation {
                state.phase = Phase::Editing;
            }
            if let Err(err) = result {
                drop(state);
                self.notify_error(&err);
                return Err(err);
            }
        }
        self.notify(NoticeLevel::Success, "Config saved successfully!");
        self.refresh_list(category, generation).await;

        if is_creating {
            let config_id = payload
                .get("config_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            {
                let mut state = self.lock();
                if state.generation != generation {
                    return Ok(());
                }
                state.is_creating = false;
            }
            self.select_existing(&config_id).await?;
        }
        Ok(())
    }

    /// Deletes the selected document, gated on the user typing the exact
    /// confirmation literal. A mismatch is rejected before any network call.
    pub async fn request_delete(&self, confirmation: &str) -> Result<(), DhError> {
        if let Err(err) = validate_delete_confirmation(confirmation) {
            self.notify_error(&err);
            return Err(err);
        }

        let (category, generation, config_id) = {
            let mut state = self.lock();
            let config_id = match &state.selected {
                Some(id) if state.phase == Phase::Editing => id.clone(),
                _ => {
                    let err = DhError::Generic("no saved config is selected".to_string());
                    drop(state);
                    self.notify_error(&err);
                    return Err(err);
                }
            };
            state.phase = Phase::Deleting;
            (state.category, state.generation, config_id)
        };

        match self.service.delete(category, &config_id).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    if state.generation == generation {
                        state.phase = Phase::Idle;
                        state.selected = None;
                        state.document = None;
                    }
                }
                self.notify(NoticeLevel::Success, "Config deleted successfully");
                self.refresh_list(category, generation).await;
                Ok(())
            }
            Err(err) => {
                let mut state = self.lock();
                if state.generation == generation {
                    state.phase = Phase::Editing;
                }
                drop(state);
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Fetches the a2f and customize id lists together, for the `dh` form's
    /// reference dropdowns. The two run concurrently; either failing leaves
    /// just that list empty and never blocks the other.
    pub async fn load_reference_lists(&self) {
        let (a2f, customize) = futures::join!(
            self.service.list(ConfigCategory::A2f),
            self.service.list(ConfigCategory::Customize),
        );
        let mut state = self.lock();
        state.a2f_ids = a2f.unwrap_or_else(|err| {
            log::warn!("a2f reference list unavailable: {err}");
            Vec::new()
        });
        state.customize_ids = customize.unwrap_or_else(|err| {
            log::warn!("customize reference list unavailable: {err}");
            Vec::new()
        });
    }
}

fn editing_document<'a>(state: &'a mut EditorState) -> Result<&'a mut Value, DhError> {
    if state.phase != Phase::Editing {
        return Err(DhError::Generic("no document is being edited".to_string()));
    }
    state
        .document
        .as_mut()
        .ok_or_else(|| DhError::Generic("no document is being edited".to_string()))
}

/// Sets `value` at a dotted path, materializing intermediate objects. A null
/// or scalar intermediate is replaced by an object, matching how the forms
/// write into a toggled-off block.
fn set_at_path(document: &mut Value, path: &str, value: Value) -> Result<(), DhError> {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments
        .pop()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DhError::Generic("empty field path".to_string()))?;

    let mut cursor = document;
    for segment in segments {
        let map = cursor
            .as_object_mut()
            .ok_or_else(|| DhError::Generic(format!("{segment} is not an object")))?;
        let entry = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        cursor = entry;
    }
    let map = cursor
        .as_object_mut()
        .ok_or_else(|| DhError::Generic(format!("{path} does not end in an object")))?;
    map.insert(last.to_string(), value);
    Ok(())
}

/// Resolves the list at a dotted path. With `create`, a missing or null slot
/// becomes an empty list first.
fn list_at_path<'a>(
    document: &'a mut Value,
    path: &'a str,
    create: bool,
) -> Result<&'a mut Vec<Value>, DhError> {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments
        .pop()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DhError::Generic("empty field path".to_string()))?;

    let mut cursor = document;
    for segment in segments {
        cursor = cursor
            .get_mut(segment)
            .ok_or_else(|| DhError::Generic(format!("no {segment} in document")))?;
    }
    let map = cursor
        .as_object_mut()
        .ok_or_else(|| DhError::Generic(format!("{path} does not end in an object")))?;
    let missing = match map.get(last) {
        Some(Value::Array(_)) => false,
        Some(Value::Null) | None => true,
        Some(_) => return Err(DhError::Generic(format!("{path} is not a list"))),
    };
    if missing {
        if !create {
            return Err(DhError::Generic(format!("{path} is not a list")));
        }
        map.insert(last.to_string(), Value::Array(Vec::new()));
    }
    match map.get_mut(last) {
        Some(Value::Array(list)) => Ok(list),
        _ => Err(DhError::Generic(format!("{path} is not a list"))),
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
