//! Document categories, field catalogs, and the save-time normalizer.
//!
//! Documents are schemaless [`serde_json::Value`] objects: loads are stored
//! as-is (unknown fields preserved) and only the normalizer decides what a
//! save actually sends.

mod category;
mod defaults;
mod fields;
mod normalize;
mod validation;

pub use category::ConfigCategory;
pub use defaults::{
    default_document, idle_config_template, sheet_template, tts_inject_template, DEFAULT_COLOR,
};
pub use fields::{
    SliderSpec, A2F_EMOTION_SETTINGS, A2F_EMOTION_TYPES, A2F_PARAMETERS, DH_ALLOWED_FIELDS,
    DH_NESTED_SECTIONS, EMOTION_OVERRIDES_KEY,
};
pub use normalize::normalize;
pub use validation::{validate_delete_confirmation, validate_for_save, DELETE_CONFIRMATION};
