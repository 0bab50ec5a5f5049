//! Save-time shaping of edit state into the backend wire document.
//!
//! Loaded documents are held and mutated as-is; normalization happens exactly
//! once, on save. Each category has a fixed output shape: stray fields that
//! accumulated in the edit state never reach the wire.

use serde_json::{json, Map, Value};

use super::category::ConfigCategory;
use super::defaults::DEFAULT_COLOR;
use super::fields::{DH_ALLOWED_FIELDS, DH_NESTED_SECTIONS, EMOTION_OVERRIDES_KEY};

/// Produces the wire document for `edit` under the given category.
///
/// Pure; the edit state is left untouched and the output shares no structure
/// with it, so later edits cannot alias a payload already handed to the API.
pub fn normalize(category: ConfigCategory, edit: &Value) -> Value {
    match category {
        ConfigCategory::Dh => normalize_dh(edit),
        ConfigCategory::A2f => normalize_a2f(edit),
        ConfigCategory::Customize => normalize_customize(edit),
    }
}

/// Strict top-level whitelist; the optional nested blocks pass through
/// verbatim. The backend rejects unknown top-level fields but trusts the
/// block contents, so there is deliberately no recursive filter here.
/// A `null` block means the section is toggled off and is omitted from
/// the payload rather than forwarded.
fn normalize_dh(edit: &Value) -> Value {
    let mut out = Map::new();
    let empty = Map::new();
    let src = edit.as_object().unwrap_or(&empty);

    for field in DH_ALLOWED_FIELDS {
        if let Some(value) = src.get(field) {
            out.insert(field.to_string(), value.clone());
        }
    }
    for section in DH_NESTED_SECTIONS {
        match src.get(section) {
            Some(Value::Null) | None => {}
            Some(block) => {
                out.insert(section.to_string(), block.clone());
            }
        }
    }
    Value::Object(out)
}

/// Emits the three fixed keys. `emotions` is rebuilt: general settings copied
/// flat, `emotion_overrides` reconstructed as its own object so the saved
/// payload never shares the overrides map with the edit state.
fn normalize_a2f(edit: &Value) -> Value {
    let config_id = edit
        .get("config_id")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let parameters = edit
        .get("parameters")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let mut emotions = Map::new();
    let mut overrides = Map::new();
    if let Some(src) = edit.get("emotions").and_then(Value::as_object) {
        for (key, value) in src {
            if key == EMOTION_OVERRIDES_KEY {
                if let Some(map) = value.as_object() {
                    overrides = map.clone();
                }
            } else {
                emotions.insert(key.clone(), value.clone());
            }
        }
    }
    emotions.insert(EMOTION_OVERRIDES_KEY.to_string(), Value::Object(overrides));

    json!({
        "config_id": config_id,
        "parameters": parameters,
        "emotions": emotions,
    })
}

/// Emits the six fixed keys, defaulting any the user never touched. The edit
/// state keeps the palette under the plural `colors`; the wire field is the
/// singular `color`. The rename is part of the deployed backend contract;
/// do not unify the two names.
fn normalize_customize(edit: &Value) -> Value {
    let get = |key: &str| edit.get(key).filter(|v| !v.is_null()).cloned();

    let config_id = get("config_id").unwrap_or_else(|| json!(""));
    let model = get("model").unwrap_or_else(|| json!("Charmi"));
    let clothes = get("clothes").unwrap_or_else(|| json!("Suit"));
    let accessories =
        get("accessories").unwrap_or_else(|| json!({ "hat": 0, "face": 0, "earring": 0 }));
    let color = get("colors").unwrap_or_else(|| {
        json!([DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR])
    });
    let hair = get("hair").unwrap_or_else(|| json!({ "name": "Pony Tail", "color": "#555555" }));

    json!({
        "config_id": config_id,
        "model": model,
        "clothes": clothes,
        "accessories": accessories,
        "color": color,
        "hair": hair,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn dh_drops_fields_outside_the_whitelist() {
        let edit = json!({
            "config_id": "cfg1",
            "botid": "b1",
            "destinationflow": "IN_greeting",
            "asrtimeout": 40,
            "__ui_expanded": true,
            "stray": "nope",
        });
        let out = normalize(ConfigCategory::Dh, &edit);
        assert_eq!(keys(&out), vec!["asrtimeout", "botid", "config_id", "destinationflow"]);
    }

    #[test]
    fn dh_passes_nested_blocks_through_verbatim() {
        let edit = json!({
            "config_id": "cfg1",
            "sheet": { "spreadsheet_id": "abc", "anything_goes": 42 },
            "idle_config": null,
        });
        let out = normalize(ConfigCategory::Dh, &edit);
        // Nested blocks are trusted as-is, unknown inner keys included.
        assert_eq!(out["sheet"]["anything_goes"], 42);
        assert!(out.get("idle_config").is_none());
        assert!(out.get("tts_inject_config").is_none());
    }

    #[test]
    fn a2f_emits_exactly_the_fixed_keys() {
        let edit = json!({
            "config_id": "a",
            "parameters": { "blink_strength": 1.2 },
            "emotions": { "joy": 1.0 },
            "leftover": true,
        });
        let out = normalize(ConfigCategory::A2f, &edit);
        assert_eq!(keys(&out), vec!["config_id", "emotions", "parameters"]);
        assert_eq!(out["parameters"]["blink_strength"], 1.2);
    }

    #[test]
    fn a2f_splits_overrides_from_general_settings() {
        let edit = json!({
            "config_id": "a",
            "emotions": {
                "joy": 1.0,
                "emotion_overrides": { "anger": 0.3 },
            },
        });
        let out = normalize(ConfigCategory::A2f, &edit);
        assert_eq!(out["emotions"]["joy"], 1.0);
        assert_eq!(out["emotions"]["emotion_overrides"]["anger"], 0.3);
    }

    #[test]
    fn a2f_overrides_do_not_alias_the_edit_state() {
        let mut edit = json!({
            "config_id": "a",
            "emotions": { "joy": 1.0, "emotion_overrides": { "anger": 0.3 } },
        });
        let out = normalize(ConfigCategory::A2f, &edit);
        edit["emotions"]["emotion_overrides"]["anger"] = json!(0.9);
        edit["emotions"]["joy"] = json!(0.0);
        assert_eq!(out["emotions"]["emotion_overrides"]["anger"], 0.3);
        assert_eq!(out["emotions"]["joy"], 1.0);
    }

    #[test]
    fn a2f_defaults_missing_sections_to_empty_objects() {
        let out = normalize(ConfigCategory::A2f, &json!({ "config_id": "a" }));
        assert!(out["parameters"].as_object().unwrap().is_empty());
        assert_eq!(out["emotions"][EMOTION_OVERRIDES_KEY], json!({}));
    }

    #[test]
    fn customize_renames_colors_to_color() {
        let edit = json!({
            "config_id": "c",
            "colors": ["#111111", "#222222", "#333333", "#444444", "#555555"],
        });
        let out = normalize(ConfigCategory::Customize, &edit);
        assert_eq!(
            out["color"],
            json!(["#111111", "#222222", "#333333", "#444444", "#555555"])
        );
        assert!(out.get("colors").is_none(), "rename, not duplication");
    }

    #[test]
    fn customize_emits_exactly_the_fixed_keys_with_defaults() {
        let out = normalize(ConfigCategory::Customize, &json!({ "config_id": "c", "junk": 1 }));
        assert_eq!(
            keys(&out),
            vec!["accessories", "clothes", "color", "config_id", "hair", "model"]
        );
        assert_eq!(out["model"], "Charmi");
        assert_eq!(out["clothes"], "Suit");
        assert_eq!(out["accessories"], json!({ "hat": 0, "face": 0, "earring": 0 }));
        assert_eq!(out["color"].as_array().unwrap().len(), 5);
        assert_eq!(out["hair"], json!({ "name": "Pony Tail", "color": "#555555" }));
    }
}
