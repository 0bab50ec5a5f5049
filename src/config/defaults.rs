//! Starting documents for "create new", and templates for the optional
//! `dh` blocks when they are toggled on.

use serde_json::{json, Value};

use super::category::ConfigCategory;

/// Default hex used when a customize color slot is unset.
pub const DEFAULT_COLOR: &str = "#000000";

/// Returns the document a freshly created config starts from.
///
/// No network call is involved; the editor enters the creating state with
/// this template and the user fills in the required ids.
pub fn default_document(category: ConfigCategory) -> Value {
    match category {
        ConfigCategory::Dh => json!({
            "config_id": "",
            "botid": "",
            "destinationflow": "",
            "a2f_config": "",
            "customize": "",
            "projectname": "",
            "userid": "MetaDefault",
            "asrtimeout": 40,
            "sessiontimeout": 9999,
            "isanim": "true",
            "asrprovider": "elevenlabs",
            "asrlanguage": "th-TH",
            "micactivedelay": 0.5,
            "asrvadfalseblock": 20,
            "asrvadfalsetimeout": 1.5,
            "asrvadtrueblock": 50,
            "psaudio": "true",
            "ttsprovider": "botnoi",
            "speakerlanguage": "th",
            "speakerid": "39",
            "sheet": null,
            "idle_config": null,
            "tts_inject_config": null,
        }),
        ConfigCategory::A2f => json!({
            "config_id": "",
            "parameters": {},
            "emotions": {},
        }),
        ConfigCategory::Customize => json!({
            "config_id": "",
            "model": "Charmi",
            "clothes": "Suit",
            "accessories": { "hat": 0, "face": 0, "earring": 0 },
            "colors": [DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR],
            "hair": { "name": "Pony Tail", "color": "#555555" },
        }),
    }
}

/// Template inserted when the spreadsheet-feed block is enabled on a `dh` form.
pub fn sheet_template() -> Value {
    json!({
        "spreadsheet_id": "",
        "range_name": "Bot!B:E",
        "poll_interval_seconds": 10,
        "prefix": "",
        "item": "",
        "joiner": ", ",
        "last_joiner": "",
        "suffix": "",
        "enabled": "true",
    })
}

/// Template inserted when the idle-chatter block is enabled on a `dh` form.
pub fn idle_config_template() -> Value {
    json!({
        "enabled": "true",
        "random": "true",
        "min_interval": 10,
        "max_interval": 30,
        "sentences": [],
    })
}

/// Template inserted when the TTS-inject block is enabled on a `dh` form.
pub fn tts_inject_template() -> Value {
    json!({
        "auth_token": "",
        "callback_url": "",
        "provider": "botnoi",
        "speaker": "523",
    })
}
