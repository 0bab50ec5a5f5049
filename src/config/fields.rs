//! Field catalogs for the three document categories.
//!
//! These tables drive the save-time whitelist for `dh` documents and describe
//! the known Audio2Face parameters and emotions for UI layers. The backend
//! never rejects unknown `a2f` keys; the catalogs only control what gets
//! surfaced, so they must not be used to filter loaded documents.

/// Top-level scalar fields accepted by the `dh` backend.
///
/// Anything outside this list is dropped at save time. The three optional
/// nested blocks ([`DH_NESTED_SECTIONS`]) are passed through separately.
pub const DH_ALLOWED_FIELDS: [&str; 20] = [
    "config_id",
    "botid",
    "destinationflow",
    "a2f_config",
    "customize",
    "projectname",
    "userid",
    "asrtimeout",
    "sessiontimeout",
    "isanim",
    "asrprovider",
    "asrlanguage",
    "micactivedelay",
    "asrvadfalseblock",
    "asrvadfalsetimeout",
    "asrvadtrueblock",
    "psaudio",
    "ttsprovider",
    "speakerlanguage",
    "speakerid",
];

/// Optional nested blocks on a `dh` document, copied verbatim at save time.
///
/// Unlike the top-level fields these are not whitelisted recursively; the
/// backend trusts their contents as-is. This asymmetry matches the deployed
/// wire contract and must be preserved.
pub const DH_NESTED_SECTIONS: [&str; 3] = ["sheet", "idle_config", "tts_inject_config"];

/// Value range for a tunable slider, with its factory default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// The thirteen Audio2Face animation parameters.
pub const A2F_PARAMETERS: [SliderSpec; 13] = [
    SliderSpec { id: "blink_strength", label: "Blink Strength", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    SliderSpec { id: "eyelid_open_offset", label: "Eyelid Open Offset", min: -1.0, max: 1.0, step: 0.1, default: 0.0 },
    SliderSpec { id: "face_mask_level", label: "Face Mask Level", min: 0.0, max: 1.0, step: 0.05, default: 0.6 },
    SliderSpec { id: "face_mask_softness", label: "Face Mask Softness", min: 0.001, max: 0.5, step: 0.001, default: 0.0085 },
    SliderSpec { id: "lip_open_offset", label: "Lip Open Offset", min: -0.2, max: 0.2, step: 0.01, default: 0.0 },
    SliderSpec { id: "lower_face_smoothing", label: "Lower Face Smoothing", min: 0.0, max: 0.1, step: 0.001, default: 0.006 },
    SliderSpec { id: "lower_face_strength", label: "Lower Face Strength", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    SliderSpec { id: "tongue_depth_offset", label: "Tongue Depth Offset", min: -3.0, max: 3.0, step: 0.1, default: 0.0 },
    SliderSpec { id: "tongue_height_offset", label: "Tongue Height Offset", min: -3.0, max: 3.0, step: 0.1, default: 0.0 },
    SliderSpec { id: "tongue_strength", label: "Tongue Strength", min: 0.0, max: 3.0, step: 0.1, default: 1.3 },
    SliderSpec { id: "upper_face_smoothing", label: "Upper Face Smoothing", min: 0.0, max: 0.1, step: 0.001, default: 0.001 },
    SliderSpec { id: "upper_face_strength", label: "Upper Face Strength", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    SliderSpec { id: "skin_strength", label: "Skin Strength", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
];

/// General emotion-detection settings, stored flat on `emotions`.
pub const A2F_EMOTION_SETTINGS: [SliderSpec; 5] = [
    SliderSpec { id: "detected_emotion_contrast", label: "Contrast", min: 0.3, max: 3.0, step: 0.1, default: 1.0 },
    SliderSpec { id: "detected_emotion_smoothing", label: "Smoothing", min: 0.0, max: 1.0, step: 0.05, default: 0.7 },
    SliderSpec { id: "max_detected_emotions", label: "Max Detected", min: 1.0, max: 6.0, step: 1.0, default: 3.0 },
    SliderSpec { id: "emotion_override_strength", label: "Override Strength", min: 0.0, max: 1.0, step: 0.1, default: 0.5 },
    SliderSpec { id: "overall_emotion_strength", label: "Overall Strength", min: 0.0, max: 1.0, step: 0.1, default: 0.6 },
];

/// Emotion names accepted under `emotions.emotion_overrides`.
pub const A2F_EMOTION_TYPES: [&str; 10] = [
    "amazement",
    "anger",
    "cheekiness",
    "disgust",
    "fear",
    "grief",
    "joy",
    "outofbreath",
    "pain",
    "sadness",
];

/// Key on the `emotions` object holding per-emotion overrides; every other
/// key on `emotions` is one of the flat general settings.
pub const EMOTION_OVERRIDES_KEY: &str = "emotion_overrides";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_no_duplicates() {
        let mut fields: Vec<&str> = DH_ALLOWED_FIELDS.to_vec();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), DH_ALLOWED_FIELDS.len());

        let mut params: Vec<&str> = A2F_PARAMETERS.iter().map(|p| p.id).collect();
        params.sort_unstable();
        params.dedup();
        assert_eq!(params.len(), A2F_PARAMETERS.len());
    }

    #[test]
    fn nested_sections_are_not_in_the_scalar_whitelist() {
        for section in DH_NESTED_SECTIONS {
            assert!(!DH_ALLOWED_FIELDS.contains(&section));
        }
    }

    #[test]
    fn overrides_key_is_not_a_general_setting() {
        assert!(A2F_EMOTION_SETTINGS
            .iter()
            .all(|s| s.id != EMOTION_OVERRIDES_KEY));
    }
}
