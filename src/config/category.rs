use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of configuration documents the dashboard manages.
///
/// The category selects both the backend endpoint and the shape the
/// normalizer produces at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigCategory {
    /// Digital Human runtime settings (identity, ASR/TTS, optional blocks)
    Dh,
    /// Audio2Face animation parameters and emotion tuning
    A2f,
    /// Avatar appearance (model, clothes, accessories, colors, hair)
    Customize,
}

impl ConfigCategory {
    /// All categories, in the order the dashboard presents them.
    pub const ALL: [ConfigCategory; 3] = [
        ConfigCategory::Dh,
        ConfigCategory::A2f,
        ConfigCategory::Customize,
    ];

    /// Lowercase wire name, matching the backend route naming.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigCategory::Dh => "dh",
            ConfigCategory::A2f => "a2f",
            ConfigCategory::Customize => "customize",
        }
    }
}

impl fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase() {
        assert_eq!(ConfigCategory::Dh.to_string(), "dh");
        assert_eq!(ConfigCategory::A2f.as_str(), "a2f");
        assert_eq!(ConfigCategory::Customize.as_str(), "customize");
    }

    #[test]
    fn serde_roundtrip_uses_wire_names() {
        let json = serde_json::to_string(&ConfigCategory::A2f).unwrap();
        assert_eq!(json, "\"a2f\"");
        let back: ConfigCategory = serde_json::from_str("\"customize\"").unwrap();
        assert_eq!(back, ConfigCategory::Customize);
    }
}
