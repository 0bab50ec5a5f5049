//! Pre-save checks and the delete confirmation gate.
//!
//! Validation is deliberately deferred to save time; field mutation is always
//! legal while editing.

use serde_json::Value;

use crate::error::DhError;

use super::category::ConfigCategory;

/// Literal a user must type, exactly, to confirm a delete.
pub const DELETE_CONFIRMATION: &str = "BOTNOI";

/// Checks the category's required fields before a document goes to the wire.
///
/// `dh` additionally requires the bot routing fields; every category requires
/// a non-empty `config_id`.
pub fn validate_for_save(category: ConfigCategory, document: &Value) -> Result<(), DhError> {
    if !non_empty_string(document, "config_id") {
        return Err(DhError::Validation("Config ID is required".to_string()));
    }
    if category == ConfigCategory::Dh
        && (!non_empty_string(document, "botid") || !non_empty_string(document, "destinationflow"))
    {
        return Err(DhError::Validation(
            "Bot ID and Destination Flow are required".to_string(),
        ));
    }
    Ok(())
}

/// Rejects anything but the exact confirmation literal. Case-sensitive.
pub fn validate_delete_confirmation(input: &str) -> Result<(), DhError> {
    if input != DELETE_CONFIRMATION {
        return Err(DhError::Validation(format!(
            "Please type {DELETE_CONFIRMATION} to confirm"
        )));
    }
    Ok(())
}

fn non_empty_string(document: &Value, field: &str) -> bool {
    document
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_id_fails_for_every_category() {
        for category in ConfigCategory::ALL {
            let err = validate_for_save(category, &json!({ "config_id": "" })).unwrap_err();
            assert!(matches!(err, DhError::Validation(_)), "{category}");
        }
    }

    #[test]
    fn missing_config_id_fails() {
        let err = validate_for_save(ConfigCategory::A2f, &json!({})).unwrap_err();
        assert!(matches!(err, DhError::Validation(_)));
    }

    #[test]
    fn dh_requires_botid_and_destinationflow() {
        let err = validate_for_save(
            ConfigCategory::Dh,
            &json!({ "config_id": "cfg1", "botid": "", "destinationflow": "IN_greeting" }),
        )
        .unwrap_err();
        assert!(matches!(err, DhError::Validation(_)));

        validate_for_save(
            ConfigCategory::Dh,
            &json!({ "config_id": "cfg1", "botid": "b1", "destinationflow": "IN_greeting" }),
        )
        .unwrap();
    }

    #[test]
    fn other_categories_only_need_config_id() {
        validate_for_save(ConfigCategory::Customize, &json!({ "config_id": "c" })).unwrap();
        validate_for_save(ConfigCategory::A2f, &json!({ "config_id": "a" })).unwrap();
    }

    #[test]
    fn delete_confirmation_is_exact_and_case_sensitive() {
        validate_delete_confirmation("BOTNOI").unwrap();
        assert!(validate_delete_confirmation("botnoi").is_err());
        assert!(validate_delete_confirmation("BOTNOI2").is_err());
        assert!(validate_delete_confirmation("").is_err());
        assert!(validate_delete_confirmation(" BOTNOI").is_err());
    }
}
