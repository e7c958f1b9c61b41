use std::{
    fs,
    path::Path,
};

use serde_json::Value;

use super::{
    models::cards_from_value,
    Card,
    CardexError,
};

/// Parses a pasted JSON blob. Only an array is accepted; the caller keeps its
/// current catalog on any error.
pub fn import_catalog(text: &str) -> Result<Vec<Card>, CardexError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(CardexError::ImportNotArray);
    }
    Ok(cards_from_value(&value))
}

pub fn import_catalog_file(path: &Path) -> Result<Vec<Card>, CardexError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CardexError::Custom(format!("Failed to read {}: {}", path.display(), e)))?;
    import_catalog(&text)
}

pub fn export_catalog(cards: &[Card]) -> Result<String, CardexError> {
    Ok(serde_json::to_string_pretty(cards)?)
}
