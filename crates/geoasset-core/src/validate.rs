//! Asset file validation
//!
//! Turns the raw bytes of an uploaded file into typed [`AssetPayload`]s, or a
//! [`ValidationError`] saying why the file was rejected. Validation is
//! all-or-nothing: one bad element rejects the whole file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::AssetPayload;

/// How strictly coordinates are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// Any finite number is accepted
    #[default]
    Lenient,
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]
    Strict,
}

impl CoordinatePolicy {
    fn check(self, index: usize, asset: &AssetPayload) -> Result<(), ValidationError> {
        if !asset.latitude.is_finite() || !asset.longitude.is_finite() {
            return Err(ValidationError::InvalidStructure(format!(
                "element {}: coordinates must be finite numbers",
                index
            )));
        }

        if self == CoordinatePolicy::Strict {
            if !(-90.0..=90.0).contains(&asset.latitude) {
                return Err(ValidationError::InvalidStructure(format!(
                    "element {}: latitude {} outside [-90, 90]",
                    index, asset.latitude
                )));
            }
            if !(-180.0..=180.0).contains(&asset.longitude) {
                return Err(ValidationError::InvalidStructure(format!(
                    "element {}: longitude {} outside [-180, 180]",
                    index, asset.longitude
                )));
            }
        }

        Ok(())
    }
}

/// Parse and validate an uploaded asset file
pub fn parse_payload(
    bytes: &[u8],
    policy: CoordinatePolicy,
) -> Result<Vec<AssetPayload>, ValidationError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ValidationError::MalformedJson(format!("payload is not UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(ValidationError::InvalidStructure(format!(
            "expected a JSON array, found {}",
            kind_of(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_element(index, item, policy))
        .collect()
}

fn parse_element(
    index: usize,
    item: Value,
    policy: CoordinatePolicy,
) -> Result<AssetPayload, ValidationError> {
    // Structs also deserialize from sequences; only objects are assets.
    if !item.is_object() {
        return Err(ValidationError::InvalidStructure(format!(
            "element {}: expected an object, found {}",
            index,
            kind_of(&item)
        )));
    }

    let asset: AssetPayload = serde_json::from_value(item)
        .map_err(|e| ValidationError::InvalidStructure(format!("element {}: {}", index, e)))?;

    if asset.address.is_empty() {
        return Err(ValidationError::InvalidStructure(format!(
            "element {}: address must not be empty",
            index
        )));
    }

    policy.check(index, &asset)?;

    Ok(asset)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
