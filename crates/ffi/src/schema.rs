use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A JSON Schema node with the FFI `details` extension.
///
/// Only the vocabulary the FFI form uses is modelled: `type`, `oneOf`,
/// `description`, `properties`, `items`, and `details`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The declared JSON type, e.g. `string`, `array`, `object`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Alternative encodings; used for the dual string/number forms.
    #[serde(default, rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The ABI details extension. Present on every parameter-level schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    /// Object properties, keyed by member name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Array element schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// A bare `{"type": …}` node.
    pub(crate) fn of_type(ty: &str) -> Self {
        Self { ty: Some(ty.into()), ..Default::default() }
    }
}

/// The `details` extension block: everything needed to reconstruct the
/// original ABI parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    /// The ABI type string, e.g. `uint256` or `tuple[2]`.
    #[serde(rename = "type")]
    pub ty: String,
    /// The compiler's `internalType` annotation, when present.
    #[serde(default, rename = "internalType", skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Set for indexed event parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    /// The declaration position of an object member; JSON objects are
    /// unordered, so this is what preserves tuple order round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_json_shape() {
        let schema = Schema {
            ty: Some("array".into()),
            items: Some(Box::new(Schema::of_type("string"))),
            details: Some(Details { ty: "uint256[]".into(), ..Default::default() }),
            ..Default::default()
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "array",
                "items": { "type": "string" },
                "details": { "type": "uint256[]" }
            })
        );
        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
