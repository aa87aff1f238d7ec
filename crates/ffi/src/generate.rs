//! ABI → FFI schema generation.

use crate::{
    schema::{Details, Schema},
    Param,
};
use sigil_abi::{BaseType, Parameter, TypeComponent};
use sigil_errors::Result;

pub(crate) const INTEGER_DESCRIPTION: &str = "An integer. You are recommended to use a JSON \
     string. A JSON number without a fractional part is accepted up to the safe maximum.";
pub(crate) const FLOAT_DESCRIPTION: &str = "A fixed-point decimal. You are recommended to use a \
     JSON string to avoid floating point inaccuracies.";
pub(crate) const BOOL_DESCRIPTION: &str =
    "A boolean. You can use a boolean or a string true/false as input.";
pub(crate) const BYTES_DESCRIPTION: &str =
    "A hex encoded set of bytes, with an optional '0x' prefix.";

pub(crate) fn params_from_parameters(parameters: &[Parameter]) -> Result<Vec<Param>> {
    parameters
        .iter()
        .map(|p| Ok(Param { name: p.name.clone(), schema: schema_for_parameter(p)? }))
        .collect()
}

/// The schema of one parameter: the structural schema of its component tree,
/// with the `details` block attached at the outermost node. For array types
/// this is exactly the "details migrate from the child to the parent" rule —
/// the element schemas under `items` carry no details of their own.
pub(crate) fn schema_for_parameter(param: &Parameter) -> Result<Schema> {
    let component = param.type_component()?;
    let mut schema = schema_for_node(&component)?;
    schema.details = Some(Details {
        ty: param.ty.clone(),
        internal_type: param.internal_type.clone(),
        indexed: param.indexed.then_some(true),
        index: None,
    });
    Ok(schema)
}

fn schema_for_node(component: &TypeComponent) -> Result<Schema> {
    Ok(match component {
        TypeComponent::Elementary { ty, .. } => match ty.base {
            BaseType::Uint | BaseType::Int => dual_schema("integer", INTEGER_DESCRIPTION),
            BaseType::Fixed | BaseType::UFixed => dual_schema("number", FLOAT_DESCRIPTION),
            BaseType::Bool => dual_schema("boolean", BOOL_DESCRIPTION),
            BaseType::Address | BaseType::Bytes | BaseType::Function => Schema {
                description: Some(BYTES_DESCRIPTION.into()),
                ..Schema::of_type("string")
            },
            BaseType::String => Schema::of_type("string"),
        },
        TypeComponent::FixedArray { child, .. } | TypeComponent::DynamicArray { child, .. } => {
            Schema {
                items: Some(Box::new(schema_for_node(child)?)),
                ..Schema::of_type("array")
            }
        }
        TypeComponent::Tuple { children, .. } => {
            let mut properties = std::collections::BTreeMap::new();
            for (index, child) in children.iter().enumerate() {
                let mut child_schema = schema_for_parameter(child.parameter())?;
                if let Some(details) = &mut child_schema.details {
                    details.index = Some(index);
                }
                properties.insert(child.key_name().to_owned(), child_schema);
            }
            Schema { properties, ..Schema::of_type("object") }
        }
    })
}

/// `oneOf: [{type: "string"}, {type: <native>}]` for dual JSON encodings.
fn dual_schema(native: &str, description: &str) -> Schema {
    Schema {
        one_of: vec![Schema::of_type("string"), Schema::of_type(native)],
        description: Some(description.into()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_details_live_on_the_outer_schema() {
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "name": "ids",
            "type": "uint256[2][]",
            "internalType": "uint256[2][]"
        }))
        .unwrap();
        let schema = schema_for_parameter(&param).unwrap();
        assert_eq!(schema.ty.as_deref(), Some("array"));
        assert_eq!(schema.details.as_ref().unwrap().ty, "uint256[2][]");
        let inner = schema.items.as_ref().unwrap();
        assert_eq!(inner.ty.as_deref(), Some("array"));
        assert!(inner.details.is_none());
        assert!(inner.items.as_ref().unwrap().details.is_none());
    }

    #[test]
    fn tuple_members_record_their_index() {
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "name": "order",
            "type": "tuple",
            "components": [
                { "name": "maker", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ]
        }))
        .unwrap();
        let schema = schema_for_parameter(&param).unwrap();
        assert_eq!(schema.ty.as_deref(), Some("object"));
        assert_eq!(schema.properties["maker"].details.as_ref().unwrap().index, Some(0));
        assert_eq!(schema.properties["amount"].details.as_ref().unwrap().index, Some(1));
    }

    #[test]
    fn indexed_flag_is_preserved() {
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "name": "from",
            "type": "address",
            "indexed": true
        }))
        .unwrap();
        let schema = schema_for_parameter(&param).unwrap();
        assert_eq!(schema.details.unwrap().indexed, Some(true));
    }
}
