//! FFI schema → ABI parsing and validation.

use crate::{schema::Schema, Param};
use sigil_abi::{BaseType, Parameter, TypeComponent};
use sigil_errors::{Error, ErrorCode, Result};

pub(crate) fn parameters_from_params(params: &[Param]) -> Result<Vec<Parameter>> {
    params
        .iter()
        .map(|p| {
            let parameter = parameter_from_schema(&p.name, &p.schema)?;
            // the reconstructed parameter must form a valid tree, and the
            // schema's declared JSON types must agree with it
            let component = parameter.type_component()?;
            check_compatible(&p.schema, &component, &p.name)?;
            Ok(parameter)
        })
        .collect()
}

/// Rebuilds a [`Parameter`] from a schema, enforcing the metaschema rules:
/// every parameter-level schema carries `details.type`, and every object
/// member carries `details.index`.
fn parameter_from_schema(name: &str, schema: &Schema) -> Result<Parameter> {
    let details = schema.details.as_ref().ok_or_else(|| {
        Error::new(ErrorCode::InvalidFFIDetailsSchema, &[&name, &"missing details"])
    })?;
    if details.ty.is_empty() {
        return Err(Error::new(
            ErrorCode::InvalidFFIDetailsSchema,
            &[&name, &"details.type is empty"],
        ));
    }

    // the object schema sits under the array nesting, when there is any
    let mut node = schema;
    while node.ty.as_deref() == Some("array") {
        node = node.items.as_deref().ok_or_else(|| {
            Error::new(ErrorCode::InvalidFFIDetailsSchema, &[&name, &"array schema without items"])
        })?;
    }

    let mut components = Vec::new();
    if node.ty.as_deref() == Some("object") {
        let mut members = Vec::with_capacity(node.properties.len());
        for (member_name, member_schema) in &node.properties {
            let index = member_schema
                .details
                .as_ref()
                .and_then(|d| d.index)
                .ok_or_else(|| {
                    Error::new(
                        ErrorCode::InvalidFFIDetailsSchema,
                        &[&name, &format!("member '{member_name}' is missing details.index")],
                    )
                })?;
            members.push((index, member_name, member_schema));
        }
        members.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        for (_, member_name, member_schema) in members {
            components.push(parameter_from_schema(member_name, member_schema)?);
        }
    }

    Ok(Parameter {
        name: name.into(),
        ty: details.ty.clone(),
        components,
        internal_type: details.internal_type.clone(),
        indexed: details.indexed.unwrap_or(false),
    })
}

/// Checks that the schema's declared JSON types are compatible with the
/// component tree built from its `details`.
fn check_compatible(schema: &Schema, component: &TypeComponent, name: &str) -> Result<()> {
    let allowed: &[&str] = match component {
        TypeComponent::Elementary { ty, .. } => match ty.base {
            BaseType::Bool => &["string", "boolean"],
            BaseType::Uint | BaseType::Int => &["string", "integer"],
            BaseType::Fixed | BaseType::UFixed => &["string", "number"],
            BaseType::Address | BaseType::Bytes | BaseType::Function | BaseType::String => {
                &["string"]
            }
        },
        TypeComponent::FixedArray { .. } | TypeComponent::DynamicArray { .. } => &["array"],
        TypeComponent::Tuple { .. } => &["object"],
    };

    let declared: Vec<&str> = if schema.one_of.is_empty() {
        schema.ty.as_deref().into_iter().collect()
    } else {
        schema.one_of.iter().filter_map(|s| s.ty.as_deref()).collect()
    };
    for ty in declared {
        if !allowed.contains(&ty) {
            return Err(Error::new(
                ErrorCode::FFITypeMismatch,
                &[&ty, &name, &component.canonical_name()],
            ));
        }
    }

    match component {
        TypeComponent::FixedArray { child, .. } | TypeComponent::DynamicArray { child, .. } => {
            if let Some(items) = &schema.items {
                check_compatible(items, child, name)?;
            }
        }
        TypeComponent::Tuple { children, .. } => {
            for child in children {
                if let Some(member) = schema.properties.get(child.key_name()) {
                    check_compatible(member, child, child.key_name())?;
                }
            }
        }
        TypeComponent::Elementary { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Details;

    fn param(name: &str, schema: Schema) -> Param {
        Param { name: name.into(), schema }
    }

    fn details(ty: &str) -> Option<Details> {
        Some(Details { ty: ty.into(), ..Default::default() })
    }

    #[test]
    fn missing_details_is_invalid() {
        let err = parameters_from_params(&[param("x", Schema::of_type("string"))]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFFIDetailsSchema);
    }

    #[test]
    fn declared_type_must_match_abi() {
        let schema =
            Schema { details: details("uint256"), ..Schema::of_type("boolean") };
        let err = parameters_from_params(&[param("x", schema)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FFITypeMismatch);
    }

    #[test]
    fn object_members_need_an_index() {
        let schema = Schema {
            details: details("tuple"),
            properties: [(
                "a".to_owned(),
                Schema { details: details("uint256"), ..Schema::of_type("string") },
            )]
            .into(),
            ..Schema::of_type("object")
        };
        let err = parameters_from_params(&[param("x", schema)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFFIDetailsSchema);
    }

    #[test]
    fn members_order_by_index_not_name() {
        let member = |ty: &str, index: usize| Schema {
            details: Some(Details { ty: ty.into(), index: Some(index), ..Default::default() }),
            ..Schema::of_type("string")
        };
        let schema = Schema {
            details: details("tuple"),
            properties: [
                ("alpha".to_owned(), member("bytes", 1)),
                ("beta".to_owned(), member("address", 0)),
            ]
            .into(),
            ..Schema::of_type("object")
        };
        let parameter = parameter_from_schema("x", &schema).unwrap();
        assert_eq!(parameter.components[0].name, "beta");
        assert_eq!(parameter.components[1].name, "alpha");
    }

    #[test]
    fn arrays_descend_into_items() {
        let schema = Schema {
            details: details("uint256[]"),
            items: Some(Box::new(Schema {
                one_of: vec![Schema::of_type("string"), Schema::of_type("integer")],
                ..Default::default()
            })),
            ..Schema::of_type("array")
        };
        assert!(parameters_from_params(&[param("x", schema)]).is_ok());

        let bad = Schema {
            details: details("uint256[]"),
            items: Some(Box::new(Schema::of_type("object"))),
            ..Schema::of_type("array")
        };
        let err = parameters_from_params(&[param("x", bad)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FFITypeMismatch);
    }
}
