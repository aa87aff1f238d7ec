use crate::{TypeMember, TypeSet, MAX_DEPTH};
use regex::Regex;
use sigil_abi::{BaseType, TypeComponent};
use sigil_errors::{Error, ErrorCode, Result};
use std::sync::LazyLock;

/// Extracts the Solidity struct name from an `internalType` annotation:
/// `struct `, an optional dotted path prefix, the name, optional trailing
/// array suffixes. The pattern is part of the engine's contract.
static STRUCT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^struct (.*\.)?([^.\[\]]+)(\[\d*\])*$").unwrap());

pub(crate) fn struct_name(component: &TypeComponent) -> Result<String> {
    let internal = component.parameter().internal_type.as_deref().unwrap_or_default();
    STRUCT_NAME
        .captures(internal)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| Error::new(ErrorCode::EIP712BadInternalType, &[&internal]))
}

/// Derives the primary type name and the full [`TypeSet`] from a tuple-rooted
/// ABI type component tree.
///
/// Every tuple in the tree must carry a `struct `-style `internalType`, and
/// every tuple child must be named. Arrays contribute their suffix to the
/// member type string without introducing type entries of their own.
pub(crate) fn type_set_from_tuple(root: &TypeComponent) -> Result<(String, TypeSet)> {
    if root.as_tuple().is_none() {
        return Err(Error::new(
            ErrorCode::EIP712PrimaryNotTuple,
            &[&root.canonical_name()],
        ));
    }
    let mut types = TypeSet::new();
    let primary = add_struct(root, &mut types, 0)?;
    types.ensure_domain();
    Ok((primary, types))
}

/// Adds the struct entry for `tuple` (and, transitively, its nested structs)
/// and returns its extracted name.
fn add_struct(tuple: &TypeComponent, types: &mut TypeSet, depth: usize) -> Result<String> {
    let name = struct_name(tuple)?;
    if depth > MAX_DEPTH {
        return Err(Error::new(ErrorCode::EIP712MaxDepthExceeded, &[&MAX_DEPTH, &name]));
    }
    if types.contains_key(&name) {
        return Ok(name);
    }
    // reserve the slot first so sibling references resolve to one entry
    types.insert(name.clone(), Vec::new());

    let children = tuple.as_tuple().expect("caller verified tuple");
    let mut members = Vec::with_capacity(children.len());
    for child in children {
        if child.key_name().is_empty() {
            return Err(Error::new(
                ErrorCode::BadABITypeComponent,
                &[&format!("unnamed member of struct '{name}' cannot map to EIP-712")],
            ));
        }
        let ty = member_type(child, types, depth)?;
        members.push(TypeMember { name: child.key_name().into(), ty });
    }
    types.insert(name.clone(), members);
    Ok(name)
}

/// Maps a component to its EIP-712 member type string, registering nested
/// struct types along the way.
fn member_type(component: &TypeComponent, types: &mut TypeSet, depth: usize) -> Result<String> {
    match component {
        TypeComponent::Elementary { ty, .. } => match ty.base {
            BaseType::Address | BaseType::Bool | BaseType::String => Ok(ty.base.as_str().into()),
            BaseType::Uint | BaseType::Int => Ok(ty.canonical_name()),
            BaseType::Bytes => Ok(ty.canonical_name()),
            BaseType::Fixed | BaseType::UFixed | BaseType::Function => Err(Error::new(
                ErrorCode::EIP712UnsupportedABIType,
                &[&ty.canonical_name()],
            )),
        },
        TypeComponent::FixedArray { child, len, .. } => {
            Ok(format!("{}[{len}]", member_type(child, types, depth)?))
        }
        TypeComponent::DynamicArray { child, .. } => {
            Ok(format!("{}[]", member_type(child, types, depth)?))
        }
        TypeComponent::Tuple { .. } => add_struct(component, types, depth + 1),
    }
}
