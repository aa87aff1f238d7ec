use crate::{typeset::TypeSet, MAX_DEPTH};
use sigil_abi::{BaseType, ComponentValue, InputValue, Parameter};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::{keccak256, B256};

impl TypeSet {
    /// EIP-712 `hashStruct`: `keccak256(typeHash ‖ encodeData(value))`.
    ///
    /// The V4 nil-reference rule applies: an explicit null value yields the
    /// 32-zero-byte word directly, without hashing, and that word propagates
    /// upward as the struct's contribution.
    pub fn hash_struct(&self, name: &str, value: &InputValue) -> Result<B256> {
        hash_struct(self, name, value, 0)
    }
}

pub(crate) fn hash_struct(
    types: &TypeSet,
    name: &str,
    value: &InputValue,
    depth: usize,
) -> Result<B256> {
    if value.is_null() {
        return Ok(B256::ZERO);
    }
    let InputValue::Mapping(map) = value else {
        return Err(Error::new(ErrorCode::EIP712ValueNotMap, &[&name, &value.kind()]));
    };
    let members =
        types.get(name).ok_or_else(|| Error::new(ErrorCode::EIP712TypeNotFound, &[&name]))?;

    let mut preimage = Vec::with_capacity(32 * (1 + members.len()));
    preimage.extend_from_slice(types.type_hash(name)?.as_slice());
    for member in members {
        // a missing member encodes like an explicit null
        let word = match map.get(&member.name) {
            Some(member_value) => encode_element(types, &member.ty, member_value, depth + 1)?,
            None => encode_element(types, &member.ty, &InputValue::Null, depth + 1)?,
        };
        preimage.extend_from_slice(word.as_slice());
    }
    Ok(keccak256(preimage))
}

/// Encodes one member value to its 32-byte contribution.
///
/// Arrays hash the concatenation of their encoded elements (the V4 rule),
/// struct types recurse into [`hash_struct`], dynamic `bytes`/`string` hash
/// their contents, and the remaining elementary types ABI-encode to a word.
pub(crate) fn encode_element(
    types: &TypeSet,
    type_name: &str,
    value: &InputValue,
    depth: usize,
) -> Result<B256> {
    if depth > MAX_DEPTH {
        return Err(Error::new(ErrorCode::EIP712MaxDepthExceeded, &[&MAX_DEPTH, &type_name]));
    }

    if type_name.ends_with(']') {
        let idx = type_name
            .rfind('[')
            .ok_or_else(|| Error::new(ErrorCode::EIP712InvalidArraySuffix, &[&type_name]))?;
        let element_type = &type_name[..idx];
        let len_spec = &type_name[idx + 1..type_name.len() - 1];

        let InputValue::Sequence(items) = value else {
            return Err(Error::new(ErrorCode::EIP712ValueNotArray, &[&type_name, &value.kind()]));
        };
        if !len_spec.is_empty() {
            if !len_spec.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::new(ErrorCode::EIP712InvalidArraySuffix, &[&type_name]));
            }
            let expected: usize = len_spec
                .parse()
                .map_err(|_| Error::new(ErrorCode::EIP712InvalidArraySuffix, &[&type_name]))?;
            if items.len() != expected {
                return Err(Error::new(
                    ErrorCode::EIP712InvalidArrayLen,
                    &[&type_name, &expected, &items.len()],
                ));
            }
        }
        let mut concatenated = Vec::with_capacity(32 * items.len());
        for item in items {
            let word = encode_element(types, element_type, item, depth + 1)?;
            concatenated.extend_from_slice(word.as_slice());
        }
        return Ok(keccak256(concatenated));
    }

    if types.contains_key(type_name) {
        return hash_struct(types, type_name, value, depth);
    }

    encode_elementary(type_name, value)
}

fn encode_elementary(type_name: &str, value: &InputValue) -> Result<B256> {
    let component = Parameter::of_type(type_name)
        .type_component()
        .map_err(|e| Error::caused_by(e, ErrorCode::EIP712UnsupportedStrType, &[&type_name]))?;
    let Some(elementary) = component.as_elementary() else {
        return Err(Error::new(ErrorCode::EIP712UnsupportedStrType, &[&type_name]));
    };
    match elementary.base {
        BaseType::Fixed | BaseType::UFixed | BaseType::Function => {
            Err(Error::new(ErrorCode::EIP712UnsupportedABIType, &[&type_name]))
        }
        BaseType::Bytes if !elementary.fixed => {
            match component.parse_external(value)? {
                ComponentValue::Bytes(bytes) => Ok(keccak256(bytes)),
                // parse_external of a bytes component only yields Bytes
                _ => unreachable!(),
            }
        }
        BaseType::String => match component.parse_external(value)? {
            ComponentValue::String(s) => Ok(keccak256(s.as_bytes())),
            _ => unreachable!(),
        },
        _ => {
            let coerced = component.parse_external(value)?;
            let word = component.encode_abi_data(&coerced)?;
            Ok(B256::from_slice(&word))
        }
    }
}
