use crate::{util, BaseType, ComponentValue, ElementaryType, TypeComponent};
use sigil_errors::{Error, ErrorCode, Result};

impl TypeComponent {
    /// Encodes a value tree to ABI bytes in the head/tail wire format.
    ///
    /// The value is usually the output of
    /// [`parse_external`](Self::parse_external); hand-built trees are
    /// re-validated (variant kinds, lengths, integer ranges) as they encode.
    pub fn encode_abi_data(&self, value: &ComponentValue) -> Result<Vec<u8>> {
        encode_value(self, value)
    }
}

/// The complete encoding of one component: for static components the inline
/// words, for dynamic components the bytes their head offset points at.
fn encode_value(tc: &TypeComponent, value: &ComponentValue) -> Result<Vec<u8>> {
    match tc {
        TypeComponent::Elementary { ty, .. } => encode_elementary(tc, ty, value),
        TypeComponent::FixedArray { child, len, .. } => {
            let items = expect_array(tc, value)?;
            if items.len() != *len {
                return Err(Error::new(ErrorCode::InsufficientDataABIEncode, &[&tc.label()]));
            }
            encode_composite(core::iter::repeat_n(&**child, items.len()), items)
        }
        TypeComponent::DynamicArray { child, .. } => {
            let items = expect_array(tc, value)?;
            let mut out = Vec::with_capacity(util::WORD * (1 + items.len()));
            out.extend_from_slice(&util::left_padded(
                &(items.len() as u64).to_be_bytes(),
                0,
            ));
            out.extend_from_slice(&encode_composite(
                core::iter::repeat_n(&**child, items.len()),
                items,
            )?);
            Ok(out)
        }
        TypeComponent::Tuple { children, .. } => {
            let values = match value {
                ComponentValue::Tuple(v) => v,
                other => {
                    return Err(Error::new(
                        ErrorCode::WrongTypeComponentABIEncode,
                        &[&other.kind(), &tc.label()],
                    ))
                }
            };
            if values.len() != children.len() {
                return Err(Error::new(ErrorCode::InsufficientDataABIEncode, &[&tc.label()]));
            }
            encode_composite(children.iter(), values)
        }
    }
}

/// Encodes a head block and its tail: static children inline their encoding,
/// dynamic children contribute an offset word and append to the tail. Offsets
/// are relative to the start of this block.
fn encode_composite<'a>(
    schemas: impl Iterator<Item = &'a TypeComponent> + Clone,
    values: &[ComponentValue],
) -> Result<Vec<u8>> {
    let head_len: usize = schemas
        .clone()
        .map(|c| if c.is_dynamic() { util::WORD } else { c.head_encoded_len() })
        .sum();

    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for (child, value) in schemas.zip(values) {
        if child.is_dynamic() {
            let offset = head_len + tail.len();
            head.extend_from_slice(&util::left_padded(&(offset as u64).to_be_bytes(), 0));
            tail.extend_from_slice(&encode_value(child, value)?);
        } else {
            head.extend_from_slice(&encode_value(child, value)?);
        }
    }
    head.extend_from_slice(&tail);
    Ok(head)
}

fn encode_elementary(
    tc: &TypeComponent,
    ty: &ElementaryType,
    value: &ComponentValue,
) -> Result<Vec<u8>> {
    let name = tc.label();
    match (ty.base, value) {
        (BaseType::Uint | BaseType::Int, ComponentValue::Integer(v)) => {
            util::check_integer_range(v, ty.size, ty.signed(), &name)?;
            Ok(util::int_to_word(v).to_vec())
        }
        (BaseType::Fixed | BaseType::UFixed, ComponentValue::FixedPoint(fp)) => {
            util::check_integer_range(&fp.unscaled, ty.m, ty.signed(), &name)?;
            Ok(util::int_to_word(&fp.unscaled).to_vec())
        }
        (BaseType::Address, ComponentValue::Address(a)) => {
            Ok(util::left_padded(a.as_slice(), 0).to_vec())
        }
        (BaseType::Bool, ComponentValue::Bool(b)) => {
            Ok(util::left_padded(&[*b as u8], 0).to_vec())
        }
        (BaseType::Bytes | BaseType::Function, ComponentValue::Bytes(b)) if ty.fixed => {
            if b.len() != ty.size {
                return Err(Error::new(
                    ErrorCode::InvalidHexABIInput,
                    &[&name, &format!("expected {} bytes, got {}", ty.size, b.len())],
                ));
            }
            let mut word = [0u8; util::WORD];
            word[..b.len()].copy_from_slice(b);
            Ok(word.to_vec())
        }
        (BaseType::Bytes, ComponentValue::Bytes(b)) => Ok(packed_bytes(b)),
        (BaseType::String, ComponentValue::String(s)) => Ok(packed_bytes(s.as_bytes())),
        (_, other) => Err(Error::new(
            ErrorCode::WrongTypeComponentABIEncode,
            &[&other.kind(), &name],
        )),
    }
}

/// A length word followed by the data right-padded to a word boundary.
fn packed_bytes(data: &[u8]) -> Vec<u8> {
    let padded = util::padded_len(data.len());
    let mut out = Vec::with_capacity(util::WORD + padded);
    out.extend_from_slice(&util::left_padded(&(data.len() as u64).to_be_bytes(), 0));
    out.extend_from_slice(data);
    out.resize(util::WORD + padded, 0);
    out
}

fn expect_array<'v>(tc: &TypeComponent, value: &'v ComponentValue) -> Result<&'v [ComponentValue]> {
    match value {
        ComponentValue::Array(items) => Ok(items),
        other => Err(Error::new(
            ErrorCode::WrongTypeComponentABIEncode,
            &[&other.kind(), &tc.label()],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parameter;

    fn encode(ty: &str, v: serde_json::Value) -> Vec<u8> {
        let tc = Parameter::of_type(ty).type_component().unwrap();
        let value = tc.parse_external(&v.into()).unwrap();
        tc.encode_abi_data(&value).unwrap()
    }

    fn words(data: &[u8]) -> Vec<String> {
        data.chunks(32).map(hex::encode).collect()
    }

    #[test]
    fn static_words() {
        assert_eq!(
            hex::encode(encode("uint256", 1.into())),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            hex::encode(encode("int8", (-1).into())),
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
        assert_eq!(
            hex::encode(encode("bool", true.into())),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            hex::encode(encode("bytes4", "0xdeadbeef".into())),
            "deadbeef00000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            hex::encode(encode("address", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".into())),
            "0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        );
    }

    #[test]
    fn dynamic_bytes_layout() {
        let enc = encode("bytes", "0xdeadbeef".into());
        assert_eq!(
            words(&enc),
            [
                "0000000000000000000000000000000000000000000000000000000000000004",
                "deadbeef00000000000000000000000000000000000000000000000000000000",
            ]
        );
        // empty dynamic bytes is just a zero length word
        assert_eq!(encode("bytes", "".into()).len(), 32);
    }

    #[test]
    fn dynamic_array_layout() {
        let enc = encode("uint256[]", serde_json::json!([1, 2]));
        assert_eq!(
            words(&enc),
            [
                "0000000000000000000000000000000000000000000000000000000000000002",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0000000000000000000000000000000000000000000000000000000000000002",
            ]
        );
    }

    #[test]
    fn tuple_head_and_tail() {
        // (uint256, string): static word, offset 0x40, then the packed string
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "type": "tuple",
            "components": [
                { "name": "a", "type": "uint256" },
                { "name": "b", "type": "string" }
            ]
        }))
        .unwrap();
        let tc = param.type_component().unwrap();
        let value = tc.parse_external(&serde_json::json!([5, "hi"]).into()).unwrap();
        let enc = tc.encode_abi_data(&value).unwrap();
        assert_eq!(
            words(&enc),
            [
                "0000000000000000000000000000000000000000000000000000000000000005",
                "0000000000000000000000000000000000000000000000000000000000000040",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "6869000000000000000000000000000000000000000000000000000000000000",
            ]
        );
    }

    #[test]
    fn nested_dynamic_offsets() {
        // string[]: count, then per-element offsets relative to the element
        // head block, then the packed strings
        let enc = encode("string[]", serde_json::json!(["ab", "c"]));
        assert_eq!(
            words(&enc),
            [
                "0000000000000000000000000000000000000000000000000000000000000002",
                "0000000000000000000000000000000000000000000000000000000000000040",
                "0000000000000000000000000000000000000000000000000000000000000080",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "6162000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "6300000000000000000000000000000000000000000000000000000000000000",
            ]
        );
    }

    #[test]
    fn hand_built_values_are_validated() {
        let tc = Parameter::of_type("uint8").type_component().unwrap();
        let err = tc.encode_abi_data(&ComponentValue::Integer(256.into())).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NumberTooLargeABIEncode);
        let err = tc.encode_abi_data(&ComponentValue::Bool(false)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::WrongTypeComponentABIEncode);
    }
}
