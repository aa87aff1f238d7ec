use crate::{util, BaseType, ComponentValue, ElementaryType, FixedPoint, TypeComponent};
use num_bigint::{BigInt, Sign};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::Address;

impl TypeComponent {
    /// Decodes ABI bytes into a value tree. The inverse of
    /// [`encode_abi_data`](Self::encode_abi_data).
    ///
    /// The root must be a tuple (function inputs/outputs and event data are
    /// always tuples on the wire); offsets and lengths are bounds-checked
    /// before any read.
    pub fn decode_abi_data(&self, data: &[u8]) -> Result<ComponentValue> {
        let Self::Tuple { children, .. } = self else {
            return Err(Error::new(ErrorCode::DecodeNotTuple, &[&self.canonical_name()]));
        };
        decode_composite(children.iter(), data, 0).map(ComponentValue::Tuple)
    }
}

/// Decodes one head block: static children read inline, dynamic children
/// follow their offset word into the tail. `block` is the absolute position
/// the block's offsets are relative to.
fn decode_composite<'a>(
    schemas: impl Iterator<Item = &'a TypeComponent>,
    data: &[u8],
    block: usize,
) -> Result<Vec<ComponentValue>> {
    let mut values = Vec::new();
    let mut head_pos = block;
    for child in schemas {
        if child.is_dynamic() {
            let word = read_word(data, head_pos, child)?;
            let offset = util::word_to_usize(word)
                .and_then(|o| block.checked_add(o))
                .filter(|&o| o <= data.len())
                .ok_or_else(|| {
                    Error::new(ErrorCode::NotEnoughBytesABIValue, &[&child.label(), &head_pos])
                })?;
            values.push(decode_dynamic(child, data, offset)?);
            head_pos += util::WORD;
        } else {
            values.push(decode_static(child, data, head_pos)?);
            head_pos += child.head_encoded_len();
        }
    }
    Ok(values)
}

/// Decodes a static component inlined at `pos`.
fn decode_static(tc: &TypeComponent, data: &[u8], pos: usize) -> Result<ComponentValue> {
    match tc {
        TypeComponent::Elementary { ty, .. } => {
            decode_elementary_word(ty, read_word(data, pos, tc)?, tc)
        }
        TypeComponent::FixedArray { child, len, .. } => {
            decode_composite(core::iter::repeat_n(&**child, *len), data, pos)
                .map(ComponentValue::Array)
        }
        TypeComponent::Tuple { children, .. } => {
            decode_composite(children.iter(), data, pos).map(ComponentValue::Tuple)
        }
        TypeComponent::DynamicArray { .. } => {
            // is_dynamic() routed this to decode_dynamic
            unreachable!("dynamic array decoded as static")
        }
    }
}

/// Decodes a dynamic component whose encoding starts at `pos`.
fn decode_dynamic(tc: &TypeComponent, data: &[u8], pos: usize) -> Result<ComponentValue> {
    match tc {
        TypeComponent::Elementary { ty, .. } => {
            let len = util::word_to_usize(read_word(data, pos, tc)?).ok_or_else(|| {
                Error::new(ErrorCode::ABIArrayCountTooLarge, &[&"(overflow)", &pos, &tc.label()])
            })?;
            let start = pos + util::WORD;
            let end = start
                .checked_add(len)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| {
                    Error::new(ErrorCode::NotEnoughBytesABIValue, &[&tc.label(), &start])
                })?;
            let bytes = &data[start..end];
            match ty.base {
                BaseType::Bytes => Ok(ComponentValue::Bytes(bytes.to_vec())),
                BaseType::String => {
                    Ok(ComponentValue::String(String::from_utf8_lossy(bytes).into_owned()))
                }
                // only bytes and string are dynamic elementary types
                _ => unreachable!("static elementary decoded as dynamic"),
            }
        }
        TypeComponent::DynamicArray { child, .. } => {
            let word = data
                .get(pos..pos + util::WORD)
                .ok_or_else(|| {
                    Error::new(ErrorCode::NotEnoughBytesABIArrayCount, &[&tc.label(), &pos])
                })?
                .try_into()
                .unwrap();
            let count = util::word_to_usize(word).ok_or_else(|| {
                Error::new(ErrorCode::ABIArrayCountTooLarge, &[&"(overflow)", &pos, &tc.label()])
            })?;
            // each element consumes at least one head word
            let remaining = data.len() - pos - util::WORD;
            if count > remaining / util::WORD {
                return Err(Error::new(
                    ErrorCode::ABIArrayCountTooLarge,
                    &[&count, &pos, &tc.label()],
                ));
            }
            decode_composite(core::iter::repeat_n(&**child, count), data, pos + util::WORD)
                .map(ComponentValue::Array)
        }
        TypeComponent::FixedArray { child, len, .. } => {
            decode_composite(core::iter::repeat_n(&**child, *len), data, pos)
                .map(ComponentValue::Array)
        }
        TypeComponent::Tuple { children, .. } => {
            decode_composite(children.iter(), data, pos).map(ComponentValue::Tuple)
        }
    }
}

/// Decodes one 32-byte word as an elementary value.
pub(crate) fn decode_elementary_word(
    ty: &ElementaryType,
    word: &[u8; util::WORD],
    tc: &TypeComponent,
) -> Result<ComponentValue> {
    match ty.base {
        BaseType::Uint => Ok(ComponentValue::Integer(BigInt::from_bytes_be(Sign::Plus, word))),
        BaseType::Int => Ok(ComponentValue::Integer(BigInt::from_signed_bytes_be(word))),
        BaseType::UFixed => Ok(ComponentValue::FixedPoint(FixedPoint {
            unscaled: BigInt::from_bytes_be(Sign::Plus, word),
            scale: ty.n as u32,
        })),
        BaseType::Fixed => Ok(ComponentValue::FixedPoint(FixedPoint {
            unscaled: BigInt::from_signed_bytes_be(word),
            scale: ty.n as u32,
        })),
        BaseType::Address => Ok(ComponentValue::Address(Address::from_slice(&word[12..]))),
        BaseType::Bool => Ok(ComponentValue::Bool(word[util::WORD - 1] != 0)),
        BaseType::Bytes | BaseType::Function => Ok(ComponentValue::Bytes(word[..ty.size].to_vec())),
        BaseType::String => Err(Error::new(ErrorCode::NotElementary, &[&tc.canonical_name()])),
    }
}

fn read_word<'d>(
    data: &'d [u8],
    pos: usize,
    tc: &TypeComponent,
) -> Result<&'d [u8; util::WORD]> {
    data.get(pos..pos + util::WORD)
        .map(|s| s.try_into().unwrap())
        .ok_or_else(|| Error::new(ErrorCode::NotEnoughBytesABIValue, &[&tc.label(), &pos]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parameter;

    fn root(types: &[&str]) -> TypeComponent {
        let params: Vec<Parameter> = types.iter().map(|t| Parameter::of_type(t)).collect();
        TypeComponent::tuple_of(&params).unwrap()
    }

    fn round_trip(types: &[&str], v: serde_json::Value) {
        let tc = root(types);
        let value = tc.parse_external(&v.into()).unwrap();
        let encoded = tc.encode_abi_data(&value).unwrap();
        let decoded = tc.decode_abi_data(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn round_trips() {
        round_trip(&["uint256"], serde_json::json!(["12345"]));
        round_trip(&["int64"], serde_json::json!(["-12345"]));
        round_trip(&["bool", "bool"], serde_json::json!([true, false]));
        round_trip(&["bytes"], serde_json::json!(["0xdeadbeef"]));
        round_trip(&["string"], serde_json::json!(["hello world"]));
        round_trip(
            &["address"],
            serde_json::json!(["0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"]),
        );
        round_trip(&["uint8[3]"], serde_json::json!([[1, 2, 3]]));
        round_trip(&["string[]"], serde_json::json!([["a", "bb", "ccc"]]));
        round_trip(&["bytes32"], serde_json::json!([format!("0x{}", "11".repeat(32))]));
        round_trip(&["ufixed128x18"], serde_json::json!(["1.5"]));
        round_trip(&["fixed128x18"], serde_json::json!(["-1.5"]));
        round_trip(&["uint256[][2]"], serde_json::json!([[["1"], ["2", "3"]]]));
    }

    #[test]
    fn nested_tuple_round_trip() {
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "name": "outer",
            "type": "tuple",
            "components": [
                { "name": "id", "type": "uint256" },
                { "name": "inner", "type": "tuple[]", "components": [
                    { "name": "data", "type": "bytes" },
                    { "name": "ok", "type": "bool" }
                ]}
            ]
        }))
        .unwrap();
        let tc = TypeComponent::tuple_of(&[param]).unwrap();
        let input = serde_json::json!([{
            "id": "7",
            "inner": [
                { "data": "0x00ff", "ok": true },
                { "data": "0x", "ok": false }
            ]
        }]);
        let value = tc.parse_external(&input.into()).unwrap();
        let encoded = tc.encode_abi_data(&value).unwrap();
        assert_eq!(tc.decode_abi_data(&encoded).unwrap(), value);
    }

    #[test]
    fn requires_tuple_root() {
        let tc = Parameter::of_type("uint256").type_component().unwrap();
        assert_eq!(tc.decode_abi_data(&[0u8; 32]).unwrap_err().code(), ErrorCode::DecodeNotTuple);
    }

    #[test]
    fn truncated_data() {
        let tc = root(&["uint256", "uint256"]);
        assert_eq!(
            tc.decode_abi_data(&[0u8; 32]).unwrap_err().code(),
            ErrorCode::NotEnoughBytesABIValue
        );
    }

    #[test]
    fn offset_past_buffer() {
        let tc = root(&["bytes"]);
        // offset word pointing far past the end
        let mut data = [0u8; 32];
        data[31] = 0xf0;
        assert_eq!(
            tc.decode_abi_data(&data).unwrap_err().code(),
            ErrorCode::NotEnoughBytesABIValue
        );
    }

    #[test]
    fn array_count_too_large() {
        let tc = root(&["uint256[]"]);
        let mut data = Vec::new();
        data.extend_from_slice(&util::left_padded(&[0x20], 0)); // offset
        data.extend_from_slice(&util::left_padded(&[0xff], 0)); // count 255, no data
        assert_eq!(
            tc.decode_abi_data(&data).unwrap_err().code(),
            ErrorCode::ABIArrayCountTooLarge
        );
    }

    #[test]
    fn bytes_length_past_buffer() {
        let tc = root(&["bytes"]);
        let mut data = Vec::new();
        data.extend_from_slice(&util::left_padded(&[0x20], 0)); // offset
        data.extend_from_slice(&util::left_padded(&[0x40], 0)); // length 64, no data
        assert_eq!(
            tc.decode_abi_data(&data).unwrap_err().code(),
            ErrorCode::NotEnoughBytesABIValue
        );
    }
}
