use crate::{ComponentValue, FixedPoint, TypeComponent};
use core::str::FromStr;
use num_bigint::Sign;
use sigil_errors::{Error, ErrorCode, Result};

/// How tuples render when a value tree is serialized back to JSON.
///
/// Callers that take the mode from configuration parse it with the
/// [`FromStr`]/`TryFrom<&str>` impls, which reject unrecognized names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TupleSerialization {
    /// Tuples become JSON objects keyed by component name. Unnamed children
    /// fall back to their zero-based position as the key.
    #[default]
    Objects,
    /// Tuples become JSON arrays in declaration order.
    Arrays,
}

impl FromStr for TupleSerialization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "objects" => Ok(Self::Objects),
            "arrays" => Ok(Self::Arrays),
            other => Err(Error::new(ErrorCode::UnknownTupleSerializer, &[&other])),
        }
    }
}

impl TryFrom<&str> for TupleSerialization {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TypeComponent {
    /// Serializes a value tree to JSON for human-facing contexts: integers
    /// and fixed-point values as decimal strings, byte containers as
    /// `0x`-prefixed hex, addresses in EIP-55 casing.
    pub fn serialize_values(
        &self,
        value: &ComponentValue,
        tuples: TupleSerialization,
    ) -> Result<serde_json::Value> {
        Ok(match (self, value) {
            (_, ComponentValue::Integer(v)) => serde_json::Value::String(v.to_string()),
            (_, ComponentValue::FixedPoint(fp)) => {
                serde_json::Value::String(fixed_point_string(fp))
            }
            (_, ComponentValue::Address(a)) => {
                serde_json::Value::String(a.to_checksum_string())
            }
            (_, ComponentValue::Bool(b)) => serde_json::Value::Bool(*b),
            (_, ComponentValue::Bytes(b)) => serde_json::Value::String(hex::encode_prefixed(b)),
            (_, ComponentValue::String(s)) => serde_json::Value::String(s.clone()),
            (
                Self::FixedArray { child, .. } | Self::DynamicArray { child, .. },
                ComponentValue::Array(items),
            ) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| child.serialize_values(item, tuples))
                    .collect::<Result<_>>()?,
            ),
            (Self::Tuple { children, .. }, ComponentValue::Tuple(values)) => {
                if children.len() != values.len() {
                    return Err(Error::new(
                        ErrorCode::InsufficientDataABIEncode,
                        &[&self.label()],
                    ));
                }
                match tuples {
                    TupleSerialization::Objects => {
                        let mut map = serde_json::Map::with_capacity(children.len());
                        for (i, (child, value)) in children.iter().zip(values).enumerate() {
                            let key = match child.key_name() {
                                "" => i.to_string(),
                                name => name.to_owned(),
                            };
                            map.insert(key, child.serialize_values(value, tuples)?);
                        }
                        serde_json::Value::Object(map)
                    }
                    TupleSerialization::Arrays => serde_json::Value::Array(
                        children
                            .iter()
                            .zip(values)
                            .map(|(child, value)| child.serialize_values(value, tuples))
                            .collect::<Result<_>>()?,
                    ),
                }
            }
            (_, other) => {
                return Err(Error::new(
                    ErrorCode::WrongTypeComponentABIEncode,
                    &[&other.kind(), &self.label()],
                ))
            }
        })
    }
}

/// `unscaled * 10^-scale` as a plain decimal string.
fn fixed_point_string(fp: &FixedPoint) -> String {
    let mut digits = fp.unscaled.magnitude().to_string();
    let scale = fp.scale as usize;
    if digits.len() <= scale {
        digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
    }
    if scale > 0 {
        digits.insert(digits.len() - scale, '.');
    }
    if fp.unscaled.sign() == Sign::Minus {
        digits.insert(0, '-');
    }
    digits
}
