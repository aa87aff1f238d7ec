use num_bigint::BigInt;
use sigil_primitives::Address;
use std::collections::BTreeMap;

/// Loosely-typed external input, as handed to the value parser.
///
/// This is the engine's own sum type for JSON-ish data; it never leans on a
/// host representation. [`From<serde_json::Value>`] is lossless: JSON arrays
/// become sequences, objects become mappings.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A JSON number (integer or floating).
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// Raw bytes, for callers that hold binary data already.
    Bytes(Vec<u8>),
    /// An ordered sequence.
    Sequence(Vec<InputValue>),
    /// A keyed mapping.
    Mapping(BTreeMap<String, InputValue>),
}

impl InputValue {
    /// A short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Whether this is the explicit null value.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(a) => Self::Sequence(a.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(o) => {
                Self::Mapping(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for InputValue {
    fn from(v: &serde_json::Value) -> Self {
        v.clone().into()
    }
}

/// A fixed-point decimal as an unscaled integer and a scale: the represented
/// value is `unscaled * 10^-scale`. Exact, no floating point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPoint {
    /// The unscaled integer.
    pub unscaled: BigInt,
    /// The number of decimal places.
    pub scale: u32,
}

/// A coerced value tree, mirroring the shape of its
/// [`TypeComponent`](crate::TypeComponent).
///
/// Leaves hold coerced native values; array and tuple nodes hold their
/// children in order. Values compare structurally, so an ABI decode of an
/// encode yields an equal tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    /// An integer, for `uint<N>`/`int<N>` leaves. Range-checked against the
    /// component on both coercion and encode.
    Integer(BigInt),
    /// A fixed-point decimal, for `fixed`/`ufixed` leaves.
    FixedPoint(FixedPoint),
    /// An account address.
    Address(Address),
    /// A boolean.
    Bool(bool),
    /// Raw bytes, for both fixed `bytes<N>` and dynamic `bytes` leaves.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// The elements of a fixed or dynamic array.
    Array(Vec<ComponentValue>),
    /// The children of a tuple, in declaration order.
    Tuple(Vec<ComponentValue>),
}

impl ComponentValue {
    /// A short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::FixedPoint(_) => "fixed-point",
            Self::Address(_) => "address",
            Self::Bool(_) => "boolean",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Fallible cast to an integer leaf.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Fallible cast to a byte leaf.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Fallible cast to a tuple's children.
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(v) => Some(v),
            _ => None,
        }
    }

    /// Fallible cast to an array's elements.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_conversion_is_lossless() {
        let v: InputValue = serde_json::json!({
            "a": [1, "2", true, null],
            "b": { "c": "0xff" }
        })
        .into();
        let InputValue::Mapping(m) = &v else { panic!("expected mapping") };
        let InputValue::Sequence(seq) = &m["a"] else { panic!("expected sequence") };
        assert_eq!(seq.len(), 4);
        assert!(seq[3].is_null());
        assert_eq!(m["b"].kind(), "mapping");
    }
}
