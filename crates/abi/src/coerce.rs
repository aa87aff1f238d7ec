use crate::{
    util, BaseType, ComponentValue, ElementaryType, FixedPoint, InputValue, TypeComponent,
};
use num_bigint::BigInt;
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::Address;

impl TypeComponent {
    /// Coerces loosely-typed external input into a [`ComponentValue`] tree
    /// matching this component.
    ///
    /// Elementary leaves accept the representations listed in the crate
    /// docs: decimal or `0x`-hex strings and JSON numbers for integers, hex
    /// strings or raw bytes for byte types, `"true"`/`"false"`/`"0"`/`"1"`
    /// for booleans. Arrays take sequences; tuples take either a positional
    /// sequence or a mapping keyed by component name.
    pub fn parse_external(&self, input: &InputValue) -> Result<ComponentValue> {
        match self {
            Self::Elementary { ty, .. } => coerce_elementary(ty, input, &self.label()),
            Self::FixedArray { child, len, .. } => {
                let InputValue::Sequence(items) = input else {
                    return Err(Error::new(
                        ErrorCode::MustBeSliceABIInput,
                        &[&self.label(), &input.kind()],
                    ));
                };
                if items.len() != *len {
                    return Err(Error::new(
                        ErrorCode::FixedLengthABIArrayMismatch,
                        &[&self.label(), len, &items.len()],
                    ));
                }
                coerce_elements(child, items)
            }
            Self::DynamicArray { child, .. } => {
                let InputValue::Sequence(items) = input else {
                    return Err(Error::new(
                        ErrorCode::MustBeSliceABIInput,
                        &[&self.label(), &input.kind()],
                    ));
                };
                coerce_elements(child, items)
            }
            Self::Tuple { children, .. } => match input {
                InputValue::Sequence(items) => {
                    if items.len() != children.len() {
                        return Err(Error::new(
                            ErrorCode::TupleABIArrayMismatch,
                            &[&self.label(), &children.len(), &items.len()],
                        ));
                    }
                    children
                        .iter()
                        .zip(items)
                        .map(|(c, v)| c.parse_external(v))
                        .collect::<Result<_>>()
                        .map(ComponentValue::Tuple)
                }
                InputValue::Mapping(map) => children
                    .iter()
                    .map(|c| {
                        let v = map.get(c.key_name()).ok_or_else(|| {
                            Error::new(
                                ErrorCode::MissingInputKeyABITuple,
                                &[&self.label(), &c.key_name()],
                            )
                        })?;
                        c.parse_external(v)
                    })
                    .collect::<Result<_>>()
                    .map(ComponentValue::Tuple),
                other => Err(Error::new(
                    ErrorCode::TupleABINotArrayOrMap,
                    &[&self.label(), &other.kind()],
                )),
            },
        }
    }
}

fn coerce_elements(child: &TypeComponent, items: &[InputValue]) -> Result<ComponentValue> {
    items
        .iter()
        .map(|v| child.parse_external(v))
        .collect::<Result<_>>()
        .map(ComponentValue::Array)
}

fn coerce_elementary(ty: &ElementaryType, input: &InputValue, name: &str) -> Result<ComponentValue> {
    match ty.base {
        BaseType::Uint | BaseType::Int => {
            let v = coerce_integer(input, name)?;
            util::check_integer_range(&v, ty.size, ty.signed(), name)?;
            Ok(ComponentValue::Integer(v))
        }
        BaseType::Fixed | BaseType::UFixed => {
            let unscaled = coerce_fixed_point(input, ty.n as u32, name)?;
            util::check_integer_range(&unscaled, ty.m, ty.signed(), name)?;
            Ok(ComponentValue::FixedPoint(FixedPoint { unscaled, scale: ty.n as u32 }))
        }
        BaseType::Address => coerce_address(input, name),
        BaseType::Bool => coerce_bool(input, name),
        BaseType::Bytes | BaseType::Function => {
            let bytes = coerce_bytes(input, name)?;
            if ty.fixed && bytes.len() != ty.size {
                return Err(Error::new(
                    ErrorCode::InvalidHexABIInput,
                    &[&name, &format!("expected {} bytes, got {}", ty.size, bytes.len())],
                ));
            }
            Ok(ComponentValue::Bytes(bytes))
        }
        BaseType::String => match input {
            InputValue::String(s) => Ok(ComponentValue::String(s.clone())),
            other => {
                Err(Error::new(ErrorCode::InvalidStringABIInput, &[&name, &other.kind()]))
            }
        },
    }
}

fn coerce_integer(input: &InputValue, name: &str) -> Result<BigInt> {
    match input {
        InputValue::String(s) => util::parse_integer_str(s).ok_or_else(|| {
            Error::new(
                ErrorCode::InvalidIntegerABIInput,
                &[&s, &name, &"not a decimal or 0x-hex integer"],
            )
        }),
        InputValue::Number(n) => number_to_bigint(n, name),
        InputValue::Bool(b) => Ok(BigInt::from(*b as u8)),
        other => Err(Error::new(
            ErrorCode::InvalidIntegerABIInput,
            &[&other.kind(), &name, &"unsupported input kind"],
        )),
    }
}

/// The f64 safe-integer bound: JSON numbers above it cannot represent every
/// integer, so larger values must arrive as strings.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0; // 2^53 - 1

fn number_to_bigint(n: &serde_json::Number, name: &str) -> Result<BigInt> {
    if let Some(i) = n.as_i64() {
        return Ok(BigInt::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(BigInt::from(u));
    }
    let f = n
        .as_f64()
        .ok_or_else(|| {
            Error::new(ErrorCode::InvalidIntegerABIInput, &[&n, &name, &"not a finite number"])
        })?;
    if f.fract() != 0.0 {
        return Err(Error::new(
            ErrorCode::InvalidIntegerABIInput,
            &[&n, &name, &"number has a fractional part"],
        ));
    }
    if f.abs() > MAX_SAFE_INTEGER {
        return Err(Error::new(
            ErrorCode::InvalidIntegerABIInput,
            &[&n, &name, &"number outside the safe integer range, use a string"],
        ));
    }
    Ok(BigInt::from(f as i64))
}

fn coerce_fixed_point(input: &InputValue, scale: u32, name: &str) -> Result<BigInt> {
    match input {
        InputValue::String(s) => util::parse_scaled_decimal(s, scale)
            .map_err(|reason| Error::new(ErrorCode::InvalidFloatABIInput, &[&s, &name, &reason])),
        InputValue::Number(n) => {
            // serde_json renders the shortest decimal form, which the exact
            // decimal parser then scales without floating-point loss
            let rendered = n.to_string();
            util::parse_scaled_decimal(&rendered, scale).map_err(|reason| {
                Error::new(ErrorCode::InvalidFloatABIInput, &[&rendered, &name, &reason])
            })
        }
        other => Err(Error::new(
            ErrorCode::InvalidFloatABIInput,
            &[&other.kind(), &name, &"unsupported input kind"],
        )),
    }
}

fn coerce_address(input: &InputValue, name: &str) -> Result<ComponentValue> {
    match input {
        InputValue::String(s) => s
            .trim()
            .parse::<Address>()
            .map(ComponentValue::Address)
            .map_err(|e| Error::caused_by(e, ErrorCode::InvalidHexABIInput, &[&name, &s])),
        InputValue::Bytes(b) if b.len() == 20 => {
            Ok(ComponentValue::Address(Address::from_slice(b)))
        }
        InputValue::Bytes(b) => Err(Error::new(
            ErrorCode::InvalidHexABIInput,
            &[&name, &format!("expected 20 bytes, got {}", b.len())],
        )),
        other => {
            Err(Error::new(ErrorCode::InvalidHexABIInput, &[&name, &other.kind()]))
        }
    }
}

fn coerce_bool(input: &InputValue, name: &str) -> Result<ComponentValue> {
    match input {
        InputValue::Bool(b) => Ok(ComponentValue::Bool(*b)),
        InputValue::String(s) => match s.trim() {
            "true" | "1" => Ok(ComponentValue::Bool(true)),
            "false" | "0" => Ok(ComponentValue::Bool(false)),
            other => Err(Error::new(ErrorCode::InvalidBoolABIInput, &[&other, &name])),
        },
        other => Err(Error::new(ErrorCode::InvalidBoolABIInput, &[&other.kind(), &name])),
    }
}

fn coerce_bytes(input: &InputValue, name: &str) -> Result<Vec<u8>> {
    match input {
        InputValue::String(s) => hex::decode(s.trim())
            .map_err(|e| Error::caused_by(e, ErrorCode::InvalidHexABIInput, &[&name, &s])),
        InputValue::Bytes(b) => Ok(b.clone()),
        other => Err(Error::new(ErrorCode::InvalidHexABIInput, &[&name, &other.kind()])),
    }
}
