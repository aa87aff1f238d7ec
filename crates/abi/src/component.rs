use crate::{ElementaryType, Parameter};
use sigil_errors::{Error, ErrorCode, Result};
use std::sync::Arc;

/// An immutable node of a type component tree, built from a [`Parameter`].
///
/// The tree is the engine's central data structure: the value parser walks it
/// to coerce external input, the codec walks it to lay out the head/tail wire
/// format, and the EIP-712 engine walks it to derive struct type sets.
///
/// Each node owns its children exclusively and carries the originating
/// parameter (for `name`, `internalType` and `indexed`); once built, a tree
/// is never mutated and can be shared freely across threads.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeComponent {
    /// A leaf of elementary type.
    Elementary {
        /// The parsed elementary type.
        ty: ElementaryType,
        /// The tuple key this node is addressed by, if any.
        key_name: String,
        /// The originating ABI parameter.
        parameter: Arc<Parameter>,
    },
    /// A fixed-length array: `T[N]`, `N >= 1`.
    FixedArray {
        /// The element type.
        child: Box<TypeComponent>,
        /// The declared length.
        len: usize,
        /// The tuple key this node is addressed by, if any.
        key_name: String,
        /// The originating ABI parameter.
        parameter: Arc<Parameter>,
    },
    /// A dynamically sized array: `T[]`.
    DynamicArray {
        /// The element type.
        child: Box<TypeComponent>,
        /// The tuple key this node is addressed by, if any.
        key_name: String,
        /// The originating ABI parameter.
        parameter: Arc<Parameter>,
    },
    /// An ordered, possibly named, composite: a Solidity struct.
    Tuple {
        /// The child components, in declaration order.
        children: Vec<TypeComponent>,
        /// The tuple key this node is addressed by, if any.
        key_name: String,
        /// The originating ABI parameter.
        parameter: Arc<Parameter>,
    },
}

impl TypeComponent {
    /// Builds the type component tree for a parameter.
    pub fn new(param: &Parameter) -> Result<Self> {
        Self::build(param)
    }

    /// Builds a synthetic root tuple over a parameter list, as used for
    /// function inputs/outputs and non-indexed event data.
    pub fn tuple_of(params: &[Parameter]) -> Result<Self> {
        Self::build(&Parameter {
            ty: "tuple".into(),
            components: params.to_vec(),
            ..Default::default()
        })
    }

    fn build(param: &Parameter) -> Result<Self> {
        let parameter = Arc::new(param.clone());
        let (stem, arrays) = split_array_suffixes(&param.ty)?;

        let mut node = if stem == "tuple" {
            let mut children = Vec::with_capacity(param.components.len());
            for (i, child) in param.components.iter().enumerate() {
                if !child.name.is_empty() {
                    let dup = param.components[..i].iter().any(|c| c.name == child.name);
                    if dup {
                        return Err(Error::new(
                            ErrorCode::BadABITypeComponent,
                            &[&format!("duplicate tuple key '{}' in '{}'", child.name, param.ty)],
                        ));
                    }
                }
                children.push(Self::build(child)?);
            }
            Self::Tuple { children, key_name: param.name.clone(), parameter: parameter.clone() }
        } else {
            if !param.components.is_empty() {
                return Err(Error::new(
                    ErrorCode::BadABITypeComponent,
                    &[&format!("components supplied for non-tuple type '{}'", param.ty)],
                ));
            }
            Self::Elementary {
                ty: ElementaryType::parse(stem, &param.ty)?,
                key_name: param.name.clone(),
                parameter: parameter.clone(),
            }
        };

        // `int32[5][]` reads inside-out: wrap the stem with each suffix in
        // written order, leaving the outermost (last-written) on top.
        for len in arrays {
            let key_name = param.name.clone();
            let parameter = parameter.clone();
            node = match len {
                Some(len) => Self::FixedArray { child: Box::new(node), len, key_name, parameter },
                None => Self::DynamicArray { child: Box::new(node), key_name, parameter },
            };
        }
        Ok(node)
    }

    /// The tuple key of this node; empty for positional/root nodes.
    pub fn key_name(&self) -> &str {
        match self {
            Self::Elementary { key_name, .. }
            | Self::FixedArray { key_name, .. }
            | Self::DynamicArray { key_name, .. }
            | Self::Tuple { key_name, .. } => key_name,
        }
    }

    /// The ABI parameter this node was built from.
    pub fn parameter(&self) -> &Arc<Parameter> {
        match self {
            Self::Elementary { parameter, .. }
            | Self::FixedArray { parameter, .. }
            | Self::DynamicArray { parameter, .. }
            | Self::Tuple { parameter, .. } => parameter,
        }
    }

    /// Fallible cast to a tuple's children.
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Fallible cast to the elementary type of a leaf.
    pub fn as_elementary(&self) -> Option<&ElementaryType> {
        match self {
            Self::Elementary { ty, .. } => Some(ty),
            _ => None,
        }
    }

    /// The canonical type name as used in signatures: elementary names with
    /// canonical suffixes, tuples as `(t1,t2,…)`, array suffixes preserved.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Elementary { ty, .. } => ty.canonical_name(),
            Self::FixedArray { child, len, .. } => {
                let mut s = child.canonical_name();
                s.push('[');
                s.push_str(itoa::Buffer::new().format(*len));
                s.push(']');
                s
            }
            Self::DynamicArray { child, .. } => {
                let mut s = child.canonical_name();
                s.push_str("[]");
                s
            }
            Self::Tuple { children, .. } => {
                let mut s = String::with_capacity(2 + children.len() * 8);
                s.push('(');
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        s.push(',');
                    }
                    s.push_str(&c.canonical_name());
                }
                s.push(')');
                s
            }
        }
    }

    /// Whether this component encodes through the tail with an offset word in
    /// the head.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Elementary { ty, .. } => !ty.is_static(),
            Self::FixedArray { child, .. } => child.is_dynamic(),
            Self::DynamicArray { .. } => true,
            Self::Tuple { children, .. } => children.iter().any(Self::is_dynamic),
        }
    }

    /// The number of bytes a *static* component occupies inline in its
    /// parent's head block.
    pub(crate) fn head_encoded_len(&self) -> usize {
        match self {
            Self::Elementary { .. } | Self::DynamicArray { .. } => 32,
            Self::FixedArray { child, len, .. } => {
                len * if child.is_dynamic() { 32 } else { child.head_encoded_len() }
            }
            Self::Tuple { children, .. } => children
                .iter()
                .map(|c| if c.is_dynamic() { 32 } else { c.head_encoded_len() })
                .sum(),
        }
    }

    /// The name this node goes by in error messages: its tuple key if it has
    /// one, its canonical type otherwise.
    pub(crate) fn label(&self) -> String {
        let key = self.key_name();
        if key.is_empty() { self.canonical_name() } else { key.into() }
    }
}

/// Splits trailing `[N]`/`[]` groups off a type string, returning the stem
/// and the sizes in written order.
fn split_array_suffixes(ty: &str) -> Result<(&str, Vec<Option<usize>>)> {
    let Some(idx) = ty.find('[') else { return Ok((ty, Vec::new())) };
    let (stem, mut rest) = ty.split_at(idx);
    let mut sizes = Vec::new();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .ok_or_else(|| Error::new(ErrorCode::InvalidABIArraySpec, &[&ty]))?;
        let (digits, tail) = inner;
        if digits.is_empty() {
            sizes.push(None);
        } else {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::new(ErrorCode::InvalidABIArraySpec, &[&ty]));
            }
            let len: usize =
                digits.parse().map_err(|_| Error::new(ErrorCode::InvalidABIArraySpec, &[&ty]))?;
            if len == 0 {
                return Err(Error::new(ErrorCode::InvalidABIArraySpec, &[&ty]));
            }
            sizes.push(Some(len));
        }
        rest = tail;
    }
    Ok((stem, sizes))
}
