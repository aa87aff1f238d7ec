use crate::MAX_DEPTH;
use serde::{Deserialize, Serialize};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::{keccak256, B256};
use std::collections::{BTreeMap, BTreeSet};

/// The reserved domain type name.
pub(crate) const DOMAIN_TYPE: &str = "EIP712Domain";

/// One member of an EIP-712 struct type: a name and a canonical type string
/// (`uint256`, `bytes32`, `Person`, `Mail[]`, `bool[][3]`, …).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    /// The member name.
    pub name: String,
    /// The member's EIP-712 type string.
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypeMember {
    /// Shorthand constructor.
    pub fn new(name: &str, ty: &str) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

/// A mapping from struct name to ordered member list: the `types` object of
/// an `eth_signTypedData` payload.
///
/// Backed by a `BTreeMap`, so iteration is already in the byte-wise
/// lexicographic order `encodeType` requires.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    derive_more::Deref,
    derive_more::DerefMut,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct TypeSet(pub BTreeMap<String, Vec<TypeMember>>);

impl TypeSet {
    /// Creates an empty type set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the reserved `EIP712Domain` type as an empty entry when the
    /// payload did not define it.
    pub fn ensure_domain(&mut self) {
        self.0.entry(DOMAIN_TYPE.into()).or_default();
    }

    /// EIP-712 `encodeType`: the primary type's encoding followed by every
    /// transitively referenced struct type, sorted lexicographically by name.
    pub fn encode_type(&self, primary: &str) -> Result<String> {
        let mut referenced = BTreeSet::new();
        self.collect_referenced(primary, &mut referenced, 0)?;
        referenced.remove(primary);

        let mut out = self.encode_one(primary)?;
        for name in referenced {
            out.push_str(&self.encode_one(name)?);
        }
        Ok(out)
    }

    /// EIP-712 `typeHash`: `keccak256(encodeType(primary))`.
    pub fn type_hash(&self, primary: &str) -> Result<B256> {
        Ok(keccak256(self.encode_type(primary)?.as_bytes()))
    }

    /// `Name(type1 name1,type2 name2,…)`
    fn encode_one(&self, name: &str) -> Result<String> {
        let members =
            self.0.get(name).ok_or_else(|| Error::new(ErrorCode::EIP712TypeNotFound, &[&name]))?;
        let mut out = String::with_capacity(name.len() + 2 + members.len() * 16);
        out.push_str(name);
        out.push('(');
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&member.ty);
            out.push(' ');
            out.push_str(&member.name);
        }
        out.push(')');
        Ok(out)
    }

    /// Walks member types, adding every struct name reachable from `name`.
    /// Array suffixes are stripped before the lookup; names not present in
    /// the set are elementary and ignored here.
    fn collect_referenced<'s>(
        &'s self,
        name: &str,
        referenced: &mut BTreeSet<&'s str>,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(Error::new(ErrorCode::EIP712MaxDepthExceeded, &[&MAX_DEPTH, &name]));
        }
        let Some(members) = self.0.get(name) else { return Ok(()) };
        for member in members {
            let base = strip_array_suffixes(&member.ty);
            if let Some((key, _)) = self.0.get_key_value(base) {
                if referenced.insert(key.as_str()) {
                    self.collect_referenced(base, referenced, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

/// `Mail[3][]` → `Mail`.
pub(crate) fn strip_array_suffixes(ty: &str) -> &str {
    match ty.find('[') {
        Some(idx) => &ty[..idx],
        None => ty,
    }
}
