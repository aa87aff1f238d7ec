use crate::{derive, typeset::DOMAIN_TYPE, TypeSet};
use serde::{Deserialize, Serialize};
use sigil_abi::{InputValue, TypeComponent};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::{keccak256, B256};

/// An `eth_signTypedData` payload: the type set, the primary type name, and
/// the domain and message objects.
///
/// Only the V4 semantics are implemented; [`TypedData::digest`] produces the
/// 32-byte value that is signed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedData {
    /// The struct type definitions.
    #[serde(default)]
    pub types: TypeSet,
    /// The name of the type the `message` object conforms to.
    #[serde(default, rename = "primaryType")]
    pub primary_type: String,
    /// The signing domain object, keyed like `EIP712Domain`'s members.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub domain: serde_json::Value,
    /// The message object, keyed like the primary type's members.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub message: serde_json::Value,
}

impl TypedData {
    /// Builds a payload from a tuple-rooted ABI type component tree, deriving
    /// the type set from the tuple's `internalType` struct names.
    pub fn from_abi_tuple(
        root: &TypeComponent,
        domain: serde_json::Value,
        message: serde_json::Value,
    ) -> Result<Self> {
        let (primary_type, types) = derive::type_set_from_tuple(root)?;
        Ok(Self { types, primary_type, domain, message })
    }

    /// The domain separator: `hashStruct("EIP712Domain", domain)`. An absent
    /// domain hashes as an empty object.
    pub fn domain_separator(&self) -> Result<B256> {
        let mut types = self.types.clone();
        types.ensure_domain();
        types.hash_struct(DOMAIN_TYPE, &object_or_empty(&self.domain))
    }

    /// The V4 digest: `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ messageHash)`,
    /// where the message hash is omitted when the primary type is
    /// `EIP712Domain` itself.
    pub fn digest(&self) -> Result<B256> {
        if self.primary_type.is_empty() {
            return Err(Error::new(ErrorCode::EIP712PrimaryTypeRequired, &[]));
        }
        let mut types = self.types.clone();
        types.ensure_domain();

        let domain_separator = types.hash_struct(DOMAIN_TYPE, &object_or_empty(&self.domain))?;

        let mut preimage = Vec::with_capacity(2 + 64);
        preimage.extend_from_slice(&[0x19, 0x01]);
        preimage.extend_from_slice(domain_separator.as_slice());
        if self.primary_type != DOMAIN_TYPE {
            let message_hash =
                types.hash_struct(&self.primary_type, &object_or_empty(&self.message))?;
            preimage.extend_from_slice(message_hash.as_slice());
        }
        Ok(keccak256(preimage))
    }
}

/// An absent (`null`) domain or message is hashed as an empty object; the
/// nil-reference rule applies only to nested struct members.
fn object_or_empty(value: &serde_json::Value) -> InputValue {
    if value.is_null() {
        InputValue::Mapping(Default::default())
    } else {
        value.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_primary_type_is_rejected() {
        let payload = TypedData::default();
        assert_eq!(payload.digest().unwrap_err().code(), ErrorCode::EIP712PrimaryTypeRequired);
    }

    #[test]
    fn payload_parses_from_json() {
        let payload: TypedData = serde_json::from_value(serde_json::json!({
            "types": {
                "EIP712Domain": [ { "name": "name", "type": "string" } ],
                "Message": [ { "name": "text", "type": "string" } ]
            },
            "primaryType": "Message",
            "domain": { "name": "test" },
            "message": { "text": "hi" }
        }))
        .unwrap();
        assert_eq!(payload.primary_type, "Message");
        assert_eq!(payload.types.get("Message").unwrap().len(), 1);
        payload.digest().unwrap();
    }

    #[test]
    fn domain_separator_of_empty_domain() {
        let payload = TypedData { primary_type: DOMAIN_TYPE.into(), ..Default::default() };
        let separator = payload.domain_separator().unwrap();
        // hashStruct of an empty EIP712Domain is keccak256 of the bare type hash
        assert_eq!(separator, keccak256(keccak256("EIP712Domain()")));
    }
}
