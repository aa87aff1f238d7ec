use crate::{ComponentValue, TypeComponent};
use serde::{Deserialize, Serialize};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::{keccak256, B256};

/// JSON specification of a parameter: a function input/output, an error
/// field, or an event parameter.
///
/// Interoperable with the entries of `solc --combined-json abi`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter name. Empty for unnamed (positional) parameters.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The canonical Solidity type, using the word `tuple` for structs.
    /// E.g. `uint256`, `bytes[2]`, `tuple`, `tuple[]`.
    #[serde(rename = "type")]
    pub ty: String,
    /// For `tuple` types, the ordered child parameters. Empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Parameter>,
    /// The compiler's source-level type annotation, e.g.
    /// `struct Mail` for a `tuple`. Required for EIP-712 derivation.
    #[serde(default, rename = "internalType", skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Whether an event parameter is indexed (stored in a topic).
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub indexed: bool,
}

impl Parameter {
    /// Shorthand for an unnamed parameter of the given type.
    pub fn of_type(ty: &str) -> Self {
        Self { ty: ty.into(), ..Default::default() }
    }

    /// Builds the immutable type component tree for this parameter.
    pub fn type_component(&self) -> Result<TypeComponent> {
        TypeComponent::new(self)
    }

    /// The canonical selector form of this parameter's type: `ty` as-is for
    /// simple types, `(t1,t2,…)` (array suffixes preserved) for tuples.
    pub fn selector_type(&self) -> String {
        let mut s = String::with_capacity(self.ty.len());
        self.selector_type_raw(&mut s);
        s
    }

    fn selector_type_raw(&self, s: &mut String) {
        if self.components.is_empty() {
            s.push_str(&self.ty);
        } else {
            s.push('(');
            for (i, c) in self.components.iter().enumerate() {
                if i > 0 {
                    s.push(',');
                }
                c.selector_type_raw(s);
            }
            s.push(')');
            // `tuple[2][]` keeps its array suffix after the parenthesized form
            if let Some(idx) = self.ty.find('[') {
                s.push_str(&self.ty[idx..]);
            }
        }
    }
}

/// The kind of an ABI entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A named external function.
    Function,
    /// The contract constructor.
    Constructor,
    /// The receive-ether function.
    Receive,
    /// The fallback function.
    Fallback,
    /// A log event.
    Event,
    /// A named revert error.
    Error,
}

/// A function's mutability over contract state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Reads neither state nor environment.
    Pure,
    /// Reads but does not mutate state.
    View,
    /// Mutates state, rejects ether.
    NonPayable,
    /// Mutates state, accepts ether.
    Payable,
}

impl StateMutability {
    /// The lowercase JSON form, e.g. `"nonpayable"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::NonPayable => "nonpayable",
            Self::Payable => "payable",
        }
    }
}

/// One entry of a contract ABI: a function, constructor, event, or error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The entry kind.
    #[serde(rename = "type")]
    pub ty: EntryType,
    /// The declared name. Empty for constructor/receive/fallback.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Input parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Parameter>,
    /// Output parameters for functions. `None` when absent from the JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Parameter>>,
    /// Function state mutability.
    #[serde(default, rename = "stateMutability", skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,
    /// Whether an event omits its signature topic.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub anonymous: bool,
}

impl Entry {
    /// The canonical signature: `name(t1,t2,…)` with parameter names erased,
    /// tuples parenthesized, array suffixes preserved.
    pub fn signature(&self) -> String {
        let mut s = String::with_capacity(self.name.len() + 2 + self.inputs.len() * 16);
        s.push_str(&self.name);
        s.push('(');
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                s.push(',');
            }
            input.selector_type_raw(&mut s);
        }
        s.push(')');
        s
    }

    /// `keccak256(signature)` — the full 32-byte signature hash. For events
    /// this is the value of `topics[0]` unless the event is anonymous.
    pub fn signature_hash(&self) -> B256 {
        keccak256(self.signature().as_bytes())
    }

    /// The 4-byte function selector: `keccak256(signature)[0..4]`.
    pub fn selector(&self) -> [u8; 4] {
        let hash = self.signature_hash();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Builds the root tuple type component over this entry's inputs.
    pub fn input_components(&self) -> Result<TypeComponent> {
        TypeComponent::tuple_of(&self.inputs)
    }

    /// Builds the root tuple type component over this entry's outputs.
    pub fn output_components(&self) -> Result<TypeComponent> {
        TypeComponent::tuple_of(self.outputs.as_deref().unwrap_or_default())
    }

    /// Encodes `values` as call data: the 4-byte selector followed by the
    /// encoded inputs for functions and errors, the encoded inputs alone for
    /// constructors.
    pub fn encode_call_data(&self, values: &ComponentValue) -> Result<Vec<u8>> {
        let tree = self.input_components()?;
        let data = tree.encode_abi_data(values)?;
        match self.ty {
            EntryType::Constructor => Ok(data),
            _ => {
                let mut out = Vec::with_capacity(4 + data.len());
                out.extend_from_slice(&self.selector());
                out.extend_from_slice(&data);
                Ok(out)
            }
        }
    }

    /// Decodes function call data, verifying the leading 4-byte selector.
    pub fn decode_call_data(&self, data: &[u8]) -> Result<ComponentValue> {
        if data.len() < 4 {
            return Err(Error::new(ErrorCode::NotEnoughBytesABISignature, &[&data.len()]));
        }
        let selector = self.selector();
        if data[..4] != selector {
            return Err(Error::new(
                ErrorCode::IncorrectABISignatureID,
                &[&hex::encode_prefixed(&data[..4]), &hex::encode_prefixed(selector), &self.name],
            ));
        }
        self.input_components()?.decode_abi_data(&data[4..])
    }

    /// Decodes function return data against this entry's outputs.
    pub fn decode_call_output(&self, data: &[u8]) -> Result<ComponentValue> {
        self.output_components()?.decode_abi_data(data)
    }
}

/// A contract ABI: an ordered list of [`Entry`] values, serializing as the
/// JSON array emitted by `solc`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abi(pub Vec<Entry>);

impl Abi {
    /// All function entries, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &Entry> {
        self.0.iter().filter(|e| e.ty == EntryType::Function)
    }

    /// The first function with the given name.
    pub fn function(&self, name: &str) -> Option<&Entry> {
        self.functions().find(|e| e.name == name)
    }

    /// All event entries, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Entry> {
        self.0.iter().filter(|e| e.ty == EntryType::Event)
    }

    /// The first event with the given name.
    pub fn event(&self, name: &str) -> Option<&Entry> {
        self.events().find(|e| e.name == name)
    }

    /// The constructor entry, if present.
    pub fn constructor(&self) -> Option<&Entry> {
        self.0.iter().find(|e| e.ty == EntryType::Constructor)
    }
}

impl core::ops::Deref for Abi {
    type Target = [Entry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_entry() -> Entry {
        serde_json::from_value(serde_json::json!({
            "type": "function",
            "name": "transfer",
            "inputs": [
                { "name": "to", "type": "address", "internalType": "address" },
                { "name": "amount", "type": "uint256", "internalType": "uint256" }
            ],
            "outputs": [
                { "name": "", "type": "bool", "internalType": "bool" }
            ],
            "stateMutability": "nonpayable"
        }))
        .unwrap()
    }

    #[test]
    fn canonical_signature_erases_names() {
        let entry = transfer_entry();
        assert_eq!(entry.signature(), "transfer(address,uint256)");
        // the ERC-20 transfer selector
        assert_eq!(entry.selector(), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn tuple_signature_keeps_array_suffix() {
        let p: Parameter = serde_json::from_value(serde_json::json!({
            "name": "swaps",
            "type": "tuple[2][]",
            "components": [
                { "name": "pool", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ]
        }))
        .unwrap();
        assert_eq!(p.selector_type(), "(address,uint256)[2][]");
    }

    #[test]
    fn abi_json_round_trip() {
        let json = serde_json::json!([
            {
                "type": "function",
                "name": "transfer",
                "inputs": [
                    { "name": "to", "type": "address", "internalType": "address" },
                    { "name": "amount", "type": "uint256", "internalType": "uint256" }
                ],
                "outputs": [ { "type": "bool", "internalType": "bool" } ],
                "stateMutability": "nonpayable"
            },
            {
                "type": "event",
                "name": "Transfer",
                "inputs": [
                    { "name": "from", "type": "address", "indexed": true },
                    { "name": "to", "type": "address", "indexed": true },
                    { "name": "value", "type": "uint256" }
                ]
            }
        ]);
        let abi: Abi = serde_json::from_value(json.clone()).unwrap();
        assert!(abi.function("transfer").is_some());
        assert!(abi.event("Transfer").is_some());
        assert_eq!(serde_json::to_value(&abi).unwrap(), json);
    }

    #[test]
    fn event_topic_hash() {
        let abi: Abi = serde_json::from_value(serde_json::json!([{
            "type": "event",
            "name": "Transfer",
            "inputs": [
                { "name": "from", "type": "address", "indexed": true },
                { "name": "to", "type": "address", "indexed": true },
                { "name": "value", "type": "uint256" }
            ]
        }]))
        .unwrap();
        let event = abi.event("Transfer").unwrap();
        assert_eq!(event.signature(), "Transfer(address,address,uint256)");
        assert_eq!(
            event.signature_hash().to_string(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }
}
