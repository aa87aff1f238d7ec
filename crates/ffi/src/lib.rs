#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

mod schema;
pub use schema::{Details, Schema};

mod generate;

mod parse;

use serde::{Deserialize, Serialize};
use sigil_abi::{Entry, EntryType, StateMutability};
use sigil_errors::Result;
use std::collections::BTreeMap;

/// One FFI parameter: a name and its schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// The parameter name. Empty for unnamed parameters.
    #[serde(default)]
    pub name: String,
    /// The parameter's JSON schema, with the `details` extension.
    pub schema: Schema,
}

/// The FFI form of an ABI function.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// The function name.
    pub name: String,
    /// Input parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Return parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Param>,
    /// Free-form entry details; `stateMutability` is preserved here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// The FFI form of an ABI event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The event name.
    pub name: String,
    /// Event parameters, in declaration order, indexed flags in `details`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Free-form entry details; `anonymous` is preserved here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Method {
    /// Translates an ABI function entry into its FFI form.
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        let mut details = BTreeMap::new();
        if let Some(sm) = entry.state_mutability {
            details.insert("stateMutability".into(), serde_json::Value::String(sm.as_str().into()));
        }
        Ok(Self {
            name: entry.name.clone(),
            params: generate::params_from_parameters(&entry.inputs)?,
            returns: generate::params_from_parameters(entry.outputs.as_deref().unwrap_or_default())?,
            details,
        })
    }

    /// Reconstructs the ABI function entry, validating each schema against
    /// the metaschema rules and the underlying ABI types.
    pub fn to_entry(&self) -> Result<Entry> {
        let state_mutability = self
            .details
            .get("stateMutability")
            .and_then(|v| v.as_str())
            .and_then(parse_state_mutability);
        Ok(Entry {
            ty: EntryType::Function,
            name: self.name.clone(),
            inputs: parse::parameters_from_params(&self.params)?,
            outputs: Some(parse::parameters_from_params(&self.returns)?),
            state_mutability,
            anonymous: false,
        })
    }
}

impl Event {
    /// Translates an ABI event entry into its FFI form.
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        let mut details = BTreeMap::new();
        if entry.anonymous {
            details.insert("anonymous".into(), serde_json::Value::Bool(true));
        }
        Ok(Self {
            name: entry.name.clone(),
            params: generate::params_from_parameters(&entry.inputs)?,
            details,
        })
    }

    /// Reconstructs the ABI event entry.
    pub fn to_entry(&self) -> Result<Entry> {
        Ok(Entry {
            ty: EntryType::Event,
            name: self.name.clone(),
            inputs: parse::parameters_from_params(&self.params)?,
            outputs: None,
            state_mutability: None,
            anonymous: self.details.get("anonymous").and_then(|v| v.as_bool()).unwrap_or(false),
        })
    }
}

fn parse_state_mutability(s: &str) -> Option<StateMutability> {
    match s {
        "pure" => Some(StateMutability::Pure),
        "view" => Some(StateMutability::View),
        "nonpayable" => Some(StateMutability::NonPayable),
        "payable" => Some(StateMutability::Payable),
        _ => None,
    }
}

#[doc(no_inline)]
pub use sigil_errors::{Error, ErrorCode};
