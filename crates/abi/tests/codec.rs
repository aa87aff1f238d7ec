//! End-to-end call data tests over the public API.

use proptest::prelude::*;
use sigil_abi::{Abi, ComponentValue, Entry, ErrorCode};
use sigil_primitives::keccak256;

fn some_fn() -> Entry {
    serde_json::from_value(serde_json::json!({
        "type": "function",
        "name": "someFn",
        "inputs": [
            { "name": "value", "type": "uint256" },
            { "name": "recipient", "type": "address" },
            { "name": "data", "type": "bytes" }
        ],
        "outputs": [],
        "stateMutability": "nonpayable"
    }))
    .unwrap()
}

#[test]
fn call_data_layout() {
    let entry = some_fn();
    assert_eq!(entry.signature(), "someFn(uint256,address,bytes)");

    let selector = keccak256("someFn(uint256,address,bytes)");
    assert_eq!(entry.selector(), selector[..4]);

    let tc = entry.input_components().unwrap();
    let values = tc
        .parse_external(
            &serde_json::json!(["1", "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826", "0xdeadbeef"])
                .into(),
        )
        .unwrap();
    let call = entry.encode_call_data(&values).unwrap();

    assert_eq!(call[..4], selector[..4]);
    let words: Vec<String> = call[4..].chunks(32).map(hex::encode).collect();
    assert_eq!(
        words,
        [
            // value 1
            "0000000000000000000000000000000000000000000000000000000000000001",
            // the address, left-padded
            "000000000000000000000000cd2a3d9f938e13cd947ec05abc7fe734df8dd826",
            // offset of the dynamic bytes, relative to the head block
            "0000000000000000000000000000000000000000000000000000000000000060",
            // bytes length
            "0000000000000000000000000000000000000000000000000000000000000004",
            // bytes, right-padded
            "deadbeef00000000000000000000000000000000000000000000000000000000",
        ]
    );

    // and back again
    let decoded = entry.decode_call_data(&call).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn call_data_selector_checks() {
    let entry = some_fn();
    assert_eq!(
        entry.decode_call_data(&[0x01, 0x02]).unwrap_err().code(),
        ErrorCode::NotEnoughBytesABISignature
    );
    let mut bad = vec![0u8; 4 + 3 * 32];
    bad[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(
        entry.decode_call_data(&bad).unwrap_err().code(),
        ErrorCode::IncorrectABISignatureID
    );
}

#[test]
fn selector_ignores_parameter_names() {
    let renamed: Entry = serde_json::from_value(serde_json::json!({
        "type": "function",
        "name": "someFn",
        "inputs": [
            { "name": "a", "type": "uint256" },
            { "name": "b", "type": "address" },
            { "name": "c", "type": "bytes" }
        ]
    }))
    .unwrap();
    assert_eq!(renamed.selector(), some_fn().selector());
}

#[test]
fn constructor_call_data_has_no_selector() {
    let abi: Abi = serde_json::from_value(serde_json::json!([{
        "type": "constructor",
        "inputs": [ { "name": "owner", "type": "address" } ],
        "stateMutability": "nonpayable"
    }]))
    .unwrap();
    let ctor = abi.constructor().unwrap();
    let tc = ctor.input_components().unwrap();
    let values = tc
        .parse_external(&serde_json::json!(["0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"]).into())
        .unwrap();
    let data = ctor.encode_call_data(&values).unwrap();
    assert_eq!(data.len(), 32);
}

#[test]
fn output_decoding() {
    let entry: Entry = serde_json::from_value(serde_json::json!({
        "type": "function",
        "name": "name",
        "inputs": [],
        "outputs": [ { "type": "string" } ],
        "stateMutability": "view"
    }))
    .unwrap();
    let tc = entry.output_components().unwrap();
    let values = tc.parse_external(&serde_json::json!(["Wrapped Ether"]).into()).unwrap();
    let encoded = tc.encode_abi_data(&values).unwrap();
    let decoded = entry.decode_call_output(&encoded).unwrap();
    assert_eq!(
        decoded,
        ComponentValue::Tuple(vec![ComponentValue::String("Wrapped Ether".into())])
    );
}

proptest! {
    // decode(encode(v)) == v over a mixed static/dynamic tuple
    #[test]
    fn round_trip_law(
        nums in proptest::collection::vec(any::<u64>(), 0..8),
        flag: bool,
        data in proptest::collection::vec(any::<u8>(), 0..64),
        text in "[a-zA-Z0-9 ]{0,32}",
    ) {
        let entry: Entry = serde_json::from_value(serde_json::json!({
            "type": "function",
            "name": "mixed",
            "inputs": [
                { "name": "nums", "type": "uint256[]" },
                { "name": "flag", "type": "bool" },
                { "name": "data", "type": "bytes" },
                { "name": "text", "type": "string" }
            ]
        }))
        .unwrap();
        let tc = entry.input_components().unwrap();
        let input = serde_json::json!([
            nums.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
            flag,
            hex::encode_prefixed(&data),
            text,
        ]);
        let values = tc.parse_external(&input.into()).unwrap();
        let encoded = tc.encode_abi_data(&values).unwrap();
        prop_assert_eq!(tc.decode_abi_data(&encoded).unwrap(), values);
    }
}
