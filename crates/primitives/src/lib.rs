#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

mod address;
pub use address::Address;

mod bytes;
pub use bytes::Bytes;

mod word;
pub use word::B256;

use tiny_keccak::{Hasher, Keccak};

/// Computes the Keccak-256 hash of the input bytes.
///
/// This is the legacy Keccak padding used by Ethereum, not NIST SHA-3.
pub fn keccak256(bytes: impl AsRef<[u8]>) -> B256 {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    hasher.finalize(&mut output);
    B256(output)
}

/// Decodes a hex string, accepting both `0x`-prefixed and bare input,
/// case-insensitive.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s)
}
