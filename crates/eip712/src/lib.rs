#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

mod typeset;
pub use typeset::{TypeMember, TypeSet};

mod hash;

mod derive;

mod typed_data;
pub use typed_data::TypedData;

#[doc(no_inline)]
pub use sigil_errors::{Error, ErrorCode, Result};

/// The recursion-depth limit applied while walking type sets and values.
///
/// Real ABIs cannot produce cyclic struct references; the guard bounds
/// pathological inputs with [`ErrorCode::EIP712MaxDepthExceeded`].
pub const MAX_DEPTH: usize = 32;
