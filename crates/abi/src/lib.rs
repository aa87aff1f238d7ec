#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

mod abi;
pub use abi::{Abi, Entry, EntryType, Parameter, StateMutability};

mod elementary;
pub use elementary::{BaseType, ElementaryType};

mod component;
pub use component::TypeComponent;

mod value;
pub use value::{ComponentValue, FixedPoint, InputValue};

mod coerce;

mod encode;

mod decode;

mod event;
pub use event::DecodedEvent;

mod serialize;
pub use serialize::TupleSerialization;

pub(crate) mod util;

#[doc(no_inline)]
pub use sigil_errors::{Error, ErrorCode, Result};
