#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

use core::fmt;

mod messages;

/// Result type used across the sigil workspace.
pub type Result<T, E = Error> = core::result::Result<T, E>;

macro_rules! catalog {
    ($($(#[$attr:meta])* $name:ident => $msg:path $([http $status:literal])?,)*) => {
        /// Every error kind the engine can surface, with its stable identifier.
        ///
        /// The identifier (e.g. `FF22010`) and the meaning of each kind are part
        /// of the user-visible contract; new kinds may be added, existing ones
        /// are never renumbered.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ErrorCode {
            $($(#[$attr])* $name,)*
        }

        impl ErrorCode {
            /// The stable identifier, e.g. `"FF22010"`.
            pub const fn id(self) -> &'static str {
                match self { $(Self::$name => $msg.0,)* }
            }

            /// The message template for this kind, with positional `{}` slots.
            pub const fn template(self) -> &'static str {
                match self { $(Self::$name => $msg.1,)* }
            }

            /// A suggested HTTP status code for embeddings that surface errors
            /// over HTTP. `None` where no particular status applies.
            pub const fn http_status(self) -> Option<u16> {
                #[allow(unreachable_patterns)]
                match self {
                    $($(Self::$name => Some($status),)?)*
                    _ => None,
                }
            }
        }
    };
}

catalog! {
    // Type grammar
    /// The base of an ABI type string is not a recognized elementary type.
    UnknownElementaryType => messages::FF22010 [http 400],
    /// A recognized suffix with an out-of-range or misaligned size.
    UnsupportedABISuffix => messages::FF22011 [http 400],
    /// The type requires a suffix and none was supplied.
    MissingABISuffix => messages::FF22012 [http 400],
    /// The suffix is not of the form `digits` or `digits x digits`.
    InvalidABISuffix => messages::FF22013 [http 400],
    /// A malformed `[N]`/`[]` array suffix.
    InvalidABIArraySpec => messages::FF22014 [http 400],
    /// An ABI parameter that cannot form a type component (e.g. `tuple`
    /// without `components`).
    BadABITypeComponent => messages::FF22015 [http 400],

    // Value coercion
    /// Input could not be coerced to an integer of the target type.
    InvalidIntegerABIInput => messages::FF22020 [http 400],
    /// Input could not be coerced to a fixed-point decimal.
    InvalidFloatABIInput => messages::FF22021 [http 400],
    /// Input for a string component was not a string.
    InvalidStringABIInput => messages::FF22022 [http 400],
    /// Input could not be coerced to a boolean.
    InvalidBoolABIInput => messages::FF22023 [http 400],
    /// Input could not be parsed as hex bytes.
    InvalidHexABIInput => messages::FF22024 [http 400],
    /// Input for an array component was not an ordered sequence.
    MustBeSliceABIInput => messages::FF22025 [http 400],
    /// A fixed-length array input with the wrong number of entries.
    FixedLengthABIArrayMismatch => messages::FF22026 [http 400],
    /// A positional tuple input with the wrong number of entries.
    TupleABIArrayMismatch => messages::FF22027 [http 400],
    /// A tuple input that is neither a sequence nor a mapping.
    TupleABINotArrayOrMap => messages::FF22028 [http 400],
    /// A keyed tuple input missing one of the tuple's keys.
    MissingInputKeyABITuple => messages::FF22029 [http 400],
    /// A negative value supplied for an unsigned type.
    NegativeUnsignedABIEncode => messages::FF22030 [http 400],
    /// A value outside the signed/unsigned range of its type.
    NumberTooLargeABIEncode => messages::FF22031 [http 400],

    // Codec
    /// A value tree node of the wrong kind for the component being encoded.
    WrongTypeComponentABIEncode => messages::FF22040,
    /// A value tree with fewer children than the component requires.
    InsufficientDataABIEncode => messages::FF22041,
    /// Decoding ran out of bytes reading an array length word.
    NotEnoughBytesABIArrayCount => messages::FF22042,
    /// Decoding ran out of bytes reading a value.
    NotEnoughBytesABIValue => messages::FF22043,
    /// Call data shorter than the 4-byte selector.
    NotEnoughBytesABISignature => messages::FF22044,
    /// Call data selector does not match the function.
    IncorrectABISignatureID => messages::FF22045,
    /// An unrecognized tuple serialization mode was requested.
    UnknownTupleSerializer => messages::FF22046,
    /// The decoding entry point was handed a non-tuple root component.
    DecodeNotTuple => messages::FF22047,
    /// A decoded array length word implies more data than the buffer holds.
    ABIArrayCountTooLarge => messages::FF22048,

    // Event matching
    /// Fewer topics than the event's indexed parameters require.
    EventsInsufficientTopics => messages::FF22050,
    /// `topics[0]` does not match the event's signature hash.
    EventSignatureMismatch => messages::FF22051,

    // EIP-712
    /// Internal: a component tree node kind the EIP-712 walker does not know.
    EIP712UnknownABICompType => messages::FF22060 [http 400],
    /// An EIP-712 type string that cannot be encoded.
    EIP712UnsupportedStrType => messages::FF22061 [http 400],
    /// An ABI elementary type with no EIP-712 counterpart (fixed/ufixed,
    /// function).
    EIP712UnsupportedABIType => messages::FF22062 [http 400],
    /// A struct type referenced but not defined in the type set.
    EIP712TypeNotFound => messages::FF22063 [http 400],
    /// The EIP-712 entry point was handed a non-tuple root component.
    EIP712PrimaryNotTuple => messages::FF22064 [http 400],
    /// `internalType` does not carry an extractable struct name.
    EIP712BadInternalType => messages::FF22065 [http 400],
    /// A struct value that is not a mapping.
    EIP712ValueNotMap => messages::FF22066 [http 400],
    /// A malformed `[...]` suffix in an EIP-712 type string.
    EIP712InvalidArraySuffix => messages::FF22067 [http 400],
    /// An array value that is not a sequence.
    EIP712ValueNotArray => messages::FF22068 [http 400],
    /// A fixed-length array value with the wrong number of entries.
    EIP712InvalidArrayLen => messages::FF22069 [http 400],
    /// The typed data payload did not specify `primaryType`.
    EIP712PrimaryTypeRequired => messages::FF22070 [http 400],
    /// An elementary operation was attempted on a non-elementary type.
    NotElementary => messages::FF22071 [http 400],
    /// The recursion-depth guard tripped; the type set is cyclic or too deep.
    EIP712MaxDepthExceeded => messages::FF22072 [http 400],

    // FFI
    /// A schema that does not satisfy the FFI metaschema.
    InvalidFFIDetailsSchema => messages::FF22080 [http 400],
    /// A schema whose declared JSON type contradicts its ABI type.
    FFITypeMismatch => messages::FF22081 [http 400],
}

/// An error surfaced by the engine: a catalog kind, its formatted message,
/// and optionally the underlying error it wraps.
///
/// Wrapping preserves the cause chain, so the identifier of the deepest
/// catalog error remains observable via [`Error::root_code`].
#[derive(Debug)]
pub struct Error {
    code: ErrorCode,
    message: String,
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Construct an error, filling the kind's template with `args` in order.
    pub fn new(code: ErrorCode, args: &[&dyn fmt::Display]) -> Self {
        Self { code, message: fill(code.template(), args), cause: None }
    }

    /// As [`Error::new`], wrapping the underlying `cause`.
    pub fn caused_by(
        cause: impl std::error::Error + Send + Sync + 'static,
        code: ErrorCode,
        args: &[&dyn fmt::Display],
    ) -> Self {
        Self { code, message: fill(code.template(), args), cause: Some(Box::new(cause)) }
    }

    /// The catalog kind of this error.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// The stable identifier of this error, e.g. `"FF22047"`.
    pub const fn id(&self) -> &'static str {
        self.code.id()
    }

    /// The formatted message, without the identifier prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The kind of the deepest wrapped catalog error, this error's own kind
    /// if no wrapped cause is itself a catalog error.
    pub fn root_code(&self) -> ErrorCode {
        let mut code = self.code;
        let mut cause = self.cause.as_deref();
        while let Some(err) = cause {
            if let Some(inner) = err.downcast_ref::<Self>() {
                code = inner.code;
                cause = inner.cause.as_deref();
            } else {
                break;
            }
        }
        code
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.id(), self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|e| &**e as &(dyn std::error::Error + 'static))
    }
}

/// Substitute each `{}` slot in `template` with the next argument.
///
/// Surplus slots are left verbatim; surplus arguments are dropped. Templates
/// are trusted constants from [`messages`], so neither case is escalated.
fn fill(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;
    let mut args = args.iter();
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_stable() {
        assert_eq!(ErrorCode::UnknownElementaryType.id(), "FF22010");
        assert_eq!(ErrorCode::NumberTooLargeABIEncode.id(), "FF22031");
        assert_eq!(ErrorCode::DecodeNotTuple.id(), "FF22047");
        assert_eq!(ErrorCode::EventSignatureMismatch.id(), "FF22051");
        assert_eq!(ErrorCode::EIP712MaxDepthExceeded.id(), "FF22072");
        assert_eq!(ErrorCode::FFITypeMismatch.id(), "FF22081");
    }

    #[test]
    fn fills_positional_slots() {
        let e = Error::new(ErrorCode::NumberTooLargeABIEncode, &[&"300", &8, &"value"]);
        assert_eq!(e.message(), "Value 300 does not fit in 8 bits for component 'value'");
        assert_eq!(e.to_string(), "FF22031: Value 300 does not fit in 8 bits for component 'value'");
    }

    #[test]
    fn http_hints() {
        assert_eq!(ErrorCode::InvalidIntegerABIInput.http_status(), Some(400));
        assert_eq!(ErrorCode::NotEnoughBytesABIValue.http_status(), None);
    }

    #[test]
    fn wrapping_preserves_root_code() {
        let inner = Error::new(ErrorCode::InvalidHexABIInput, &[&"x", &"bad digit"]);
        let outer = Error::caused_by(inner, ErrorCode::BadABITypeComponent, &[&"outer"]);
        assert_eq!(outer.code(), ErrorCode::BadABITypeComponent);
        assert_eq!(outer.root_code(), ErrorCode::InvalidHexABIInput);
        assert!(std::error::Error::source(&outer).is_some());
    }
}
