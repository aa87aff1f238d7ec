//! English message templates, keyed by stable identifier.
//!
//! Each entry pairs an `FF22xxx` identifier with its default template.
//! Positional `{}` slots are filled in declaration order when an [`Error`] is
//! constructed. Replacing this module wholesale is the localization seam; the
//! identifiers themselves never change.
//!
//! [`Error`]: crate::Error

pub(crate) type Template = (&'static str, &'static str);

// Type grammar
pub(crate) const FF22010: Template = ("FF22010", "Unknown elementary type '{}' in ABI type '{}'");
pub(crate) const FF22011: Template = ("FF22011", "Suffix '{}' of ABI type '{}' is out of range: {}");
pub(crate) const FF22012: Template = ("FF22012", "ABI type '{}' requires a suffix");
pub(crate) const FF22013: Template = ("FF22013", "Suffix of ABI type '{}' cannot be parsed");
pub(crate) const FF22014: Template = ("FF22014", "Array suffix of ABI type '{}' cannot be parsed");
pub(crate) const FF22015: Template = ("FF22015", "Bad ABI type component: {}");

// Value coercion
pub(crate) const FF22020: Template =
    ("FF22020", "Unable to parse '{}' as an integer for component '{}': {}");
pub(crate) const FF22021: Template =
    ("FF22021", "Unable to parse '{}' as a fixed-point decimal for component '{}': {}");
pub(crate) const FF22022: Template =
    ("FF22022", "Input for string component '{}' must be a string, got {}");
pub(crate) const FF22023: Template =
    ("FF22023", "Unable to parse '{}' as a boolean for component '{}'");
pub(crate) const FF22024: Template =
    ("FF22024", "Unable to parse hex bytes for component '{}': {}");
pub(crate) const FF22025: Template =
    ("FF22025", "Input for array component '{}' must be an ordered sequence, got {}");
pub(crate) const FF22026: Template =
    ("FF22026", "Input for fixed-length array '{}' must have {} entries, got {}");
pub(crate) const FF22027: Template =
    ("FF22027", "Input for tuple '{}' must have {} entries, got {}");
pub(crate) const FF22028: Template =
    ("FF22028", "Input for tuple '{}' must be a sequence or a mapping, got {}");
pub(crate) const FF22029: Template = ("FF22029", "Input for tuple '{}' is missing key '{}'");
pub(crate) const FF22030: Template =
    ("FF22030", "Negative value {} cannot be encoded for unsigned component '{}'");
pub(crate) const FF22031: Template =
    ("FF22031", "Value {} does not fit in {} bits for component '{}'");

// Codec
pub(crate) const FF22040: Template =
    ("FF22040", "Value of kind '{}' cannot be encoded for component '{}'");
pub(crate) const FF22041: Template =
    ("FF22041", "Insufficient value data to encode component '{}'");
pub(crate) const FF22042: Template =
    ("FF22042", "Not enough bytes to read the array count for component '{}' at offset {}");
pub(crate) const FF22043: Template =
    ("FF22043", "Not enough bytes to read the value of component '{}' at offset {}");
pub(crate) const FF22044: Template =
    ("FF22044", "Not enough bytes for a function selector ({} bytes)");
pub(crate) const FF22045: Template =
    ("FF22045", "Selector {} does not match {} for function '{}'");
pub(crate) const FF22046: Template = ("FF22046", "Unknown tuple serialization mode {}");
pub(crate) const FF22047: Template =
    ("FF22047", "ABI decoding requires a tuple at the root, got '{}'");
pub(crate) const FF22048: Template =
    ("FF22048", "Array count {} at offset {} for component '{}' is larger than the data");

// Event matching
pub(crate) const FF22050: Template =
    ("FF22050", "Topic count {} is insufficient for the indexed parameters of event '{}'");
pub(crate) const FF22051: Template =
    ("FF22051", "Event signature mismatch for '{}': expected {}, got {}");

// EIP-712
pub(crate) const FF22060: Template =
    ("FF22060", "Unknown ABI component kind for EIP-712 encoding: '{}'");
pub(crate) const FF22061: Template =
    ("FF22061", "Type string '{}' is not supported for EIP-712 encoding");
pub(crate) const FF22062: Template =
    ("FF22062", "ABI type '{}' is not supported for EIP-712 encoding");
pub(crate) const FF22063: Template = ("FF22063", "Type '{}' is not defined in the type set");
pub(crate) const FF22064: Template =
    ("FF22064", "The primary ABI component for EIP-712 must be a tuple, got '{}'");
pub(crate) const FF22065: Template =
    ("FF22065", "Unable to extract a struct name from internalType '{}'");
pub(crate) const FF22066: Template =
    ("FF22066", "Value for struct '{}' must be a mapping, got {}");
pub(crate) const FF22067: Template = ("FF22067", "Invalid array suffix in EIP-712 type '{}'");
pub(crate) const FF22068: Template =
    ("FF22068", "Value for array type '{}' must be a sequence, got {}");
pub(crate) const FF22069: Template =
    ("FF22069", "Array of type '{}' must have {} entries, got {}");
pub(crate) const FF22070: Template =
    ("FF22070", "primaryType must be specified in the typed data payload");
pub(crate) const FF22071: Template = ("FF22071", "ABI type '{}' is not elementary");
pub(crate) const FF22072: Template =
    ("FF22072", "Maximum type nesting depth {} exceeded at type '{}'");

// FFI
pub(crate) const FF22080: Template = ("FF22080", "FFI schema for '{}' is invalid: {}");
pub(crate) const FF22081: Template =
    ("FF22081", "FFI schema type '{}' of '{}' is incompatible with ABI type '{}'");
