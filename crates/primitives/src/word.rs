use core::fmt;

/// A 32-byte word: the unit of the ABI wire format and the output of
/// [`keccak256`](crate::keccak256).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Deref, derive_more::From)]
pub struct B256(pub [u8; 32]);

impl B256 {
    /// The zero word.
    pub const ZERO: Self = Self([0; 32]);

    /// Interprets the given slice as a word.
    ///
    /// # Panics
    ///
    /// Panics if the slice is not exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.try_into().expect("B256 requires exactly 32 bytes"))
    }

    /// Parses a word from hex, with or without the `0x` prefix.
    pub fn parse(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode_to_array(s).map(Self)
    }

    /// The word as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for B256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(self.0))
    }
}

impl fmt::Debug for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_round_trip() {
        let s = "0x00000000000000000000000000000000000000000000000000000000000000ff";
        let w = B256::parse(s).unwrap();
        assert_eq!(w.0[31], 0xff);
        assert_eq!(w.to_string(), s);
        assert_eq!(B256::parse(&s[2..]).unwrap(), w);
        assert!(B256::parse("0x1234").is_err());
    }
}
