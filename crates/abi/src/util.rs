use num_bigint::{BigInt, Sign};
use sigil_errors::{Error, ErrorCode, Result};

/// The ABI word size in bytes.
pub(crate) const WORD: usize = 32;

/// Rounds `len` up to a whole number of words.
pub(crate) const fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Left-pads `bytes` into a word with the given fill byte.
///
/// # Panics
///
/// Panics if `bytes` is longer than a word; callers range-check first.
pub(crate) fn left_padded(bytes: &[u8], fill: u8) -> [u8; WORD] {
    let mut word = [fill; WORD];
    word[WORD - bytes.len()..].copy_from_slice(bytes);
    word
}

/// Renders an integer as a 32-byte two's-complement word. Negative values
/// sign-extend with `0xff`. The value must already fit 256 bits.
pub(crate) fn int_to_word(v: &BigInt) -> [u8; WORD] {
    if v.sign() == Sign::Minus {
        left_padded(&v.to_signed_bytes_be(), 0xff)
    } else {
        left_padded(&v.to_bytes_be().1, 0)
    }
}

/// Reads a word as a `usize` offset/length. `None` when the value has any of
/// its upper 24 bytes set or does not fit the platform `usize`.
pub(crate) fn word_to_usize(word: &[u8; WORD]) -> Option<usize> {
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return None;
    }
    let v = u64::from_be_bytes(word[WORD - 8..].try_into().unwrap());
    usize::try_from(v).ok()
}

/// Checks that `v` fits the signed/unsigned range of a `bits`-wide integer.
pub(crate) fn check_integer_range(
    v: &BigInt,
    bits: usize,
    signed: bool,
    name: &str,
) -> Result<()> {
    if signed {
        let bound = BigInt::from(1u8) << (bits - 1);
        if *v >= bound || *v < -&bound {
            return Err(Error::new(ErrorCode::NumberTooLargeABIEncode, &[v, &bits, &name]));
        }
    } else {
        if v.sign() == Sign::Minus {
            return Err(Error::new(ErrorCode::NegativeUnsignedABIEncode, &[v, &name]));
        }
        if v.bits() as usize > bits {
            return Err(Error::new(ErrorCode::NumberTooLargeABIEncode, &[v, &bits, &name]));
        }
    }
    Ok(())
}

/// Parses a decimal or `0x`-hex integer string, with an optional sign.
pub(crate) fn parse_integer_str(s: &str) -> Option<BigInt> {
    let s = s.trim();
    let (negative, mag) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let parsed = if let Some(hex) = mag.strip_prefix("0x").or_else(|| mag.strip_prefix("0X")) {
        BigInt::parse_bytes(hex.as_bytes(), 16)
    } else {
        BigInt::parse_bytes(mag.as_bytes(), 10)
    }?;
    Some(if negative { -parsed } else { parsed })
}

/// Parses a decimal string into an integer scaled by `10^scale`.
///
/// Input with more fractional digits than `scale` is rejected rather than
/// truncated.
pub(crate) fn parse_scaled_decimal(s: &str, scale: u32) -> Result<BigInt, &'static str> {
    let s = s.trim();
    let (negative, mag) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = match mag.split_once('.') {
        Some(parts) => parts,
        None => (mag, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err("not a decimal number");
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err("not a decimal number");
    }
    if frac_part.len() > scale as usize {
        return Err("more decimal places than the type allows");
    }
    let mut digits = String::with_capacity(int_part.len() + scale as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in frac_part.len()..scale as usize {
        digits.push('0');
    }
    let unscaled = if digits.is_empty() {
        BigInt::from(0u8)
    } else {
        BigInt::parse_bytes(digits.as_bytes(), 10).ok_or("not a decimal number")?
    };
    Ok(if negative { -unscaled } else { unscaled })
}
