use core::fmt;
use sigil_errors::{Error, ErrorCode, Result};

/// The base of an elementary Solidity ABI type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// `uint<N>`
    Uint,
    /// `int<N>`
    Int,
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `bytes` / `bytes<N>`
    Bytes,
    /// `string`
    String,
    /// `ufixed<M>x<N>`
    UFixed,
    /// `fixed<M>x<N>`
    Fixed,
    /// `function` (an address plus a selector, 24 bytes)
    Function,
}

impl BaseType {
    /// The canonical base name, without any suffix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uint => "uint",
            Self::Int => "int",
            Self::Address => "address",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::UFixed => "ufixed",
            Self::Fixed => "fixed",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed elementary ABI type.
///
/// Aliases are resolved during parsing: `uint` → `uint256`, `int` → `int256`,
/// `byte` → `bytes1`, `fixed` → `fixed128x18`, `ufixed` → `ufixed128x18`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementaryType {
    /// The base type.
    pub base: BaseType,
    /// Bit width for `int`/`uint`; byte width for fixed `bytes` and
    /// `function`; `m` for fixed-point; zero for dynamic types.
    pub size: usize,
    /// Total bit width `M` for `fixed`/`ufixed`; zero otherwise.
    pub m: usize,
    /// Decimal places `N` for `fixed`/`ufixed`; zero otherwise.
    pub n: usize,
    /// True for fixed-width variants; false for dynamic `bytes` and `string`.
    pub fixed: bool,
    /// The canonical textual suffix, e.g. `"256"`, `"128x18"`, or empty.
    pub suffix: String,
}

impl ElementaryType {
    /// Parses the elementary portion of an ABI type string: a base name plus
    /// an optional `digits` or `digits x digits` suffix. Array suffixes must
    /// already be stripped by the caller.
    pub fn parse(s: &str, whole_type: &str) -> Result<Self> {
        let split = s.find(|c: char| !c.is_ascii_lowercase()).unwrap_or(s.len());
        let (base, suffix) = s.split_at(split);
        match base {
            "uint" => int_type(BaseType::Uint, suffix, whole_type),
            "int" => int_type(BaseType::Int, suffix, whole_type),
            "address" => no_suffix(BaseType::Address, 20, suffix, whole_type),
            "bool" => no_suffix(BaseType::Bool, 1, suffix, whole_type),
            "function" => no_suffix(BaseType::Function, 24, suffix, whole_type),
            "string" => Ok(Self {
                base: BaseType::String,
                size: 0,
                m: 0,
                n: 0,
                fixed: false,
                suffix: String::new(),
            }),
            "bytes" => bytes_type(suffix, whole_type),
            // `byte` is the historic alias for `bytes1`
            "byte" if suffix.is_empty() => bytes_type("1", whole_type),
            "ufixed" => fixed_type(BaseType::UFixed, suffix, whole_type),
            "fixed" => fixed_type(BaseType::Fixed, suffix, whole_type),
            _ => Err(Error::new(ErrorCode::UnknownElementaryType, &[&base, &whole_type])),
        }
    }

    /// The canonical name: base plus canonical suffix, e.g. `uint256`.
    pub fn canonical_name(&self) -> String {
        let mut s = String::with_capacity(self.base.as_str().len() + self.suffix.len());
        s.push_str(self.base.as_str());
        s.push_str(&self.suffix);
        s
    }

    /// Whether values of this type are signed.
    pub const fn signed(&self) -> bool {
        matches!(self.base, BaseType::Int | BaseType::Fixed)
    }

    /// Whether this type's encoding is inlined in the head (everything except
    /// dynamic `bytes` and `string`).
    pub const fn is_static(&self) -> bool {
        self.fixed
    }
}

impl fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())?;
        f.write_str(&self.suffix)
    }
}

fn int_type(base: BaseType, suffix: &str, whole: &str) -> Result<ElementaryType> {
    let bits = match suffix {
        "" => 256,
        s => {
            let bits: usize = parse_digits(s, whole)?;
            if bits == 0 || bits > 256 || bits % 8 != 0 {
                return Err(Error::new(
                    ErrorCode::UnsupportedABISuffix,
                    &[&s, &whole, &"bit size must be a multiple of 8 in [8,256]"],
                ));
            }
            bits
        }
    };
    Ok(ElementaryType {
        base,
        size: bits,
        m: 0,
        n: 0,
        fixed: true,
        suffix: bits.to_string(),
    })
}

fn bytes_type(suffix: &str, whole: &str) -> Result<ElementaryType> {
    if suffix.is_empty() {
        return Ok(ElementaryType {
            base: BaseType::Bytes,
            size: 0,
            m: 0,
            n: 0,
            fixed: false,
            suffix: String::new(),
        });
    }
    let len: usize = parse_digits(suffix, whole)?;
    if len == 0 || len > 32 {
        return Err(Error::new(
            ErrorCode::UnsupportedABISuffix,
            &[&suffix, &whole, &"byte length must be in [1,32]"],
        ));
    }
    Ok(ElementaryType {
        base: BaseType::Bytes,
        size: len,
        m: 0,
        n: 0,
        fixed: true,
        suffix: len.to_string(),
    })
}

fn fixed_type(base: BaseType, suffix: &str, whole: &str) -> Result<ElementaryType> {
    let (m, n) = match suffix {
        "" => (128, 18),
        s => {
            let (m_str, n_str) = s
                .split_once('x')
                .ok_or_else(|| Error::new(ErrorCode::InvalidABISuffix, &[&whole]))?;
            let m = parse_digits(m_str, whole)?;
            let n = parse_digits(n_str, whole)?;
            if m < 8 || m > 256 || m % 8 != 0 || n > 80 {
                return Err(Error::new(
                    ErrorCode::UnsupportedABISuffix,
                    &[&s, &whole, &"M must be a multiple of 8 in [8,256], N in [0,80]"],
                ));
            }
            (m, n)
        }
    };
    Ok(ElementaryType {
        base,
        size: m,
        m,
        n,
        fixed: true,
        suffix: format!("{m}x{n}"),
    })
}

fn no_suffix(base: BaseType, size: usize, suffix: &str, whole: &str) -> Result<ElementaryType> {
    if !suffix.is_empty() {
        return Err(Error::new(ErrorCode::InvalidABISuffix, &[&whole]));
    }
    Ok(ElementaryType { base, size, m: 0, n: 0, fixed: true, suffix: String::new() })
}

fn parse_digits(s: &str, whole: &str) -> Result<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(ErrorCode::InvalidABISuffix, &[&whole]));
    }
    s.parse().map_err(|_| Error::new(ErrorCode::InvalidABISuffix, &[&whole]))
}
