//! Conversion table from environment variable strings to primitive values

use crate::error::ParseError;
use std::fmt;

/// Bit width of an integer field. `Native` is the platform pointer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    Native,
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Number of bits the width can hold
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::Native => usize::BITS,
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }

    fn contains_signed(self, value: i64) -> bool {
        let bits = self.bits();
        if bits >= 64 {
            return true;
        }
        let max = (1i64 << (bits - 1)) - 1;
        (-max - 1..=max).contains(&value)
    }

    fn contains_unsigned(self, value: u64) -> bool {
        let bits = self.bits();
        bits >= 64 || value < (1u64 << bits)
    }
}

/// Bit width of a floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    W32,
    W64,
}

/// Primitive kinds an environment variable can be converted into.
///
/// The set is closed: any field type outside it is either a nested record or
/// reported as [`BindError::UnsupportedFieldType`](crate::BindError::UnsupportedFieldType).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Bool,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => f.write_str("String"),
            Kind::Int(IntWidth::Native) => f.write_str("isize"),
            Kind::Int(width) => write!(f, "i{}", width.bits()),
            Kind::Uint(IntWidth::Native) => f.write_str("usize"),
            Kind::Uint(width) => write!(f, "u{}", width.bits()),
            Kind::Float(FloatWidth::W32) => f.write_str("f32"),
            Kind::Float(FloatWidth::W64) => f.write_str("f64"),
            Kind::Bool => f.write_str("bool"),
        }
    }
}

/// A parsed value, before narrowing to the field's exact type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Kind {
    /// Parse `raw` according to this kind.
    ///
    /// Integers are parsed in base 10 and range-checked against the declared
    /// width. Floats are parsed at the declared width.
    pub fn parse(self, raw: &str) -> Result<Value, ParseError> {
        match self {
            Kind::Text => Ok(Value::Text(raw.to_string())),
            Kind::Int(width) => {
                let value: i64 = raw.parse()?;
                if !width.contains_signed(value) {
                    return Err(self.out_of_range(raw));
                }
                Ok(Value::Int(value))
            }
            Kind::Uint(width) => {
                if raw.starts_with('+') {
                    return Err(ParseError::Signed(raw.to_string()));
                }
                let value: u64 = raw.parse()?;
                if !width.contains_unsigned(value) {
                    return Err(self.out_of_range(raw));
                }
                Ok(Value::Uint(value))
            }
            Kind::Float(FloatWidth::W32) => {
                let value = f64::from(raw.parse::<f32>()?);
                self.check_finite(raw, value)
            }
            Kind::Float(FloatWidth::W64) => {
                let value = raw.parse::<f64>()?;
                self.check_finite(raw, value)
            }
            Kind::Bool => parse_bool(raw).map(Value::Bool),
        }
    }

    /// Finite literals too large for the width parse to infinity; only an
    /// explicit `inf`/`infinity` may produce one.
    fn check_finite(self, raw: &str, value: f64) -> Result<Value, ParseError> {
        let literal = raw.trim_start_matches(['+', '-']);
        let explicit = literal.eq_ignore_ascii_case("inf") || literal.eq_ignore_ascii_case("infinity");
        if value.is_infinite() && !explicit {
            return Err(self.out_of_range(raw));
        }
        Ok(Value::Float(value))
    }

    fn out_of_range(self, raw: &str) -> ParseError {
        ParseError::OutOfRange {
            value: raw.to_string(),
            kind: self,
        }
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::Bool(raw.to_string())),
    }
}

/// A field type with an entry in the conversion table.
pub trait Leaf: Sized {
    /// Kind used to parse the raw value
    const KIND: Kind;

    /// Narrow a value parsed with [`Self::KIND`] into `Self`.
    fn from_value(value: Value) -> Result<Self, ParseError>;

    /// Parse a raw environment variable value into `Self`.
    fn convert(raw: &str) -> Result<Self, ParseError> {
        Self::from_value(Self::KIND.parse(raw)?)
    }
}

fn mismatch(kind: Kind, value: &Value) -> ParseError {
    ParseError::Mismatch {
        value: format!("{value:?}"),
        kind,
    }
}

impl Leaf for String {
    const KIND: Kind = Kind::Text;

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Leaf for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Leaf for f64 {
    const KIND: Kind = Kind::Float(FloatWidth::W64);

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Leaf for f32 {
    const KIND: Kind = Kind::Float(FloatWidth::W32);

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            // parsed as f32 by the table, so the narrowing is exact
            Value::Float(v) => Ok(v as f32),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

macro_rules! impl_int_leaf {
    ($variant:ident; $($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl Leaf for $ty {
                const KIND: Kind = Kind::$variant(IntWidth::$width);

                fn from_value(value: Value) -> Result<Self, ParseError> {
                    match value {
                        Value::$variant(v) => <$ty>::try_from(v).map_err(|_| ParseError::OutOfRange {
                            value: v.to_string(),
                            kind: Self::KIND,
                        }),
                        other => Err(mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
    };
}

impl_int_leaf!(Int; i8 => W8, i16 => W16, i32 => W32, i64 => W64, isize => Native);
impl_int_leaf!(Uint; u8 => W8, u16 => W16, u32 => W32, u64 => W64, usize => Native);
