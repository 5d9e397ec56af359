//! Values derived from literal text.
//!
//! Literal nodes store their source text; these types hold what the text
//! means once a builtin type fixes its width.

use std::fmt;

use crate::error::{LiteralError, LiteralResult};
use crate::types::FloatKind;

/// A fixed-width integer of arbitrary size, stored as little-endian words.
///
/// Bits above `bit_width` are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegerValue {
    bit_width: u32,
    words: Vec<u64>,
}

impl IntegerValue {
    /// Creates a `bit_width`-bit value from `value`, truncating if needed.
    pub fn from_u64(bit_width: u32, value: u64) -> Self {
        IntegerValue {
            bit_width: 64,
            words: vec![value],
        }
        .zext_or_trunc(bit_width)
    }

    /// Parses integer literal text into a `bit_width`-bit value.
    ///
    /// The radix is sensed from the prefix: `0x` is hexadecimal, `0o` octal,
    /// `0b` binary, and any other leading `0` octal. Underscores between
    /// digits are ignored. Values wider than `bit_width` keep their low bits.
    ///
    /// ```
    /// use kestrel_ast::value::IntegerValue;
    ///
    /// assert_eq!(IntegerValue::parse("0xff", 8).unwrap().to_u64(), Some(255));
    /// assert_eq!(IntegerValue::parse("1_000", 16).unwrap().to_u64(), Some(1000));
    /// assert_eq!(IntegerValue::parse("017", 32).unwrap().to_u64(), Some(15));
    /// assert!(IntegerValue::parse("12ab", 32).is_err());
    /// ```
    pub fn parse(text: &str, bit_width: u32) -> LiteralResult<Self> {
        let invalid = || LiteralError::InvalidText {
            kind: "integer",
            text: text.to_string(),
        };

        let (radix, digits) = split_radix(text);
        let mut words = vec![0u64];
        let mut seen_digit = false;

        for c in digits.chars() {
            if c == '_' && seen_digit {
                continue;
            }
            let digit = c.to_digit(radix).ok_or_else(invalid)?;
            seen_digit = true;
            mul_add(&mut words, u64::from(radix), u64::from(digit));
        }

        if !seen_digit {
            return Err(invalid());
        }

        let full_width = u32::try_from(words.len() * 64).unwrap_or(u32::MAX);
        Ok(IntegerValue {
            bit_width: full_width,
            words,
        }
        .zext_or_trunc(bit_width))
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Little-endian 64-bit words; the last word is masked to the width.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Zero-extends or truncates to `bit_width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `bit_width` is zero.
    #[must_use]
    pub fn zext_or_trunc(&self, bit_width: u32) -> Self {
        assert!(bit_width > 0, "integer values need a non-zero width");

        let word_count = bit_width.div_ceil(64) as usize;
        let mut words = self.words.clone();
        words.resize(word_count, 0);

        let top_bits = bit_width % 64;
        if top_bits != 0 {
            if let Some(top) = words.last_mut() {
                *top &= (1u64 << top_bits) - 1;
            }
        }

        IntegerValue { bit_width, words }
    }

    /// Returns the value if it fits in a `u64` when read as unsigned.
    pub fn to_u64(&self) -> Option<u64> {
        match self.words.split_first() {
            Some((&low, rest)) if rest.iter().all(|&w| w == 0) => Some(low),
            _ => None,
        }
    }

    /// Returns `true` if the sign bit is set.
    pub fn is_negative(&self) -> bool {
        let bit = self.bit_width - 1;
        let word = self.words[(bit / 64) as usize];
        (word >> (bit % 64)) & 1 == 1
    }

    /// Two's complement negation within the current width.
    fn negated(&self) -> Self {
        let mut words: Vec<u64> = self.words.iter().map(|w| !w).collect();
        let mut carry = true;
        for w in &mut words {
            if !carry {
                break;
            }
            let (sum, overflow) = w.overflowing_add(1);
            *w = sum;
            carry = overflow;
        }
        IntegerValue {
            bit_width: self.bit_width,
            words,
        }
        .zext_or_trunc(self.bit_width)
    }
}

/// Renders the value as a signed decimal number.
impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CHUNK: u64 = 10_000_000_000_000_000_000;

        let (negative, mut magnitude) = if self.is_negative() {
            (true, self.negated().words)
        } else {
            (false, self.words.clone())
        };

        // Chunks of 19 decimal digits, least significant first.
        let mut chunks = Vec::new();
        loop {
            chunks.push(div_rem(&mut magnitude, CHUNK));
            if magnitude.iter().all(|&w| w == 0) {
                break;
            }
        }

        if negative {
            f.write_str("-")?;
        }
        let mut chunks = chunks.iter().rev();
        if let Some(first) = chunks.next() {
            write!(f, "{first}")?;
        }
        for chunk in chunks {
            write!(f, "{chunk:019}")?;
        }
        Ok(())
    }
}

fn split_radix(text: &str) -> (u32, &str) {
    let bytes = text.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', ..] => (16, &text[2..]),
        [b'0', b'o' | b'O', ..] => (8, &text[2..]),
        [b'0', b'b' | b'B', ..] => (2, &text[2..]),
        [b'0', _, ..] => (8, &text[1..]),
        _ => (10, text),
    }
}

/// `words = words * mul + add`, growing as needed.
fn mul_add(words: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = u128::from(add);
    for w in words.iter_mut() {
        let wide = u128::from(*w) * u128::from(mul) + carry;
        *w = wide as u64;
        carry = wide >> 64;
    }
    if carry != 0 {
        words.push(carry as u64);
    }
}

/// Divides `words` in place by `divisor`, returning the remainder.
fn div_rem(words: &mut [u64], divisor: u64) -> u64 {
    let mut rem = 0u128;
    for w in words.iter_mut().rev() {
        let wide = (rem << 64) | u128::from(*w);
        *w = (wide / u128::from(divisor)) as u64;
        rem = wide % u128::from(divisor);
    }
    rem as u64
}

/// A floating-point literal value in its resolved format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatValue {
    F32(f32),
    F64(f64),
}

impl FloatValue {
    /// Parses decimal float text into `kind`, rounding to nearest with ties
    /// to even. Underscores that follow a digit are ignored; any other
    /// underscore makes the text invalid.
    ///
    /// ```
    /// use kestrel_ast::types::FloatKind;
    /// use kestrel_ast::value::FloatValue;
    ///
    /// assert_eq!(FloatValue::parse("2.5e3", FloatKind::IEEE64), Ok(FloatValue::F64(2500.0)));
    /// assert_eq!(FloatValue::parse("0.1", FloatKind::IEEE32), Ok(FloatValue::F32(0.1)));
    /// ```
    pub fn parse(text: &str, kind: FloatKind) -> LiteralResult<Self> {
        let invalid = || LiteralError::InvalidText {
            kind: "float",
            text: text.to_string(),
        };

        // Only decimal digit strings; `inf`, `NaN` and hex floats are rejected.
        let mut cleaned = String::with_capacity(text.len());
        let mut after_digit = false;
        for c in text.chars() {
            if c == '_' {
                if !after_digit {
                    return Err(invalid());
                }
                continue;
            }
            after_digit = c.is_ascii_digit();
            cleaned.push(c);
        }
        let well_formed = cleaned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && cleaned.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
        if !well_formed {
            return Err(invalid());
        }

        match kind {
            FloatKind::IEEE32 => cleaned.parse().map(FloatValue::F32).map_err(|_| invalid()),
            FloatKind::IEEE64 => cleaned.parse().map(FloatValue::F64).map_err(|_| invalid()),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            FloatValue::F32(v) => f64::from(v),
            FloatValue::F64(v) => v,
        }
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatValue::F32(v) => write!(f, "{v}"),
            FloatValue::F64(v) => write!(f, "{v}"),
        }
    }
}
