//! UTF-8 decoding
//!
//! Every code point is decoded independently. Emoji joined with ZWJ or
//! carrying variation selectors come out as several runes; there is no
//! grapheme clustering.

use std::fmt;

/// A decoded Unicode code point
pub type Rune = u32;

/// Substituted for every byte that does not start a valid sequence
pub const REPLACEMENT: Rune = 0xFFFD;

/// Payload bits carried by each continuation byte
const CONT_BITS: u32 = 6;
const CONT_MASK: u8 = 0b0011_1111;
const CONT_LEAD: u8 = 0b1000_0000;

/// Lead mask and smallest code point for 1..=4 byte sequences
const LEAD_MASK: [u8; 4] = [0b0111_1111, 0b0001_1111, 0b0000_1111, 0b0000_0111];
const MIN_RUNE: [Rune; 4] = [0x0, 0x80, 0x800, 0x10000];
const MAX_RUNE: Rune = 0x10FFFF;
/// UTF-16 surrogate halves, never valid as scalar values
const SURROGATES: std::ops::RangeInclusive<Rune> = 0xD800..=0xDFFF;

/// Sequence length announced by a lead byte
///
/// `0xxxxxxx` is 1, `110xxxxx` is 2, `1110xxxx` is 3, `11110xxx` is 4.
/// Continuation bytes and the unused `11111xxx` range return `None`.
pub fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decode the sequence at the start of `bytes`
///
/// Returns `None` when the lead byte is invalid, the input is shorter than
/// the lead announces, a continuation byte is malformed, or the result is
/// an overlong, surrogate or out-of-range encoding. Trailing bytes past the
/// sequence are ignored.
pub fn to_rune(bytes: &[u8]) -> Option<Rune> {
    let lead = *bytes.first()?;
    let len = utf8_len(lead)?;
    let seq = bytes.get(..len)?;

    let mut rune = Rune::from(lead & LEAD_MASK[len - 1]);
    for &b in &seq[1..] {
        if b & !CONT_MASK != CONT_LEAD {
            return None;
        }
        rune = (rune << CONT_BITS) | Rune::from(b & CONT_MASK);
    }

    if rune < MIN_RUNE[len - 1] || rune > MAX_RUNE || SURROGATES.contains(&rune) {
        return None;
    }
    Some(rune)
}

/// Decode a whole buffer into runes
///
/// Malformed or truncated sequences become [`REPLACEMENT`] and decoding
/// resumes at the next byte.
pub fn decode(bytes: &[u8]) -> Vec<Rune> {
    let mut runes = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match to_rune(&bytes[i..]) {
            Some(rune) => {
                runes.push(rune);
                // to_rune succeeded, so the lead byte is valid
                i += utf8_len(bytes[i]).unwrap_or(1);
            }
            None => {
                log::debug!("Invalid UTF-8 byte 0x{:02X} at offset {}", bytes[i], i);
                runes.push(REPLACEMENT);
                i += 1;
            }
        }
    }

    runes
}

/// A byte string together with its decoded runes
///
/// `size` is the byte count, `len` the number of code points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Utf8Str {
    size: usize,
    runes: Vec<Rune>,
}

impl Utf8Str {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            size: bytes.len(),
            runes: decode(bytes),
        }
    }

    /// Number of bytes in the source buffer
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of decoded code points
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    pub fn runes(&self) -> &[Rune] {
        &self.runes
    }

    /// Rune at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<Rune> {
        self.runes.get(index).copied()
    }
}

impl From<&str> for Utf8Str {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<&[u8]> for Utf8Str {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Utf8Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &r in &self.runes {
            let c = char::from_u32(r).unwrap_or(char::REPLACEMENT_CHARACTER);
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
