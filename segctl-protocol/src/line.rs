//! Line accumulation and tokenizing

use heapless::Vec;

/// Longest command line kept; the excess is dropped silently
pub const MAX_LINE_LEN: usize = 128;

/// Bounded command line buffer
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a byte, dropping it if the line is already full
    pub fn push(&mut self, byte: u8) {
        let _ = self.bytes.push(byte);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Space-separated tokens of a command line
///
/// Lines are raw bytes: credentials may carry any byte value. Runs of
/// spaces count as one separator. Handlers pull tokens as they parse their
/// arguments, or take the unparsed [`remainder`](Self::remainder).
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Self { rest: line }
    }

    /// Everything after the separator that ended the last token, verbatim
    ///
    /// Returns `None` if nothing is left.
    pub fn remainder(&mut self) -> Option<&'a [u8]> {
        let rest = core::mem::take(&mut self.rest);
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = self.rest.iter().position(|&b| b != b' ');
        let Some(start) = start else {
            self.rest = &[];
            return None;
        };
        let trimmed = &self.rest[start..];
        match trimmed.iter().position(|&b| b == b' ') {
            Some(end) => {
                // Consume exactly one separator
                self.rest = &trimmed[end + 1..];
                Some(&trimmed[..end])
            }
            None => {
                self.rest = &[];
                Some(trimmed)
            }
        }
    }
}

/// Lenient decimal parse of a numeric argument
///
/// Leading whitespace and a sign are accepted, digits are read up to the
/// first non-digit, and no digits at all reads as 0. Out of range values
/// saturate. Existing clients rely on this (`set n 42abc` shows 42).
pub fn parse_number(text: &[u8]) -> i64 {
    let skip = text
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    let text = &text[skip..];
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}
