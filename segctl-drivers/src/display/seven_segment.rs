//! Seven-segment glyph encoding
//!
//! One byte per digit: bits 0-6 drive segments a-g, bit 7 the decimal point.
//!
//! ```text
//!    aaa
//!   f   b
//!    ggg
//!   e   c
//!    ddd  .
//! ```

use segctl_core::DISPLAY_DIGITS;

/// One frame of segment bytes, leftmost digit first
pub type Frame = [u8; DISPLAY_DIGITS];

/// All segments off
pub const BLANK: u8 = 0x00;
/// Segment g only, shown while the clock has no time yet
pub const DASH: u8 = 0x40;
/// Decimal point
pub const DOT: u8 = 0x80;

const DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Glyph for a decimal digit (`digit` is taken modulo 10)
pub fn encode_digit(digit: u8) -> u8 {
    DIGITS[(digit % 10) as usize]
}

/// Right-aligned number with leading blanks
///
/// Digits that do not fit are dropped from the left.
pub fn render_number(value: u32, dots: u8) -> Frame {
    let mut frame = [BLANK; DISPLAY_DIGITS];
    let mut rest = value;
    for slot in frame.iter_mut().rev() {
        *slot = encode_digit((rest % 10) as u8);
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    apply_dots(&mut frame, dots);
    frame
}

/// Number zero padded to the full display width
pub fn render_padded(value: u32, dots: u8) -> Frame {
    let mut frame = [BLANK; DISPLAY_DIGITS];
    let mut rest = value;
    for slot in frame.iter_mut().rev() {
        *slot = encode_digit((rest % 10) as u8);
        rest /= 10;
    }
    apply_dots(&mut frame, dots);
    frame
}

/// Set the decimal points selected by `dots` (bit 0 = leftmost digit)
pub fn apply_dots(frame: &mut Frame, dots: u8) {
    for (i, slot) in frame.iter_mut().enumerate() {
        if dots & (1 << i) != 0 {
            *slot |= DOT;
        }
    }
}
