//! Display driver trait

use crate::settings::{DisplayMode, TimeFormat};

/// Seven-segment display
pub trait DisplayDriver {
    /// Switch what the display shows
    fn set_mode(&mut self, mode: DisplayMode);

    /// Change how clock mode renders the time
    fn set_time_format(&mut self, format: TimeFormat);

    /// Show a number, right-aligned
    ///
    /// `dots` is a bitmap of decimal points, bit 0 being the leftmost digit.
    /// The caller guarantees the number fits the display.
    fn show_number(&mut self, value: u32, dots: u8);
}
