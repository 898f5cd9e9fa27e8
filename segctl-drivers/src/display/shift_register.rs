//! Display behind daisy-chained 8-bit shift registers
//!
//! One 74HC595-style register per digit, leftmost digit nearest the MCU.
//! Bytes are shifted MSB first, rightmost digit first, then latched.

use embedded_hal::digital::{Error as _, ErrorKind, OutputPin};
use segctl_core::{DisplayDriver, DisplayMode, TimeFormat, TimeOfDay};

use super::seven_segment::{render_number, render_padded, Frame, BLANK, DASH};

/// Shift register display driver
pub struct ShiftRegisterDisplay<D, C, L> {
    data: D,
    clock: C,
    latch: L,
    mode: DisplayMode,
    format: TimeFormat,
    number: u32,
    number_dots: u8,
    /// Latest time from the clock, `None` until it is synchronised
    time: Option<TimeOfDay>,
    /// Frame currently latched into the registers
    shown: Option<Frame>,
}

impl<D, C, L> ShiftRegisterDisplay<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    /// Create the driver and blank the display
    pub fn new(data: D, clock: C, latch: L) -> Self {
        let mut display = Self {
            data,
            clock,
            latch,
            mode: DisplayMode::Off,
            format: TimeFormat::Hours24,
            number: 0,
            number_dots: 0,
            time: None,
            shown: None,
        };
        display.update();
        display
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Frame last latched, if any write succeeded
    pub fn frame(&self) -> Option<&Frame> {
        self.shown.as_ref()
    }

    /// Feed the current local time; only visible in clock mode
    pub fn show_time(&mut self, time: TimeOfDay) {
        self.time = Some(time);
        if self.mode == DisplayMode::Time {
            self.update();
        }
    }

    /// Frame for the current state
    pub fn render(&self) -> Frame {
        match self.mode {
            DisplayMode::Off => [BLANK; segctl_core::DISPLAY_DIGITS],
            DisplayMode::Numeric => render_number(self.number, self.number_dots),
            DisplayMode::Time => match self.time {
                Some(time) => render_padded(
                    time.display_value(self.format) as u32,
                    TimeOfDay::dots(self.format),
                ),
                None => [DASH; segctl_core::DISPLAY_DIGITS],
            },
        }
    }

    /// Re-send the frame even if it has not changed
    pub fn refresh(&mut self) -> Result<(), ErrorKind> {
        let frame = self.render();
        self.shown = None;
        self.write_frame(&frame)?;
        self.shown = Some(frame);
        Ok(())
    }

    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }

    /// Latch the rendered frame if it differs from what is shown
    fn update(&mut self) {
        let frame = self.render();
        if self.shown == Some(frame) {
            return;
        }
        match self.write_frame(&frame) {
            Ok(()) => self.shown = Some(frame),
            Err(_kind) => {
                self.shown = None;
                #[cfg(feature = "defmt")]
                defmt::warn!("display write failed");
            }
        }
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), ErrorKind> {
        self.latch.set_low().map_err(|e| e.kind())?;
        for &byte in frame.iter().rev() {
            self.shift_byte(byte)?;
        }
        self.latch.set_high().map_err(|e| e.kind())?;
        Ok(())
    }

    fn shift_byte(&mut self, byte: u8) -> Result<(), ErrorKind> {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.data.set_high().map_err(|e| e.kind())?;
            } else {
                self.data.set_low().map_err(|e| e.kind())?;
            }
            self.clock.set_high().map_err(|e| e.kind())?;
            self.clock.set_low().map_err(|e| e.kind())?;
        }
        Ok(())
    }
}

impl<D, C, L> DisplayDriver for ShiftRegisterDisplay<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.update();
    }

    fn set_time_format(&mut self, format: TimeFormat) {
        self.format = format;
        self.update();
    }

    fn show_number(&mut self, value: u32, dots: u8) {
        self.number = value;
        self.number_dots = dots;
        self.update();
    }
}
