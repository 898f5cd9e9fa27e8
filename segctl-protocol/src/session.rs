//! Per-connection parser session
//!
//! Each transport (TCP client, serial console) owns one [`Session`] and
//! feeds it every received byte. Interpretation is a two-level state
//! machine: the outer [`Mode`] decides whether a byte is firmware payload
//! or goes through the telnet decoder into the line accumulator.

use segctl_core::{Device, Platform, TimeZoneTable};

use crate::firmware::{FirmwareSink, TransferBuffer};
use crate::line::LineBuffer;
use crate::response::{self, CommandError, OutputSink, LINE_END};
use crate::telnet::{Decoded, TelnetDecoder, TIMING_MARK_REPLY};

/// Everything a command may touch besides the session itself
///
/// The transfer buffer is the device-wide one; see
/// [`firmware`](crate::firmware) for the single-transfer rule.
pub struct Context<'a, P, Z, F> {
    pub device: &'a mut Device<P, Z>,
    pub firmware: &'a mut F,
    pub transfer: &'a mut TransferBuffer,
}

impl<'a, P, Z, F> Context<'a, P, Z, F> {
    pub fn new(
        device: &'a mut Device<P, Z>,
        firmware: &'a mut F,
        transfer: &'a mut TransferBuffer,
    ) -> Self {
        Self {
            device,
            firmware,
            transfer,
        }
    }
}

/// How the next byte is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Mode {
    /// Telnet decoder and line accumulator
    Line,
    /// Raw firmware payload; always nonzero
    Firmware { remaining: u32 },
    /// A reboot was issued, input is ignored
    Halted,
}

/// Parser and dispatcher state for one connection
pub struct Session<O> {
    pub(crate) out: O,
    pub(crate) mode: Mode,
    telnet: TelnetDecoder,
    line: LineBuffer,
}

impl<O: OutputSink> Session<O> {
    pub fn new(out: O) -> Self {
        Self {
            out,
            mode: Mode::Line,
            telnet: TelnetDecoder::new(),
            line: LineBuffer::new(),
        }
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn into_output(self) -> O {
        self.out
    }

    /// Payload bytes still expected for the current chunk (0 in line mode)
    pub fn firmware_bytes_remaining(&self) -> u32 {
        match self.mode {
            Mode::Firmware { remaining } => remaining,
            _ => 0,
        }
    }

    pub fn in_firmware_mode(&self) -> bool {
        matches!(self.mode, Mode::Firmware { .. })
    }

    /// True once `reboot` has been accepted
    pub fn is_halted(&self) -> bool {
        self.mode == Mode::Halted
    }

    /// Bytes of the line accumulated so far
    pub fn pending_line(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Feed one received byte
    pub fn feed<P, Z, F>(&mut self, byte: u8, ctx: &mut Context<'_, P, Z, F>)
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        match self.mode {
            Mode::Halted => {}
            // Payload bytes bypass the telnet decoder entirely
            Mode::Firmware { remaining } => self.receive_firmware(byte, remaining, ctx),
            Mode::Line => match self.telnet.decode(byte) {
                Decoded::Nothing => {}
                Decoded::Literal(b) => self.receive_literal(b, ctx),
                Decoded::TimingMark { resync } => {
                    self.out.write_bytes(&TIMING_MARK_REPLY);
                    if resync {
                        self.line.clear();
                        self.out.write_bytes(LINE_END);
                    }
                }
            },
        }
    }

    /// Feed a received buffer
    pub fn feed_all<P, Z, F>(&mut self, bytes: &[u8], ctx: &mut Context<'_, P, Z, F>)
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        for &byte in bytes {
            self.feed(byte, ctx);
        }
    }

    fn receive_literal<P, Z, F>(&mut self, byte: u8, ctx: &mut Context<'_, P, Z, F>)
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        if byte != b'\n' && byte != b'\r' {
            self.line.push(byte);
            return;
        }
        // Blank lines and the second half of CRLF are ignored
        if self.line.is_empty() {
            return;
        }

        let line = core::mem::take(&mut self.line);
        self.dispatch(line.as_bytes(), ctx);
    }

    fn receive_firmware<P, Z, F>(&mut self, byte: u8, remaining: u32, ctx: &mut Context<'_, P, Z, F>)
    where
        F: FirmwareSink,
    {
        // Cannot overflow: chunk sizes are bounded by the buffer capacity
        ctx.transfer.push(byte);
        let remaining = remaining - 1;
        if remaining > 0 {
            self.mode = Mode::Firmware { remaining };
            return;
        }

        self.mode = Mode::Line;
        #[cfg(feature = "defmt")]
        defmt::debug!("received {=usize} firmware bytes", ctx.transfer.len());
        match ctx.firmware.write(ctx.transfer.as_slice()) {
            Ok(()) => response::ack(&mut self.out),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("firmware write failed: {:?}", _e);
                response::nack(&mut self.out, CommandError::UpdateWriteFailed);
            }
        }
        ctx.transfer.reset();
    }
}
