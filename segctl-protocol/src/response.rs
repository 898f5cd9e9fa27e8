//! Responses and output sinks

use core::fmt;

use segctl_core::SettingsError;

/// Terminator appended to every response line
pub const LINE_END: &[u8] = b"\r\n";

const ACK: &str = "ok";
const ERROR_PREFIX: &[u8] = b"error: ";

/// Destination for responses, bound to one session
///
/// Sinks swallow transport errors: a client that went away mid-response
/// has nobody left to report them to.
pub trait OutputSink {
    /// Write raw bytes
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Write a line of text followed by [`LINE_END`]
    fn write_line(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
        self.write_bytes(LINE_END);
    }

    /// Write formatted text followed by [`LINE_END`]
    fn write_line_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(&mut FmtAdapter(self), args);
        self.write_bytes(LINE_END);
    }
}

struct FmtAdapter<'a, S: ?Sized>(&'a mut S);

impl<S: OutputSink + ?Sized> fmt::Write for FmtAdapter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes)
    }
}

/// Capture buffer; output past capacity is dropped
impl<const N: usize> OutputSink for heapless::Vec<u8, N> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.push(b).is_err() {
                break;
            }
        }
    }
}

/// Sink over any `embedded_io::Write` transport (TCP socket, UART, ...)
pub struct IoSink<W> {
    inner: W,
}

impl<W: embedded_io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: embedded_io::Write> OutputSink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.inner.write_all(bytes).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("response write failed, dropping {=usize} bytes", bytes.len());
        }
    }
}

/// Errors reported to the client as `error: <reason>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line had no tokens
    MissingCommand,
    InvalidCommand,
    MissingSubArg,
    InvalidSubCommand,
    /// A required positional argument is missing
    MissingArg,
    InvalidMode,
    /// Unknown `set timeFormat` value; reported like a bad mode
    InvalidTimeFormat,
    SsidMissing,
    PasswordMissing,
    Settings(SettingsError),
    ZeroUpdateSize,
    InvalidUpdateSize,
    ChunkTooLarge,
    UpdateInitFailed,
    UpdateWriteFailed,
    UpdateFinishFailed,
    SaveFailed,
}

impl From<SettingsError> for CommandError {
    fn from(e: SettingsError) -> Self {
        CommandError::Settings(e)
    }
}

impl CommandError {
    /// Human-readable reason sent after `error: `
    pub fn reason(&self) -> &'static str {
        match self {
            CommandError::MissingCommand => "missing command",
            CommandError::InvalidCommand => "invalid command",
            CommandError::MissingSubArg => "missing sub-arg",
            CommandError::InvalidSubCommand => "invalid sub-command",
            CommandError::MissingArg => "missing arg1",
            CommandError::InvalidMode => "invalid mode",
            CommandError::InvalidTimeFormat => "invalid mode",
            CommandError::SsidMissing => "SSID not given",
            CommandError::PasswordMissing => "Password not given",
            CommandError::Settings(e) => match e {
                SettingsError::NotNumericMode => "not in 'numb' mode",
                SettingsError::NegativeNumber => "number negative",
                SettingsError::NumberTooBig => "number too big",
                SettingsError::SsidTooLong => "SSID too long, must be <31 characters",
                SettingsError::PasswordTooLong => "Password too long, must be <31 characters",
                SettingsError::UnknownZone => "Invalid zone",
            },
            CommandError::ZeroUpdateSize => "zero update size",
            CommandError::InvalidUpdateSize => "invalid update size",
            CommandError::ChunkTooLarge => "beyond max size",
            CommandError::UpdateInitFailed => "failed to init update",
            CommandError::UpdateWriteFailed => "failed to write update",
            CommandError::UpdateFinishFailed => "failed to finish update",
            CommandError::SaveFailed => "failed to save settings",
        }
    }
}

/// Send the bare acknowledgment
pub fn ack<O: OutputSink + ?Sized>(out: &mut O) {
    out.write_line(ACK);
}

/// Send an error response
pub fn nack<O: OutputSink + ?Sized>(out: &mut O, error: CommandError) {
    out.write_bytes(ERROR_PREFIX);
    out.write_line(error.reason());
}
