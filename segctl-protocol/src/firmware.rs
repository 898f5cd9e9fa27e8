//! Firmware transfer
//!
//! `update cont <N>` puts a session into firmware mode; the next N bytes are
//! collected in a [`TransferBuffer`] and handed to the [`FirmwareSink`] as
//! one chunk.
//!
//! There is one transfer buffer per device, shared by every session that
//! may run an update. Only one session may be mid-chunk at a time: the
//! buffer is lent to whichever session is fed next and nothing detects two
//! interleaved transfers. Running a single update at a time is the
//! operator's responsibility.

use heapless::Vec;

/// Largest chunk accepted by `update cont`
pub const MAX_FIRMWARE_CHUNK: usize = 8192;

/// Errors reported by a firmware sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// No update in progress
    NotStarted,
    /// The sink refused the request (bad size, no space)
    Rejected,
    /// Writing to flash failed
    Flash,
    /// The image failed verification
    Verify,
}

/// Destination of firmware images
///
/// Mirrors the platform's OTA API: `begin` reserves space for the image,
/// `write` appends chunks, `end` validates and optionally activates it.
pub trait FirmwareSink {
    /// Start an update of `size` bytes
    fn begin(&mut self, size: u32) -> Result<(), UpdateError>;

    /// Append a chunk to the image
    fn write(&mut self, chunk: &[u8]) -> Result<(), UpdateError>;

    /// Finish the update, activating the image if `commit` is set
    fn end(&mut self, commit: bool) -> Result<(), UpdateError>;

    /// Discard any partial image
    fn abort(&mut self);
}

impl<T: FirmwareSink + ?Sized> FirmwareSink for &mut T {
    fn begin(&mut self, size: u32) -> Result<(), UpdateError> {
        (**self).begin(size)
    }

    fn write(&mut self, chunk: &[u8]) -> Result<(), UpdateError> {
        (**self).write(chunk)
    }

    fn end(&mut self, commit: bool) -> Result<(), UpdateError> {
        (**self).end(commit)
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

/// Fixed-capacity chunk buffer with a write cursor
pub struct TransferBuffer {
    data: Vec<u8, MAX_FIRMWARE_CHUNK>,
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferBuffer {
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Rewind the cursor to the start
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Append a byte; returns false if the buffer is full
    pub fn push(&mut self, byte: u8) -> bool {
        self.data.push(byte).is_ok()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
