//! Flash storage abstractions
//!
//! Persistent key-value storage backed by the chip's flash (or NVS
//! partition). Implementations own wear leveling and integrity checks.

/// Storage keys for persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Device settings (binary postcard format)
    DeviceSettings = 0,
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Blocking flash storage
///
/// The command channel is byte-driven and never yields, so storage access
/// from a command handler completes before the next byte is parsed.
pub trait FlashStorage {
    /// Read a value by key into `buffer`, returning the number of bytes read
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;
}
