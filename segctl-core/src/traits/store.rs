//! Settings persistence trait

use crate::settings::DeviceSettings;

/// Errors from settings persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Nothing has been saved yet
    NotFound,
    /// Stored record could not be decoded
    Corrupted,
    /// Settings could not be encoded
    Encode,
    /// Underlying storage failed
    Storage,
}

/// Non-volatile settings storage
pub trait SettingsStore {
    /// Persist the complete settings record
    fn save(&mut self, settings: &DeviceSettings) -> Result<(), StoreError>;

    /// Load the last saved settings record
    fn load(&mut self) -> Result<DeviceSettings, StoreError>;
}
