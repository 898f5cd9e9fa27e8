//! Settings persistence in flash
//!
//! The settings record is postcard encoded behind a one-byte layout
//! version and written under [`StorageKey::DeviceSettings`]. Records with
//! another version are treated as corrupted, so a layout change falls back
//! to defaults instead of misreading old bytes.

use segctl_core::{DeviceSettings, SettingsStore, StoreError};
use segctl_hal::{FlashError, FlashStorage, StorageKey};

/// Largest encoded settings record, version byte included
pub const SETTINGS_RECORD_SIZE: usize = 128;

/// Layout version of the stored record
const RECORD_VERSION: u8 = 1;

/// [`SettingsStore`] over a flash key-value store
pub struct FlashSettingsStore<S> {
    storage: S,
}

impl<S: FlashStorage> FlashSettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S: FlashStorage> SettingsStore for FlashSettingsStore<S> {
    fn save(&mut self, settings: &DeviceSettings) -> Result<(), StoreError> {
        let mut buf = [0u8; SETTINGS_RECORD_SIZE];
        buf[0] = RECORD_VERSION;
        let len = postcard::to_slice(settings, &mut buf[1..])
            .map_err(|_| StoreError::Encode)?
            .len();

        self.storage
            .write(StorageKey::DeviceSettings, &buf[..1 + len])
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("settings write failed: {:?}", e);
                store_error(e)
            })?;

        #[cfg(feature = "defmt")]
        defmt::info!("saved settings ({=usize} bytes)", 1 + len);
        Ok(())
    }

    fn load(&mut self) -> Result<DeviceSettings, StoreError> {
        let mut buf = [0u8; SETTINGS_RECORD_SIZE];
        let len = self
            .storage
            .read(StorageKey::DeviceSettings, &mut buf)
            .map_err(store_error)?;

        match buf[..len].split_first() {
            Some((&RECORD_VERSION, body)) => {
                postcard::from_bytes(body).map_err(|_| StoreError::Corrupted)
            }
            _ => Err(StoreError::Corrupted),
        }
    }
}

fn store_error(e: FlashError) -> StoreError {
    match e {
        FlashError::NotFound => StoreError::NotFound,
        FlashError::Corrupted | FlashError::BufferTooSmall => StoreError::Corrupted,
        FlashError::Flash | FlashError::Full => StoreError::Storage,
    }
}
