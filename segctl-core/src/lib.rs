//! Board-agnostic device model for the display controller
//!
//! Everything the command channel reads or mutates lives here:
//!
//! - Device settings (display mode, time format, credentials, time zone)
//! - Collaborator traits for the hardware the settings drive
//! - [`Device`], the settings context handed to command handlers
//! - The built-in time zone table
//! - Time-of-day rendering rules for the clock mode

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod device;
pub mod settings;
pub mod traits;
pub mod zones;

pub use clock::TimeOfDay;
pub use device::{Device, SettingsError, WifiChange};
pub use settings::{
    DeviceSettings, DisplayMode, TimeFormat, DISPLAY_DIGITS, MAX_CREDENTIAL_LEN,
    MAX_ZONE_NAME_LEN,
};
pub use traits::{
    DisplayDriver, NetworkLink, Platform, SettingsStore, StoreError, SystemControl,
    TimeZoneTable,
};
pub use zones::{ZoneTable, BUILTIN_ZONES};

/// Firmware version reported by `get version`
pub const FIRMWARE_VERSION: &str = concat!("segctl ", env!("CARGO_PKG_VERSION"));

/// Delay between acknowledging `reboot` and restarting, so the ack drains
pub const REBOOT_DELAY_MS: u32 = 1000;
