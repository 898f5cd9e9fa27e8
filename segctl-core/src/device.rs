//! Device context
//!
//! [`Device`] owns the settings and the collaborators they drive. Command
//! handlers only mutate settings through it, and every mutation validates
//! its input completely before touching either the settings or the hardware.

use core::net::Ipv4Addr;

use heapless::{String, Vec};

use crate::settings::{DeviceSettings, DisplayMode, TimeFormat, DISPLAY_DIGITS};
use crate::traits::{Platform, StoreError, TimeZoneTable};
use crate::REBOOT_DELAY_MS;

/// Rejected settings mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Numbers can only be shown in numeric mode
    NotNumericMode,
    /// Negative numbers cannot be shown
    NegativeNumber,
    /// More digits than the display has
    NumberTooBig,
    /// SSID longer than the credential limit
    SsidTooLong,
    /// Password longer than the credential limit
    PasswordTooLong,
    /// Zone name not in the time zone table
    UnknownZone,
}

/// Outcome of a Wi-Fi on/off request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiChange {
    Started,
    AlreadyOn,
    Stopped,
    AlreadyOff,
}

/// Settings context handed to command handlers
pub struct Device<P, Z> {
    settings: DeviceSettings,
    platform: P,
    zones: Z,
}

impl<P: Platform, Z: TimeZoneTable> Device<P, Z> {
    /// Create a device context without touching the hardware
    pub fn new(settings: DeviceSettings, platform: P, zones: Z) -> Self {
        Self {
            settings,
            platform,
            zones,
        }
    }

    /// Create a device context from the stored settings, falling back to
    /// defaults when nothing usable has been saved
    pub fn load(mut platform: P, zones: Z) -> Self {
        let settings = match platform.load() {
            Ok(settings) => settings,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("using default settings: {:?}", _e);
                DeviceSettings::default()
            }
        };
        Self::new(settings, platform, zones)
    }

    /// Push the current settings out to the hardware (used at boot)
    pub fn apply(&mut self) {
        self.platform.set_time_format(self.settings.time_format);
        self.platform.set_mode(self.settings.mode);
        if self.settings.mode == DisplayMode::Numeric {
            self.platform.show_number(self.settings.number, 0);
        }
        if let Some(posix) = self.zones.lookup(&self.settings.time_zone) {
            self.platform.apply_time_zone(posix);
        }
        if self.settings.wifi_enabled {
            self.platform
                .start_wifi(&self.settings.wifi_ssid, &self.settings.wifi_password);
        }
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn zones(&self) -> &Z {
        &self.zones
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.settings.mode = mode;
        self.platform.set_mode(mode);
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.settings.time_format = format;
        self.platform.set_time_format(format);
    }

    /// Show a number in numeric mode
    pub fn show_number(&mut self, value: i64) -> Result<(), SettingsError> {
        if self.settings.mode != DisplayMode::Numeric {
            return Err(SettingsError::NotNumericMode);
        }
        if value < 0 {
            return Err(SettingsError::NegativeNumber);
        }
        if digit_count(value as u64) > DISPLAY_DIGITS {
            return Err(SettingsError::NumberTooBig);
        }
        // Fits in DISPLAY_DIGITS decimal digits, so fits in u32
        let value = value as u32;
        self.settings.number = value;
        self.platform.show_number(value, 0);
        Ok(())
    }

    /// Store an SSID; any byte value is accepted, the limit counts bytes
    pub fn set_wifi_ssid(&mut self, ssid: &[u8]) -> Result<(), SettingsError> {
        self.settings.wifi_ssid = Vec::from_slice(ssid).map_err(|_| SettingsError::SsidTooLong)?;
        Ok(())
    }

    pub fn set_wifi_password(&mut self, password: &[u8]) -> Result<(), SettingsError> {
        self.settings.wifi_password =
            Vec::from_slice(password).map_err(|_| SettingsError::PasswordTooLong)?;
        Ok(())
    }

    /// Switch the system clock to a zone from the table
    pub fn set_time_zone(&mut self, name: &str) -> Result<(), SettingsError> {
        let posix = self.zones.lookup(name).ok_or(SettingsError::UnknownZone)?;
        // Every table name fits; a custom table with longer names is rejected
        let name = String::try_from(name).map_err(|_| SettingsError::UnknownZone)?;
        self.platform.apply_time_zone(posix);
        self.settings.time_zone = name;
        Ok(())
    }

    pub fn wifi_on(&mut self) -> WifiChange {
        if self.settings.wifi_enabled {
            return WifiChange::AlreadyOn;
        }
        self.platform
            .start_wifi(&self.settings.wifi_ssid, &self.settings.wifi_password);
        self.settings.wifi_enabled = true;
        WifiChange::Started
    }

    pub fn wifi_off(&mut self) -> WifiChange {
        if !self.settings.wifi_enabled {
            return WifiChange::AlreadyOff;
        }
        self.platform.stop_wifi();
        self.settings.wifi_enabled = false;
        WifiChange::Stopped
    }

    /// Current (Wi-Fi, Ethernet) addresses
    pub fn addresses(&self) -> (Option<Ipv4Addr>, Option<Ipv4Addr>) {
        (
            self.platform.wifi_address(),
            self.platform.ethernet_address(),
        )
    }

    pub fn close_client(&mut self) {
        self.platform.close_client();
    }

    /// Save the current settings to non-volatile storage
    pub fn persist(&mut self) -> Result<(), StoreError> {
        self.platform.save(&self.settings)
    }

    /// Restart the device after the reboot grace period
    pub fn restart(&mut self) {
        self.platform.restart(REBOOT_DELAY_MS);
    }
}

/// Number of decimal digits in `value` (0 has one digit)
fn digit_count(mut value: u64) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
