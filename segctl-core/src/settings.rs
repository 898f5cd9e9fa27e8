//! Device settings
//!
//! Settings are mutated only by successful `set` commands and persisted as a
//! single postcard record when the operator asks for it.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of seven-segment digits on the display
pub const DISPLAY_DIGITS: usize = 4;

/// Maximum SSID / password length in bytes
pub const MAX_CREDENTIAL_LEN: usize = 31;

/// Maximum time zone name length (IANA names)
pub const MAX_ZONE_NAME_LEN: usize = 40;

/// Zone applied when nothing has been configured
pub const DEFAULT_ZONE: &str = "Etc/UTC";

/// What the display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayMode {
    /// Blank display
    #[default]
    Off,
    /// A number set over the command channel
    Numeric,
    /// Time of day
    Time,
}

impl DisplayMode {
    /// Parse the wire name used by `set mode`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(DisplayMode::Off),
            "numb" => Some(DisplayMode::Numeric),
            // Clock mode needs at least HHMM worth of digits
            "time" if DISPLAY_DIGITS >= 4 => Some(DisplayMode::Time),
            _ => None,
        }
    }

    /// Wire name reported by `get mode`
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Off => "off",
            DisplayMode::Numeric => "numb",
            DisplayMode::Time => "time",
        }
    }
}

/// How the clock mode renders the time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeFormat {
    #[default]
    Hours24,
    Hours12,
    /// Decimal time: 10 hours of 100 minutes of 100 seconds
    Metric,
}

impl TimeFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "24hr" => Some(TimeFormat::Hours24),
            "12hr" => Some(TimeFormat::Hours12),
            "metric" => Some(TimeFormat::Metric),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeFormat::Hours24 => "24hr",
            TimeFormat::Hours12 => "12hr",
            TimeFormat::Metric => "metric",
        }
    }
}

/// Complete device settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceSettings {
    pub mode: DisplayMode,
    pub time_format: TimeFormat,
    /// Number shown in numeric mode
    pub number: u32,
    /// Raw bytes as received; SSIDs need not be UTF-8
    pub wifi_ssid: Vec<u8, MAX_CREDENTIAL_LEN>,
    pub wifi_password: Vec<u8, MAX_CREDENTIAL_LEN>,
    /// IANA zone name; the POSIX rule is looked up when applied
    pub time_zone: String<MAX_ZONE_NAME_LEN>,
    pub wifi_enabled: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        let mut time_zone = String::new();
        // DEFAULT_ZONE is well under MAX_ZONE_NAME_LEN
        let _ = time_zone.push_str(DEFAULT_ZONE);
        Self {
            mode: DisplayMode::Off,
            time_format: TimeFormat::Hours24,
            number: 0,
            wifi_ssid: Vec::new(),
            wifi_password: Vec::new(),
            time_zone,
            wifi_enabled: false,
        }
    }
}
