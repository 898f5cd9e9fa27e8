//! Command tables
//!
//! Command and sub-command names are matched exactly (case-sensitive) against
//! the raw token bytes.

/// Top-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Liveness check, answers `pong!`
    Ping,
    /// Close the network client
    Exit,
    /// Query a setting
    Get,
    /// Change a setting
    Set,
    /// Firmware update control
    Update,
    /// Persist settings
    NvmSave,
    /// Restart the device
    Reboot,
}

/// `get` sub-commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GetKey {
    Version,
    Mode,
    TimeFormat,
    Number,
    Ip,
    WifiInfo,
    TimeZone,
    AllTimeZones,
}

/// `set` sub-commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetKey {
    Mode,
    TimeFormat,
    Number,
    WifiSsid,
    WifiPass,
    WifiOff,
    WifiOn,
    TimeZone,
}

/// `update` sub-commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateKey {
    /// Start an update of the given total size
    Begin,
    /// Receive the next raw chunk
    Cont,
    /// Commit the update
    End,
    /// Abort the update
    Cancel,
}

const COMMANDS: &[(&str, Command)] = &[
    ("ping", Command::Ping),
    ("exit", Command::Exit),
    ("get", Command::Get),
    ("set", Command::Set),
    ("update", Command::Update),
    ("nvmSave", Command::NvmSave),
    ("reboot", Command::Reboot),
];

const GET_KEYS: &[(&str, GetKey)] = &[
    ("version", GetKey::Version),
    ("mode", GetKey::Mode),
    ("timeFormat", GetKey::TimeFormat),
    ("n", GetKey::Number),
    ("ip", GetKey::Ip),
    ("wifiInfo", GetKey::WifiInfo),
    ("timeZone", GetKey::TimeZone),
    ("allTimeZones", GetKey::AllTimeZones),
];

const SET_KEYS: &[(&str, SetKey)] = &[
    ("mode", SetKey::Mode),
    ("timeFormat", SetKey::TimeFormat),
    ("n", SetKey::Number),
    ("wifiSSID", SetKey::WifiSsid),
    ("wifiPass", SetKey::WifiPass),
    ("wifiOff", SetKey::WifiOff),
    ("wifiOn", SetKey::WifiOn),
    ("timeZone", SetKey::TimeZone),
];

const UPDATE_KEYS: &[(&str, UpdateKey)] = &[
    ("begin", UpdateKey::Begin),
    ("cont", UpdateKey::Cont),
    ("end", UpdateKey::End),
    ("cancel", UpdateKey::Cancel),
];

fn lookup<T: Copy>(table: &[(&str, T)], name: &[u8]) -> Option<T> {
    table
        .iter()
        .find(|(entry, _)| entry.as_bytes() == name)
        .map(|(_, value)| *value)
}

impl Command {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        lookup(COMMANDS, name)
    }
}

impl GetKey {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        lookup(GET_KEYS, name)
    }
}

impl SetKey {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        lookup(SET_KEYS, name)
    }
}

impl UpdateKey {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        lookup(UPDATE_KEYS, name)
    }
}
