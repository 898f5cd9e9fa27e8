//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! segctl-core, built on the segctl-hal abstractions:
//!
//! - Seven-segment display behind shift registers
//! - Settings persistence in flash (postcard encoded)
//! - Serial console transport for the command channel

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod display;
pub mod store;

pub use console::{SerialConsole, UartSink};
pub use display::ShiftRegisterDisplay;
pub use store::{FlashSettingsStore, SETTINGS_RECORD_SIZE};
