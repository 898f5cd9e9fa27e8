//! segctl Hardware Abstraction Layer
//!
//! Traits implemented by the board support code of whichever chip runs the
//! controller. The protocol and device crates only ever talk to hardware
//! through these.
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial console
//! - [`flash::FlashStorage`] - Persistent key-value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod uart;

pub use flash::{FlashError, FlashStorage, StorageKey};
pub use uart::{UartRx, UartTx};
