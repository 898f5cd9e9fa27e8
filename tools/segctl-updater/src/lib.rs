//! Host-side firmware uploader
//!
//! Speaks the device command channel over TCP or a serial port and
//! streams a firmware image through the `update` commands.

pub mod link;
pub mod updater;

pub use link::{Link, Stream, Target, BAUD_RATE};
pub use updater::Updater;
