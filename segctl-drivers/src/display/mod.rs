//! Seven-segment display drivers

pub mod seven_segment;
pub mod shift_register;

pub use seven_segment::Frame;
pub use shift_register::ShiftRegisterDisplay;
