//! Collaborator traits
//!
//! These are the interfaces between the command channel and the rest of the
//! board: the display, the network link, settings persistence, system
//! control and the time zone table.

pub mod display;
pub mod network;
pub mod store;
pub mod system;
pub mod zones;

pub use display::DisplayDriver;
pub use network::NetworkLink;
pub use store::{SettingsStore, StoreError};
pub use system::SystemControl;
pub use zones::TimeZoneTable;

/// Everything a board provides to the device context
///
/// Boards implement the individual traits; this is implemented for them.
pub trait Platform: DisplayDriver + NetworkLink + SettingsStore + SystemControl {}

impl<T: DisplayDriver + NetworkLink + SettingsStore + SystemControl> Platform for T {}
