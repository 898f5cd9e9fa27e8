//! Network link trait

use core::net::Ipv4Addr;

/// Wi-Fi / Ethernet link management
pub trait NetworkLink {
    /// Wi-Fi address, if associated
    fn wifi_address(&self) -> Option<Ipv4Addr>;

    /// Ethernet address, if the link is up
    fn ethernet_address(&self) -> Option<Ipv4Addr>;

    /// Bring Wi-Fi up with the given credentials (raw bytes)
    fn start_wifi(&mut self, ssid: &[u8], password: &[u8]);

    /// Disconnect and power down Wi-Fi
    fn stop_wifi(&mut self);

    /// Drop the currently connected TCP client, if any
    fn close_client(&mut self);
}
