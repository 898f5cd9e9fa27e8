//! Shared test doubles for the session tests

#![allow(dead_code)]

use std::net::Ipv4Addr;

use segctl_core::{
    Device, DeviceSettings, DisplayDriver, DisplayMode, NetworkLink, SettingsStore, StoreError,
    SystemControl, TimeFormat, ZoneTable,
};
use segctl_protocol::{Context, FirmwareSink, OutputSink, Session, TransferBuffer, UpdateError};

/// Records every call the device makes
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub mode: Option<DisplayMode>,
    pub time_format: Option<TimeFormat>,
    pub shown: Vec<(u32, u8)>,
    pub wifi_address: Option<Ipv4Addr>,
    pub ethernet_address: Option<Ipv4Addr>,
    pub wifi_starts: Vec<(Vec<u8>, Vec<u8>)>,
    pub wifi_stops: usize,
    pub clients_closed: usize,
    pub saved: Vec<DeviceSettings>,
    pub fail_save: bool,
    pub zones_applied: Vec<String>,
    pub restarts: Vec<u32>,
}

impl DisplayDriver for MockPlatform {
    fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = Some(mode);
    }

    fn set_time_format(&mut self, format: TimeFormat) {
        self.time_format = Some(format);
    }

    fn show_number(&mut self, value: u32, dots: u8) {
        self.shown.push((value, dots));
    }
}

impl NetworkLink for MockPlatform {
    fn wifi_address(&self) -> Option<Ipv4Addr> {
        self.wifi_address
    }

    fn ethernet_address(&self) -> Option<Ipv4Addr> {
        self.ethernet_address
    }

    fn start_wifi(&mut self, ssid: &[u8], password: &[u8]) {
        self.wifi_starts.push((ssid.to_vec(), password.to_vec()));
    }

    fn stop_wifi(&mut self) {
        self.wifi_stops += 1;
    }

    fn close_client(&mut self) {
        self.clients_closed += 1;
    }
}

impl SettingsStore for MockPlatform {
    fn save(&mut self, settings: &DeviceSettings) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Storage);
        }
        self.saved.push(settings.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<DeviceSettings, StoreError> {
        self.saved.last().cloned().ok_or(StoreError::NotFound)
    }
}

impl SystemControl for MockPlatform {
    fn apply_time_zone(&mut self, posix: &str) {
        self.zones_applied.push(posix.to_string());
    }

    fn restart(&mut self, delay_ms: u32) {
        self.restarts.push(delay_ms);
    }
}

/// Firmware sink that keeps every chunk
#[derive(Debug, Default)]
pub struct MockFirmware {
    pub begun: Vec<u32>,
    pub chunks: Vec<Vec<u8>>,
    pub ended: Vec<bool>,
    pub aborts: usize,
    pub reject_begin: bool,
    pub fail_write: bool,
    pub fail_end: bool,
}

impl MockFirmware {
    pub fn image(&self) -> Vec<u8> {
        self.chunks.concat()
    }
}

impl FirmwareSink for MockFirmware {
    fn begin(&mut self, size: u32) -> Result<(), UpdateError> {
        if self.reject_begin {
            return Err(UpdateError::Rejected);
        }
        self.begun.push(size);
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> Result<(), UpdateError> {
        if self.fail_write {
            return Err(UpdateError::Flash);
        }
        self.chunks.push(chunk.to_vec());
        Ok(())
    }

    fn end(&mut self, commit: bool) -> Result<(), UpdateError> {
        if self.fail_end {
            return Err(UpdateError::Verify);
        }
        self.ended.push(commit);
        Ok(())
    }

    fn abort(&mut self) {
        self.aborts += 1;
    }
}

/// Growable capture sink
#[derive(Debug, Default)]
pub struct Capture(pub Vec<u8>);

impl OutputSink for Capture {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }
}

/// A device, its firmware sink and one session
pub struct Harness {
    pub device: Device<MockPlatform, ZoneTable>,
    pub firmware: MockFirmware,
    pub transfer: Box<TransferBuffer>,
    pub session: Session<Capture>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(DeviceSettings::default())
    }

    pub fn with_settings(settings: DeviceSettings) -> Self {
        Self {
            device: Device::new(settings, MockPlatform::default(), ZoneTable::builtin()),
            firmware: MockFirmware::default(),
            transfer: Box::new(TransferBuffer::new()),
            session: Session::new(Capture::default()),
        }
    }

    /// Feed bytes and return everything written since the last call
    pub fn send_raw(&mut self, bytes: &[u8]) -> Vec<u8> {
        let mut ctx = Context::new(&mut self.device, &mut self.firmware, &mut self.transfer);
        self.session.feed_all(bytes, &mut ctx);
        std::mem::take(&mut self.session.output_mut().0)
    }

    /// Feed text and return the response as text
    pub fn send(&mut self, text: &str) -> String {
        String::from_utf8(self.send_raw(text.as_bytes())).expect("response is text")
    }

    pub fn platform(&self) -> &MockPlatform {
        self.device.platform()
    }

    pub fn platform_mut(&mut self) -> &mut MockPlatform {
        self.device.platform_mut()
    }
}
