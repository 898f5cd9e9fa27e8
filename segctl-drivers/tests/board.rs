//! Drivers assembled into a board and driven through the serial console

use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::Ipv4Addr;

use embedded_hal::digital::{ErrorType, OutputPin};
use proptest::prelude::*;
use segctl_core::{
    Device, DeviceSettings, DisplayDriver, DisplayMode, NetworkLink, SettingsStore, StoreError,
    SystemControl, TimeFormat, TimeOfDay, ZoneTable,
};
use segctl_drivers::display::seven_segment::{encode_digit, render_number, BLANK, DOT};
use segctl_drivers::{FlashSettingsStore, SerialConsole, ShiftRegisterDisplay};
use segctl_hal::{FlashError, FlashStorage, StorageKey, UartRx, UartTx};
use segctl_protocol::{Context, FirmwareSink, TransferBuffer, UpdateError};

struct NullPin;

impl ErrorType for NullPin {
    type Error = Infallible;
}

impl OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Default)]
struct RamFlash {
    records: Vec<(StorageKey, Vec<u8>)>,
}

impl FlashStorage for RamFlash {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let (_, data) = self
            .records
            .iter()
            .find(|(k, _)| *k == key)
            .ok_or(FlashError::NotFound)?;
        buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?
            .copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        self.records.retain(|(k, _)| *k != key);
        self.records.push((key, data.to_vec()));
        Ok(())
    }
}

/// Board wiring the real display and store drivers
struct Board {
    display: ShiftRegisterDisplay<NullPin, NullPin, NullPin>,
    store: FlashSettingsStore<RamFlash>,
    zones: Vec<String>,
}

impl Board {
    fn new(flash: RamFlash) -> Self {
        Self {
            display: ShiftRegisterDisplay::new(NullPin, NullPin, NullPin),
            store: FlashSettingsStore::new(flash),
            zones: Vec::new(),
        }
    }
}

impl DisplayDriver for Board {
    fn set_mode(&mut self, mode: DisplayMode) {
        self.display.set_mode(mode);
    }

    fn set_time_format(&mut self, format: TimeFormat) {
        self.display.set_time_format(format);
    }

    fn show_number(&mut self, value: u32, dots: u8) {
        self.display.show_number(value, dots);
    }
}

impl NetworkLink for Board {
    fn wifi_address(&self) -> Option<Ipv4Addr> {
        None
    }

    fn ethernet_address(&self) -> Option<Ipv4Addr> {
        Some(Ipv4Addr::new(192, 168, 0, 20))
    }

    fn start_wifi(&mut self, _ssid: &[u8], _password: &[u8]) {}

    fn stop_wifi(&mut self) {}

    fn close_client(&mut self) {}
}

impl SettingsStore for Board {
    fn save(&mut self, settings: &DeviceSettings) -> Result<(), StoreError> {
        self.store.save(settings)
    }

    fn load(&mut self) -> Result<DeviceSettings, StoreError> {
        self.store.load()
    }
}

impl SystemControl for Board {
    fn apply_time_zone(&mut self, posix: &str) {
        self.zones.push(posix.to_string());
    }

    fn restart(&mut self, _delay_ms: u32) {}
}

struct NoFirmware;

impl FirmwareSink for NoFirmware {
    fn begin(&mut self, _size: u32) -> Result<(), UpdateError> {
        Err(UpdateError::Rejected)
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), UpdateError> {
        Err(UpdateError::NotStarted)
    }

    fn end(&mut self, _commit: bool) -> Result<(), UpdateError> {
        Err(UpdateError::NotStarted)
    }

    fn abort(&mut self) {}
}

/// UART receiver replaying scripted reads, a few bytes at a time
struct ScriptedRx {
    pending: VecDeque<u8>,
}

impl UartRx for ScriptedRx {
    type Error = Infallible;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = buf.len().min(5).min(self.pending.len());
        for slot in &mut buf[..n] {
            *slot = self.pending.pop_front().unwrap_or_default();
        }
        Ok(n)
    }
}

#[derive(Default)]
struct CaptureTx {
    bytes: Vec<u8>,
    flushes: usize,
}

impl UartTx for CaptureTx {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.flushes += 1;
        Ok(())
    }
}

/// Run `script` through a serial console and return the transcript
fn run_console(device: &mut Device<Board, ZoneTable>, script: &str) -> String {
    let mut firmware = NoFirmware;
    let mut transfer = Box::new(TransferBuffer::new());
    let mut ctx = Context::new(device, &mut firmware, &mut transfer);

    let rx = ScriptedRx {
        pending: script.bytes().collect(),
    };
    let mut console = SerialConsole::new(rx, CaptureTx::default());
    while console.poll(&mut ctx).unwrap() > 0 {}

    let (_, tx) = console.release();
    assert!(tx.flushes > 0);
    String::from_utf8(tx.bytes).unwrap()
}

#[test]
fn test_console_drives_display() {
    let mut device = Device::load(Board::new(RamFlash::default()), ZoneTable::builtin());
    device.apply();

    let out = run_console(&mut device, "set mode numb\r\nset n 42\r\nget ip\r\n");
    assert_eq!(out, "ok\r\nok\r\nEth: 192.168.0.20\r\n");
    assert_eq!(
        device.platform().display.frame(),
        Some(&[BLANK, BLANK, encode_digit(4), encode_digit(2)])
    );
}

#[test]
fn test_settings_survive_reboot() {
    let mut device = Device::load(Board::new(RamFlash::default()), ZoneTable::builtin());
    let out = run_console(
        &mut device,
        "set mode time\nset timeFormat 12hr\nset timeZone Europe/Berlin\nset wifiSSID my net\nnvmSave\n",
    );
    assert_eq!(out, "ok\r\nok\r\nok\r\nok\r\nok\r\n");

    let Board { store, .. } = std::mem::replace(device.platform_mut(), Board::new(RamFlash::default()));
    let mut rebooted = Device::load(Board::new(store.into_inner()), ZoneTable::builtin());
    rebooted.apply();

    let settings = rebooted.settings();
    assert_eq!(settings.mode, DisplayMode::Time);
    assert_eq!(settings.time_format, TimeFormat::Hours12);
    assert_eq!(settings.time_zone.as_str(), "Europe/Berlin");
    assert_eq!(&settings.wifi_ssid[..], b"my net");
    assert_eq!(
        rebooted.platform().zones,
        vec!["CET-1CEST,M3.5.0,M10.5.0/3".to_string()]
    );

    let board = rebooted.platform_mut();
    board.display.show_time(TimeOfDay::new(13, 7, 0).unwrap());
    assert_eq!(
        board.display.frame(),
        Some(&[
            encode_digit(0),
            encode_digit(1) | DOT,
            encode_digit(0),
            encode_digit(7)
        ])
    );
}

#[test]
fn test_update_refused_without_firmware_support() {
    let mut device = Device::load(Board::new(RamFlash::default()), ZoneTable::builtin());
    let out = run_console(&mut device, "update begin 100\nupdate cancel\n");
    assert_eq!(out, "error: failed to init update\r\nok\r\n");
}

/// Read a frame back as the number it shows
fn frame_value(frame: &[u8]) -> Option<u32> {
    let mut value = 0;
    let mut started = false;
    for &glyph in frame {
        if glyph == BLANK && !started {
            continue;
        }
        let digit = (0..10u8).find(|&d| encode_digit(d) == glyph)?;
        value = value * 10 + digit as u32;
        started = true;
    }
    started.then_some(value)
}

proptest! {
    #[test]
    fn prop_numbers_render_right_aligned(value in 0u32..=9999) {
        let frame = render_number(value, 0);
        prop_assert_eq!(frame_value(&frame), Some(value));
        let blanks = frame.iter().take_while(|&&g| g == BLANK).count();
        prop_assert_eq!(blanks, 4 - value.to_string().len());
    }
}
