//! Command handlers
//!
//! Each handler parses its own arguments from the token stream and either
//! writes its response and returns `Ok`, or returns the error to report.
//! Nothing is mutated until every argument has been validated.

use segctl_core::{Platform, SettingsError, TimeZoneTable, WifiChange, FIRMWARE_VERSION};

use crate::command::{Command, GetKey, SetKey, UpdateKey};
use crate::firmware::{FirmwareSink, MAX_FIRMWARE_CHUNK};
use crate::line::{parse_number, Tokens};
use crate::response::{self, CommandError, OutputSink, LINE_END};
use crate::session::{Context, Mode, Session};

/// Marks the end of the `get allTimeZones` listing
const LIST_END: &str = "---";

type CommandResult = Result<(), CommandError>;

impl<O: OutputSink> Session<O> {
    /// Run one complete command line
    pub(crate) fn dispatch<P, Z, F>(&mut self, line: &[u8], ctx: &mut Context<'_, P, Z, F>)
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("<- {=[u8]:a}", line);

        let mut tokens = Tokens::new(line);
        let result = match tokens.next() {
            None => Err(CommandError::MissingCommand),
            Some(name) => match Command::from_name(name) {
                None => Err(CommandError::InvalidCommand),
                Some(command) => self.run(command, &mut tokens, ctx),
            },
        };

        if let Err(e) = result {
            response::nack(&mut self.out, e);
        }
    }

    fn run<P, Z, F>(
        &mut self,
        command: Command,
        tokens: &mut Tokens<'_>,
        ctx: &mut Context<'_, P, Z, F>,
    ) -> CommandResult
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        match command {
            Command::Ping => {
                self.out.write_line("pong!");
                Ok(())
            }
            Command::Exit => {
                response::ack(&mut self.out);
                ctx.device.close_client();
                Ok(())
            }
            Command::Get => self.get(tokens, ctx),
            Command::Set => self.set(tokens, ctx),
            Command::Update => self.update(tokens, ctx),
            Command::NvmSave => {
                ctx.device.persist().map_err(|_e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("settings save failed: {:?}", _e);
                    CommandError::SaveFailed
                })?;
                response::ack(&mut self.out);
                Ok(())
            }
            Command::Reboot => {
                response::ack(&mut self.out);
                self.mode = Mode::Halted;
                ctx.device.restart();
                Ok(())
            }
        }
    }

    fn get<P, Z, F>(&mut self, tokens: &mut Tokens<'_>, ctx: &mut Context<'_, P, Z, F>) -> CommandResult
    where
        P: Platform,
        Z: TimeZoneTable,
    {
        let key = sub_command(tokens, GetKey::from_name)?;
        let settings = ctx.device.settings();
        match key {
            GetKey::Version => self.out.write_line(FIRMWARE_VERSION),
            GetKey::Mode => self.out.write_line(settings.mode.name()),
            GetKey::TimeFormat => self.out.write_line(settings.time_format.name()),
            GetKey::Number => self.out.write_line_fmt(format_args!("{}", settings.number)),
            GetKey::Ip => {
                let (wifi, eth) = ctx.device.addresses();
                if let Some(addr) = wifi {
                    self.out.write_line_fmt(format_args!("Wifi: {}", addr));
                }
                if let Some(addr) = eth {
                    self.out.write_line_fmt(format_args!("Eth: {}", addr));
                }
                if wifi.is_none() && eth.is_none() {
                    self.out.write_line("none");
                }
            }
            // Credentials are echoed byte for byte, whatever their encoding
            GetKey::WifiInfo => {
                self.out.write_bytes(b"SSID: ");
                self.out.write_bytes(&settings.wifi_ssid);
                self.out.write_bytes(LINE_END);
                self.out.write_bytes(b"Password: ");
                self.out.write_bytes(&settings.wifi_password);
                self.out.write_bytes(LINE_END);
            }
            GetKey::TimeZone => self.out.write_line(&settings.time_zone),
            GetKey::AllTimeZones => {
                for name in ctx.device.zones().names() {
                    self.out.write_line(name);
                }
                self.out.write_line(LIST_END);
            }
        }
        Ok(())
    }

    fn set<P, Z, F>(&mut self, tokens: &mut Tokens<'_>, ctx: &mut Context<'_, P, Z, F>) -> CommandResult
    where
        P: Platform,
        Z: TimeZoneTable,
    {
        let key = sub_command(tokens, SetKey::from_name)?;
        let device = &mut *ctx.device;
        match key {
            SetKey::Mode => {
                let arg = tokens.next().ok_or(CommandError::MissingArg)?;
                let mode = as_text(arg)
                    .and_then(segctl_core::DisplayMode::from_name)
                    .ok_or(CommandError::InvalidMode)?;
                device.set_mode(mode);
            }
            SetKey::TimeFormat => {
                let arg = tokens.next().ok_or(CommandError::MissingArg)?;
                let format = as_text(arg)
                    .and_then(segctl_core::TimeFormat::from_name)
                    .ok_or(CommandError::InvalidTimeFormat)?;
                device.set_time_format(format);
            }
            SetKey::Number => {
                let arg = tokens.next().ok_or(CommandError::MissingArg)?;
                device.show_number(parse_number(arg))?;
            }
            SetKey::WifiSsid => {
                let ssid = tokens.remainder().ok_or(CommandError::SsidMissing)?;
                device.set_wifi_ssid(ssid)?;
            }
            SetKey::WifiPass => {
                let password = tokens.remainder().ok_or(CommandError::PasswordMissing)?;
                device.set_wifi_password(password)?;
            }
            SetKey::WifiOff => {
                let text = match device.wifi_off() {
                    WifiChange::Stopped => "stopping wifi",
                    _ => "wifi already off",
                };
                self.out.write_line(text);
                return Ok(());
            }
            SetKey::WifiOn => {
                let text = match device.wifi_on() {
                    WifiChange::Started => "starting wifi",
                    _ => "wifi already on",
                };
                self.out.write_line(text);
                return Ok(());
            }
            SetKey::TimeZone => {
                let arg = tokens.next().ok_or(CommandError::MissingArg)?;
                let name = as_text(arg).ok_or(SettingsError::UnknownZone)?;
                device.set_time_zone(name)?;
            }
        }
        response::ack(&mut self.out);
        Ok(())
    }

    fn update<P, Z, F>(&mut self, tokens: &mut Tokens<'_>, ctx: &mut Context<'_, P, Z, F>) -> CommandResult
    where
        F: FirmwareSink,
    {
        let key = sub_command(tokens, UpdateKey::from_name)?;
        match key {
            UpdateKey::Begin => {
                let size = size_argument(tokens)?;
                let size = u32::try_from(size).map_err(|_| CommandError::InvalidUpdateSize)?;
                ctx.firmware.begin(size).map_err(|_e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("update begin({=u32}) refused: {:?}", size, _e);
                    CommandError::UpdateInitFailed
                })?;
            }
            UpdateKey::Cont => {
                let size = size_argument(tokens)?;
                if size < 0 || size > MAX_FIRMWARE_CHUNK as i64 {
                    return Err(CommandError::ChunkTooLarge);
                }
                ctx.transfer.reset();
                // Ack first: the client starts streaming as soon as it sees it
                response::ack(&mut self.out);
                self.mode = Mode::Firmware {
                    remaining: size as u32,
                };
                return Ok(());
            }
            UpdateKey::End => {
                ctx.firmware.end(true).map_err(|_e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("update end failed: {:?}", _e);
                    CommandError::UpdateFinishFailed
                })?;
            }
            UpdateKey::Cancel => {
                ctx.firmware.abort();
                ctx.transfer.reset();
            }
        }
        response::ack(&mut self.out);
        Ok(())
    }
}

/// Look up the sub-command token in `table`
fn sub_command<T>(tokens: &mut Tokens<'_>, table: fn(&[u8]) -> Option<T>) -> Result<T, CommandError> {
    let name = tokens.next().ok_or(CommandError::MissingSubArg)?;
    table(name).ok_or(CommandError::InvalidSubCommand)
}

/// Argument as text; names on the wire are plain ASCII
fn as_text(arg: &[u8]) -> Option<&str> {
    core::str::from_utf8(arg).ok()
}

/// Parse a nonzero size argument
fn size_argument(tokens: &mut Tokens<'_>) -> Result<i64, CommandError> {
    let arg = tokens.next().ok_or(CommandError::MissingArg)?;
    match parse_number(arg) {
        0 => Err(CommandError::ZeroUpdateSize),
        n => Ok(n),
    }
}
