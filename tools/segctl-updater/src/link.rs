//! Line-oriented connection to a device
//!
//! The command channel is reachable over TCP (the telnet port) or a serial
//! port. Both are plain byte streams; [`Link`] adds line framing on top of
//! any `Read + Write`.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serialport::{DataBits, Parity, SerialPort, StopBits};

/// Console line rate (8N1)
pub const BAUD_RATE: u32 = 115_200;

/// Where the device is reachable
///
/// `host:port` is a TCP socket; anything without a `:` names a serial port
/// (`/dev/ttyUSB0`, `COM3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Tcp { host: String, port: u16 },
    Serial(String),
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty target".into());
        }
        let Some((host, port)) = s.rsplit_once(':') else {
            return Ok(Target::Serial(s.to_string()));
        };
        if host.is_empty() {
            return Err(format!("missing host in {s:?}"));
        }
        let port = port
            .parse()
            .map_err(|_| format!("invalid port in {s:?}"))?;
        Ok(Target::Tcp {
            host: host.to_string(),
            port,
        })
    }
}

impl Target {
    /// Open the transport; `timeout` bounds connecting, reads and writes
    pub fn connect(&self, timeout: Duration) -> Result<Stream> {
        match self {
            Target::Tcp { host, port } => {
                let addr = (host.as_str(), *port)
                    .to_socket_addrs()
                    .with_context(|| format!("resolving {host}:{port}"))?
                    .next()
                    .with_context(|| format!("{host} has no address"))?;
                log::info!("connecting to {addr}");
                let stream = TcpStream::connect_timeout(&addr, timeout)
                    .with_context(|| format!("connecting to {addr}"))?;
                stream.set_read_timeout(Some(timeout))?;
                stream.set_write_timeout(Some(timeout))?;
                stream.set_nodelay(true)?;
                Ok(Stream::Tcp(stream))
            }
            Target::Serial(path) => {
                log::info!("opening {path} at {BAUD_RATE} baud");
                let port = serialport::new(path, BAUD_RATE)
                    .data_bits(DataBits::Eight)
                    .parity(Parity::None)
                    .stop_bits(StopBits::One)
                    .timeout(timeout)
                    .open()
                    .with_context(|| format!("opening {path}"))?;
                Ok(Stream::Serial(port))
            }
        }
    }
}

/// An open transport
pub enum Stream {
    Tcp(TcpStream),
    Serial(Box<dyn SerialPort>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.read(buf),
            Stream::Serial(p) => p.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.write(buf),
            Stream::Serial(p) => p.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.flush(),
            Stream::Serial(p) => p.flush(),
        }
    }
}

/// Line framing over a byte stream
pub struct Link<S> {
    stream: BufReader<S>,
}

impl<S: Read + Write> Link<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    /// Send one command line
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        log::debug!("-> {line}");
        let out = self.stream.get_mut();
        out.write_all(line.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush())
            .with_context(|| format!("sending {line:?}"))
    }

    /// Send raw payload bytes
    pub fn send_raw(&mut self, data: &[u8]) -> Result<()> {
        log::trace!("-> {} raw bytes", data.len());
        let out = self.stream.get_mut();
        out.write_all(data)
            .and_then(|()| out.flush())
            .context("sending firmware payload")
    }

    /// Receive one line, without its terminator
    pub fn read_line(&mut self) -> Result<String> {
        let mut raw = Vec::new();
        let n = self
            .stream
            .read_until(b'\n', &mut raw)
            .context("reading reply")?;
        if n == 0 {
            bail!("connection closed by device");
        }
        let line = String::from_utf8_lossy(&raw).trim().to_string();
        log::debug!("<- {line}");
        Ok(line)
    }
}
