//! segctl-updater
//!
//! Upload a firmware image to a segctl display and reboot it.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use segctl_protocol::MAX_FIRMWARE_CHUNK;
use segctl_updater::{Link, Target, Updater};

#[derive(Parser, Debug)]
#[command(name = "segctl-updater")]
#[command(version)]
#[command(about = "Upload firmware to a segctl display over TCP or serial", long_about = None)]
struct Args {
    /// Firmware image to upload
    #[arg(value_name = "FILE")]
    firmware: PathBuf,

    /// Device socket (host:port) or serial port (/dev/ttyUSB0, COM3)
    #[arg(value_name = "TARGET")]
    target: Target,

    /// Bytes per `update cont` chunk (1-8192)
    #[arg(long, value_name = "BYTES", default_value_t = MAX_FIRMWARE_CHUNK)]
    chunk_size: usize,

    /// I/O timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Leave the device running the old image after the upload
    #[arg(long)]
    no_reboot: bool,

    /// Log every line exchanged with the device
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let image = fs::read(&args.firmware)
        .with_context(|| format!("reading {}", args.firmware.display()))?;
    log::info!("{}: {} bytes", args.firmware.display(), image.len());

    let stream = args.target.connect(Duration::from_secs(args.timeout))?;
    let mut updater = Updater::new(Link::new(stream), args.chunk_size);
    if updater.chunk_size() != args.chunk_size {
        log::warn!("chunk size clamped to {}", updater.chunk_size());
    }

    updater
        .run(&image, !args.no_reboot)
        .context("firmware update failed")?;
    Ok(())
}
