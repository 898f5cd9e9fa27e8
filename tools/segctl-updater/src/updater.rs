//! Firmware upload sequence
//!
//! ```text
//! ping                -> pong!
//! set mode off        -> ok
//! update cancel       -> ok
//! update begin <len>  -> ok
//! update cont <n>     -> ok   (repeated per chunk)
//! <n raw bytes>       -> ok
//! update end          -> ok
//! reboot              -> ok
//! ```

use std::io::{Read, Write};

use anyhow::{bail, ensure, Context, Result};
use segctl_protocol::MAX_FIRMWARE_CHUNK;

use crate::link::Link;

const ACK: &str = "ok";
const PONG: &str = "pong!";

/// Drives the upload sequence over a [`Link`]
pub struct Updater<S> {
    link: Link<S>,
    chunk_size: usize,
}

impl<S: Read + Write> Updater<S> {
    /// `chunk_size` is clamped to what the device can buffer
    pub fn new(link: Link<S>, chunk_size: usize) -> Self {
        Self {
            link,
            chunk_size: chunk_size.clamp(1, MAX_FIRMWARE_CHUNK),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn into_link(self) -> Link<S> {
        self.link
    }

    /// Check the device answers on the command channel
    pub fn ping(&mut self) -> Result<()> {
        self.link.send_line("ping")?;
        let reply = self.link.read_line()?;
        ensure!(reply == PONG, "device did not respond with pong! (got {reply:?})");
        Ok(())
    }

    /// Send a command and require a bare acknowledgment
    pub fn command(&mut self, line: &str) -> Result<()> {
        self.link.send_line(line)?;
        self.expect_ack(line)
    }

    /// Upload a complete image, calling `progress(sent, total)` per chunk
    pub fn upload(&mut self, image: &[u8], mut progress: impl FnMut(usize, usize)) -> Result<()> {
        ensure!(!image.is_empty(), "firmware image is empty");

        // Drop whatever a previous, interrupted upload left behind
        self.command("update cancel")?;
        self.command(&format!("update begin {}", image.len()))
            .context("unable to init update")?;

        let mut sent = 0;
        for chunk in image.chunks(self.chunk_size) {
            self.command(&format!("update cont {}", chunk.len()))
                .context("unable to continue update")?;
            self.link.send_raw(chunk)?;
            self.expect_ack("firmware chunk")
                .with_context(|| format!("chunk at offset {sent} refused"))?;
            sent += chunk.len();
            progress(sent, image.len());
        }

        self.command("update end").context("unable to finish update")
    }

    /// Restart the device into the new image
    pub fn reboot(&mut self) -> Result<()> {
        self.command("reboot")
    }

    /// Whole flow: ping, blank the display, upload, optionally reboot
    pub fn run(&mut self, image: &[u8], reboot: bool) -> Result<()> {
        self.ping()?;
        // The display flickers while flash is being written
        self.command("set mode off")?;
        self.upload(image, |sent, total| {
            log::info!("sent {sent}/{total} bytes ({}%)", sent * 100 / total);
        })?;
        log::info!("upload complete");
        if reboot {
            self.reboot()?;
            log::info!("device rebooting");
        }
        Ok(())
    }

    fn expect_ack(&mut self, step: &str) -> Result<()> {
        let reply = self.link.read_line()?;
        if reply != ACK {
            log::warn!("{step:?} did not return ok: {reply}");
            bail!("device refused {step:?}: {reply}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct Canned(Cursor<Vec<u8>>);

    impl Read for Canned {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Write for Canned {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn updater(replies: &str, chunk_size: usize) -> Updater<Canned> {
        let stream = Canned(Cursor::new(replies.as_bytes().to_vec()));
        Updater::new(Link::new(stream), chunk_size)
    }

    #[test]
    fn test_chunk_size_clamped() {
        assert_eq!(updater("", 0).chunk_size(), 1);
        assert_eq!(updater("", 100_000).chunk_size(), MAX_FIRMWARE_CHUNK);
        assert_eq!(updater("", 512).chunk_size(), 512);
    }

    #[test]
    fn test_ping_requires_pong() {
        assert!(updater("pong!\r\n", 1).ping().is_ok());
        let err = updater("hello\r\n", 1).ping().unwrap_err();
        assert!(err.to_string().contains("pong!"));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(updater("", 1).upload(&[], |_, _| {}).is_err());
    }

    #[test]
    fn test_refusal_names_step() {
        let err = updater("ok\r\nerror: failed to init update\r\n", 8)
            .upload(&[1, 2, 3], |_, _| {})
            .unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("unable to init update"));
        assert!(chain.contains("failed to init update"));
    }

    #[test]
    fn test_progress_reports_each_chunk() {
        let replies = "ok\r\n".repeat(2 + 3 * 2 + 1);
        let mut seen = Vec::new();
        updater(&replies, 4)
            .upload(&[0u8; 10], |sent, total| seen.push((sent, total)))
            .unwrap();
        assert_eq!(seen, vec![(4, 10), (8, 10), (10, 10)]);
    }
}
