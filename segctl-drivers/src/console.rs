//! Serial console transport
//!
//! Carries the command channel over a UART. The console owns its own
//! [`Session`], independent of any TCP client.

use segctl_core::{Platform, TimeZoneTable};
use segctl_hal::{UartRx, UartTx};
use segctl_protocol::{Context, FirmwareSink, OutputSink, Session};

/// Receive chunk size for one poll
const RX_CHUNK: usize = 64;

/// [`OutputSink`] over a UART transmitter
pub struct UartSink<T> {
    tx: T,
}

impl<T: UartTx> UartSink<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.tx
    }

    pub fn into_inner(self) -> T {
        self.tx
    }

    /// Flush buffered output; errors are dropped like write errors
    pub fn flush(&mut self) {
        let _ = self.tx.flush();
    }
}

impl<T: UartTx> OutputSink for UartSink<T> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.tx.write_blocking(bytes).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("uart write failed, dropping {=usize} bytes", bytes.len());
        }
    }
}

/// Command channel session bound to a UART
pub struct SerialConsole<R, T> {
    rx: R,
    session: Session<UartSink<T>>,
}

impl<R: UartRx, T: UartTx> SerialConsole<R, T> {
    pub fn new(rx: R, tx: T) -> Self {
        Self {
            rx,
            session: Session::new(UartSink::new(tx)),
        }
    }

    pub fn session(&self) -> &Session<UartSink<T>> {
        &self.session
    }

    /// Read what the UART has, run it through the session, flush replies
    ///
    /// Returns the number of bytes consumed.
    pub fn poll<P, Z, F>(&mut self, ctx: &mut Context<'_, P, Z, F>) -> Result<usize, R::Error>
    where
        P: Platform,
        Z: TimeZoneTable,
        F: FirmwareSink,
    {
        let mut buf = [0u8; RX_CHUNK];
        let n = self.rx.read_blocking(&mut buf)?;
        if n > 0 {
            self.session.feed_all(&buf[..n], ctx);
            self.session.output_mut().flush();
        }
        Ok(n)
    }

    pub fn release(self) -> (R, T) {
        (self.rx, self.session.into_output().into_inner())
    }
}
