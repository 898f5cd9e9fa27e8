//! System control trait

/// Process-wide system services
pub trait SystemControl {
    /// Apply a POSIX TZ rule to the system clock
    fn apply_time_zone(&mut self, posix: &str);

    /// Restart the device after `delay_ms`
    ///
    /// Does not need to return.
    fn restart(&mut self, delay_ms: u32);
}
