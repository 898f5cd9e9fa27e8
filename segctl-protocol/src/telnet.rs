//! Telnet escape and option negotiation
//!
//! Only the subset a line-mode telnet client actually sends is understood:
//! doubled IAC, WILL/DO option announcements and the interrupt-process +
//! timing-mark pair a client emits on Ctrl-C. Everything else after an IAC
//! is logged and dropped.

/// Interpret As Command: introduces every telnet command
pub const IAC: u8 = 0xFF;
/// Sender wants to enable an option
pub const WILL: u8 = 0xFB;
/// Sender asks the receiver to enable an option
pub const DO: u8 = 0xFD;
/// Interrupt process (Ctrl-C)
pub const IP: u8 = 0xF4;
/// Timing mark option
pub const TIMING_MARK: u8 = 0x06;

/// Reply to `IAC DO TIMING-MARK`
pub const TIMING_MARK_REPLY: [u8; 3] = [IAC, WILL, TIMING_MARK];

/// Result of decoding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// Byte consumed by the telnet layer
    Nothing,
    /// Payload byte for the line accumulator
    Literal(u8),
    /// Client asked for a timing mark; answer with [`TIMING_MARK_REPLY`].
    ///
    /// `resync` is set when an interrupt preceded the request, in which
    /// case the partial line must be discarded.
    TimingMark { resync: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Previous byte was IAC
    Escape,
    /// Next byte is the option of a WILL
    Will,
    /// Next byte is the option of a DO
    Do,
}

/// Byte-at-a-time telnet decoder
#[derive(Debug, Clone)]
pub struct TelnetDecoder {
    state: State,
    interrupt_pending: bool,
}

impl Default for TelnetDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelnetDecoder {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            interrupt_pending: false,
        }
    }

    /// True if an interrupt was received and not yet resynchronized
    #[cfg(test)]
    fn interrupt_pending(&self) -> bool {
        self.interrupt_pending
    }

    /// True while in the middle of an escape sequence
    #[cfg(test)]
    fn in_sequence(&self) -> bool {
        self.state != State::Idle
    }

    /// Feed one byte; every byte makes exactly one transition
    pub fn decode(&mut self, byte: u8) -> Decoded {
        match self.state {
            State::Idle => {
                if byte == IAC {
                    self.state = State::Escape;
                    Decoded::Nothing
                } else {
                    Decoded::Literal(byte)
                }
            }
            State::Escape => {
                self.state = State::Idle;
                match byte {
                    // IAC IAC is a literal 0xFF
                    IAC => return Decoded::Literal(IAC),
                    WILL => self.state = State::Will,
                    DO => self.state = State::Do,
                    IP => self.interrupt_pending = true,
                    _other => {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("unhandled telnet command {=u8}", _other);
                    }
                }
                Decoded::Nothing
            }
            State::Will => {
                self.state = State::Idle;
                #[cfg(feature = "defmt")]
                defmt::debug!("telnet WILL {=u8}", byte);
                Decoded::Nothing
            }
            State::Do => {
                self.state = State::Idle;
                #[cfg(feature = "defmt")]
                defmt::debug!("telnet DO {=u8}", byte);
                if byte != TIMING_MARK {
                    return Decoded::Nothing;
                }
                let resync = core::mem::take(&mut self.interrupt_pending);
                Decoded::TimingMark { resync }
            }
        }
    }
}
