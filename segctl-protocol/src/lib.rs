//! Command channel protocol
//!
//! The controller is driven over a byte stream (TCP port 23 or the serial
//! console) carrying three interleaved layers with no outer framing:
//!
//! ```text
//!  bytes ──► [firmware mode?] ──yes──► transfer buffer ──► FirmwareSink
//!                  │ no
//!                  ▼
//!            telnet decoder ──IAC DO TM──► IAC WILL TM reply
//!                  │ literal bytes
//!                  ▼
//!            line accumulator ──\r / \n──► tokenizer ──► command handlers
//! ```
//!
//! - Telnet escapes (`IAC ...`) are stripped; a timing-mark request is
//!   answered and, after an interrupt, resynchronizes the line.
//! - Text lines (`get mode`, `set n 42`, ...) are tokenized on spaces and
//!   dispatched against fixed command tables.
//! - `update cont <N>` switches the session into firmware mode, where the
//!   next N bytes are raw payload no matter their value.
//!
//! Every dispatched line answers with `ok`, `error: <reason>`, or the
//! requested information.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod firmware;
pub mod line;
pub mod response;
pub mod session;
pub mod telnet;

mod dispatch;

pub use command::{Command, GetKey, SetKey, UpdateKey};
pub use firmware::{FirmwareSink, TransferBuffer, UpdateError, MAX_FIRMWARE_CHUNK};
pub use line::{parse_number, LineBuffer, Tokens, MAX_LINE_LEN};
pub use response::{CommandError, IoSink, OutputSink, LINE_END};
pub use session::{Context, Session};
pub use telnet::{Decoded, TelnetDecoder};
