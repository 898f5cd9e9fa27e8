//! Byte-stream properties of the session, checked with proptest

mod common;

use common::Harness;
use proptest::prelude::*;
use segctl_protocol::telnet::{DO, IAC, TIMING_MARK, WILL};
use segctl_protocol::{Tokens, MAX_FIRMWARE_CHUNK, MAX_LINE_LEN};

/// Printable ASCII without the characters the line layer reacts to
fn plain_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 ._-]{0,200}").unwrap()
}

proptest! {
    #[test]
    fn prop_doubled_iac_yields_one_literal(prefix in plain_text(), suffix in plain_text()) {
        let mut h = Harness::new();
        let mut input = prefix.clone().into_bytes();
        input.extend_from_slice(&[IAC, IAC]);
        input.extend_from_slice(suffix.as_bytes());
        h.send_raw(&input);

        let mut expected = prefix.into_bytes();
        expected.push(IAC);
        expected.extend_from_slice(suffix.as_bytes());
        expected.truncate(MAX_LINE_LEN);
        prop_assert_eq!(h.session.pending_line(), &expected[..]);
    }

    #[test]
    fn prop_timing_mark_reply_is_fixed(history in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut h = Harness::new();
        // Put the session in a known line state whatever the history did
        h.send_raw(&history);
        if h.session.in_firmware_mode() || h.session.is_halted() {
            return Ok(());
        }
        // Leave any half-finished escape sequence with a harmless byte pair
        h.send_raw(&[IAC, WILL, 0x00]);
        let out = h.send_raw(&[IAC, DO, TIMING_MARK]);
        prop_assert_eq!(&out[..3], &[IAC, WILL, TIMING_MARK][..]);
    }

    #[test]
    fn prop_tokens_match_space_split(line in plain_text()) {
        let expected: Vec<&[u8]> = line
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::as_bytes)
            .collect();
        let actual: Vec<&[u8]> = Tokens::new(line.as_bytes()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_long_lines_truncate_silently(len in MAX_LINE_LEN..4 * MAX_LINE_LEN) {
        let mut h = Harness::new();
        let line = "a".repeat(len);
        prop_assert_eq!(h.send(&line), "");
        prop_assert_eq!(h.session.pending_line().len(), MAX_LINE_LEN);
    }

    #[test]
    fn prop_firmware_payload_is_transparent(
        payload in proptest::collection::vec(any::<u8>(), 1..2048),
    ) {
        let mut h = Harness::new();
        let ack = h.send(&format!("update cont {}\n", payload.len()));
        prop_assert_eq!(ack, "ok\r\n");

        let out = h.send_raw(&payload);
        prop_assert_eq!(out, b"ok\r\n".to_vec());
        prop_assert_eq!(h.firmware.chunks.len(), 1);
        prop_assert_eq!(&h.firmware.chunks[0], &payload);
        prop_assert!(!h.session.in_firmware_mode());
        prop_assert_eq!(h.send("ping\n"), "pong!\r\n");
    }

    #[test]
    fn prop_chunked_image_reassembles(
        image in proptest::collection::vec(any::<u8>(), 1..3 * MAX_FIRMWARE_CHUNK),
        chunk in 1usize..=MAX_FIRMWARE_CHUNK,
    ) {
        let mut h = Harness::new();
        prop_assert_eq!(h.send(&format!("update begin {}\n", image.len())), "ok\r\n");
        for part in image.chunks(chunk) {
            prop_assert_eq!(h.send(&format!("update cont {}\n", part.len())), "ok\r\n");
            prop_assert_eq!(h.send_raw(part), b"ok\r\n".to_vec());
        }
        prop_assert_eq!(h.send("update end\n"), "ok\r\n");
        prop_assert_eq!(h.firmware.image(), image);
    }

    #[test]
    fn prop_set_n_accepts_only_display_width(value in -20_000i64..20_000) {
        let mut h = Harness::new();
        h.send("set mode numb\n");
        let out = h.send(&format!("set n {value}\n"));
        if (0..=9999).contains(&value) {
            prop_assert_eq!(out, "ok\r\n");
            prop_assert_eq!(h.device.settings().number as i64, value);
        } else {
            prop_assert!(out.starts_with("error: "));
            prop_assert_eq!(h.device.settings().number, 0);
        }
    }
}
