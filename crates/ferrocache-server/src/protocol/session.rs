//! C8: the per-connection protocol state machine. Two states —
//! `CommandMode` and `DataMode` — owned exclusively by one connection and
//! replaced in place on each transition. This module is transport-free:
//! it consumes one already-framed line at a time and returns the bytes
//! to write back, so it can be driven by a real socket or by a test
//! harness identically.

use ferrocache_core::Cache;

use super::codec::{self, Command, SetHeader};
use crate::error::ProtocolError;

enum Mode {
    Command,
    Data { header: SetHeader, payload: Vec<u8> },
}

/// A connection's protocol state. Lives for the lifetime of one TCP
/// connection.
pub struct Session {
    mode: Mode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session always starts in `CommandMode`.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: Mode::Command }
    }

    /// Feeds one line — already stripped of its trailing `\r\n` by the
    /// caller's framer — into the state machine.
    ///
    /// Returns the bytes to write to the connection (may be empty, e.g.
    /// for `noreply` or while still accumulating a `DataMode` payload)
    /// and whether the caller should close the connection afterward.
    pub fn handle_line(&mut self, line: &str, cache: &Cache) -> (Vec<u8>, bool) {
        match std::mem::replace(&mut self.mode, Mode::Command) {
            Mode::Command => self.handle_command_line(line, cache),
            Mode::Data { header, payload } => self.handle_data_line(line, header, payload, cache),
        }
    }

    fn handle_command_line(&mut self, line: &str, cache: &Cache) -> (Vec<u8>, bool) {
        match codec::parse_command(line) {
            Ok(Command::Get(keys)) => {
                let mut out = Vec::new();
                for key in &keys {
                    // A key that fails the grammar (e.g. too long) is
                    // simply never a hit; it does not abort the rest of
                    // the multi-get.
                    if let Ok(Some(value)) = cache.get(key) {
                        out.extend_from_slice(&codec::format_value(key, &value));
                    }
                }
                out.extend_from_slice(codec::format_end());
                (out, false)
            }
            Ok(Command::Set(header)) => {
                self.mode = Mode::Data {
                    header,
                    payload: Vec::new(),
                };
                (Vec::new(), false)
            }
            Ok(Command::Quit) => (Vec::new(), true),
            Err(err) => (codec::format_error(&err), false),
        }
    }

    fn handle_data_line(
        &mut self,
        line: &str,
        header: SetHeader,
        mut payload: Vec<u8>,
        cache: &Cache,
    ) -> (Vec<u8>, bool) {
        payload.extend_from_slice(line.as_bytes());

        if payload.len() > header.bytes {
            self.mode = Mode::Command;
            let err = ProtocolError::ClientError("Data size exceeded".to_string());
            return (codec::format_error(&err), false);
        }

        if payload.len() == header.bytes {
            self.mode = Mode::Command;
            return match cache.put(&header.key, payload) {
                Ok(()) => {
                    if header.noreply {
                        (Vec::new(), false)
                    } else {
                        (codec::format_stored().to_vec(), false)
                    }
                }
                Err(err) => (codec::format_error(&ProtocolError::from(err)), false),
            };
        }

        // Still short of the declared length: the line framer stripped
        // this segment's trailing `\n`; put it back so the next segment
        // concatenates onto an accurate reconstruction of the original
        // payload (spec's line-reconstruction rule — `\r` is never
        // representable this way, a known limitation).
        payload.push(b'\n');
        self.mode = Mode::Data { header, payload };
        (Vec::new(), false)
    }
}
