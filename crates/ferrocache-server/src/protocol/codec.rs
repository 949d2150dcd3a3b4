//! C9: pure parsing and formatting for the memcache text subset. No I/O —
//! everything here is a plain function over `&str`/`Vec<u8>`, unit-testable
//! in isolation from any socket.

use crate::error::ProtocolError;

/// A parsed command line in `CommandMode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `get <key> [<key> ...]`
    Get(Vec<String>),
    /// `set <key> <flags> <exptime> <bytes> [noreply]` — header only; the
    /// payload itself is accumulated separately in `DataMode`.
    Set(SetHeader),
    /// `quit`
    Quit,
}

/// The parsed header of a `set` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetHeader {
    /// Key to store under.
    pub key: String,
    /// Client-supplied flags. Accepted and parsed but never round-tripped
    /// on emit (the `VALUE` response always reports flags as `0`).
    pub flags: u32,
    /// Client-supplied expiration. Parsed but ignored — this protocol
    /// subset has no expiration semantics.
    pub exptime: i64,
    /// Declared payload length in bytes.
    pub bytes: usize,
    /// If set, the server suppresses the `STORED` acknowledgement.
    pub noreply: bool,
}

/// Parses one `CommandMode` line (already stripped of its trailing
/// `\r\n`) into a [`Command`].
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidCommand`] for an unrecognized verb or
/// a malformed header (missing tokens or an unparseable number).
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(ProtocolError::InvalidCommand)?;

    match verb {
        "get" => {
            let keys: Vec<String> = tokens.map(str::to_string).collect();
            if keys.is_empty() {
                return Err(ProtocolError::InvalidCommand);
            }
            Ok(Command::Get(keys))
        }
        "set" => parse_set_header(tokens).map(Command::Set),
        "quit" => Ok(Command::Quit),
        _ => Err(ProtocolError::InvalidCommand),
    }
}

fn parse_set_header<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<SetHeader, ProtocolError> {
    let key = tokens.next().ok_or(ProtocolError::InvalidCommand)?.to_string();
    let flags = tokens
        .next()
        .ok_or(ProtocolError::InvalidCommand)?
        .parse::<u32>()
        .map_err(|_| ProtocolError::InvalidCommand)?;
    let exptime = tokens
        .next()
        .ok_or(ProtocolError::InvalidCommand)?
        .parse::<i64>()
        .map_err(|_| ProtocolError::InvalidCommand)?;
    let bytes = tokens
        .next()
        .ok_or(ProtocolError::InvalidCommand)?
        .parse::<usize>()
        .map_err(|_| ProtocolError::InvalidCommand)?;

    let noreply = match tokens.next() {
        None => false,
        Some("noreply") => true,
        Some(_) => return Err(ProtocolError::InvalidCommand),
    };

    if tokens.next().is_some() {
        return Err(ProtocolError::InvalidCommand);
    }

    Ok(SetHeader {
        key,
        flags,
        exptime,
        bytes,
        noreply,
    })
}

/// Formats a single cache hit as a `VALUE` line. Flags are always
/// reported as `0`; the stored flag value is never round-tripped (spec
/// Open Question OQ3 — see DESIGN.md).
#[must_use]
pub fn format_value(key: &str, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + value.len() + 32);
    out.extend_from_slice(format!("VALUE {key} 0 {}\r\n", value.len()).as_bytes());
    out.extend_from_slice(value);
    out.extend_from_slice(b"\r\n");
    out
}

/// `END\r\n`, terminator for a `get` response.
#[must_use]
pub fn format_end() -> &'static [u8] {
    b"END\r\n"
}

/// `STORED\r\n`, acknowledgement for a successful `set`.
#[must_use]
pub fn format_stored() -> &'static [u8] {
    b"STORED\r\n"
}

/// Renders a [`ProtocolError`] to its exact wire text.
#[must_use]
pub fn format_error(err: &ProtocolError) -> Vec<u8> {
    match err {
        ProtocolError::InvalidCommand => b"ERROR\r\n".to_vec(),
        ProtocolError::ClientError(reason) => format!("CLIENT_ERROR {reason}\r\n").into_bytes(),
        ProtocolError::ServerError(reason) => format!("SERVER_ERROR {reason}\r\n").into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_single_key() {
        assert_eq!(
            parse_command("get key1").unwrap(),
            Command::Get(vec!["key1".to_string()])
        );
    }

    #[test]
    fn parses_get_with_multiple_keys() {
        assert_eq!(
            parse_command("get key1 missing").unwrap(),
            Command::Get(vec!["key1".to_string(), "missing".to_string()])
        );
    }

    #[test]
    fn get_with_no_keys_is_invalid() {
        assert_eq!(parse_command("get").unwrap_err(), ProtocolError::InvalidCommand);
    }

    #[test]
    fn parses_set_header() {
        let cmd = parse_command("set key1 0 0 6").unwrap();
        assert_eq!(
            cmd,
            Command::Set(SetHeader {
                key: "key1".to_string(),
                flags: 0,
                exptime: 0,
                bytes: 6,
                noreply: false,
            })
        );
    }

    #[test]
    fn parses_set_header_with_noreply() {
        let cmd = parse_command("set key1 0 0 6 noreply").unwrap();
        assert_eq!(
            cmd,
            Command::Set(SetHeader {
                key: "key1".to_string(),
                flags: 0,
                exptime: 0,
                bytes: 6,
                noreply: true,
            })
        );
    }

    #[test]
    fn set_with_unknown_trailing_token_is_invalid() {
        assert_eq!(
            parse_command("set key1 0 0 6 bogus").unwrap_err(),
            ProtocolError::InvalidCommand
        );
    }

    #[test]
    fn set_with_too_few_tokens_is_invalid() {
        assert_eq!(parse_command("set key1 0 0").unwrap_err(), ProtocolError::InvalidCommand);
    }

    #[test]
    fn set_with_unparseable_number_is_invalid() {
        assert_eq!(
            parse_command("set key1 notaflag 0 6").unwrap_err(),
            ProtocolError::InvalidCommand
        );
    }

    #[test]
    fn quit_parses() {
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn unknown_verb_is_invalid() {
        assert_eq!(parse_command("foo bar").unwrap_err(), ProtocolError::InvalidCommand);
    }

    #[test]
    fn empty_line_is_invalid() {
        assert_eq!(parse_command("").unwrap_err(), ProtocolError::InvalidCommand);
    }

    #[test]
    fn format_value_round_trips_through_a_conformant_parser() {
        let encoded = format_value("key1", b"value1");
        let mut expected = b"VALUE key1 0 6\r\n".to_vec();
        expected.extend_from_slice(b"value1\r\n");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn format_error_renders_each_category() {
        assert_eq!(format_error(&ProtocolError::InvalidCommand), b"ERROR\r\n");
        assert_eq!(
            format_error(&ProtocolError::ClientError("Data size exceeded".to_string())),
            b"CLIENT_ERROR Data size exceeded\r\n"
        );
        assert_eq!(
            format_error(&ProtocolError::ServerError("oom".to_string())),
            b"SERVER_ERROR oom\r\n"
        );
    }
}
