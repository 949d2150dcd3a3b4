//! Bounded line framer: the transport collaborator spec §6 names
//! ("line framer ... enforces a maximum frame length of 8192 bytes and
//! delivers one payload per line"). `tokio::io::BufReader::lines()` has
//! no such cap on its own — a client that never sends a `\n` would grow
//! the accumulating `String` without bound — so this reads directly off
//! `AsyncBufRead::fill_buf`/`consume` and tracks the running frame length
//! itself.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Maximum bytes a single frame (one line) may contain before the framer
/// reports it as oversize, per spec §6.
pub const MAX_FRAME_BYTES: usize = 8192;

/// One frame read off the wire.
pub enum Frame {
    /// A complete `\n`-terminated line, with a trailing `\r` stripped.
    Line(String),
    /// The line exceeded `MAX_FRAME_BYTES` before a terminator appeared.
    /// Bytes up to and including the next `\n` have already been
    /// discarded, so the stream is resynchronized for the caller's next
    /// read.
    Oversize,
    /// Clean end of stream: the peer closed the connection.
    Eof,
}

/// Reads the next frame from `reader`.
///
/// # Errors
///
/// Returns the underlying I/O error on a read fault.
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut total_len = 0usize;
    let mut oversize = false;

    loop {
        let available = reader.fill_buf().await?;

        if available.is_empty() {
            if total_len == 0 {
                return Ok(Frame::Eof);
            }
            return Ok(finish(&mut line, oversize));
        }

        let (segment, terminated) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (&available[..pos], true),
            None => (available, false),
        };

        total_len += segment.len();
        if oversize {
            // Already over the cap; nothing more to accumulate, just
            // keep discarding until the terminator shows up.
        } else if total_len > MAX_FRAME_BYTES {
            oversize = true;
            line.clear();
            line.shrink_to_fit();
        } else {
            line.extend_from_slice(segment);
        }

        let consumed = segment.len() + usize::from(terminated);
        reader.consume(consumed);

        if terminated {
            return Ok(finish(&mut line, oversize));
        }
    }
}

fn finish(line: &mut Vec<u8>, oversize: bool) -> Frame {
    if oversize {
        return Frame::Oversize;
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Frame::Line(String::from_utf8_lossy(line).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::BufReader;

    async fn next(reader: &mut (impl AsyncBufRead + Unpin)) -> Frame {
        read_frame(reader).await.unwrap()
    }

    #[tokio::test]
    async fn reads_a_plain_line_stripping_crlf() {
        let mut reader = BufReader::new(Cursor::new(b"get key1\r\n".to_vec()));
        match next(&mut reader).await {
            Frame::Line(line) => assert_eq!(line, "get key1"),
            _ => panic!("expected a line"),
        }
    }

    #[tokio::test]
    async fn reads_successive_lines_in_order() {
        let mut reader = BufReader::new(Cursor::new(b"quit\r\nget a\r\n".to_vec()));
        match next(&mut reader).await {
            Frame::Line(line) => assert_eq!(line, "quit"),
            _ => panic!("expected a line"),
        }
        match next(&mut reader).await {
            Frame::Line(line) => assert_eq!(line, "get a"),
            _ => panic!("expected a line"),
        }
    }

    #[tokio::test]
    async fn clean_eof_with_no_data_is_eof() {
        let mut reader = BufReader::new(Cursor::new(Vec::new()));
        assert!(matches!(next(&mut reader).await, Frame::Eof));
    }

    #[tokio::test]
    async fn line_over_the_cap_is_reported_oversize_and_resynchronizes() {
        let mut body = vec![b'a'; MAX_FRAME_BYTES + 1];
        body.push(b'\n');
        body.extend_from_slice(b"get ok\r\n");
        let mut reader = BufReader::new(Cursor::new(body));

        assert!(matches!(next(&mut reader).await, Frame::Oversize));
        match next(&mut reader).await {
            Frame::Line(line) => assert_eq!(line, "get ok"),
            _ => panic!("expected the next line to parse cleanly after resync"),
        }
    }

    #[tokio::test]
    async fn line_exactly_at_the_cap_is_not_oversize() {
        let body = vec![b'a'; MAX_FRAME_BYTES];
        let mut data = body;
        data.push(b'\n');
        let mut reader = BufReader::new(Cursor::new(data));

        match next(&mut reader).await {
            Frame::Line(line) => assert_eq!(line.len(), MAX_FRAME_BYTES),
            _ => panic!("expected a line, not oversize"),
        }
    }
}
