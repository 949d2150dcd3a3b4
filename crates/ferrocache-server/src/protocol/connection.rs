//! Drives one [`Session`] over a real `tokio` socket: reads `\r\n`-framed
//! lines, feeds them to the state machine, and writes back whatever it
//! returns. One connection is one `tokio::spawn`ed task (spec §5).

use std::sync::Arc;

use ferrocache_core::Cache;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::codec;
use super::framer::{self, Frame};
use super::session::Session;
use crate::error::ProtocolError;

/// Reads and responds to commands on `stream` until the client quits,
/// disconnects, or a transport I/O fault occurs. Transport faults close
/// the connection and are logged, never propagated — each connection
/// task is independent (spec §7).
pub async fn handle(stream: TcpStream, cache: Arc<Cache>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());

    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = Session::new();

    loop {
        let line = match framer::read_frame(&mut reader).await {
            Ok(Frame::Line(line)) => line,
            Ok(Frame::Eof) => break, // client closed the connection
            Ok(Frame::Oversize) => {
                let err = ProtocolError::ClientError(format!(
                    "line exceeds {} bytes",
                    framer::MAX_FRAME_BYTES
                ));
                if let Err(err) = writer.write_all(&codec::format_error(&err)).await {
                    tracing::warn!(%peer, error = %err, "write failed, closing connection");
                    break;
                }
                continue;
            }
            Err(err) => {
                tracing::warn!(%peer, error = %err, "transport I/O fault, closing connection");
                break;
            }
        };

        let (response, should_close) = session.handle_line(&line, &cache);

        if !response.is_empty() {
            if let Err(err) = writer.write_all(&response).await {
                tracing::warn!(%peer, error = %err, "write failed, closing connection");
                break;
            }
        }

        if should_close {
            break;
        }
    }

    tracing::debug!(%peer, "connection closed");
}
