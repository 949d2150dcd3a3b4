//! ferrocache-server: the TCP front end for ferrocache.
//!
//! Owns the protocol state machine and codec (C8/C9) and the
//! bootstrap/accept-loop collaborators the cache engine itself stays
//! agnostic of: CLI parsing, logging setup, and the per-connection
//! `tokio` task that drives [`protocol::Session`] over a socket.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod protocol;

pub use error::ProtocolError;
pub use protocol::{connection, Session};
