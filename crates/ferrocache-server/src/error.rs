//! Wire-visible protocol error categories.

use thiserror::Error;

/// The three distinct wire-error categories the protocol state machine
/// can emit. Each maps 1:1 onto a response line formatted by the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Unknown verb or malformed command header — rendered as `ERROR`.
    #[error("invalid command")]
    InvalidCommand,
    /// Well-formed but semantically invalid request — rendered as
    /// `CLIENT_ERROR <reason>`.
    #[error("client error: {0}")]
    ClientError(String),
    /// Internal fault surfaced on the hot path — rendered as
    /// `SERVER_ERROR <reason>`.
    #[error("server error: {0}")]
    ServerError(String),
}

impl From<ferrocache_core::Error> for ProtocolError {
    fn from(err: ferrocache_core::Error) -> Self {
        match err {
            ferrocache_core::Error::InvalidKey(key) => {
                ProtocolError::ClientError(format!("bad key: {key}"))
            }
        }
    }
}
