//! The protocol layer (C8/C9): a transport-free state machine (`session`)
//! backed by a pure parser/formatter (`codec`), plus the `tokio`-based
//! glue (`connection`) that drives the state machine over a real socket.

pub mod codec;
pub mod connection;
mod framer;
pub mod session;

pub use session::Session;
