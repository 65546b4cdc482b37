//! Unified error type.

use std::net::AddrParseError;

/// The error type returned by trellis's fallible infrastructure operations.
///
/// Application-level failures (unknown todo, malformed body) are expressed as
/// HTTP [`Response`](crate::Response) values, not as `Error`s. This type
/// surfaces the things that stop a server from running at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
