use thiserror::Error;

use crate::{
    client::{ClientInitError, RemotePlusError, response::ParseError},
    config::MissingEnvVarError,
    models::{query::QueryError, result_set::AccessError},
};

/// The unified error type for the `remoteplus_client` crate.
///
/// Each subsystem keeps its own precise error; this wrapper exists so callers
/// who drive the whole build/send/access pipeline can use one `?`-friendly
/// type end to end.
#[derive(Debug, Error)]
pub enum Error {
    /// An error while assembling a query (e.g. an unparsable as-of date).
    #[error("Query error")]
    Query(#[from] QueryError),

    /// An error while constructing the client.
    #[error("Client initialization error")]
    Init(#[from] ClientInitError),

    /// A transport- or provider-level failure during the request cycle.
    #[error("Remote Plus request error")]
    Request(#[from] RemotePlusError),

    /// A standalone parse failure (also reachable wrapped inside
    /// [`RemotePlusError::Malformed`] when raised by `run`).
    #[error("Response parse error")]
    Parse(#[from] ParseError),

    /// Misuse of the result accessors, or a sentinel non-value.
    #[error("Result access error")]
    Access(#[from] AccessError),

    /// A required environment variable is not set.
    #[error("Configuration error")]
    Config(#[from] MissingEnvVarError),
}
