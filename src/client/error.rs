// ABOUTME: Client error types covering transport, protocol, and encoding failures
// ABOUTME: Every variant carries the operation name so failures diagnose themselves

use crate::codec::{DecodeError, EncodeError};
use crate::datatypes::ParamKey;
use std::io;
use thiserror::Error;

/// Error type for every client operation.
///
/// The taxonomy is closed: transport failures (including deadline expiry),
/// protocol violations in a received reply, encoding preconditions that fail
/// before any I/O, and operations the protocol lists but this client does
/// not implement. Nothing is retried and nothing defaults; callers own any
/// retry policy.
#[derive(Debug, Error)]
pub enum Error {
    /// Connect, send, or receive failed, or the reply deadline expired.
    #[error("transport failure during '{command}': {source}")]
    Transport {
        command: &'static str,
        #[source]
        source: io::Error,
    },

    /// A reply arrived but did not decode against the command's reply shape.
    #[error("bad reply to '{command}': {source}")]
    Protocol {
        command: &'static str,
        #[source]
        source: DecodeError,
    },

    /// A parameter value could not be rendered into a wire-safe frame.
    #[error("cannot encode '{command}': {source}")]
    Encoding {
        command: &'static str,
        #[source]
        source: EncodeError,
    },

    /// The command's descriptor requires a parameter the call did not supply.
    #[error("'{command}' requires parameter '{key}'")]
    MissingParameter {
        command: &'static str,
        key: ParamKey,
    },

    /// A wall-clock input predates the Unix epoch and has no wire rendering.
    #[error("'{command}': time predates the Unix epoch")]
    InvalidTime { command: &'static str },

    /// Listed by the protocol but deliberately not implemented; fails before
    /// any I/O.
    #[error("'{0}' is not implemented")]
    Unimplemented(&'static str),
}

/// Coarse classification of an [`Error`], for callers deciding whether a
/// failure is worth retrying or reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The router could not be reached or went quiet.
    Transport,
    /// The router answered with something undecodable.
    Protocol,
    /// The request never left this process.
    Encoding,
    /// The operation is a documented gap, not a failure.
    Unimplemented,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Encoding { .. } | Error::MissingParameter { .. } | Error::InvalidTime { .. } => {
                ErrorKind::Encoding
            }
            Error::Unimplemented(_) => ErrorKind::Unimplemented,
        }
    }

    pub(crate) fn transport(command: &'static str, source: io::Error) -> Self {
        Error::Transport { command, source }
    }

    pub(crate) fn protocol(command: &'static str, source: DecodeError) -> Self {
        Error::Protocol { command, source }
    }

    pub(crate) fn encoding(command: &'static str, source: EncodeError) -> Self {
        Error::Encoding { command, source }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
