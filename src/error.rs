use std::{fmt, io, net::SocketAddr};

use crate::packet;

/// Errors returned by the resolver and the TCP prober.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested query type is not one of `A`, `NS`, `CNAME`, `MX`, `AAAA` or `ANY`.
    UnsupportedQueryType(String),
    /// A label of the name to query is longer than 63 bytes.
    LabelTooLong,
    /// The name to query is otherwise unusable (empty interior label, or too long overall).
    InvalidName(packet::Error),
    /// The reply could not be decoded.
    MalformedMessage(packet::Error),
    /// The reply came from a different address than the one the query was sent to.
    ServerMismatch {
        expected: SocketAddr,
        actual: SocketAddr,
    },
    /// The reply's transaction ID does not match the query's.
    IdMismatch { expected: u16, actual: u16 },
    /// An I/O error from the underlying socket, including timeouts.
    Socket(io::Error),
    /// A probe failed after `completed` probes had succeeded.
    ProbeAborted { completed: usize, source: io::Error },
    /// The sniffed protocol has no default port and none was given.
    UnsupportedProtocol(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedQueryType(qtype) => write!(f, "query type '{}' not supported", qtype),
            Error::LabelTooLong => f.write_str("domain name label exceeds 63 bytes"),
            Error::InvalidName(e) => write!(f, "invalid domain name: {}", e),
            Error::MalformedMessage(e) => write!(f, "malformed response: {}", e),
            Error::ServerMismatch { expected, actual } => {
                write!(f, "bad packet from {} (expected {})", actual, expected)
            }
            Error::IdMismatch { expected, actual } => write!(
                f,
                "response transaction ID {:#06x} does not match query ID {:#06x}",
                actual, expected
            ),
            Error::Socket(e) => write!(f, "socket error: {}", e),
            Error::ProbeAborted { completed, source } => {
                write!(f, "probe failed after {} successful attempts: {}", completed, source)
            }
            Error::UnsupportedProtocol(proto) => write!(
                f,
                "sniff type '{}' not supported and no port specified",
                proto
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidName(e) | Error::MalformedMessage(e) => Some(e),
            Error::Socket(e) | Error::ProbeAborted { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Maps errors from building a query. Name errors keep their kind, anything else is reported as
/// a malformed message.
///
/// Errors from decoding a reply are always [`Error::MalformedMessage`] and are wrapped explicitly
/// by the resolver instead of going through this conversion.
impl From<packet::Error> for Error {
    fn from(e: packet::Error) -> Self {
        match e {
            packet::Error::LabelTooLong => Error::LabelTooLong,
            packet::Error::InvalidEmptyLabel | packet::Error::NameTooLong => Error::InvalidName(e),
            _ => Error::MalformedMessage(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Socket(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> io::Error {
        match e {
            Error::Socket(e) => e,
            Error::ProbeAborted { source, .. } => source,
            Error::UnsupportedQueryType(_)
            | Error::LabelTooLong
            | Error::InvalidName(_)
            | Error::UnsupportedProtocol(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
            _ => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
