//! DNS name resolution.

use std::{
    net::{IpAddr, SocketAddr, UdpSocket},
    time::Duration,
};

use crate::{
    addr::unspecified_for,
    hex::Hex,
    packet::{
        self,
        decoder::{decode_response, Response},
        encoder::Query,
        Header, QType,
    },
    Error, DNS_BUFFER_SIZE, DNS_DEFAULT_PORT, DNS_DEFAULT_SERVER,
};

/// A simple, synchronous, non-recursive DNS stub resolver.
///
/// Every query uses a fresh UDP socket that is closed again before the query returns. There is
/// no retransmission: a lost query or reply is reported as a timeout.
#[derive(Debug, Clone)]
pub struct SyncResolver {
    server: SocketAddr,
    timeout: Option<Duration>,
}

impl SyncResolver {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new DNS resolver that will contact the given server.
    pub fn new(server: SocketAddr) -> Self {
        Self {
            server,
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Returns the address of the name server queries are sent to.
    #[inline]
    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Sets how long to wait for the reply.
    ///
    /// `None` waits indefinitely. A zero duration is rejected by the socket when the next query is
    /// sent.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Attempts to resolve `hostname` (text or raw bytes) to records of type `qtype`.
    ///
    /// `qtype` is one of `A`, `NS`, `CNAME`, `MX`, `AAAA` or `ANY`, in any case.
    ///
    /// If the query times out, an [`Error::Socket`] of kind [`std::io::ErrorKind::WouldBlock`]
    /// or [`std::io::ErrorKind::TimedOut`] will be returned.
    ///
    /// The resolver does not perform recursive resolution (it is a "stub resolver"). It does set
    /// the `RD` bit in the query, which instructs the server to perform recursion.
    pub fn resolve(&self, hostname: impl AsRef<[u8]>, qtype: &str) -> Result<Response, Error> {
        let qtype = parse_qtype(qtype)?;
        let query = Query::new(hostname, qtype)?;
        self.resolve_query(&query)
    }

    /// Sends `query` to the configured server and decodes the reply.
    pub fn resolve_query(&self, query: &Query) -> Result<Response, Error> {
        let encoded = query.encode();

        log::trace!(
            "resolving '{}' ({}) via {}, raw query: {}",
            query.name(),
            query.qtype(),
            self.server,
            Hex(encoded.as_bytes())
        );

        let mut recv_buf = [0; DNS_BUFFER_SIZE];
        let (len, addr) = {
            let sock = UdpSocket::bind(unspecified_for(&self.server))?;
            sock.set_read_timeout(self.timeout)?;
            sock.send_to(encoded.as_bytes(), self.server)?;
            sock.recv_from(&mut recv_buf)?
        };
        let recv = &recv_buf[..len];
        log::trace!("recv from {}: {}", addr, Hex(recv));

        if addr != self.server {
            log::warn!("discarding reply from {}, expected {}", addr, self.server);
            return Err(Error::ServerMismatch {
                expected: self.server,
                actual: addr,
            });
        }

        decode_reply(recv, encoded.id())
    }
}

impl Default for SyncResolver {
    /// Creates a resolver using [`DNS_DEFAULT_SERVER`] on port [`DNS_DEFAULT_PORT`].
    fn default() -> Self {
        Self::new((DNS_DEFAULT_SERVER, DNS_DEFAULT_PORT).into())
    }
}

/// Resolves `hostname` using the default server, [`DNS_DEFAULT_SERVER`].
///
/// See [`SyncResolver::resolve`].
pub fn resolve(hostname: impl AsRef<[u8]>, qtype: &str) -> Result<Response, Error> {
    SyncResolver::default().resolve(hostname, qtype)
}

/// Resolves `hostname` by querying the name server at `server`:`port`.
///
/// See [`SyncResolver::resolve`].
pub fn resolve_via(
    hostname: impl AsRef<[u8]>,
    qtype: &str,
    server: IpAddr,
    port: u16,
) -> Result<Response, Error> {
    SyncResolver::new(SocketAddr::new(server, port)).resolve(hostname, qtype)
}

/// Parses a query type name, ignoring ASCII case.
pub fn parse_qtype(name: &str) -> Result<QType, Error> {
    QType::from_name(name).ok_or_else(|| Error::UnsupportedQueryType(name.to_string()))
}

/// Checks the transaction ID of a reply and decodes it.
fn decode_reply(msg: &[u8], id: u16) -> Result<Response, Error> {
    let header = Header::decode(msg).ok_or(Error::MalformedMessage(packet::Error::Eof))?;
    if header.id() != id {
        log::warn!(
            "discarding reply with ID {:#06x}, expected {:#06x}",
            header.id(),
            id
        );
        return Err(Error::IdMismatch {
            expected: id,
            actual: header.id(),
        });
    }

    let response = decode_response(msg).map_err(Error::MalformedMessage)?;
    for ans in response.answers() {
        log::debug!("ANS: {}", ans);
    }
    Ok(response)
}
