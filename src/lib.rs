//! Minimal DNS stub resolver speaking the wire protocol directly over UDP, and a TCP connect
//! latency prober.
//!
//! - [`packet`] contains the message codec: query encoding and response decoding, including
//!   name compression.
//! - [`resolver`] performs a single query/response exchange against a name server.
//! - [`ping`] measures how long it takes to open and close a TCP connection.
//! - [`sniff`] maps an application protocol to the query type and port to probe.

#![forbid(unaligned_references)]

mod addr;
mod error;
mod hex;
pub mod name;
mod num;
pub mod packet;
pub mod ping;
pub mod resolver;
pub mod sniff;

pub use addr::lookup;
pub use error::Error;

/// Size of the buffer replies are received into.
///
/// Plain DNS over UDP is limited to 512 Bytes, but servers that see EDNS from other clients are
/// not always strict about it.
pub const DNS_BUFFER_SIZE: usize = 4096;

/// The name server queried by default.
pub const DNS_DEFAULT_SERVER: std::net::Ipv4Addr = std::net::Ipv4Addr::new(1, 1, 1, 1);

/// The standard DNS port.
pub const DNS_DEFAULT_PORT: u16 = 53;
