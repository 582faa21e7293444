//! DNS message encoder and decoder.

#[macro_use]
mod macros;
pub mod decoder;
pub mod encoder;
mod error;
pub mod records;
pub mod section;

use core::fmt;
use std::mem::size_of;

use bitflags::bitflags;

use crate::num::U16;

pub use error::Error;

ffi_enum! {
    /// Server response codes.
    ///
    /// Only the low 4 bits of the second flags byte carry the response code, so values above 15
    /// cannot appear in a [`Header`].
    pub enum RCode: u8 {
        /// No error.
        NO_ERROR = 0,
        /// The query sent by the client was erroneous.
        FORM_ERR = 1,
        /// A server-side error prevented processing of the query.
        SERV_FAIL = 2,
        /// Signifies that the queried domain name does not exist.
        ///
        /// May only be sent by an authoritative name server.
        NX_DOMAIN = 3,
        /// The requested query type is not supported by the server.
        NOT_IMP = 4,
        /// The server refused to answer the query for policy reasons.
        REFUSED = 5,
    }
}

ffi_enum! {
    /// Resource Record types that this crate knows how to interpret.
    ///
    /// Records of any other type are still decoded, but their data is kept as raw bytes.
    pub enum Type: u16 {
        A = 1,
        NS = 2,
        CNAME = 5,
        MX = 15,
        AAAA = 28,
    }
}

ffi_enum! {
    /// The resource type a query asks for.
    ///
    /// This is the fixed set of types accepted by [`QType::from_name`] and by the resolver.
    pub enum QType: u16 {
        // Prefix is identical to `Type`.
        A = 1,
        NS = 2,
        CNAME = 5,
        MX = 15,
        AAAA = 28,

        /// Query is for all record types.
        ANY = 255,
    }
}

ffi_enum! {
    /// Resource Record classes.
    pub enum Class: u16 {
        /// The Internet.
        IN = 1,
    }
}

// Bit positions in the header flags are inverted, because RFC 1035 starts counting at the MSb.
const fn be_pos(pos: u16) -> u16 {
    15 - pos
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(transparent)]
    struct HeaderFlags: u16 {
        /// If set, the message is a response to a query. If unset, it is a query.
        const QR = 1 << be_pos(0);
        const OPCODE = 0b1111 << be_pos(4);
        /// Set if this response was sent from a name server that is the authority for the queried
        /// domain name.
        const AA = 1 << be_pos(5);
        /// Set if the message was truncated because it is longer than the maximum allowed length of
        /// the transmission channel.
        const TC = 1 << be_pos(6);
        /// Recursion Desired: asks the server to resolve the query recursively.
        const RD = 1 << be_pos(7);
        /// Recursion Available: set in a response if the server supports recursion.
        const RA = 1 << be_pos(8);
        const Z = 0b111 << be_pos(11);
        const RCODE = Self::RCODE_MASK;
    }
}

impl HeaderFlags {
    const RCODE_MASK: u16 = 0b1111;

    fn rcode(&self) -> RCode {
        RCode((self.bits() & Self::RCODE_MASK) as u8)
    }
}

/// Message header.
///
/// This is an exact overlay of the 12 header bytes at the start of every DNS message.
#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C, packed)]
pub struct Header {
    id: U16,
    flags: U16,
    qdcount: U16,
    ancount: U16,
    nscount: U16,
    arcount: U16,
}

impl Header {
    /// Size of the header in bytes.
    pub const LEN: usize = size_of::<Header>();

    /// Creates the header of a standard recursive query with a single question.
    pub fn query(id: u16) -> Self {
        let mut h = Header::default();
        h.set_id(id);
        h.set_recursion_desired(true);
        h.qdcount = 1.into();
        h
    }

    /// Reads the header from the start of `msg`.
    ///
    /// Returns `None` if `msg` is shorter than [`Header::LEN`].
    pub fn decode(msg: &[u8]) -> Option<Self> {
        msg.get(..Self::LEN).map(bytemuck::pod_read_unaligned)
    }

    /// Returns the raw wire representation of this header.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    fn flags(&self) -> HeaderFlags {
        HeaderFlags::from_bits_retain(self.flags.get())
    }

    fn modify_flags(&mut self, with: impl FnOnce(&mut HeaderFlags)) {
        let mut flags = self.flags();
        with(&mut flags);
        self.flags = flags.bits().into();
    }

    /// Returns the 16-bit transaction ID.
    ///
    /// Servers copy this ID to the corresponding response so that the client can match responses
    /// to its queries.
    #[inline]
    pub fn id(&self) -> u16 {
        self.id.get()
    }

    #[inline]
    pub fn set_id(&mut self, id: u16) {
        self.id = id.into();
    }

    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags().contains(HeaderFlags::QR)
    }

    /// Returns whether the truncation flag is set, indicating that the message was truncated to
    /// fit in the transport channel.
    pub fn is_truncated(&self) -> bool {
        self.flags().contains(HeaderFlags::TC)
    }

    pub fn is_recursion_desired(&self) -> bool {
        self.flags().contains(HeaderFlags::RD)
    }

    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.modify_flags(|f| f.set(HeaderFlags::RD, rd));
    }

    pub fn is_recursion_available(&self) -> bool {
        self.flags().contains(HeaderFlags::RA)
    }

    pub fn rcode(&self) -> RCode {
        self.flags().rcode()
    }

    pub fn question_count(&self) -> u16 {
        self.qdcount.get()
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount.get()
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount.get()
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount.get()
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("id", &self.id())
            .field("flags", &self.flags())
            .field("qdcount", &self.qdcount.get())
            .field("ancount", &self.ancount.get())
            .field("nscount", &self.nscount.get())
            .field("arcount", &self.arcount.get())
            .finish()
    }
}
