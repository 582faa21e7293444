//! DNS query encoder.

use bytemuck::Zeroable;

use crate::{hex::Hex, name::DomainName};

use super::{Class, Error, Header, QType};

pub(crate) struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::with_capacity(Header::LEN + DomainName::MAX_LEN + 4),
        }
    }

    fn modify_header(&mut self, with: impl FnOnce(&mut Header)) {
        let h = bytemuck::from_bytes_mut(&mut self.buf[..Header::LEN]);
        with(h);
    }

    pub(crate) fn write_slice(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub(crate) fn write_u8(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub(crate) fn write_u16(&mut self, v: u16) {
        self.write_slice(&v.to_be_bytes());
    }

    pub(crate) fn write_domain_name(&mut self, name: &DomainName) {
        for label in name.labels() {
            // `Label` guarantees at most 63 bytes.
            self.write_u8(label.as_bytes().len() as u8);
            self.write_slice(label.as_bytes());
        }
        // Implicit root label at the end.
        self.write_u8(0);
    }
}

/// Encoder for query messages.
///
/// Only the *Question* section can be written; queries carry no records.
pub struct MessageEncoder {
    w: Writer,
    qdcount: u16,
}

impl MessageEncoder {
    /// Creates a new message encoder with an all-zero header.
    pub fn new() -> Self {
        let mut w = Writer::new();
        w.write_slice(Header::zeroed().as_bytes());
        Self { w, qdcount: 0 }
    }

    /// Overrides the whole message header.
    ///
    /// The question count is overwritten by [`MessageEncoder::finish`] to match the questions that
    /// were actually added.
    pub fn set_header(&mut self, header: Header) {
        self.w.modify_header(|h| *h = header);
    }

    /// Adds a question to the *Question* section.
    pub fn question(&mut self, question: Question<'_>) {
        self.w.write_domain_name(question.name);
        self.w.write_u16(question.ty.0);
        self.w.write_u16(question.class.0);
        self.qdcount += 1;
    }

    /// Finishes encoding the message and returns its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let qdcount = self.qdcount;
        self.w.modify_header(|h| h.qdcount = qdcount.into());
        self.w.buf
    }
}

impl Default for MessageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Question<'a> {
    name: &'a DomainName,
    class: Class,
    ty: QType,
}

impl<'a> Question<'a> {
    /// Creates a question asking for `A` records in the internet class ([`Class::IN`])
    /// pertaining to `name`.
    #[inline]
    pub fn new(name: &'a DomainName) -> Self {
        Self {
            name,
            class: Class::IN,
            ty: QType::A,
        }
    }

    /// Sets the record class to query.
    #[inline]
    pub fn class(self, class: Class) -> Self {
        Self { class, ..self }
    }

    /// Sets the resource type to query.
    #[inline]
    pub fn ty(self, ty: QType) -> Self {
        Self { ty, ..self }
    }
}

/// A single-question query for a name.
///
/// Queries are immutable. Every call to [`Query::encode`] draws a fresh transaction ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    name: DomainName,
    qtype: QType,
    qclass: Class,
}

impl Query {
    /// Creates a query for `name`, given as text or raw bytes.
    ///
    /// Leading and trailing dots are ignored. Fails if a label is empty or longer than 63 bytes,
    /// or if the whole name is longer than 255 bytes.
    pub fn new(name: impl AsRef<[u8]>, qtype: QType) -> Result<Self, Error> {
        Ok(Self::for_domain(DomainName::from_bytes(name.as_ref())?, qtype))
    }

    /// Creates a query for an already parsed [`DomainName`].
    pub fn for_domain(name: DomainName, qtype: QType) -> Self {
        Self {
            name,
            qtype,
            qclass: Class::IN,
        }
    }

    #[inline]
    pub fn name(&self) -> &DomainName {
        &self.name
    }

    #[inline]
    pub fn qtype(&self) -> QType {
        self.qtype
    }

    #[inline]
    pub fn qclass(&self) -> Class {
        self.qclass
    }

    /// Encodes the query with a random transaction ID.
    pub fn encode(&self) -> EncodedQuery {
        self.encode_with_id(fastrand::u16(..))
    }

    /// Encodes the query with the given transaction ID.
    pub fn encode_with_id(&self, id: u16) -> EncodedQuery {
        let mut enc = MessageEncoder::new();
        enc.set_header(Header::query(id));
        enc.question(Question::new(&self.name).ty(self.qtype).class(self.qclass));
        let bytes = enc.finish();
        log::trace!("encoded query for '{}': {}", self.name, Hex(&bytes));
        EncodedQuery { id, bytes }
    }
}

/// An encoded query message, together with the transaction ID it was sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedQuery {
    id: u16,
    bytes: Vec<u8>,
}

impl EncodedQuery {
    /// Returns the transaction ID; the reply must carry the same one.
    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes a query for `name` with a random transaction ID.
///
/// This is shorthand for [`Query::new`] followed by [`Query::encode`].
pub fn encode_query(
    name: impl AsRef<[u8]>,
    qtype: QType,
    qclass: Class,
) -> Result<EncodedQuery, Error> {
    let mut query = Query::new(name, qtype)?;
    query.qclass = qclass;
    Ok(query.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex, packet::decoder::decode_name};

    #[test]
    fn encode_example_com() {
        let query = encode_query("example.com", QType::A, Class::IN).unwrap();
        let bytes = query.as_bytes();
        assert_eq!(&bytes[..2], query.id().to_be_bytes());
        assert_eq!(
            &bytes[2..],
            hex::parse("0100 0001 0000 0000 0000 07 6578616d706c65 03 636f6d 00 0001 0001")
        );
    }

    #[test]
    fn encode_with_id() {
        let query = Query::new(b"a.b.", QType::AAAA).unwrap();
        assert_eq!(
            query.encode_with_id(0xbeef).into_bytes(),
            hex::parse("beef 0100 0001 0000 0000 0000 0161 0162 00 001c 0001")
        );
    }

    #[test]
    fn encode_root() {
        let query = Query::new(".", QType::NS).unwrap();
        assert!(query.name().is_root());
        assert_eq!(&query.encode().as_bytes()[12..], hex::parse("00 0002 0001"));
    }

    #[test]
    fn encode_label_limit() {
        let ok = format!("{}.com", "a".repeat(63));
        assert!(encode_query(&ok, QType::A, Class::IN).is_ok());

        let too_long = format!("{}.com", "a".repeat(64));
        assert_eq!(
            encode_query(&too_long, QType::A, Class::IN),
            Err(Error::LabelTooLong)
        );
        assert_eq!(
            encode_query("a..com", QType::A, Class::IN),
            Err(Error::InvalidEmptyLabel)
        );
    }

    #[test]
    fn encode_decode_name() {
        for name in [
            "example.com",
            "a",
            "xn--bcher-kva.example",
            "_sip._udp.example.org",
            format!("{}.{}", "x".repeat(63), "y".repeat(63)).as_str(),
        ] {
            let query = encode_query(name, QType::A, Class::IN).unwrap();
            let (len, decoded) = decode_name(query.as_bytes(), Header::LEN).unwrap();
            assert_eq!(decoded, name.parse().unwrap());
            assert_eq!(decoded.to_string(), name);
            assert_eq!(len, query.as_bytes().len() - Header::LEN - 4);
        }
    }

    #[test]
    fn random_ids() {
        let query = Query::new("example.com", QType::A).unwrap();
        let ids: std::collections::HashSet<u16> = (0..64).map(|_| query.encode().id()).collect();
        // 64 draws from 65536 values are all identical with negligible probability.
        assert!(ids.len() > 1);
    }
}
