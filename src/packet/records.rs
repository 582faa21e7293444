//! DNS record data.
//!
//! This module contains types representing the record data (RDATA) of the resource record types
//! this crate interprets. Data of every other type is kept as raw bytes in [`Record::Other`].

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

use crate::{hex::Hex, name::DomainName};

use super::{decoder::Reader, Error, Type};

pub struct ResourceRecordDecoder<'a> {
    pub(crate) r: Reader<'a>,
}

impl<'a> ResourceRecordDecoder<'a> {
    /// Fails with [`Error::InvalidValue`] if any RDATA was left unread.
    fn finish(&self) -> Result<(), Error> {
        if self.r.buf().is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidValue)
        }
    }
}

/// Trait implemented by all interpreted record data types.
pub trait ResourceRecordData: Sized {
    /// The associated resource record type.
    const TYPE: Type;

    /// Attempts to decode an instance of this record from an RDATA field.
    ///
    /// The decoder's reader can still see the whole message before the RDATA, so compressed
    /// names in the RDATA resolve against the enclosing message.
    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error>;
}

macro_rules! records {
    (
        $($record:ident),+ $(,)?
    ) => {
        /// Decoded record data of a resource record.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Record {
            $( $record($record), )+
            /// Uninterpreted data of any other record type.
            Other(Box<[u8]>),
        }

        impl Record {
            pub(crate) fn decode(ty: Type, rdata: Reader<'_>) -> Result<Self, Error> {
                let r = &mut ResourceRecordDecoder { r: rdata };
                match ty {
                    $( Type::$record => $record::decode(r).map(Self::$record), )+
                    _ => Ok(Self::Other(r.r.buf().into())),
                }
            }

            /// Returns the record type of the data, or `None` for [`Record::Other`].
            pub fn record_type(&self) -> Option<Type> {
                match self {
                    $( Record::$record(_) => Some($record::TYPE), )+
                    Record::Other(_) => None,
                }
            }
        }

        impl fmt::Display for Record {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( Record::$record(r) => fmt::Display::fmt(r, f), )+
                    Record::Other(data) => write!(f, "\\# {} {}", data.len(), Hex(data)),
                }
            }
        }
    };
}

records!(A, AAAA, CNAME, NS, MX);

impl Record {
    /// Returns the address carried by an `A` or `AAAA` record.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Record::A(a) => Some(a.addr().into()),
            Record::AAAA(a) => Some(a.addr().into()),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct A {
    addr: Ipv4Addr,
}

impl ResourceRecordData for A {
    const TYPE: Type = Type::A;

    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error> {
        let addr = Ipv4Addr::from(*dec.r.read_array()?);
        dec.finish()?;
        Ok(Self { addr })
    }
}

impl A {
    #[inline]
    pub fn new(addr: Ipv4Addr) -> Self {
        Self { addr }
    }

    #[inline]
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AAAA {
    addr: Ipv6Addr,
}

impl ResourceRecordData for AAAA {
    const TYPE: Type = Type::AAAA;

    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error> {
        let addr = Ipv6Addr::from(*dec.r.read_array()?);
        dec.finish()?;
        Ok(Self { addr })
    }
}

impl AAAA {
    #[inline]
    pub fn new(addr: Ipv6Addr) -> Self {
        Self { addr }
    }

    #[inline]
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }
}

impl fmt::Display for AAAA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CNAME {
    name: DomainName,
}

impl ResourceRecordData for CNAME {
    const TYPE: Type = Type::CNAME;

    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error> {
        Ok(Self {
            name: dec.r.read_domain_name()?,
        })
    }
}

impl CNAME {
    pub fn new(name: DomainName) -> Self {
        Self { name }
    }

    #[inline]
    pub fn cname(&self) -> &DomainName {
        &self.name
    }
}

impl fmt::Display for CNAME {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NS {
    nsdname: DomainName,
}

impl ResourceRecordData for NS {
    const TYPE: Type = Type::NS;

    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error> {
        Ok(Self {
            nsdname: dec.r.read_domain_name()?,
        })
    }
}

impl NS {
    pub fn new(nsdname: DomainName) -> Self {
        Self { nsdname }
    }

    pub fn nsdname(&self) -> &DomainName {
        &self.nsdname
    }
}

impl fmt::Display for NS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.nsdname, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MX {
    preference: u16,
    exchange: DomainName,
}

impl ResourceRecordData for MX {
    const TYPE: Type = Type::MX;

    fn decode(dec: &mut ResourceRecordDecoder<'_>) -> Result<Self, Error> {
        Ok(Self {
            preference: dec.r.read_u16()?,
            exchange: dec.r.read_domain_name()?,
        })
    }
}

impl MX {
    pub fn new(preference: u16, exchange: DomainName) -> Self {
        Self {
            preference,
            exchange,
        }
    }

    #[inline]
    pub fn preference(&self) -> u16 {
        self.preference
    }

    #[inline]
    pub fn exchange(&self) -> &DomainName {
        &self.exchange
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    fn decode(ty: Type, rdata: &[u8]) -> Result<Record, Error> {
        Record::decode(ty, Reader::new(rdata))
    }

    fn domain(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    #[test]
    fn decode_addresses() {
        assert_eq!(
            decode(Type::A, &[93, 184, 216, 34]),
            Ok(Record::A(A::new(Ipv4Addr::new(93, 184, 216, 34))))
        );
        let v6 = decode(Type::AAAA, &hex::parse("2606 2800 0220 0001 0248 1893 25c8 1946"));
        assert_eq!(v6.unwrap().to_string(), "2606:2800:220:1:248:1893:25c8:1946");
        assert_eq!(
            decode(Type::AAAA, &Ipv6Addr::LOCALHOST.octets()).unwrap().ip(),
            Some(IpAddr::V6(Ipv6Addr::LOCALHOST))
        );
    }

    #[test]
    fn decode_address_bad_length() {
        assert_eq!(decode(Type::A, &[127, 0, 1]), Err(Error::Eof));
        assert_eq!(decode(Type::A, &[127, 0, 0, 1, 0]), Err(Error::InvalidValue));
        assert_eq!(decode(Type::AAAA, &[0; 4]), Err(Error::Eof));
    }

    #[test]
    fn decode_names() {
        let rdata = hex::parse("04 6d61696c 07 6578616d706c65 03 636f6d 00");
        assert_eq!(
            decode(Type::CNAME, &rdata),
            Ok(Record::CNAME(CNAME::new(domain("mail.example.com"))))
        );
        assert_eq!(
            decode(Type::NS, &rdata),
            Ok(Record::NS(NS::new(domain("mail.example.com"))))
        );

        let mut mx = vec![0, 10];
        mx.extend_from_slice(&rdata);
        let mx = decode(Type::MX, &mx).unwrap();
        assert_eq!(mx, Record::MX(MX::new(10, domain("mail.example.com"))));
        assert_eq!(mx.to_string(), "10 mail.example.com");
        assert_eq!(mx.record_type(), Some(Type::MX));
    }

    #[test]
    fn decode_other() {
        let txt = decode(Type(16), b"\x02hi").unwrap();
        assert_eq!(txt, Record::Other(b"\x02hi"[..].into()));
        assert_eq!(txt.to_string(), r"\# 3 026869");
        assert_eq!(txt.record_type(), None);
        assert_eq!(txt.ip(), None);
    }
}
