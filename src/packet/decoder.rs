//! DNS message decoder.

use std::{any::TypeId, cmp, fmt, marker::PhantomData, mem::size_of};

use bytemuck::AnyBitPattern;

use crate::{
    name::{DomainName, Label},
    num::{I32, U16},
};

use super::{
    records::Record,
    section::{self, Section},
    Class, Error, Header, QType, Type,
};

#[derive(Debug, Clone)]
pub(crate) struct Reader<'a> {
    /// The buffer containing the whole DNS message.
    full_buf: &'a [u8],
    /// The current reader position in the buffer.
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self {
            full_buf: buf,
            pos: 0,
        }
    }

    /// Creates a reader over the whole message `buf`, positioned at `pos`.
    pub(crate) fn at(buf: &'a [u8], pos: usize) -> Result<Self, Error> {
        if pos > buf.len() {
            return Err(Error::Eof);
        }
        Ok(Self { full_buf: buf, pos })
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn buf(&self) -> &'a [u8] {
        &self.full_buf[self.pos..]
    }

    pub(crate) fn read_obj<T: AnyBitPattern>(&mut self) -> Result<T, Error> {
        let bytes = self.buf().get(..size_of::<T>()).ok_or(Error::Eof)?;
        self.pos += size_of::<T>();
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    fn peek_u8(&self) -> Result<u8, Error> {
        self.full_buf.get(self.pos).copied().ok_or(Error::Eof)
    }

    pub(crate) fn read_slice(&mut self, len: usize) -> Result<&'a [u8], Error> {
        match self.full_buf.get(self.pos..self.pos + len) {
            Some(slice) => {
                self.pos += len;
                Ok(slice)
            }
            None => Err(Error::Eof),
        }
    }

    pub(crate) fn read_array<const LEN: usize>(&mut self) -> Result<&'a [u8; LEN], Error> {
        let slice = self.read_slice(LEN)?;
        slice.try_into().map_err(|_| Error::Eof)
    }

    /// Splits off another `Reader` at the current position, with a backing store truncated to
    /// `self.pos + len`.
    ///
    /// The returned reader can still refer back to everything before its position, which is what
    /// compressed names inside RDATA need.
    fn split_off(&mut self, len: usize) -> Result<Reader<'a>, Error> {
        if self.buf().len() >= len {
            let mut copy = self.clone();
            copy.full_buf = &copy.full_buf[..self.pos + len];
            self.pos += len;
            Ok(copy)
        } else {
            Err(Error::Eof)
        }
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(self.read_obj::<U16>()?.get())
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(self.read_obj::<I32>()?.get())
    }

    /// Reads a `<domain-name>` value, following compression pointers.
    ///
    /// The reader is advanced past the name as it appears at the current position: through the
    /// terminating empty label, or through the first pointer.
    pub(crate) fn read_domain_name(&mut self) -> Result<DomainName, Error> {
        let mut domain_name = DomainName::ROOT;
        let mut wire_len = 1;
        let mut min_pos = self.pos;
        let mut copy = self.clone();
        loop {
            let length = copy.peek_u8()?;
            match length & 0b1100_0000 {
                0b1100_0000 => {
                    // 16-bit pointer to somewhere else in the message.
                    let ptr = usize::from(copy.read_u16()? & 0b0011_1111_1111_1111);
                    if ptr >= min_pos {
                        // Pointers must go strictly backwards from the start of the fragment
                        // that contains them. This bounds the walk by the message length.
                        return Err(Error::PointerLoop);
                    }
                    self.pos = cmp::max(self.pos, copy.pos);
                    min_pos = ptr;
                    copy.pos = ptr;
                }
                0b0000_0000 => {
                    copy.pos += 1;

                    // Length byte followed by a label of that many bytes.
                    let length = usize::from(length);
                    if length == 0 {
                        break;
                    }
                    wire_len += 1 + length;
                    if wire_len > DomainName::MAX_LEN {
                        return Err(Error::NameTooLong);
                    }
                    let label = copy.read_slice(length)?;
                    domain_name.push_label(Label::try_new(label)?);
                }
                _ => return Err(Error::InvalidValue), // anything but 00 and 11 in MSb is reserved
            }
        }

        self.pos = cmp::max(self.pos, copy.pos);
        Ok(domain_name)
    }

    fn read_question(&mut self) -> Result<Question, Error> {
        let qname = self.read_domain_name()?;
        let qtype = QType(self.read_u16()?);
        let qclass = Class(self.read_u16()?);
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    fn read_resource_record(&mut self) -> Result<ResourceRecord, Error> {
        let name = self.read_domain_name()?;
        let type_ = Type(self.read_u16()?);
        let class = Class(self.read_u16()?);
        let ttl = self.read_i32()?;
        let rdlength = self.read_u16()?;
        let rdata = self.split_off(usize::from(rdlength))?;
        let data = Record::decode(type_, rdata)?;
        Ok(ResourceRecord {
            name,
            type_,
            class,
            ttl,
            data,
        })
    }
}

/// Decodes the domain name starting at `offset` in `msg`.
///
/// Returns the number of bytes the name occupies at `offset`, and the name itself. If the name is
/// (or ends in) a compression pointer, the consumed length stops after the 2-byte pointer; the
/// labels it refers to are not counted.
pub fn decode_name(msg: &[u8], offset: usize) -> Result<(usize, DomainName), Error> {
    let mut r = Reader::at(msg, offset)?;
    let name = r.read_domain_name()?;
    Ok((r.pos() - offset, name))
}

/// An entry decoded by [`decode_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Question(Question),
    Record(ResourceRecord),
}

/// Decodes a single question (if `is_question` is set) or resource record starting at `offset`.
///
/// Returns the number of bytes the entry occupies, including all of its RDATA.
pub fn decode_record(
    msg: &[u8],
    offset: usize,
    is_question: bool,
) -> Result<(usize, Entry), Error> {
    let mut r = Reader::at(msg, offset)?;
    let entry = if is_question {
        Entry::Question(r.read_question()?)
    } else {
        Entry::Record(r.read_resource_record()?)
    };
    Ok((r.pos() - offset, entry))
}

/// Decodes a complete response message.
///
/// All four sections are walked in order. Records in the *Authority* and *Additional Records*
/// sections must be well-formed, but are not part of the returned [`Response`].
pub fn decode_response(msg: &[u8]) -> Result<Response, Error> {
    let mut dec = MessageDecoder::new(msg)?;
    log::trace!("header: {:?}", dec.header());

    let questions = dec.iter().collect::<Result<Vec<_>, _>>()?;
    let mut dec = dec.answers()?;
    let answers = dec.iter().collect::<Result<Vec<_>, _>>()?;
    let mut dec = dec.authority()?.additional()?;
    for res in dec.iter() {
        res?;
    }

    Ok(Response {
        hostname: questions.first().map(|q| q.qname().clone()),
        questions,
        answers,
    })
}

/// Streaming decoder for DNS messages.
///
/// In DNS messages, sections are ordered as follows:
/// - *Question* section
/// - *Answer* section
/// - *Authority* section
/// - *Additional Records* section
///
/// The decoder stores the section it is currently decoding as the `S` type parameter. Initially
/// (after calling [`MessageDecoder::new`]), the decoder is in the [`section::Question`] state,
/// and is advanced by calling the appropriate methods. Skipping a section still decodes every
/// entry in it, since entries are variable-length.
pub struct MessageDecoder<'a, S: Section> {
    header: Header,
    q_remaining: u16,
    ans_remaining: u16,
    auth_remaining: u16,
    addl_remaining: u16,
    r: Reader<'a>,
    has_errored: bool,
    section: PhantomData<S>,
}

impl<'a> MessageDecoder<'a, section::Question> {
    /// Creates a streaming message decoder that will read from `buf`.
    ///
    /// Fails with [`Error::Eof`] if `buf` is too short to contain a [`Header`].
    pub fn new(buf: &'a [u8]) -> Result<Self, Error> {
        let mut r = Reader::new(buf);
        let header = r.read_obj::<Header>()?;
        Ok(Self {
            header,
            q_remaining: header.question_count(),
            ans_remaining: header.answer_count(),
            auth_remaining: header.authority_count(),
            addl_remaining: header.additional_count(),
            r,
            has_errored: false,
            section: PhantomData,
        })
    }
}

impl<'a, S: Section> MessageDecoder<'a, S> {
    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the offset of the next entry in the message.
    #[inline]
    pub fn position(&self) -> usize {
        self.r.pos()
    }

    fn remaining(&mut self) -> &mut u16 {
        if TypeId::of::<S>() == TypeId::of::<section::Question>() {
            &mut self.q_remaining
        } else if TypeId::of::<S>() == TypeId::of::<section::Answer>() {
            &mut self.ans_remaining
        } else if TypeId::of::<S>() == TypeId::of::<section::Authority>() {
            &mut self.auth_remaining
        } else if TypeId::of::<S>() == TypeId::of::<section::Additional>() {
            &mut self.addl_remaining
        } else {
            unreachable!()
        }
    }

    fn change_section<N: Section>(self) -> MessageDecoder<'a, N> {
        MessageDecoder {
            header: self.header,
            q_remaining: self.q_remaining,
            ans_remaining: self.ans_remaining,
            auth_remaining: self.auth_remaining,
            addl_remaining: self.addl_remaining,
            r: self.r,
            has_errored: self.has_errored,
            section: PhantomData,
        }
    }

    fn next_entry<T>(
        &mut self,
        read: impl FnOnce(&mut Reader<'a>) -> Result<T, Error>,
    ) -> Option<Result<T, Error>> {
        if self.has_errored || *self.remaining() == 0 {
            return None;
        }

        let pos = self.r.pos();
        let entry = match read(&mut self.r) {
            Ok(entry) => entry,
            Err(e) => {
                log::trace!("{} entry at offset {}: {}", S::NAME, pos, e);
                self.has_errored = true;
                return Some(Err(e));
            }
        };

        *self.remaining() -= 1;

        Some(Ok(entry))
    }

    fn next_rr(&mut self) -> Option<Result<ResourceRecord, Error>> {
        self.next_entry(Reader::read_resource_record)
    }

    /// Decodes and discards all remaining entries of the current section.
    fn skip(&mut self) -> Result<(), Error> {
        if TypeId::of::<S>() == TypeId::of::<section::Question>() {
            while let Some(res) = self.next_entry(Reader::read_question) {
                res?;
            }
        } else {
            while let Some(res) = self.next_rr() {
                res?;
            }
        }
        Ok(())
    }
}

impl<'a> MessageDecoder<'a, section::Question> {
    /// Reads the next [`Question`] from the *Question* section.
    pub fn next(&mut self) -> Option<Result<Question, Error>> {
        self.next_entry(Reader::read_question)
    }

    /// Returns an iterator over all [`Question`]s in the *Question* section of the message.
    pub fn iter(&mut self) -> QuestionIter<'_, 'a> {
        QuestionIter { dec: self }
    }

    /// Skips the remaining entries in the *Question* section and advances the decoder to the
    /// *Answer* section.
    pub fn answers(mut self) -> Result<MessageDecoder<'a, section::Answer>, Error> {
        self.skip()?;
        Ok(self.change_section())
    }
}

impl<'a> MessageDecoder<'a, section::Answer> {
    /// Reads the next [`ResourceRecord`] from the *Answer* section.
    pub fn next(&mut self) -> Option<Result<ResourceRecord, Error>> {
        self.next_rr()
    }

    /// Returns an iterator over all resource records in the *Answer* section.
    pub fn iter(&mut self) -> ResourceRecordIter<'_, 'a, section::Answer> {
        ResourceRecordIter { dec: self }
    }

    /// Skips the remaining entries in the *Answer* section, and advances the decoder to the
    /// *Authority* section.
    pub fn authority(mut self) -> Result<MessageDecoder<'a, section::Authority>, Error> {
        self.skip()?;
        Ok(self.change_section())
    }
}

impl<'a> MessageDecoder<'a, section::Authority> {
    /// Returns an iterator over all resource records in the *Authority* section.
    pub fn iter(&mut self) -> ResourceRecordIter<'_, 'a, section::Authority> {
        ResourceRecordIter { dec: self }
    }

    /// Skips the remaining entries in the *Authority* section, and advances the decoder to the
    /// *Additional Records* section.
    pub fn additional(mut self) -> Result<MessageDecoder<'a, section::Additional>, Error> {
        self.skip()?;
        Ok(self.change_section())
    }
}

impl<'a> MessageDecoder<'a, section::Additional> {
    /// Returns an iterator over all resource records in the *Additional Records* section.
    pub fn iter(&mut self) -> ResourceRecordIter<'_, 'a, section::Additional> {
        ResourceRecordIter { dec: self }
    }
}

/// Iterator over Resource Records in a DNS message.
pub struct ResourceRecordIter<'dec, 'data, S: Section> {
    dec: &'dec mut MessageDecoder<'data, S>,
}

impl<'dec, 'data, S: Section> Iterator for ResourceRecordIter<'dec, 'data, S> {
    type Item = Result<ResourceRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.dec.next_rr()
    }
}

/// An iterator over [`Question`]s in the *Question* section of a DNS message.
pub struct QuestionIter<'dec, 'data> {
    dec: &'dec mut MessageDecoder<'data, section::Question>,
}

impl<'dec, 'data> Iterator for QuestionIter<'dec, 'data> {
    type Item = Result<Question, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.dec.next()
    }
}

/// A Resource Record from the *Answer*, *Authority*, or *Additional Records* section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    name: DomainName,
    type_: Type,
    class: Class,
    ttl: i32,
    data: Record,
}

impl ResourceRecord {
    #[inline]
    pub fn name(&self) -> &DomainName {
        &self.name
    }

    #[inline]
    pub fn type_(&self) -> Type {
        self.type_
    }

    #[inline]
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the entry's Time To Live, in seconds.
    #[inline]
    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    /// Returns the decoded record data.
    #[inline]
    pub fn data(&self) -> &Record {
        &self.data
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.class, self.type_, self.data
        )
    }
}

/// A question from the *Question* section of a DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    qname: DomainName,
    qtype: QType,
    qclass: Class,
}

impl Question {
    /// Returns the domain name that is being queried.
    #[inline]
    pub fn qname(&self) -> &DomainName {
        &self.qname
    }

    /// Returns the resource record type the client is interested in.
    #[inline]
    pub fn qtype(&self) -> QType {
        self.qtype
    }

    /// Returns the record class the client is interested in.
    #[inline]
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

/// A decoded response message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    hostname: Option<DomainName>,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
}

impl Response {
    /// Returns the name asked for in the first question, or `None` if the message carried no
    /// questions.
    #[inline]
    pub fn hostname(&self) -> Option<&DomainName> {
        self.hostname.as_ref()
    }

    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[inline]
    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Returns an iterator over the addresses in all `A` and `AAAA` answers, in message order.
    pub fn ips(&self) -> impl Iterator<Item = std::net::IpAddr> + '_ {
        self.answers.iter().filter_map(|rr| rr.data().ip())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hostname {
            Some(name) => write!(f, "{}: [", name)?,
            None => f.write_str("(no question): [")?,
        }
        for (i, rr) in self.answers.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", rr.data())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use expect_test::expect;

    use super::*;
    use crate::{hex, packet::records::A};

    /// `example.com` A response: question at 12, one compressed A answer, one NS authority
    /// record, no additional records.
    const RESPONSE: &str = "
        1234 8180 0001 0001 0001 0000
        07 6578616d706c65 03 636f6d 00 0001 0001
        c00c 0001 0001 00000e10 0004 5db8d822
        c014 0002 0001 00015180 0006 01 61 02 6e73 00
    ";

    #[test]
    fn decode_domain_name() {
        let mut r = Reader::new(&[
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
        ]);
        let name = r.read_domain_name().unwrap();
        assert_eq!(name.to_string(), "example.com");
        assert_eq!(r.pos(), 13);

        let mut r = Reader::new(&[0]);
        let name = r.read_domain_name().unwrap();
        assert_eq!(name, DomainName::ROOT);
    }

    #[test]
    fn decode_domain_name_pointer() {
        let mut r = Reader::new(&[
            b'_', // never read
            3,
            b'c',
            b'o',
            b'm',
            0, // "com."
            7,
            b'e',
            b'x',
            b'a',
            b'm',
            b'p',
            b'l',
            b'e',
            // ptr to 1:
            0b1100_0000,
            1,
        ]);
        r.pos = 1;
        let name = r.read_domain_name().unwrap();
        assert_eq!(name.to_string(), "com");
        let name = r.read_domain_name().unwrap();
        assert_eq!(name.to_string(), "example.com");
        assert_eq!(r.read_u16(), Err(Error::Eof), "should be at EOF");
    }

    #[test]
    fn decode_domain_name_pointer_oob() {
        let mut r = Reader::new(&[0xff, 0xff]);
        assert_eq!(r.read_domain_name(), Err(Error::PointerLoop));

        // Truncated pointer.
        let mut r = Reader::new(&[0xc0]);
        assert_eq!(r.read_domain_name(), Err(Error::Eof));
    }

    #[test]
    fn decode_domain_name_dos() {
        let mut r = Reader::new(&[
            // pointer to self:
            0b1100_0000,
            0,
        ]);
        assert_eq!(r.read_domain_name(), Err(Error::PointerLoop));

        let mut r = Reader::new(&[
            // fallthrough:
            1,
            b'a',
            // pointer to 0:
            0b1100_0000,
            0,
        ]);
        r.pos = 2;
        assert_eq!(r.read_domain_name(), Err(Error::PointerLoop));

        // Two pointers bouncing between each other.
        let msg = hex::parse("c002 c000");
        assert_eq!(decode_name(&msg, 2), Err(Error::PointerLoop));
    }

    #[test]
    fn decode_domain_name_reserved_bits() {
        assert_eq!(decode_name(&[0b0100_0001, b'a', 0], 0), Err(Error::InvalidValue));
        assert_eq!(decode_name(&[0b1000_0001, b'a', 0], 0), Err(Error::InvalidValue));
    }

    #[test]
    fn decode_domain_name_truncated() {
        assert_eq!(decode_name(&[3, b'c', b'o'], 0), Err(Error::Eof));
        assert_eq!(decode_name(&[3, b'c', b'o', b'm'], 0), Err(Error::Eof));
        assert_eq!(decode_name(&[0], 1), Err(Error::Eof));
        assert_eq!(decode_name(&[0], 2), Err(Error::Eof));
    }

    #[test]
    fn decode_domain_name_too_long() {
        // Five 63-byte labels chained through pointers: each fragment is short, but the full name
        // is 5 * 64 + 1 bytes.
        let mut msg = Vec::new();
        let mut prev = None;
        for _ in 0..5 {
            let start = msg.len();
            msg.push(63);
            msg.extend_from_slice(&[b'a'; 63]);
            match prev {
                Some(p) => msg.extend_from_slice(&(0xc000u16 | p as u16).to_be_bytes()),
                None => msg.push(0),
            }
            prev = Some(start);
        }
        assert_eq!(decode_name(&msg, prev.unwrap()), Err(Error::NameTooLong));
    }

    #[test]
    fn compressed_answer_name() {
        let msg = hex::parse(RESPONSE);
        let (qlen, _) = decode_record(&msg, 12, true).unwrap();
        assert_eq!(qlen, 17);

        let (len, name) = decode_name(&msg, 12 + qlen).unwrap();
        assert_eq!(len, 2);
        assert_eq!(name, "example.com".parse().unwrap());

        let (_, qname) = decode_name(&msg, 12).unwrap();
        assert_eq!(name, qname);
    }

    #[test]
    fn decode_answer_record() {
        let msg = hex::parse(RESPONSE);
        let (len, entry) = decode_record(&msg, 29, false).unwrap();
        assert_eq!(len, 2 + 10 + 4);
        let rr = match entry {
            Entry::Record(rr) => rr,
            other => panic!("expected a resource record, got {:?}", other),
        };
        assert_eq!(rr.name().to_string(), "example.com");
        assert_eq!(rr.type_(), Type::A);
        assert_eq!(rr.class(), Class::IN);
        assert_eq!(rr.ttl(), 3600);
        assert_eq!(rr.data(), &Record::A(A::new(Ipv4Addr::new(93, 184, 216, 34))));

        // The NS record's name points at "com" inside the question, and its RDATA is a plain
        // name.
        let (len, entry) = decode_record(&msg, 29 + 16, false).unwrap();
        assert_eq!(len, 2 + 10 + 6);
        let rr = match entry {
            Entry::Record(rr) => rr,
            other => panic!("expected a resource record, got {:?}", other),
        };
        assert_eq!(rr.to_string(), "com\t86400\tIN\tNS\ta.ns");
    }

    #[test]
    fn decode_record_truncated() {
        let msg = hex::parse(RESPONSE);
        // Cut off in the middle of the A record's RDATA.
        assert_eq!(decode_record(&msg[..29 + 14], 29, false), Err(Error::Eof));
        // Cut off in the middle of the question's type/class.
        assert_eq!(decode_record(&msg[..27], 12, true), Err(Error::Eof));
    }

    #[test]
    fn decode_rdata_name_pointer() {
        // CNAME whose RDATA is "www" followed by a pointer to the question name.
        let msg = hex::parse(
            "
            0001 8180 0001 0001 0000 0000
            07 6578616d706c65 03 636f6d 00 0005 0001
            c00c 0005 0001 0000012c 0006 03 777777 c00c
            ",
        );
        let response = decode_response(&msg).unwrap();
        let cname = response.answers()[0].data();
        assert_eq!(cname.to_string(), "www.example.com");
        assert_eq!(cname.record_type(), Some(Type::CNAME));
    }

    #[test]
    fn decode_full_response() {
        let msg = hex::parse(RESPONSE);
        let response = decode_response(&msg).unwrap();
        assert_eq!(response.hostname().unwrap().to_string(), "example.com");
        assert_eq!(response.questions().len(), 1);
        assert_eq!(response.questions()[0].qtype(), QType::A);
        assert_eq!(response.answers().len(), 1);
        assert_eq!(
            response.ips().collect::<Vec<_>>(),
            [std::net::IpAddr::from([93, 184, 216, 34])]
        );

        let mut rendered = String::new();
        for q in response.questions() {
            rendered += &format!("Q: {}\n", q);
        }
        for rr in response.answers() {
            rendered += &format!("ANS: {}\n", rr);
        }
        rendered += &format!("{}\n", response);
        expect![[r#"
            Q: example.com	IN	A
            ANS: example.com	3600	IN	A	93.184.216.34
            example.com: [93.184.216.34]
        "#]]
        .assert_eq(&rendered);
    }

    #[test]
    fn decode_response_without_questions() {
        let msg = hex::parse("0001 8180 0000 0001 0000 0000 00 0001 0001 00000000 0004 7f000001");
        let response = decode_response(&msg).unwrap();
        assert_eq!(response.hostname(), None);
        assert_eq!(response.answers()[0].name(), &DomainName::ROOT);
        assert_eq!(response.to_string(), "(no question): [127.0.0.1]");
    }

    #[test]
    fn decode_response_bad_trailing_sections() {
        // Announces an additional record that isn't there.
        let mut msg = hex::parse(RESPONSE);
        msg[11] = 1;
        assert_eq!(decode_response(&msg), Err(Error::Eof));
    }

    #[test]
    fn decode_response_short() {
        assert!(matches!(MessageDecoder::new(&[0; 11]), Err(Error::Eof)));
        assert_eq!(decode_response(&[]), Err(Error::Eof));
    }

    #[test]
    fn section_positions() {
        let msg = hex::parse(RESPONSE);
        let mut dec = MessageDecoder::new(&msg).unwrap();
        assert_eq!(dec.position(), 12);
        assert!(dec.next().unwrap().is_ok());
        assert!(dec.next().is_none());
        let dec = dec.answers().unwrap();
        assert_eq!(dec.position(), 29);
        let mut dec = dec.authority().unwrap();
        assert_eq!(dec.position(), 45);
        assert_eq!(dec.iter().count(), 1);
        let dec = dec.additional().unwrap();
        assert_eq!(dec.position(), msg.len());
    }
}
