//! Domain names, labels, and hostname validation.

use std::{
    fmt::{self, Write},
    str::FromStr,
};

use crate::packet::Error;

/// A `.`-separated component of a [`DomainName`].
///
/// Labels consist of arbitrary bytes and have a maximum length of 63 bytes. This type can only
/// represent non-empty labels, so the minimum length is 1 byte.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    // Guaranteed to contain >0 and at most `Label::MAX_LEN` bytes.
    bytes: Box<[u8]>,
}

impl Label {
    /// The maximum length of a domain label.
    pub const MAX_LEN: usize = 0b0011_1111;

    /// Creates a [`Label`] from raw bytes or a string slice, returning an error if the bytes are
    /// an invalid label.
    pub fn try_new(label: impl AsRef<[u8]>) -> Result<Self, Error> {
        Self::try_new_impl(label.as_ref())
    }

    fn try_new_impl(label: &[u8]) -> Result<Self, Error> {
        if label.is_empty() {
            return Err(Error::InvalidEmptyLabel);
        }

        if label.len() > Self::MAX_LEN {
            return Err(Error::LabelTooLong);
        }

        Ok(Self {
            bytes: label.into(),
        })
    }

    /// Returns the raw bytes of this label.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#""{}""#, self.as_bytes().escape_ascii())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_bytes().escape_ascii())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

/// A domain name, represented as a list of [`Label`]s.
///
/// On the wire, domain names are terminated by an empty label, but this type omits that label.
/// Names are displayed without a trailing `.`, except for the root domain, which is displayed as
/// `.`.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct DomainName {
    // Does not include the trailing empty label.
    labels: Vec<Label>,
}

impl DomainName {
    /// The empty root domain `.`.
    pub const ROOT: Self = Self { labels: Vec::new() };

    /// The maximum length of a domain name in its wire form, including length bytes and the
    /// terminating root label.
    pub const MAX_LEN: usize = 255;

    /// Parses a domain name from raw bytes of `.`-separated labels.
    ///
    /// Leading and trailing dots are stripped. Empty interior labels (`a..b`) are rejected, as are
    /// labels longer than [`Label::MAX_LEN`] and names longer than [`DomainName::MAX_LEN`].
    pub fn from_bytes(name: &[u8]) -> Result<Self, Error> {
        let name = trim_dots(name);
        if name.is_empty() {
            return Ok(Self::ROOT);
        }

        let mut this = Self::ROOT;
        for label in name.split(|&b| b == b'.') {
            this.labels.push(Label::try_new(label)?);
        }
        if this.wire_len() > Self::MAX_LEN {
            return Err(Error::NameTooLong);
        }
        Ok(this)
    }

    /// Returns the `.`-separated labels making up this domain name.
    ///
    /// The trailing empty label is not included.
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Appends a [`Label`] to the end this domain name.
    #[inline]
    pub fn push_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Returns the number of bytes this name occupies in uncompressed wire form.
    pub fn wire_len(&self) -> usize {
        self.labels
            .iter()
            .map(|l| 1 + l.as_bytes().len())
            .sum::<usize>()
            + 1
    }
}

fn trim_dots(mut bytes: &[u8]) -> &[u8] {
    while let [b'.', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b'.'] = bytes {
        bytes = rest;
    }
    bytes
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#""{}""#, self)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_char('.');
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                f.write_char('.')?;
            }
            fmt::Display::fmt(label, f)?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for DomainName {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// Checks whether `hostname` is a syntactically valid host name.
///
/// A valid host name is at most 255 bytes long, and every `.`-separated label (after stripping
/// leading and trailing dots) is 1 to 63 bytes of ASCII letters, digits, `-` and `_`, and does not
/// start or end with `-`.
pub fn is_valid_hostname(hostname: impl AsRef<[u8]>) -> bool {
    let hostname = hostname.as_ref();
    if hostname.len() > DomainName::MAX_LEN {
        return false;
    }

    trim_dots(hostname).split(|&b| b == b'.').all(is_valid_label)
}

fn is_valid_label(label: &[u8]) -> bool {
    match label {
        [] | [b'-', ..] | [.., b'-'] => false,
        _ if label.len() > Label::MAX_LEN => false,
        _ => label
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label() {
        assert_eq!(format!(" {} ", Label::try_new("\0").unwrap()), r#" \x00 "#);
        assert_eq!(format!(" {} ", Label::try_new("\n").unwrap()), r#" \n "#);
        assert_eq!(format!(" {} ", Label::try_new("a").unwrap()), r#" a "#);
    }

    #[test]
    fn label_length_limit() {
        assert!(Label::try_new("a".repeat(63)).is_ok());
        assert_eq!(Label::try_new("a".repeat(64)), Err(Error::LabelTooLong));
        assert_eq!(Label::try_new(""), Err(Error::InvalidEmptyLabel));
        assert_eq!("com".parse::<Label>().unwrap().as_bytes(), b"com");
    }

    #[test]
    fn domain_name_string_conversion() {
        assert_eq!("a..b".parse::<DomainName>(), Err(Error::InvalidEmptyLabel));
        assert_eq!(".".parse::<DomainName>(), Ok(DomainName::ROOT));
        assert_eq!("".parse::<DomainName>(), Ok(DomainName::ROOT));
        assert_eq!("com.".parse::<DomainName>().unwrap().to_string(), "com");
        assert_eq!(".example.com.".parse::<DomainName>().unwrap().to_string(), "example.com");
        assert_eq!("com.".parse::<DomainName>().unwrap().labels().len(), 1);
        assert_eq!(DomainName::ROOT.to_string(), ".");
    }

    #[test]
    fn domain_name_from_bytes() {
        let name = DomainName::try_from(&b"www.example.com"[..]).unwrap();
        assert_eq!(name.labels().len(), 3);
        assert_eq!(name.wire_len(), 17);
        assert_eq!(name, "www.example.com".parse().unwrap());
    }

    #[test]
    fn domain_name_length_limit() {
        // 4 labels of 63 bytes: 4 * 64 + 1 = 257 bytes on the wire.
        let long = vec!["a".repeat(63); 4].join(".");
        assert_eq!(long.parse::<DomainName>(), Err(Error::NameTooLong));

        // 3 * 64 + 62 + 1 = 255.
        let max = format!("{}.{}", vec!["a".repeat(63); 3].join("."), "b".repeat(61));
        let name = max.parse::<DomainName>().unwrap();
        assert_eq!(name.wire_len(), 255);
    }

    #[test]
    fn hostname_validation() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname(b"www.example.com."));
        assert!(is_valid_hostname("_dmarc.example-site.org"));
        assert!(is_valid_hostname("a".repeat(63)));

        assert!(!is_valid_hostname("invalid.@!#$%^&$@.hostname"));
        assert!(!is_valid_hostname("-leading.example"));
        assert!(!is_valid_hostname("trailing-.example"));
        assert!(!is_valid_hostname("a..b"));
        assert!(!is_valid_hostname("a".repeat(64)));
        assert!(!is_valid_hostname(format!("{}.com", "a.".repeat(130))));
    }
}
