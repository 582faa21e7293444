use std::fmt;

/// Renders a byte slice as contiguous lowercase hex, for trace logs.
pub(crate) struct Hex<'a>(pub &'a [u8]);

impl<'a> fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Parses a hex string into bytes. Whitespace is skipped, so messages can be laid out by field.
#[cfg(test)]
pub(crate) fn parse(s: &str) -> Vec<u8> {
    assert!(s.is_ascii());

    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    assert!(digits.len() % 2 == 0, "odd number of hex digits");

    let mut buf = Vec::new();
    for pair in digits.chunks(2) {
        let chs = std::str::from_utf8(pair).unwrap();
        assert!(!chs.contains('+'));

        buf.push(u8::from_str_radix(chs, 16).unwrap());
    }
    buf
}
