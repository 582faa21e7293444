//! Maps application protocols to the record type to query and the port to probe.

use std::fmt;

use crate::{packet::QType, Error};

/// What to look up and connect to when sniffing a host for a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffTarget {
    qtype: QType,
    port: u16,
}

impl SniffTarget {
    /// Determines the target for `protocol` (`http` or `https`, in any case).
    ///
    /// An explicit non-zero `port` takes precedence over the protocol's default port, and is
    /// required for any other protocol.
    pub fn new(protocol: &str, port: Option<u16>) -> Result<Self, Error> {
        let protocol = protocol.trim().to_ascii_lowercase();
        let default_port = match protocol.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };

        // Port 0 counts as no port.
        match port.filter(|&p| p != 0).or(default_port) {
            Some(port) => Ok(Self {
                qtype: QType::A,
                port,
            }),
            None => Err(Error::UnsupportedProtocol(protocol)),
        }
    }

    #[inline]
    pub fn qtype(&self) -> QType {
        self.qtype
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for SniffTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} port {}", self.qtype, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        let http = SniffTarget::new("http", None).unwrap();
        assert_eq!(http.qtype(), QType::A);
        assert_eq!(http.port(), 80);

        let https = SniffTarget::new("  HTTPS ", None).unwrap();
        assert_eq!(https.port(), 443);
        assert_eq!(https.to_string(), "A port 443");
    }

    #[test]
    fn explicit_port() {
        assert_eq!(SniffTarget::new("http", Some(8080)).unwrap().port(), 8080);
        let ssh = SniffTarget::new("ssh", Some(22)).unwrap();
        assert_eq!(ssh.qtype(), QType::A);
        assert_eq!(ssh.port(), 22);
    }

    #[test]
    fn zero_port() {
        assert_eq!(SniffTarget::new("https", Some(0)).unwrap().port(), 443);
        assert!(matches!(
            SniffTarget::new("ssh", Some(0)),
            Err(Error::UnsupportedProtocol(p)) if p == "ssh"
        ));
    }

    #[test]
    fn unknown_protocol() {
        match SniffTarget::new("Gopher", None) {
            Err(Error::UnsupportedProtocol(p)) => assert_eq!(p, "gopher"),
            res => panic!("unexpected result: {:?}", res),
        }
    }
}
