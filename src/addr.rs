//! Host address lookup shared by the resolver and the prober.

use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs},
};

use socket2::Domain;

/// Resolves `host` (an IP address literal or a host name) and `port` to a socket address.
///
/// Literals are used as-is. Names go through the system resolver, and the first address it
/// returns is used.
pub fn lookup(host: &str, port: u16) -> io::Result<SocketAddr> {
    // Accept bracketed IPv6 literals as well, as they appear in URLs.
    let literal = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if let Ok(ip) = literal.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    (host, port).to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses found for host '{}'", host),
        )
    })
}

/// Returns the socket domain matching the address family of `addr`.
pub(crate) fn domain_of(addr: &SocketAddr) -> Domain {
    Domain::for_address(*addr)
}

/// Returns the unspecified address of the same family as `peer`, with an OS-chosen port.
pub(crate) fn unspecified_for(peer: &SocketAddr) -> SocketAddr {
    if peer.is_ipv6() {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(
            lookup("127.0.0.1", 80).unwrap(),
            "127.0.0.1:80".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            lookup("::1", 443).unwrap(),
            "[::1]:443".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            lookup("[::1]", 443).unwrap(),
            "[::1]:443".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn families() {
        let v4 = lookup("10.0.0.1", 1).unwrap();
        let v6 = lookup("fe80::1", 1).unwrap();
        assert_eq!(domain_of(&v4), Domain::IPV4);
        assert_eq!(domain_of(&v6), Domain::IPV6);
        assert!(unspecified_for(&v4).ip().is_unspecified());
        assert!(unspecified_for(&v6).is_ipv6());
        assert_eq!(unspecified_for(&v6).port(), 0);
    }

    #[test]
    fn localhost_name() {
        let addr = lookup("localhost", 8080).unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }
}
