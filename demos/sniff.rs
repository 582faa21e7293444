//! Resolves a host and measures TCP latency to its first address.
//!
//! Usage: `sniff <host> [http|https|<protocol>] [port]`

use std::{env, io};

use domain_sniffer::{name::is_valid_hostname, ping::TcpPinger, resolver, sniff::SniffTarget};
use log::LevelFilter;

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .filter_module("domain_sniffer", LevelFilter::Info)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Trace)
        .init();

    let mut args = env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "example.com".to_string());
    let protocol = args.next().unwrap_or_else(|| "https".to_string());
    let port = match args.next() {
        Some(port) => Some(
            port.parse::<u16>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        ),
        None => None,
    };

    if !is_valid_hostname(&host) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' is not a valid hostname", host),
        ));
    }

    let target = SniffTarget::new(&protocol, port)?;
    log::info!("sniffing {} ({})", host, target);

    let response = resolver::resolve(&host, &target.qtype().to_string())?;
    println!("{}", response);

    let Some(ip) = response.ips().next() else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses for '{}'", host),
        ));
    };

    let pinger = TcpPinger::new();
    let result = pinger.probe(&ip.to_string(), target.port(), TcpPinger::DEFAULT_RETRIES)?;
    println!("{}", result);
    Ok(())
}
