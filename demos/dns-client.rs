use std::{env, io, net::SocketAddr};

use domain_sniffer::{resolver::SyncResolver, DNS_DEFAULT_PORT, DNS_DEFAULT_SERVER};
use log::LevelFilter;

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .filter_module("domain_sniffer", LevelFilter::Trace)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Trace)
        .init();

    let mut args = env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "example.com".to_string());
    let qtype = args.next().unwrap_or_else(|| "A".to_string());
    let server = match args.next() {
        Some(server) => server
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => SocketAddr::from((DNS_DEFAULT_SERVER, DNS_DEFAULT_PORT)),
    };

    let client = SyncResolver::new(server);
    let response = client.resolve(&name, &qtype)?;
    for ans in response.answers() {
        println!("{}", ans);
    }
    println!("{}", response);
    Ok(())
}
