use std::{env, io, time::Duration};

use domain_sniffer::ping::TcpPinger;
use log::LevelFilter;

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .filter_module("domain_sniffer", LevelFilter::Debug)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug)
        .init();

    let mut args = env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "1.1.1.1".to_string());
    let port = parse_arg(args.next(), 443)?;
    let retries = parse_arg(args.next(), TcpPinger::DEFAULT_RETRIES)?;

    let mut pinger = TcpPinger::new();
    pinger.set_timeout(Duration::from_secs(2));
    let result = pinger.probe(&host, port, retries)?;
    println!("{}", result);
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T) -> io::Result<T> {
    match arg {
        Some(arg) => arg.parse().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("invalid argument '{}'", arg))
        }),
        None => Ok(default),
    }
}
