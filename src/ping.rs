//! TCP connect latency probing.

use std::{
    fmt, io,
    net::SocketAddr,
    time::{Duration, Instant},
};

use socket2::{Protocol, Socket, Type};

use crate::{
    addr::{domain_of, lookup},
    Error,
};

/// Measures TCP connection setup latency ("tcping").
///
/// A probe opens a connection, writes an empty payload to make sure it is usable, and closes it
/// again. The reported duration covers all three steps.
#[derive(Debug, Clone)]
pub struct TcpPinger {
    timeout: Duration,
}

impl TcpPinger {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_RETRIES: usize = 3;

    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the connect timeout of each individual probe.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connects to `host:port` once and returns how long connecting and closing took.
    pub fn probe_once(&self, host: &str, port: u16) -> io::Result<Duration> {
        let addr = lookup(host, port)?;
        self.probe_addr(&addr)
    }

    fn probe_addr(&self, addr: &SocketAddr) -> io::Result<Duration> {
        let sock = Socket::new(domain_of(addr), Type::STREAM, Some(Protocol::TCP))?;

        let start = Instant::now();
        sock.connect_timeout(&(*addr).into(), self.timeout)?;
        sock.send(&[])?;
        drop(sock);
        Ok(start.elapsed())
    }

    /// Probes `host:port` `retries` times in a row and summarizes the results.
    ///
    /// The first failing probe aborts the session with [`Error::ProbeAborted`], which reports how
    /// many probes completed before it.
    pub fn probe(&self, host: &str, port: u16, retries: usize) -> Result<PingResult, Error> {
        if retries == 0 {
            return Err(Error::Socket(io::Error::new(
                io::ErrorKind::InvalidInput,
                "at least one probe attempt is required",
            )));
        }

        let mut samples = Vec::with_capacity(retries);
        for attempt in 1..=retries {
            match self.probe_once(host, port) {
                Ok(elapsed) => {
                    log::debug!(
                        "probe {}/{} to {}:{}: {}us",
                        attempt,
                        retries,
                        host,
                        port,
                        elapsed.as_micros()
                    );
                    samples.push(elapsed);
                }
                Err(source) => {
                    log::warn!(
                        "probe {}/{} to {}:{} failed: {}",
                        attempt,
                        retries,
                        host,
                        port,
                        source
                    );
                    return Err(Error::ProbeAborted {
                        completed: samples.len(),
                        source,
                    });
                }
            }
        }

        // `samples` holds exactly `retries` entries here, and `retries` is non-zero.
        PingResult::from_samples(host, port, samples).ok_or_else(|| {
            Error::Socket(io::Error::new(io::ErrorKind::Other, "no probe samples"))
        })
    }
}

impl Default for TcpPinger {
    fn default() -> Self {
        Self::new()
    }
}

/// Probes `host:port` `retries` times with the given per-probe `timeout`.
///
/// See [`TcpPinger::probe`].
pub fn probe(
    host: &str,
    port: u16,
    timeout: Duration,
    retries: usize,
) -> Result<PingResult, Error> {
    let mut pinger = TcpPinger::new();
    pinger.set_timeout(timeout);
    pinger.probe(host, port, retries)
}

/// Summary of a probing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingResult {
    host: String,
    port: u16,
    attempts: usize,
    min: Duration,
    max: Duration,
    average: Duration,
}

impl PingResult {
    /// Summarizes a list of probe durations. Returns `None` if `samples` is empty.
    pub fn from_samples(host: &str, port: u16, mut samples: Vec<Duration>) -> Option<Self> {
        samples.sort_unstable();
        let min = *samples.first()?;
        let max = *samples.last()?;

        // Integer division keeps `min <= average <= max` exact.
        let total: Duration = samples.iter().sum();
        let average = total.as_nanos() / samples.len() as u128;
        let average = Duration::from_nanos(u64::try_from(average).unwrap_or(u64::MAX));

        Some(Self {
            host: host.to_string(),
            port,
            attempts: samples.len(),
            min,
            max,
            average,
        })
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the number of probes that were made.
    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[inline]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Duration {
        self.max
    }

    #[inline]
    pub fn average(&self) -> Duration {
        self.average
    }
}

fn micros(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1000.0
}

impl fmt::Display for PingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}\ttried={}\tmin={:.3}us\tavg={:.3}us\tmax={:.3}us",
            self.host,
            self.port,
            self.attempts,
            micros(self.min),
            micros(self.average),
            micros(self.max)
        )
    }
}
