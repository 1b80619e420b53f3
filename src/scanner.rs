//! # TCP Port Scanner
//!
//! This module probes a range of TCP ports on a resolved target and
//! classifies each port as open, closed, or filtered. Probing is a
//! non-blocking connect with a bounded writability wait, so an unresponsive
//! port costs exactly the configured timeout and no more.
//!
//! ## Features
//!
//! - Non-blocking TCP connect probing with per-attempt timeouts
//! - Three-state classification (open / closed / filtered)
//! - Connect latency measurement per open port
//! - Sequential ascending scan over an inclusive port range
//!
//! ## Example
//!
//! ```rust,no_run
//! use wirefish::config::Config;
//! use wirefish::scanner;
//!
//! let config = Config::from_args(&[
//!     "wirefish".to_string(),
//!     "--scan".to_string(),
//!     "--target".to_string(),
//!     "127.0.0.1".to_string(),
//!     "--ports".to_string(),
//!     "20-25".to_string(),
//! ])?;
//!
//! let table = scanner::scan(&config)?;
//! for row in &table {
//!     println!("{}: {}", row.port, row.state);
//! }
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::net;
use crate::table::ResultTable;
use serde::Serialize;
use socket2::{Domain, SockAddr, Socket, Type};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Classification of a TCP port after one connect attempt
///
/// The three states are mutually exclusive and exhaustive: the handshake
/// either succeeded, was actively refused, or produced no answer within the
/// timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    /// Connection handshake succeeded
    Open,
    /// Remote actively refused the connection
    Closed,
    /// No response within the timeout (firewall, drop, or host unreachable)
    Filtered,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "open"),
            PortState::Closed => write!(f, "closed"),
            PortState::Filtered => write!(f, "filtered"),
        }
    }
}

/// Result of probing a single port
#[derive(Clone, Debug, Serialize)]
pub struct ScanResult {
    /// Port number probed
    pub port: u16,
    /// Outcome of the connect attempt
    pub state: PortState,
    /// Connect latency in milliseconds, -1 when the attempt failed before
    /// timing could complete
    pub latency_ms: i32,
}

/// Ordered scan results, ascending port order
pub type ScanTable = ResultTable<ScanResult>;

/// Scan the configured port range on the configured target
///
/// The target is resolved once and the address reused for every port. A
/// resolution failure aborts before any probing. Individual probe failures
/// are recorded as filtered rows and the loop continues; a failed table
/// growth stops collection and returns the rows gathered so far.
pub fn scan(config: &Config) -> Result<ScanTable> {
    let addr = net::resolve(&config.target)?;
    debug!(
        target = %config.target,
        from = config.ports_from,
        to = config.ports_to,
        "starting scan"
    );

    let mut table = ScanTable::new();
    for port in config.ports_from..=config.ports_to {
        let (state, latency_ms) = probe(addr, port, config.timeout);
        debug!(port = port, state = %state, latency_ms = latency_ms, "probed");

        let row = ScanResult {
            port,
            state,
            latency_ms,
        };
        if let Err(e) = table.push(row) {
            warn!(error = %e, "result table growth failed, returning partial scan");
            break;
        }
    }

    Ok(table)
}

/// Probe one TCP port with a bounded non-blocking connect
///
/// Classifies the outcome into a [`PortState`] and the connect latency in
/// milliseconds. Local failures (socket creation, option setting) are
/// absorbed as filtered rather than escalated; the scan must survive one
/// bad probe.
pub fn probe(addr: SocketAddr, port: u16, timeout: Duration) -> (PortState, i32) {
    match try_probe(addr, port, timeout) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(port = port, error = %e, "probe failed locally");
            (PortState::Filtered, -1)
        }
    }
}

/// Non-blocking connect, bounded writability wait, pending-error query
///
/// The socket is owned by this function and closed on every return path.
fn try_probe(addr: SocketAddr, port: u16, timeout: Duration) -> io::Result<(PortState, i32)> {
    let mut target = addr;
    target.set_port(port);

    let socket = Socket::new(Domain::IPV4, Type::STREAM, None)?;
    socket.set_nonblocking(true)?;

    let start = Instant::now();
    if let Err(e) = socket.connect(&SockAddr::from(target)) {
        let in_progress = e.raw_os_error() == Some(libc::EINPROGRESS)
            || e.kind() == io::ErrorKind::WouldBlock;
        if !in_progress {
            if e.kind() == io::ErrorKind::ConnectionRefused {
                return Ok((PortState::Closed, -1));
            }
            return Ok((PortState::Filtered, -1));
        }
    } else {
        // synchronous completion, common on loopback
        return Ok((PortState::Open, 0));
    }

    if !net::wait_writable(&socket, timeout)? {
        return Ok((PortState::Filtered, -1));
    }

    match socket.take_error()? {
        None => {
            let elapsed = start.elapsed().as_millis().min(i32::MAX as u128) as i32;
            Ok((PortState::Open, elapsed))
        }
        Some(e) if e.kind() == io::ErrorKind::ConnectionRefused => Ok((PortState::Closed, -1)),
        Some(_) => Ok((PortState::Filtered, -1)),
    }
}
