//! # Address Resolution and Socket Helpers
//!
//! This module provides the networking primitives shared by the scanner and
//! the tracer: hostname resolution constrained to IPv4, bounded readiness
//! waits for non-blocking sockets, and raw ICMP socket creation with a
//! distinct error when the required privilege is missing.
//!
//! ## Features
//!
//! - IPv4/stream-constrained resolution via the system resolver
//! - Writable/readable waits with an explicit millisecond timeout
//! - Raw ICMP socket creation with an actionable permission error
//!
//! ## Example
//!
//! ```rust
//! use wirefish::net::resolve;
//!
//! let addr = resolve("127.0.0.1")?;
//! assert!(addr.is_ipv4());
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::error::{Result, WirefishError};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};
use tracing::debug;

/// Resolve a hostname or literal IP string to a single IPv4 socket address
///
/// The lookup is constrained to IPv4 stream-capable addresses and the first
/// result returned by the system resolver wins. The returned address carries
/// port 0; callers set the port they need. Resolution is attempted exactly
/// once per call.
pub fn resolve(host: &str) -> Result<SocketAddr> {
    let candidates = (host, 0u16)
        .to_socket_addrs()
        .map_err(|e| WirefishError::resolution(host, e.to_string()))?;

    let addr = candidates
        .into_iter()
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| WirefishError::resolution(host, "no IPv4 address found"))?;

    debug!(host = %host, addr = %addr.ip(), "resolved target");
    Ok(addr)
}

/// Create a raw IPv4 ICMP socket for the tracer
///
/// Raw sockets require elevated privilege; a denied creation is reported as
/// a permission error with a remediation hint rather than a generic socket
/// failure.
pub fn icmp_raw_socket() -> Result<Socket> {
    Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)).map_err(|e| {
        if e.kind() == io::ErrorKind::PermissionDenied {
            WirefishError::permission("creating a raw ICMP socket")
        } else {
            WirefishError::socket(format!("raw ICMP socket creation failed: {}", e))
        }
    })
}

/// Wait until `socket` is writable or `timeout` elapses
///
/// Returns `Ok(true)` when the socket became writable and `Ok(false)` on
/// timeout. A non-blocking connect completes (successfully or with a pending
/// error) when the socket turns writable.
pub fn wait_writable(socket: &Socket, timeout: Duration) -> io::Result<bool> {
    wait_fd(socket.as_raw_fd(), libc::POLLOUT, timeout)
}

/// Wait until `socket` is readable or `timeout` elapses
pub fn wait_readable(socket: &Socket, timeout: Duration) -> io::Result<bool> {
    wait_fd(socket.as_raw_fd(), libc::POLLIN, timeout)
}

/// Bounded poll on a single descriptor, restarted on EINTR with the
/// remaining time
fn wait_fd(fd: i32, events: i16, timeout: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        // round up so the wait never expires short of the deadline
        let timeout_ms = remaining
            .as_nanos()
            .div_ceil(1_000_000)
            .min(i32::MAX as u128) as i32;

        let mut pollfd = libc::pollfd {
            fd,
            events,
            revents: 0,
        };
        let rc = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
        if rc > 0 {
            return Ok(true);
        }
        if rc == 0 {
            return Ok(false);
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
