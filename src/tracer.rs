//! # ICMP Traceroute Engine
//!
//! This module discovers the router path to a target by sending ICMP echo
//! requests with stepped TTL values over a raw socket and collecting the
//! responders. Routers along the path answer with time-exceeded when the
//! TTL expires; the destination itself answers with an echo reply, which
//! terminates the trace early.
//!
//! ## Features
//!
//! - TTL-stepped echo probing with per-hop round-trip timing
//! - Sequence numbers tied to the probing TTL for informal correlation
//! - Early termination on the destination's echo reply
//! - Distinct, actionable error when raw-socket privilege is missing
//!
//! ## Example
//!
//! ```rust,no_run
//! use wirefish::config::Config;
//! use wirefish::tracer;
//!
//! let config = Config::from_args(&[
//!     "wirefish".to_string(),
//!     "--trace".to_string(),
//!     "--target".to_string(),
//!     "8.8.8.8".to_string(),
//! ])?;
//!
//! let route = tracer::trace(&config)?;
//! for hop in &route {
//!     println!("{:>3}  {}  {} ms", hop.hop, hop.ip, hop.rtt_ms);
//! }
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::config::Config;
use crate::constants;
use crate::error::{Result, WirefishError};
use crate::icmp;
use crate::net;
use crate::table::ResultTable;
use serde::Serialize;
use socket2::SockAddr;
use std::mem::MaybeUninit;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Payload carried by every probe packet
const PROBE_PAYLOAD: &[u8] = b"wirefish";

/// Receive buffer size for inbound datagrams, IP header included
const RECV_BUFFER_LEN: usize = 512;

/// One hop record of a trace
#[derive(Clone, Debug, Serialize)]
pub struct Hop {
    /// TTL value that produced this record
    pub hop: u8,
    /// Responder name; duplicates `ip` since no reverse lookup is attempted,
    /// "?" when nothing answered
    pub host: String,
    /// Responder address in dotted-quad form, "*" when nothing answered
    pub ip: String,
    /// Round-trip time in milliseconds, -1 on timeout
    pub rtt_ms: i32,
    /// True when the probe went unanswered
    pub timeout: bool,
}

/// Ordered hop records, ascending TTL order
pub type TraceRoute = ResultTable<Hop>;

/// Trace the route to the configured target
///
/// Resolves the target once, opens one raw ICMP socket for the whole run,
/// and probes each TTL in the configured range in turn. Resolution and
/// socket-creation failures abort with no partial route; so does any build
/// or send failure, since a trace without a working send path is
/// meaningless. Unanswered probes and unparseable responses become timeout
/// hops and the trace continues.
pub fn trace(config: &Config) -> Result<TraceRoute> {
    let addr = net::resolve(&config.target)?;
    let socket = net::icmp_raw_socket()?;
    let dest = SockAddr::from(addr);
    let identifier = (std::process::id() & 0xffff) as u16;

    debug!(
        target = %config.target,
        addr = %addr.ip(),
        ttl_start = config.ttl_start,
        ttl_max = config.ttl_max,
        "starting trace"
    );

    let recv_timeout = Duration::from_millis(constants::TRACE_RECV_TIMEOUT_MS);
    let mut route = TraceRoute::new();

    for ttl in config.ttl_start..=config.ttl_max {
        socket
            .set_ttl(u32::from(ttl))
            .map_err(|e| WirefishError::socket(format!("setting IP_TTL to {}: {}", ttl, e)))?;

        let mut packet = [0u8; icmp::HEADER_LEN + PROBE_PAYLOAD.len()];
        let len = icmp::build_echo(&mut packet, identifier, u16::from(ttl), PROBE_PAYLOAD)?;

        let start = Instant::now();
        socket
            .send_to(&packet[..len], &dest)
            .map_err(|e| WirefishError::socket(format!("sending probe at TTL {}: {}", ttl, e)))?;

        let (hop, reached) = receive_hop(&socket, ttl, start, recv_timeout);
        debug!(
            ttl = ttl,
            ip = %hop.ip,
            rtt_ms = hop.rtt_ms,
            timeout = hop.timeout,
            "hop recorded"
        );

        if let Err(e) = route.push(hop) {
            warn!(error = %e, "result table growth failed, returning partial route");
            break;
        }
        if reached {
            debug!(ttl = ttl, "destination reached");
            break;
        }
    }

    Ok(route)
}

/// Wait for one response and turn it into a hop record
///
/// Returns the hop plus a flag set when the responder sent an echo reply,
/// meaning the destination itself answered. Receive-side failures of any
/// kind (wait error, truncated read, unparseable datagram) degrade to a
/// timeout hop; only the send path is allowed to abort a trace.
fn receive_hop(socket: &socket2::Socket, ttl: u8, start: Instant, timeout: Duration) -> (Hop, bool) {
    match net::wait_readable(socket, timeout) {
        Ok(true) => {}
        Ok(false) => return (timeout_hop(ttl), false),
        Err(e) => {
            debug!(ttl = ttl, error = %e, "receive wait failed");
            return (timeout_hop(ttl), false);
        }
    }

    let mut buf = [MaybeUninit::<u8>::uninit(); RECV_BUFFER_LEN];
    let (len, responder) = match socket.recv_from(&mut buf) {
        Ok(received) => received,
        Err(e) => {
            debug!(ttl = ttl, error = %e, "receive failed");
            return (timeout_hop(ttl), false);
        }
    };

    // recv_from initialized the first `len` bytes
    let datagram = unsafe { std::slice::from_raw_parts(buf.as_ptr().cast::<u8>(), len) };

    let icmp_type = match icmp::parse_response(datagram) {
        Ok(icmp_type) => icmp_type,
        Err(e) => {
            debug!(ttl = ttl, error = %e, "ignoring unparseable response");
            return (timeout_hop(ttl), false);
        }
    };

    let rtt_ms = start.elapsed().as_millis().min(i32::MAX as u128) as i32;
    let ip = responder
        .as_socket()
        .map(|s| s.ip().to_string())
        .unwrap_or_else(|| "*".to_string());

    let hop = Hop {
        hop: ttl,
        host: ip.clone(),
        ip,
        rtt_ms,
        timeout: false,
    };
    (hop, icmp_type == icmp::ECHO_REPLY)
}

/// Hop record for a probe nothing answered
fn timeout_hop(ttl: u8) -> Hop {
    Hop {
        hop: ttl,
        host: "?".to_string(),
        ip: "*".to_string(),
        rtt_ms: -1,
        timeout: true,
    }
}
