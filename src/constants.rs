//! # Configuration Constants
//!
//! This module contains the default values and operational limits used
//! throughout wirefish, including port and TTL ranges, probe timeouts, and
//! the monitor's sampling parameters.
//!
//! ## Example
//!
//! ```rust
//! use wirefish::constants::*;
//! use std::time::Duration;
//!
//! let timeout = Duration::from_millis(DEFAULT_TIMEOUT_MS);
//! let range = ports::MIN..=ports::MAX;
//! assert!(range.contains(&DEFAULT_PORTS_TO));
//! ```

/// Default first port for a scan when no range is given
pub const DEFAULT_PORTS_FROM: u16 = 1;

/// Default last port for a scan when no range is given
pub const DEFAULT_PORTS_TO: u16 = 1024;

/// Default starting TTL for a trace
pub const DEFAULT_TTL_START: u8 = 1;

/// Default maximum TTL for a trace
pub const DEFAULT_TTL_MAX: u8 = 30;

/// Default monitor sampling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Default per-attempt probe timeout in milliseconds
///
/// Used for each TCP connect attempt during a scan. The trace receive wait
/// uses its own fixed bound of [`TRACE_RECV_TIMEOUT_MS`].
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Fixed bound for each trace receive wait in milliseconds
pub const TRACE_RECV_TIMEOUT_MS: u64 = 1000;

/// Port range limits
pub mod ports {
    /// Lowest scannable TCP port
    pub const MIN: u16 = 1;
    /// Highest scannable TCP port
    pub const MAX: u16 = 65535;
}

/// TTL range limits (the IP TTL field is 8 bits)
pub mod ttl {
    /// Lowest probe TTL
    pub const MIN: u8 = 1;
    /// Highest probe TTL
    pub const MAX: u8 = 255;
}

/// Input validation limits
pub mod validation {
    /// Longest accepted target string (DNS names max out at 253 chars)
    pub const MAX_TARGET_LENGTH: usize = 253;
    /// Longest accepted probe timeout in milliseconds
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
    /// Shortest accepted monitor sampling interval in milliseconds
    pub const MIN_INTERVAL_MS: u64 = 10;
}

/// Monitor sampling parameters
pub mod monitor {
    /// Number of samples in the rolling-average window
    pub const WINDOW_SIZE: usize = 10;
}
