//! # Input Validation Module
//!
//! This module provides input validation for wirefish, ensuring user inputs
//! are checked before reaching the probing engines: target strings, port
//! ranges, TTL ranges, timeouts, and sampling intervals.
//!
//! ## Example
//!
//! ```rust
//! use wirefish::validation::*;
//!
//! let target = validate_target("example.com")?;
//! let (from, to) = validate_port_range(80, 443)?;
//! assert_eq!((from, to), (80, 443));
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::constants;
use crate::error::{Result, WirefishError};

/// Validates a target hostname or IP address string
pub fn validate_target(target: &str) -> Result<String> {
    if target.is_empty() {
        return Err(WirefishError::validation("Target cannot be empty"));
    }

    if target.len() > constants::validation::MAX_TARGET_LENGTH {
        return Err(WirefishError::validation("Target too long"));
    }

    if target.contains(' ') || target.contains('\t') || target.contains('\n') {
        return Err(WirefishError::validation(
            "Target contains invalid characters",
        ));
    }

    Ok(target.to_string())
}

/// Validates an inclusive port range
pub fn validate_port_range(from: u16, to: u16) -> Result<(u16, u16)> {
    if from < constants::ports::MIN {
        return Err(WirefishError::validation("Ports start at 1"));
    }

    if from > to {
        return Err(WirefishError::validation(format!(
            "Port range start {} exceeds end {}",
            from, to
        )));
    }

    Ok((from, to))
}

/// Validates an inclusive TTL range
pub fn validate_ttl_range(start: u8, max: u8) -> Result<(u8, u8)> {
    if start < constants::ttl::MIN {
        return Err(WirefishError::validation("TTL values start at 1"));
    }

    if start > max {
        return Err(WirefishError::validation(format!(
            "TTL range start {} exceeds max {}",
            start, max
        )));
    }

    Ok((start, max))
}

/// Validates a per-attempt probe timeout in milliseconds
pub fn validate_timeout_ms(timeout_ms: u64) -> Result<u64> {
    if timeout_ms == 0 {
        return Err(WirefishError::validation(
            "Timeout must be greater than 0 ms",
        ));
    }

    if timeout_ms > constants::validation::MAX_TIMEOUT_MS {
        return Err(WirefishError::validation(format!(
            "Timeout exceeds the {} ms maximum",
            constants::validation::MAX_TIMEOUT_MS
        )));
    }

    Ok(timeout_ms)
}

/// Validates a monitor sampling interval in milliseconds
pub fn validate_interval_ms(interval_ms: u64) -> Result<u64> {
    if interval_ms < constants::validation::MIN_INTERVAL_MS {
        return Err(WirefishError::validation(format!(
            "Interval must be at least {} ms",
            constants::validation::MIN_INTERVAL_MS
        )));
    }

    Ok(interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target() {
        assert!(validate_target("127.0.0.1").is_ok());
        assert!(validate_target("example.com").is_ok());
        assert!(validate_target("").is_err());
        assert!(validate_target("bad host").is_err());
    }

    #[test]
    fn test_validate_port_range() {
        assert!(validate_port_range(1, 65535).is_ok());
        assert!(validate_port_range(80, 80).is_ok());
        assert!(validate_port_range(0, 80).is_err());
        assert!(validate_port_range(443, 80).is_err());
    }

    #[test]
    fn test_validate_ttl_range() {
        assert!(validate_ttl_range(1, 30).is_ok());
        assert!(validate_ttl_range(5, 5).is_ok());
        assert!(validate_ttl_range(0, 30).is_err());
        assert!(validate_ttl_range(30, 1).is_err());
    }

    #[test]
    fn test_validate_timeout_ms() {
        assert!(validate_timeout_ms(1000).is_ok());
        assert!(validate_timeout_ms(0).is_err());
        assert!(validate_timeout_ms(120_000).is_err());
    }

    #[test]
    fn test_validate_interval_ms() {
        assert!(validate_interval_ms(100).is_ok());
        assert!(validate_interval_ms(1).is_err());
    }
}
