//! # Error Handling
//!
//! This module provides error handling for all wirefish operations with
//! custom error types that cover the failure scenarios of each subsystem.
//! It uses the `thiserror` crate for clean error definitions and improved
//! error messages.
//!
//! ## Features
//!
//! - Custom error types for configuration, resolution, socket, and packet
//!   failures
//! - A distinct, actionable error for denied raw-socket creation
//! - Error conversion from standard I/O errors
//! - Result type alias for convenience
//!
//! ## Example
//!
//! ```rust
//! use wirefish::error::{Result, WirefishError};
//!
//! fn validate_ttl(ttl: u8) -> Result<()> {
//!     if ttl == 0 {
//!         return Err(WirefishError::validation("TTL cannot be 0"));
//!     }
//!     Ok(())
//! }
//!
//! match validate_ttl(0) {
//!     Ok(_) => println!("TTL is valid"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::io;

/// Custom error types for wirefish operations
///
/// This enum represents all error conditions that can occur during scanning,
/// tracing, and monitoring, providing specific error types for different
/// scenarios like resolution failures, permission problems, and malformed
/// packets.
#[derive(Debug, thiserror::Error)]
pub enum WirefishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("DNS resolution failed for '{host}': {detail}")]
    Resolution { host: String, detail: String },

    #[error("Permission denied while {0}: raw ICMP sockets require root or CAP_NET_RAW (re-run with sudo or grant the capability)")]
    Permission(String),

    #[error("Socket error: {0}")]
    Socket(String),

    #[error("Packet error: {0}")]
    Parse(String),

    #[error("Allocation error: {0}")]
    Allocation(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WirefishError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new resolution error, preserving the resolver's message
    pub fn resolution(host: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Resolution {
            host: host.into(),
            detail: detail.into(),
        }
    }

    /// Create a new permission error for a denied privileged operation
    pub fn permission(operation: impl Into<String>) -> Self {
        Self::Permission(operation.into())
    }

    /// Create a new socket error
    pub fn socket(msg: impl Into<String>) -> Self {
        Self::Socket(msg.into())
    }

    /// Create a new packet parse/build error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new allocation error
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }
}

/// Result type alias for wirefish operations
pub type Result<T> = std::result::Result<T, WirefishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_preserves_detail() {
        let err = WirefishError::resolution("nosuch.invalid", "Name or service not known");
        let text = err.to_string();
        assert!(text.contains("nosuch.invalid"));
        assert!(text.contains("Name or service not known"));
    }

    #[test]
    fn test_permission_error_is_actionable() {
        let err = WirefishError::permission("creating a raw ICMP socket");
        let text = err.to_string();
        assert!(text.contains("CAP_NET_RAW"));
        assert!(text.contains("sudo"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        let err: WirefishError = io_err.into();
        assert!(matches!(err, WirefishError::Io(_)));
    }
}
