//! # Configuration Management
//!
//! This module handles command-line argument parsing and configuration for
//! wirefish runs. Exactly one mode is selected per invocation (scan, trace,
//! or monitor) and every range constraint is enforced here, before any
//! probing starts.
//!
//! ## Example
//!
//! ```rust
//! use wirefish::config::{Config, Mode};
//!
//! let config = Config::from_args(&[
//!     "wirefish".to_string(),
//!     "--scan".to_string(),
//!     "--target".to_string(),
//!     "example.com".to_string(),
//!     "--ports".to_string(),
//!     "80-443".to_string(),
//!     "--json".to_string(),
//! ])?;
//!
//! assert_eq!(config.mode, Mode::Scan);
//! assert_eq!(config.target, "example.com");
//! assert_eq!((config.ports_from, config.ports_to), (80, 443));
//! assert!(config.json);
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::constants;
use crate::error::{Result, WirefishError};
use crate::validation;
use std::time::Duration;

/// Operation mode selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// TCP port scanning
    Scan,
    /// ICMP traceroute
    Trace,
    /// Interface bandwidth monitoring
    Monitor,
}

/// Parsed and validated run configuration
///
/// The probing engines treat this as read-only input; all range constraints
/// hold by the time a `Config` exists.
#[derive(Clone, Debug)]
pub struct Config {
    /// Selected operation mode
    pub mode: Mode,
    /// Target hostname or IP address (scan and trace)
    pub target: String,
    /// First port of the scan range, inclusive
    pub ports_from: u16,
    /// Last port of the scan range, inclusive
    pub ports_to: u16,
    /// First TTL of the trace range, inclusive
    pub ttl_start: u8,
    /// Last TTL of the trace range, inclusive
    pub ttl_max: u8,
    /// Monitor sampling interval in milliseconds
    pub interval_ms: u64,
    /// Monitor duration in seconds, 0 = run until cancelled
    pub duration_secs: u64,
    /// Interface to monitor, auto-detected when absent
    pub iface: Option<String>,
    /// Per-attempt probe timeout
    pub timeout: Duration,
    /// Output results as JSON
    pub json: bool,
    /// Output results as CSV
    pub csv: bool,
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut mode: Option<Mode> = None;
        let mut target: Option<String> = None;
        let mut ports = (constants::DEFAULT_PORTS_FROM, constants::DEFAULT_PORTS_TO);
        let mut ttl = (constants::DEFAULT_TTL_START, constants::DEFAULT_TTL_MAX);
        let mut interval_ms = constants::DEFAULT_INTERVAL_MS;
        let mut duration_secs = 0;
        let mut iface = None;
        let mut timeout_ms = constants::DEFAULT_TIMEOUT_MS;
        let mut json = false;
        let mut csv = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--scan" => Self::set_mode(&mut mode, Mode::Scan)?,
                "--trace" => Self::set_mode(&mut mode, Mode::Trace)?,
                "--monitor" => Self::set_mode(&mut mode, Mode::Monitor)?,
                "--json" => json = true,
                "--csv" => csv = true,
                "--target" => {
                    let value = Self::take_value(args, &mut i, "--target")?;
                    target = Some(validation::validate_target(&value)?);
                }
                "--ports" => {
                    let value = Self::take_value(args, &mut i, "--ports")?;
                    let (from, to) = Self::parse_range::<u16>(&value, "--ports")?;
                    ports = validation::validate_port_range(from, to)?;
                }
                "--ttl" => {
                    let value = Self::take_value(args, &mut i, "--ttl")?;
                    let (start, max) = Self::parse_range::<u8>(&value, "--ttl")?;
                    ttl = validation::validate_ttl_range(start, max)?;
                }
                "--iface" => {
                    iface = Some(Self::take_value(args, &mut i, "--iface")?);
                }
                "--interval" => {
                    let value = Self::take_value(args, &mut i, "--interval")?;
                    let parsed = value.parse::<u64>().map_err(|_| {
                        WirefishError::config(format!("Invalid interval: {}", value))
                    })?;
                    interval_ms = validation::validate_interval_ms(parsed)?;
                }
                "--duration" => {
                    let value = Self::take_value(args, &mut i, "--duration")?;
                    duration_secs = value.parse::<u64>().map_err(|_| {
                        WirefishError::config(format!("Invalid duration: {}", value))
                    })?;
                }
                "--timeout" => {
                    let value = Self::take_value(args, &mut i, "--timeout")?;
                    let parsed = value.parse::<u64>().map_err(|_| {
                        WirefishError::config(format!("Invalid timeout: {}", value))
                    })?;
                    timeout_ms = validation::validate_timeout_ms(parsed)?;
                }
                other => {
                    return Err(WirefishError::config(format!(
                        "Unknown argument: {}",
                        other
                    )));
                }
            }
            i += 1;
        }

        let mode = mode.ok_or_else(|| {
            WirefishError::config("A mode is required: --scan, --trace, or --monitor")
        })?;

        if json && csv {
            return Err(WirefishError::config(
                "--json and --csv are mutually exclusive",
            ));
        }

        let target = match mode {
            Mode::Scan | Mode::Trace => target.ok_or_else(|| {
                WirefishError::config("--target is required for --scan and --trace")
            })?,
            Mode::Monitor => target.unwrap_or_default(),
        };

        Ok(Config {
            mode,
            target,
            ports_from: ports.0,
            ports_to: ports.1,
            ttl_start: ttl.0,
            ttl_max: ttl.1,
            interval_ms,
            duration_secs,
            iface,
            timeout: Duration::from_millis(timeout_ms),
            json,
            csv,
        })
    }

    /// Record the selected mode, rejecting a second one
    fn set_mode(slot: &mut Option<Mode>, mode: Mode) -> Result<()> {
        if slot.is_some() && *slot != Some(mode) {
            return Err(WirefishError::config(
                "Only one of --scan, --trace, --monitor may be given",
            ));
        }
        *slot = Some(mode);
        Ok(())
    }

    /// Consume the value following a flag
    fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
        *i += 1;
        args.get(*i)
            .cloned()
            .ok_or_else(|| WirefishError::config(format!("Missing value for {}", flag)))
    }

    /// Parse a `from-to` range argument
    fn parse_range<T: std::str::FromStr>(value: &str, flag: &str) -> Result<(T, T)> {
        let (from, to) = value.split_once('-').ok_or_else(|| {
            WirefishError::config(format!("{} expects a from-to range, got: {}", flag, value))
        })?;

        let from = from.parse::<T>().map_err(|_| {
            WirefishError::config(format!("Invalid {} range start: {}", flag, from))
        })?;
        let to = to
            .parse::<T>()
            .map_err(|_| WirefishError::config(format!("Invalid {} range end: {}", flag, to)))?;

        Ok((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("wirefish")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_scan_defaults() {
        let config = Config::from_args(&args(&["--scan", "--target", "127.0.0.1"])).unwrap();
        assert_eq!(config.mode, Mode::Scan);
        assert_eq!(config.ports_from, constants::DEFAULT_PORTS_FROM);
        assert_eq!(config.ports_to, constants::DEFAULT_PORTS_TO);
        assert_eq!(config.timeout.as_millis() as u64, constants::DEFAULT_TIMEOUT_MS);
        assert!(!config.json);
        assert!(!config.csv);
    }

    #[test]
    fn test_trace_with_ttl_range() {
        let config = Config::from_args(&args(&[
            "--trace", "--target", "8.8.8.8", "--ttl", "2-12",
        ]))
        .unwrap();
        assert_eq!(config.mode, Mode::Trace);
        assert_eq!((config.ttl_start, config.ttl_max), (2, 12));
    }

    #[test]
    fn test_monitor_needs_no_target() {
        let config = Config::from_args(&args(&["--monitor", "--interval", "250"])).unwrap();
        assert_eq!(config.mode, Mode::Monitor);
        assert_eq!(config.interval_ms, 250);
        assert!(config.iface.is_none());
    }

    #[test]
    fn test_missing_mode_is_rejected() {
        assert!(Config::from_args(&args(&["--target", "127.0.0.1"])).is_err());
    }

    #[test]
    fn test_missing_target_is_rejected_for_scan() {
        assert!(Config::from_args(&args(&["--scan"])).is_err());
    }

    #[test]
    fn test_conflicting_modes_are_rejected() {
        assert!(Config::from_args(&args(&["--scan", "--trace", "--target", "x"])).is_err());
    }

    #[test]
    fn test_json_and_csv_are_mutually_exclusive() {
        assert!(Config::from_args(&args(&[
            "--scan", "--target", "127.0.0.1", "--json", "--csv",
        ]))
        .is_err());
    }

    #[test]
    fn test_inverted_port_range_is_rejected() {
        assert!(Config::from_args(&args(&[
            "--scan", "--target", "127.0.0.1", "--ports", "443-80",
        ]))
        .is_err());
    }

    #[test]
    fn test_out_of_range_ttl_is_rejected() {
        assert!(Config::from_args(&args(&[
            "--trace", "--target", "127.0.0.1", "--ttl", "0-30",
        ]))
        .is_err());
    }

    #[test]
    fn test_malformed_range_is_rejected() {
        assert!(Config::from_args(&args(&[
            "--scan", "--target", "127.0.0.1", "--ports", "80",
        ]))
        .is_err());
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        assert!(Config::from_args(&args(&["--scan", "--fast"])).is_err());
    }
}
