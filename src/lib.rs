//! # WireFish - Network Reconnaissance and Monitoring
//!
//! WireFish is a network reconnaissance tool written in Rust that combines
//! TCP port scanning, ICMP traceroute, and interface bandwidth monitoring
//! in a single binary with JSON/CSV/tabular output.
//!
//! ## Features
//!
//! - **TCP Port Scanning**: Non-blocking connect probing with open/closed/
//!   filtered classification and per-port latency
//! - **ICMP Traceroute**: TTL-stepped raw-socket probing with early
//!   termination when the destination answers
//! - **Bandwidth Monitoring**: Interface RX/TX sampling with rolling
//!   averages
//! - **Multiple Output Formats**: Colored tables, JSON, and CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wirefish::config::Config;
//! use wirefish::scanner;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_args(&[
//!         "wirefish".to_string(),
//!         "--scan".to_string(),
//!         "--target".to_string(),
//!         "127.0.0.1".to_string(),
//!         "--ports".to_string(),
//!         "1-1024".to_string(),
//!     ])?;
//!
//!     let table = scanner::scan(&config)?;
//!     println!("scanned {} ports", table.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`]: Command-line argument parsing and run configuration
//! - [`net`]: Address resolution and socket helpers
//! - [`scanner`]: TCP connect probing and port-state classification
//! - [`icmp`]: ICMP packet construction, parsing, and checksums
//! - [`tracer`]: TTL-stepped traceroute engine
//! - [`monitor`]: Interface bandwidth sampling
//! - [`table`]: Growable result tables shared by all engines
//! - [`output`]: Table/JSON/CSV rendering
//! - [`cancel`]: Cooperative cancellation token
//! - [`validation`]: Input validation
//! - [`logging`]: Structured logging setup
//! - [`error`]: Error handling with custom error types
//! - [`constants`]: Defaults and operational limits

pub mod cancel;
pub mod config;
pub mod constants;
pub mod error;
pub mod icmp;
pub mod logging;
pub mod monitor;
pub mod net;
pub mod output;
pub mod scanner;
pub mod table;
pub mod tracer;
pub mod validation;
