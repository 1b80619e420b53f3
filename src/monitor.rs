//! # Interface Bandwidth Monitor
//!
//! This module samples RX/TX byte counters for one network interface from
//! `/proc/net/dev` at a fixed interval, computes instantaneous bit rates
//! and rolling averages over a small window, and collects the samples into
//! a series for the output layer.
//!
//! ## Features
//!
//! - Interface auto-detection (first non-loopback entry)
//! - Instantaneous and rolling-average RX/TX rates in bits per second
//! - Cooperative stop via a cancellation token, optional duration bound
//! - Per-sample callback for live display
//!
//! ## Example
//!
//! ```rust,no_run
//! use wirefish::cancel::CancelToken;
//! use wirefish::config::Config;
//! use wirefish::monitor;
//!
//! let config = Config::from_args(&[
//!     "wirefish".to_string(),
//!     "--monitor".to_string(),
//!     "--interval".to_string(),
//!     "500".to_string(),
//!     "--duration".to_string(),
//!     "10".to_string(),
//! ])?;
//!
//! let cancel = CancelToken::new();
//! let series = monitor::run(&config, &cancel, |sample| {
//!     println!("{}: {:.0} bps down", sample.iface, sample.rx_rate_bps);
//! })?;
//! println!("collected {} samples", series.len());
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::config::Config;
use crate::constants::monitor::WINDOW_SIZE;
use crate::error::{Result, WirefishError};
use crate::cancel::CancelToken;
use crate::table::ResultTable;
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Kernel network device statistics file
const PROC_NET_DEV: &str = "/proc/net/dev";

/// One bandwidth sample for an interface
#[derive(Clone, Debug, Serialize)]
pub struct IfaceStats {
    /// Interface name
    pub iface: String,
    /// Total received bytes since boot
    pub rx_bytes: u64,
    /// Total transmitted bytes since boot
    pub tx_bytes: u64,
    /// Instantaneous receive rate in bits per second
    pub rx_rate_bps: f64,
    /// Instantaneous transmit rate in bits per second
    pub tx_rate_bps: f64,
    /// Rolling-average receive rate in bits per second
    pub rx_avg_bps: f64,
    /// Rolling-average transmit rate in bits per second
    pub tx_avg_bps: f64,
}

/// Ordered bandwidth samples, one per interval tick
pub type MonitorSeries = ResultTable<IfaceStats>;

/// Fixed-size ring buffer backing the rolling averages
///
/// Overwrites the oldest value once full.
struct RingBuffer {
    values: Vec<f64>,
    head: usize,
    count: usize,
}

impl RingBuffer {
    fn new(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
            head: 0,
            count: 0,
        }
    }

    fn push(&mut self, value: f64) {
        self.values[self.head] = value;
        self.head = (self.head + 1) % self.values.len();
        if self.count < self.values.len() {
            self.count += 1;
        }
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let sum: f64 = self.values[..self.count].iter().sum();
        sum / self.count as f64
    }
}

/// Monitor the configured interface until cancelled or the duration elapses
///
/// Takes a baseline reading, then sleeps one interval per iteration and
/// derives rates from the counter deltas over the actually elapsed time.
/// A failed counter read skips that tick; a failed series growth stops
/// collection and returns the samples gathered so far. `on_sample` runs for
/// every stored sample, giving the caller a live display hook.
pub fn run(
    config: &Config,
    cancel: &CancelToken,
    mut on_sample: impl FnMut(&IfaceStats),
) -> Result<MonitorSeries> {
    let iface = match &config.iface {
        Some(name) => name.clone(),
        None => default_interface()?,
    };

    let interval = Duration::from_millis(config.interval_ms);
    let deadline = (config.duration_secs > 0)
        .then(|| Instant::now() + Duration::from_secs(config.duration_secs));

    debug!(iface = %iface, interval_ms = config.interval_ms, "starting monitor");

    let mut rx_ring = RingBuffer::new(WINDOW_SIZE);
    let mut tx_ring = RingBuffer::new(WINDOW_SIZE);
    let mut series = MonitorSeries::new();

    let (mut prev_rx, mut prev_tx) = read_counters(&iface)?;
    let mut prev_time = Instant::now();

    while !cancel.is_cancelled() {
        std::thread::sleep(interval);

        let now = Instant::now();
        if cancel.is_cancelled() {
            break;
        }
        if let Some(deadline) = deadline {
            if now >= deadline {
                break;
            }
        }

        let (curr_rx, curr_tx) = match read_counters(&iface) {
            Ok(counters) => counters,
            Err(e) => {
                debug!(error = %e, "skipping tick, counter read failed");
                continue;
            }
        };

        let elapsed = now.duration_since(prev_time).as_secs_f64();
        if elapsed <= 0.0 {
            continue;
        }

        let rx_rate = (curr_rx.saturating_sub(prev_rx)) as f64 * 8.0 / elapsed;
        let tx_rate = (curr_tx.saturating_sub(prev_tx)) as f64 * 8.0 / elapsed;
        rx_ring.push(rx_rate);
        tx_ring.push(tx_rate);

        let sample = IfaceStats {
            iface: iface.clone(),
            rx_bytes: curr_rx,
            tx_bytes: curr_tx,
            rx_rate_bps: rx_rate,
            tx_rate_bps: tx_rate,
            rx_avg_bps: rx_ring.average(),
            tx_avg_bps: tx_ring.average(),
        };
        on_sample(&sample);

        if let Err(e) = series.push(sample) {
            warn!(error = %e, "series growth failed, returning partial monitor data");
            break;
        }

        prev_rx = curr_rx;
        prev_tx = curr_tx;
        prev_time = now;
    }

    Ok(series)
}

/// First non-loopback interface listed in /proc/net/dev
pub fn default_interface() -> Result<String> {
    let contents = fs::read_to_string(PROC_NET_DEV)?;
    first_non_loopback(&contents)
        .ok_or_else(|| WirefishError::config("could not auto-detect a network interface"))
}

/// Read RX/TX byte counters for `iface`
fn read_counters(iface: &str) -> Result<(u64, u64)> {
    let contents = fs::read_to_string(PROC_NET_DEV)?;
    parse_counters(&contents, iface).ok_or_else(|| {
        WirefishError::config(format!("interface '{}' not found in {}", iface, PROC_NET_DEV))
    })
}

/// Extract RX/TX byte counters for `iface` from /proc/net/dev contents
///
/// The first two lines are headers. Each interface line is
/// `name: rx_bytes rx_packets ... tx_bytes ...` with the RX byte counter in
/// field 1 and the TX byte counter in field 9 after the colon.
fn parse_counters(contents: &str, iface: &str) -> Option<(u64, u64)> {
    for line in contents.lines().skip(2) {
        let (name, counters) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        if name.trim() != iface {
            continue;
        }

        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            return None;
        }
        let rx = fields[0].parse().ok()?;
        let tx = fields[8].parse().ok()?;
        return Some((rx, tx));
    }
    None
}

/// First interface name in /proc/net/dev contents that is not "lo"
fn first_non_loopback(contents: &str) -> Option<String> {
    for line in contents.lines().skip(2) {
        if let Some((name, _)) = line.split_once(':') {
            let name = name.trim();
            if name != "lo" {
                return Some(name.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1234567     100    0    0    0     0          0         0  1234567     100    0    0    0     0       0          0
  eth0: 98765432    2000    0    0    0     0          0         0  11223344    1500    0    0    0     0       0          0
";

    #[test]
    fn test_parse_counters_extracts_rx_and_tx() {
        let (rx, tx) = parse_counters(SAMPLE, "eth0").unwrap();
        assert_eq!(rx, 98765432);
        assert_eq!(tx, 11223344);
    }

    #[test]
    fn test_parse_counters_missing_interface() {
        assert!(parse_counters(SAMPLE, "wlan0").is_none());
    }

    #[test]
    fn test_parse_counters_skips_headers() {
        // "face" appears in the header lines but must never match
        assert!(parse_counters(SAMPLE, "face").is_none());
    }

    #[test]
    fn test_first_non_loopback_skips_lo() {
        assert_eq!(first_non_loopback(SAMPLE).unwrap(), "eth0");
    }

    #[test]
    fn test_ring_buffer_partial_fill_average() {
        let mut ring = RingBuffer::new(4);
        ring.push(10.0);
        ring.push(20.0);
        assert!((ring.average() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ring_buffer_overwrites_oldest() {
        let mut ring = RingBuffer::new(3);
        for value in [1.0, 2.0, 3.0, 4.0] {
            ring.push(value);
        }
        // 1.0 was evicted, so the window holds 2, 3, 4
        assert!((ring.average() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ring_buffer_empty_average_is_zero() {
        let ring = RingBuffer::new(3);
        assert_eq!(ring.average(), 0.0);
    }

    #[test]
    fn test_iface_stats_serialization() {
        let sample = IfaceStats {
            iface: "eth0".to_string(),
            rx_bytes: 100,
            tx_bytes: 200,
            rx_rate_bps: 800.0,
            tx_rate_bps: 1600.0,
            rx_avg_bps: 800.0,
            tx_avg_bps: 1600.0,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains(r#""iface":"eth0""#));
        assert!(json.contains(r#""rx_bytes":100"#));
    }
}
