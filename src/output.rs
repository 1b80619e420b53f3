//! # Result Rendering
//!
//! This module renders the tables produced by the probing engines: colored
//! terminal tables for interactive use, JSON for machine consumption, and
//! CSV for spreadsheets. The engines themselves produce no textual output;
//! everything user-visible ends up here.
//!
//! ## Features
//!
//! - Colored, column-aligned tables for scan and trace results
//! - Pretty-printed JSON via serde
//! - CSV with stable column order and sentinel passthrough
//! - Live monitor lines with millisecond timestamps

use crate::error::{Result, WirefishError};
use crate::monitor::{IfaceStats, MonitorSeries};
use crate::scanner::{PortState, ScanTable};
use crate::tracer::TraceRoute;
use chrono::Local;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

/// Serialize any result table as pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| WirefishError::parse(format!("Failed to serialize JSON: {}", e)))
}

/// Print a scan table for interactive use
pub fn print_scan_table(table: &ScanTable, target: &str) {
    println!(
        "\n{} Scan results for {} ({} ports)",
        "SCAN".bright_cyan().bold(),
        target,
        table.len()
    );
    println!("{:>7}  {:<10}  {:>10}", "PORT", "STATE", "LATENCY");

    for row in table {
        let state = match row.state {
            PortState::Open => row.state.to_string().bright_green(),
            PortState::Closed => row.state.to_string().bright_red(),
            PortState::Filtered => row.state.to_string().yellow(),
        };
        let latency = if row.latency_ms >= 0 {
            format!("{} ms", row.latency_ms)
        } else {
            "-".to_string()
        };
        println!("{:>7}  {:<10}  {:>10}", row.port, state, latency);
    }

    let open = table
        .iter()
        .filter(|r| r.state == PortState::Open)
        .count();
    println!(
        "\n{} {} open, {} total",
        "DONE".bright_green(),
        open,
        table.len()
    );
}

/// Render a scan table as CSV
pub fn scan_to_csv(table: &ScanTable) -> String {
    let mut out = String::from("port,state,latency_ms\n");
    for row in table {
        let _ = writeln!(out, "{},{},{}", row.port, row.state, row.latency_ms);
    }
    out
}

/// Print a trace route for interactive use
pub fn print_trace_table(route: &TraceRoute, target: &str) {
    println!(
        "\n{} Route to {} ({} hops)",
        "TRACE".bright_cyan().bold(),
        target,
        route.len()
    );
    println!("{:>4}  {:<40}  {:>10}", "HOP", "ADDRESS", "RTT");

    for hop in route {
        if hop.timeout {
            println!("{:>4}  {:<40}  {:>10}", hop.hop, "*".dimmed(), "-".dimmed());
        } else {
            println!(
                "{:>4}  {:<40}  {:>10}",
                hop.hop,
                hop.ip,
                format!("{} ms", hop.rtt_ms)
            );
        }
    }
}

/// Render a trace route as CSV
pub fn trace_to_csv(route: &TraceRoute) -> String {
    let mut out = String::from("hop,ip,host,rtt_ms,timeout\n");
    for hop in route {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            hop.hop, hop.ip, hop.host, hop.rtt_ms, hop.timeout
        );
    }
    out
}

/// Print one live monitor sample line
pub fn print_monitor_sample(sample: &IfaceStats) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    println!(
        "[{}] {}  rx {:>12} (avg {:>12})  tx {:>12} (avg {:>12})",
        timestamp,
        sample.iface.bright_cyan(),
        format_rate(sample.rx_rate_bps),
        format_rate(sample.rx_avg_bps),
        format_rate(sample.tx_rate_bps),
        format_rate(sample.tx_avg_bps),
    );
}

/// Render a monitor series as CSV
pub fn monitor_to_csv(series: &MonitorSeries) -> String {
    let mut out =
        String::from("iface,rx_bytes,tx_bytes,rx_rate_bps,tx_rate_bps,rx_avg_bps,tx_avg_bps\n");
    for sample in series {
        let _ = writeln!(
            out,
            "{},{},{},{:.1},{:.1},{:.1},{:.1}",
            sample.iface,
            sample.rx_bytes,
            sample.tx_bytes,
            sample.rx_rate_bps,
            sample.tx_rate_bps,
            sample.rx_avg_bps,
            sample.tx_avg_bps
        );
    }
    out
}

/// Human-readable bits-per-second value
fn format_rate(bps: f64) -> String {
    const UNITS: [&str; 4] = ["b/s", "Kb/s", "Mb/s", "Gb/s"];
    let mut rate = bps;
    let mut unit = 0;
    while rate >= 1000.0 && unit < UNITS.len() - 1 {
        rate /= 1000.0;
        unit += 1;
    }
    format!("{:.1} {}", rate, UNITS[unit])
}
