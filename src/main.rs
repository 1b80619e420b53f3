// wirefish - network reconnaissance and monitoring tool

use colored::Colorize;
use std::env;
use std::process;
use wirefish::cancel::CancelToken;
use wirefish::config::{Config, Mode};
use wirefish::constants;
use wirefish::error::{Result, WirefishError};
use wirefish::logging::{init_logging, LogConfig};
use wirefish::{monitor, output, scanner, tracer};

/// Application entry point
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        process::exit(0);
    }

    let config = match Config::from_args(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    match LogConfig::from_env().and_then(|log| init_logging(&log)) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    }

    if let Err(e) = run(config) {
        eprintln!("{} {}", "✗".red().bold(), e);
        process::exit(1);
    }
}

/// Print usage information
fn print_usage() {
    eprintln!("{}", "usage: wirefish [MODE] [OPTIONS]".bold());
    eprintln!();
    eprintln!("WireFish - Network reconnaissance and monitoring tool");
    eprintln!();
    eprintln!("Modes (choose one):");
    eprintln!("  --scan              TCP port scanning");
    eprintln!("  --trace             ICMP traceroute (requires root or CAP_NET_RAW)");
    eprintln!("  --monitor           Network interface monitoring");
    eprintln!();
    eprintln!("Scan Options:");
    eprintln!("  --target <host>     Target hostname or IP (required)");
    eprintln!(
        "  --ports <from-to>   Port range (default: {}-{})",
        constants::DEFAULT_PORTS_FROM,
        constants::DEFAULT_PORTS_TO
    );
    eprintln!(
        "  --timeout <ms>      Per-port connect timeout (default: {})",
        constants::DEFAULT_TIMEOUT_MS
    );
    eprintln!();
    eprintln!("Trace Options:");
    eprintln!("  --target <host>     Target hostname or IP (required)");
    eprintln!(
        "  --ttl <start-max>   TTL range (default: {}-{})",
        constants::DEFAULT_TTL_START,
        constants::DEFAULT_TTL_MAX
    );
    eprintln!();
    eprintln!("Monitor Options:");
    eprintln!("  --iface <name>      Network interface (default: auto-detect)");
    eprintln!(
        "  --interval <ms>     Sample interval in milliseconds (default: {})",
        constants::DEFAULT_INTERVAL_MS
    );
    eprintln!("  --duration <secs>   Stop after this many seconds (default: until Ctrl-C)");
    eprintln!();
    eprintln!("Output Options:");
    eprintln!("  --json              Output in JSON format");
    eprintln!("  --csv               Output in CSV format");
    eprintln!();
    eprintln!("Other:");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  wirefish --scan --target google.com --ports 80-443");
    eprintln!("  wirefish --trace --target 8.8.8.8 --json");
    eprintln!("  wirefish --monitor --iface eth0 --interval 500");
}

/// Main application logic
fn run(config: Config) -> Result<()> {
    match config.mode {
        Mode::Scan => run_scan(&config),
        Mode::Trace => run_trace(&config),
        Mode::Monitor => run_monitor(&config),
    }
}

fn run_scan(config: &Config) -> Result<()> {
    let table = scanner::scan(config)?;

    if config.json {
        println!("{}", output::to_json(&table)?);
    } else if config.csv {
        print!("{}", output::scan_to_csv(&table));
    } else {
        output::print_scan_table(&table, &config.target);
    }
    Ok(())
}

fn run_trace(config: &Config) -> Result<()> {
    let route = tracer::trace(config)?;

    if config.json {
        println!("{}", output::to_json(&route)?);
    } else if config.csv {
        print!("{}", output::trace_to_csv(&route));
    } else {
        output::print_trace_table(&route, &config.target);
    }
    Ok(())
}

fn run_monitor(config: &Config) -> Result<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .map_err(|e| WirefishError::config(format!("Failed to install Ctrl-C handler: {}", e)))?;

    let live = !config.json && !config.csv;
    let series = monitor::run(config, &cancel, |sample| {
        if live {
            output::print_monitor_sample(sample);
        }
    })?;

    if config.json {
        println!("{}", output::to_json(&series)?);
    } else if config.csv {
        print!("{}", output::monitor_to_csv(&series));
    } else {
        println!(
            "\n{} collected {} samples",
            "DONE".bright_green(),
            series.len()
        );
    }
    Ok(())
}
