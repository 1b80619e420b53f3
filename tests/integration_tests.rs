#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use wirefish::config::{Config, Mode};
    use wirefish::net;
    use wirefish::output;
    use wirefish::scanner::{self, PortState};

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("wirefish")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_resolve_feeds_the_scanner() {
        let addr = net::resolve("localhost").unwrap();
        assert!(addr.is_ipv4());
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn test_scan_to_csv_pipeline() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let config = Config::from_args(&args(&[
            "--scan",
            "--target",
            "127.0.0.1",
            "--ports",
            &format!("{}-{}", port, port),
            "--timeout",
            "500",
            "--csv",
        ]))
        .unwrap();
        assert!(config.csv);

        let table = scanner::scan(&config).unwrap();
        let csv = output::scan_to_csv(&table);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "port,state,latency_ms");
        assert!(lines[1].starts_with(&format!("{},open,", port)));
    }

    #[test]
    fn test_scan_to_json_pipeline() {
        let config = Config::from_args(&args(&[
            "--scan",
            "--target",
            "127.0.0.1",
            "--ports",
            "1-3",
            "--timeout",
            "500",
            "--json",
        ]))
        .unwrap();

        let table = scanner::scan(&config).unwrap();
        let json = output::to_json(&table).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row["port"], (i + 1) as u64);
            let state = row["state"].as_str().unwrap();
            assert!(["open", "closed", "filtered"].contains(&state));
        }
    }

    #[test]
    fn test_each_port_appears_exactly_once() {
        let config = Config::from_args(&args(&[
            "--scan",
            "--target",
            "127.0.0.1",
            "--ports",
            "30-39",
            "--timeout",
            "500",
        ]))
        .unwrap();

        let table = scanner::scan(&config).unwrap();
        let mut seen: Vec<u16> = table.iter().map(|r| r.port).collect();
        let ordered = seen.clone();
        seen.sort_unstable();
        seen.dedup();

        assert_eq!(seen.len(), 10);
        assert_eq!(ordered, seen);
    }

    #[test]
    fn test_latency_sentinel_never_accompanies_success() {
        let config = Config::from_args(&args(&[
            "--scan",
            "--target",
            "127.0.0.1",
            "--ports",
            "40-45",
            "--timeout",
            "500",
        ]))
        .unwrap();

        for row in &scanner::scan(&config).unwrap() {
            if row.state == PortState::Open {
                assert!(row.latency_ms >= 0);
            } else {
                assert_eq!(row.latency_ms, -1);
            }
        }
    }

    #[test]
    fn test_mode_dispatch_configuration() {
        let scan = Config::from_args(&args(&["--scan", "--target", "h"])).unwrap();
        let trace = Config::from_args(&args(&["--trace", "--target", "h"])).unwrap();
        let monitor = Config::from_args(&args(&["--monitor"])).unwrap();

        assert_eq!(scan.mode, Mode::Scan);
        assert_eq!(trace.mode, Mode::Trace);
        assert_eq!(monitor.mode, Mode::Monitor);
    }
}
