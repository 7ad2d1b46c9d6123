//! Command-line tool for probing a chatbot backend.
//!
//! This binary runs a one-shot health check against the backend: a raw
//! connection probe, the health endpoint, and optionally the metrics
//! endpoint. The exit status reflects reachability, so it slots into
//! scripts and CI checks.
//!
//! # Usage
//!
//! ```bash
//! # Probe the default backend (http://localhost:8000)
//! parley-probe
//!
//! # Probe a specific backend
//! parley-probe --base-url http://10.0.0.7:8000
//!
//! # Include the metrics report
//! parley-probe --metrics
//!
//! # JSON output for processing
//! parley-probe --format json
//! ```

use std::time::Duration;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use parley::{Parley, RetryPolicy, SendOptions};

/// Command-line arguments for the parley-probe tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default http://localhost:8000)", "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arrrg(optional, "Per-request timeout in seconds (default 30)", "SECS")]
    timeout_secs: Option<u64>,

    /// Also fetch and print the metrics report.
    #[arrrg(flag, "Also fetch and print the metrics report")]
    metrics: bool,

    /// Output format for results (text, json).
    #[arrrg(optional, "Output format: text, json", "FORMAT")]
    format: Option<String>,
}

/// Main entry point for the parley-probe command-line tool.
///
/// Exits with code 0 when the backend answered the probe, 1 when it did
/// not, and 2 on invalid arguments.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line_relaxed("parley-probe [OPTIONS]");

    if !free.is_empty() {
        eprintln!("Error: parley-probe takes no positional arguments");
        std::process::exit(2);
    }

    let json_output = match args.format.as_deref() {
        None | Some("text") => false,
        Some("json") => true,
        Some(other) => {
            eprintln!("Error: invalid output format: {other}. Valid options: text, json");
            std::process::exit(2);
        }
    };

    // A probe wants the first answer, not a patient one.
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(30));
    let client = Parley::with_options(args.base_url, Some(timeout), Some(RetryPolicy::none()))?;

    let probe = client.test_connection().await;

    let mut report = serde_json::json!({
        "base_url": client.base_url(),
        "reachable": probe.reachable,
        "latency_ms": probe.latency_ms(),
        "status": probe.status,
        "error": probe.error,
    });

    if probe.reachable {
        match client.health(SendOptions::new()).await {
            Ok(health) => {
                report["health"] = serde_json::to_value(&health.data)?;
            }
            Err(err) => {
                report["health_error"] = serde_json::Value::String(err.to_string());
            }
        }
        if args.metrics {
            match client.metrics().await {
                Ok(metrics) => {
                    report["metrics"] = serde_json::to_value(&metrics.data)?;
                }
                Err(err) => {
                    report["metrics_error"] = serde_json::Value::String(err.to_string());
                }
            }
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    if probe.reachable {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn print_text(report: &serde_json::Value) {
    let base_url = report["base_url"].as_str().unwrap_or("?");
    let latency = report["latency_ms"].as_u64().unwrap_or(0);

    if report["reachable"].as_bool().unwrap_or(false) {
        let status = report["status"].as_u64().unwrap_or(0);
        println!("{base_url}: reachable (HTTP {status}, {latency} ms)");
    } else {
        let error = report["error"].as_str().unwrap_or("unknown error");
        println!("{base_url}: unreachable after {latency} ms");
        println!("  {error}");
        return;
    }

    if let Some(health) = report.get("health") {
        let status = health["status"].as_str().unwrap_or("?");
        println!("  health: {status}");
        if let Some(version) = health["version"].as_str() {
            println!("  version: {version}");
        }
        if let Some(endpoints) = health["endpoints"].as_array() {
            for endpoint in endpoints {
                if let Some(path) = endpoint.as_str() {
                    println!("    endpoint: {path}");
                }
            }
        }
    } else if let Some(err) = report["health_error"].as_str() {
        println!("  health: error: {err}");
    }

    if let Some(metrics) = report.get("metrics") {
        println!("  metrics:");
        if let Some(total) = metrics["total_requests"].as_u64() {
            println!("    total requests: {total}");
        }
        if let Some(errors) = metrics["total_errors"].as_u64() {
            println!("    total errors: {errors}");
        }
        if let Some(uptime) = metrics["uptime_seconds"].as_f64() {
            println!("    uptime: {uptime:.0}s");
        }
        if let Some(by_bot) = metrics["requests_by_bot"].as_object() {
            for (bot, count) in by_bot {
                println!("    {bot}: {count}");
            }
        }
    } else if let Some(err) = report["metrics_error"].as_str() {
        println!("  metrics: error: {err}");
    }
}
