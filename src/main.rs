//! Rip Current Risk Service - Main Entry Point
//!
//! A server-side service that:
//! 1. Assesses rip current risk for a coordinate on demand, combining
//!    NWS alerts with CO-OPS tide, wind, and wave observations
//! 2. Caches assessments per coordinate with a bounded TTL
//! 3. Provides an HTTP endpoint for querying and invalidating assessments
//!
//! Persistence of assessments (beach records, history) is handled by the
//! outer application layer that calls this service.
//!
//! Usage:
//!   cargo run --release                 # Start on the configured port
//!   cargo run --release -- --port 9090  # Override the listen port
//!
//! Environment:
//!   RIPMON_CACHE_TTL_MIN - Cache TTL override, minutes
//!   RIPMON_USER_AGENT    - User-Agent for upstream requests
//!   RIPMON_PORT          - Listen port override
//!   RUST_LOG             - Log filter (default "info")

use ripmon_service::config::ServiceConfig;
use ripmon_service::endpoint;
use ripmon_service::service::RipCurrentService;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    println!("🌊 Rip Current Risk Service");
    println!("===========================\n");

    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port_override: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                if i + 1 < args.len() {
                    port_override = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load configuration (ripmon.toml if present, then env overrides)
    let mut config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = port_override {
        config.port = port;
    }

    println!("📊 Configuration:");
    println!("   Cache TTL: {} minutes", config.cache_ttl_minutes);
    println!("   Station search radius: {} miles", config.search_radius_miles);
    println!("   Station fan-out: {}", config.station_fanout);
    println!("   Upstream timeout: {} seconds\n", config.request_timeout_secs);

    let port = config.port;
    let service = match RipCurrentService::new(config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            eprintln!("\n❌ Failed to build HTTP client: {}\n", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = endpoint::start_endpoint_server(port, service) {
        eprintln!("\n❌ Endpoint server error: {}\n", e);
        std::process::exit(1);
    }
}
