//! Configuration module for the Poky backend.
//!
//! All configuration is loaded from environment variables with sensible
//! defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether to load the demo dataset at startup
    pub seed_demo: bool,
    /// Capacity of the poke notification channel
    pub push_buffer: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("POKY_API_PSK").ok();

        let bind_addr = env::var("POKY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid POKY_BIND_ADDR format");

        let log_level = env::var("POKY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_demo = env::var("POKY_SEED_DEMO")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let push_buffer = env::var("POKY_PUSH_BUFFER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Self {
            api_psk,
            bind_addr,
            log_level,
            seed_demo,
            push_buffer,
        }
    }
}
