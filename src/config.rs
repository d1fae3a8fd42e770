//! Server configuration.
//!
//! Every setting can be given as a command-line flag or an environment
//! variable; flags win.
//!
//! | Flag | Variable | Default |
//! |------|----------|---------|
//! | `--addr` | `TRIAGE_ADDR` | `127.0.0.1:8000` |
//! | `--reference-date` | `TRIAGE_REFERENCE_DATE` | current date per request |
//! | `--log-filter` | `TRIAGE_LOG` | `u_triage=info,tower_http=info` |
//!
//! # Examples
//!
//! ```
//! use u_triage::config::ServerConfig;
//!
//! let config = ServerConfig::default()
//!     .with_addr(([0, 0, 0, 0], 8080).into())
//!     .with_log_filter("u_triage=debug");
//! assert_eq!(config.addr.port(), 8080);
//! ```

use std::net::SocketAddr;

use chrono::NaiveDate;
use clap::Parser;

use crate::api::AppState;

/// Default log filter when neither `RUST_LOG` nor `--log-filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "u_triage=info,tower_http=info";

/// Configuration for the `u-triage` server.
#[derive(Debug, Clone, Parser)]
#[command(name = "u-triage", version, about = "Rank tasks by computed priority over HTTP")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "TRIAGE_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,

    /// Pins the reference date (YYYY-MM-DD) used for urgency.
    #[arg(long, env = "TRIAGE_REFERENCE_DATE")]
    pub reference_date: Option<NaiveDate>,

    /// Tracing filter directives.
    #[arg(long, env = "TRIAGE_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8000).into(),
            reference_date: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Request-independent state handed to the API.
    pub fn app_state(&self) -> AppState {
        AppState {
            reference_date: self.reference_date,
        }
    }
}
