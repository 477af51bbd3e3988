// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatcher configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default endpoint of the local print agent.
pub const DEFAULT_AGENT_URL: &str = "http://127.0.0.1:43594/print";

/// Default cloud print-job endpoint.
pub const DEFAULT_CLOUD_PRINT_URL: &str = "http://127.0.0.1:8080/api/cloud-print/print";

/// Default cloud template-render endpoint.
pub const DEFAULT_CLOUD_RENDER_URL: &str = "http://127.0.0.1:8080/api/cloud-print/render";

/// Settings shared by every dispatch made through one `Dispatcher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// Cloud print-job endpoint (`POST` JSON).
    pub cloud_print_url: String,
    /// Cloud template-render endpoint (`POST` JSON, HTML response).
    pub cloud_render_url: String,
    /// Local agent endpoint used when a request does not set `localUrl`.
    pub agent_url: String,
    /// Ambient debug flag. A request's `debugOverride` shadows it for one call.
    pub debug: bool,
    /// `User-Agent` header sent on every outgoing request.
    pub user_agent: String,
    /// Delay before hidden frames and popups are torn down after printing.
    pub cleanup_delay_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            cloud_print_url: DEFAULT_CLOUD_PRINT_URL.into(),
            cloud_render_url: DEFAULT_CLOUD_RENDER_URL.into(),
            agent_url: DEFAULT_AGENT_URL.into(),
            debug: false,
            user_agent: concat!("printroute/", env!("CARGO_PKG_VERSION")).into(),
            cleanup_delay_ms: 1000,
        }
    }
}

impl DispatcherConfig {
    /// Load a configuration file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
