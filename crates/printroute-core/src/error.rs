// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for printroute.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all dispatch operations.
#[derive(Debug, Error)]
pub enum PrintRouteError {
    // -- Configuration --
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unsupported cloud print mode: {0}")]
    UnsupportedMode(String),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // -- Network --
    #[error("{context} failed with status {status}: {body}")]
    HttpStatus {
        context: String,
        status: u16,
        body: String,
    },

    #[error("{context} request failed: {detail}")]
    Transport { context: String, detail: String },

    // -- Environment --
    #[error("{0} is not available in this environment")]
    Unavailable(String),

    #[error("popup window was blocked")]
    PopupBlocked,

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Dispatch --
    #[error(
        "no usable print configuration: set cloudOptions.printer.key, agentOptions html/url, or browser content"
    )]
    NoUsableConfiguration,

    /// A memoized failure reported again to a later caller.
    #[error(transparent)]
    Memoized(Arc<PrintRouteError>),

    // -- Serialization / IO --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by the dispatcher's propagation policy: only
/// `Network` failures of an explicit strategy fall back to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing or invalid option. Never retried.
    Configuration,
    /// Non-2xx response or transport failure.
    Network,
    /// Capability missing in the current context (headless, popup blocked).
    Environment,
    /// `auto` found no stage it could attempt.
    NoConfiguration,
}

impl PrintRouteError {
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration(detail.into())
    }

    /// Classify this error for fallback decisions and reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::UnsupportedMode(_) | Self::InvalidUrl { .. } => {
                ErrorKind::Configuration
            }
            Self::Serialization(_) => ErrorKind::Configuration,

            Self::HttpStatus { .. } | Self::Transport { .. } => ErrorKind::Network,

            Self::Unavailable(_) | Self::PopupBlocked | Self::PlatformUnavailable => {
                ErrorKind::Environment
            }
            Self::Io(_) => ErrorKind::Environment,

            Self::NoUsableConfiguration => ErrorKind::NoConfiguration,

            Self::Memoized(inner) => inner.kind(),
        }
    }

    /// HTTP status carried by a network error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Memoized(inner) => inner.status(),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PrintRouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_printer_key_is_configuration() {
        let err = PrintRouteError::configuration("cloudOptions.printer.key is required");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn http_status_is_network_and_keeps_body() {
        let err = PrintRouteError::HttpStatus {
            context: "cloud print".into(),
            status: 502,
            body: "upstream down".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), Some(502));
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }

    #[test]
    fn popup_blocked_is_environment() {
        assert_eq!(PrintRouteError::PopupBlocked.kind(), ErrorKind::Environment);
        assert_eq!(
            PrintRouteError::Unavailable("window.print".into()).kind(),
            ErrorKind::Environment
        );
    }

    #[test]
    fn memoized_error_keeps_classification() {
        let inner = PrintRouteError::HttpStatus {
            context: "template render".into(),
            status: 404,
            body: "no such template".into(),
        };
        let err = PrintRouteError::Memoized(Arc::new(inner));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("no such template"));
    }

    #[test]
    fn unsupported_mode_is_configuration() {
        let err = PrintRouteError::UnsupportedMode("pdf".into());
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("pdf"));
    }
}
