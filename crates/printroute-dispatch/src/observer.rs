// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-call diagnostics.
//
// A dispatch reports stage progress to an observer passed in for that call.
// The debug flag lives on the observer, so a per-request debug override
// never touches shared state and concurrent dispatches stay independent.

use tracing::{debug, info, warn};

use printroute_core::error::PrintRouteError;
use printroute_core::types::Backend;

/// Receives stage events for one dispatch.
pub trait DispatchObserver: Send + Sync {
    /// Whether verbose tracing is on for this call.
    fn debug_enabled(&self) -> bool;

    fn stage_started(&self, backend: Backend);

    fn stage_succeeded(&self, backend: Backend);

    /// A stage failed. In `auto` the chain continues afterwards.
    fn stage_failed(&self, backend: Backend, error: &PrintRouteError);

    /// A stage was skipped because it is not configured.
    fn stage_skipped(&self, backend: Backend, reason: &str);

    /// Something the user must act on (e.g. print a tab by hand).
    fn warn(&self, message: &str);
}

/// Default observer: forwards everything to `tracing`.
///
/// Stage traces are emitted at `info` when debug is on, `debug` otherwise.
/// Failures and warnings are always `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    debug: bool,
}

impl TracingObserver {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl DispatchObserver for TracingObserver {
    fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn stage_started(&self, backend: Backend) {
        if self.debug {
            info!(%backend, "attempting backend");
        } else {
            debug!(%backend, "attempting backend");
        }
    }

    fn stage_succeeded(&self, backend: Backend) {
        if self.debug {
            info!(%backend, "backend accepted print job");
        } else {
            debug!(%backend, "backend accepted print job");
        }
    }

    fn stage_failed(&self, backend: Backend, error: &PrintRouteError) {
        warn!(%backend, kind = ?error.kind(), %error, "backend failed");
    }

    fn stage_skipped(&self, backend: Backend, reason: &str) {
        if self.debug {
            info!(%backend, reason, "backend skipped");
        } else {
            debug!(%backend, reason, "backend skipped");
        }
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}
