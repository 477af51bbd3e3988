// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless bridge for CLI/CI builds where no browsing context exists.
//
// Every capability reports `PlatformUnavailable`, so the browser backend
// fails with an environment error and the dispatcher's cloud and agent paths
// remain usable.

use async_trait::async_trait;
use url::Url;

use printroute_core::error::{PrintRouteError, Result};

use crate::traits::*;

/// No-op bridge returned outside a browser.
pub struct HeadlessBridge;

#[async_trait]
impl BrowserPlatform for HeadlessBridge {
    fn platform_name(&self) -> &str {
        "headless"
    }

    fn current_origin(&self) -> Option<Url> {
        None
    }

    fn native_print(&self) -> Result<()> {
        tracing::warn!("BrowserPlatform::native_print called on headless bridge");
        Err(PrintRouteError::Unavailable("native print".into()))
    }

    fn open_surface(&self, kind: &SurfaceKind, _content: &SurfaceContent) -> Result<SurfaceId> {
        tracing::warn!(?kind, "BrowserPlatform::open_surface called on headless bridge");
        Err(PrintRouteError::PlatformUnavailable)
    }

    async fn wait_until_loaded(&self, _surface: SurfaceId) -> Result<()> {
        Err(PrintRouteError::PlatformUnavailable)
    }

    fn print_surface(&self, _surface: SurfaceId) -> Result<()> {
        Err(PrintRouteError::PlatformUnavailable)
    }

    fn close_surface(&self, _surface: SurfaceId) -> Result<()> {
        Err(PrintRouteError::PlatformUnavailable)
    }

    fn open_tab(&self, url: &Url) -> Result<()> {
        tracing::warn!(%url, "BrowserPlatform::open_tab called on headless bridge");
        Err(PrintRouteError::PlatformUnavailable)
    }
}
