// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait for the browsing context the browser backend drives.
//
// The browser backend only decides *what* to do (which surface, which
// content, when to print and tear down). Everything that touches a real
// window, frame or print dialog goes through `BrowserPlatform`.

use async_trait::async_trait;
use url::Url;

use printroute_core::error::Result;

/// Handle to a transient print surface (hidden frame or popup window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Where printable content gets loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Zero-size embedded frame, invisible to the user.
    HiddenFrame,
    /// New top-level window, optionally sized in pixels.
    Popup {
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// What a surface displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceContent {
    /// Navigate the surface to a URL.
    Url(Url),
    /// Write a complete HTML document into the surface.
    Document(String),
}

/// Browsing-context capabilities used by the browser print path.
///
/// Implementations report missing capabilities with
/// `PrintRouteError::Unavailable` / `PlatformUnavailable`, and a popup that
/// could not be opened with `PrintRouteError::PopupBlocked`.
#[async_trait]
pub trait BrowserPlatform: Send + Sync {
    /// Human-readable platform name (e.g. "Firefox 131", "headless").
    fn platform_name(&self) -> &str;

    /// Origin of the current document, or `None` outside a browsing context.
    fn current_origin(&self) -> Option<Url>;

    /// Trigger the platform print dialog for the current document.
    fn native_print(&self) -> Result<()>;

    /// Create a hidden frame or popup and start loading `content` into it.
    fn open_surface(&self, kind: &SurfaceKind, content: &SurfaceContent) -> Result<SurfaceId>;

    /// Resolve once the surface has finished loading.
    async fn wait_until_loaded(&self, surface: SurfaceId) -> Result<()>;

    /// Focus the surface and trigger print on it.
    fn print_surface(&self, surface: SurfaceId) -> Result<()>;

    /// Remove a frame or close a popup.
    fn close_surface(&self, surface: SurfaceId) -> Result<()>;

    /// Open `url` in a new tab for the user to print by hand.
    fn open_tab(&self, url: &Url) -> Result<()>;
}
