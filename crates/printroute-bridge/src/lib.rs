// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printroute — Browsing-context bridge abstractions.
//
// Defines the `BrowserPlatform` trait the browser backend drives, plus the
// headless implementation used by native builds.

use std::sync::Arc;

pub mod stub;
pub mod traits;

pub use stub::HeadlessBridge;
pub use traits::{BrowserPlatform, SurfaceContent, SurfaceId, SurfaceKind};

/// Bridge for the current build target.
///
/// Native builds have no browsing context and get the headless bridge;
/// embedders with a real window pass their own `BrowserPlatform` to the
/// dispatcher instead.
pub fn platform_bridge() -> Arc<dyn BrowserPlatform> {
    Arc::new(HeadlessBridge)
}
