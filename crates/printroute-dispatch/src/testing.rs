// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles: a browsing context that records every call, and an observer
// that records every stage event.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use url::Url;

use printroute_bridge::{BrowserPlatform, SurfaceContent, SurfaceId, SurfaceKind};
use printroute_core::error::{ErrorKind, PrintRouteError, Result};
use printroute_core::types::Backend;

use crate::observer::DispatchObserver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    NativePrint,
    Open(SurfaceKind, SurfaceContent),
    Print(SurfaceId),
    Close(SurfaceId),
    OpenTab(Url),
}

pub struct RecordingPlatform {
    origin: Option<Url>,
    block_popups: bool,
    next_surface: AtomicU64,
    calls: Mutex<Vec<PlatformCall>>,
}

impl RecordingPlatform {
    /// A browsing context showing `page`.
    pub fn at(page: &str) -> Self {
        Self {
            origin: Some(Url::parse(page).expect("test page URL")),
            block_popups: false,
            next_surface: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// No browsing context: native print is unavailable.
    pub fn headless() -> Self {
        Self {
            origin: None,
            block_popups: false,
            next_surface: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn blocking_popups(mut self) -> Self {
        self.block_popups = true;
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl BrowserPlatform for RecordingPlatform {
    fn platform_name(&self) -> &str {
        "recording"
    }

    fn current_origin(&self) -> Option<Url> {
        self.origin.clone()
    }

    fn native_print(&self) -> Result<()> {
        if self.origin.is_none() {
            return Err(PrintRouteError::Unavailable("native print".into()));
        }
        self.record(PlatformCall::NativePrint);
        Ok(())
    }

    fn open_surface(&self, kind: &SurfaceKind, content: &SurfaceContent) -> Result<SurfaceId> {
        if self.block_popups && matches!(kind, SurfaceKind::Popup { .. }) {
            return Err(PrintRouteError::PopupBlocked);
        }
        self.record(PlatformCall::Open(kind.clone(), content.clone()));
        Ok(SurfaceId(self.next_surface.fetch_add(1, Ordering::SeqCst)))
    }

    async fn wait_until_loaded(&self, _surface: SurfaceId) -> Result<()> {
        Ok(())
    }

    fn print_surface(&self, surface: SurfaceId) -> Result<()> {
        self.record(PlatformCall::Print(surface));
        Ok(())
    }

    fn close_surface(&self, surface: SurfaceId) -> Result<()> {
        self.record(PlatformCall::Close(surface));
        Ok(())
    }

    fn open_tab(&self, url: &Url) -> Result<()> {
        self.record(PlatformCall::OpenTab(url.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    Started(Backend),
    Succeeded(Backend),
    Failed(Backend, ErrorKind),
    Skipped(Backend),
    Warned(String),
}

#[derive(Default)]
pub struct RecordingObserver {
    debug: bool,
    events: Mutex<Vec<StageEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<StageEvent> {
        self.events.lock().expect("events lock").clone()
    }

    /// Backends attempted, in order.
    pub fn started(&self) -> Vec<Backend> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                StageEvent::Started(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                StageEvent::Warned(w) => Some(w),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: StageEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl DispatchObserver for RecordingObserver {
    fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn stage_started(&self, backend: Backend) {
        self.push(StageEvent::Started(backend));
    }

    fn stage_succeeded(&self, backend: Backend) {
        self.push(StageEvent::Succeeded(backend));
    }

    fn stage_failed(&self, backend: Backend, error: &PrintRouteError) {
        self.push(StageEvent::Failed(backend, error.kind()));
    }

    fn stage_skipped(&self, backend: Backend, _reason: &str) {
        self.push(StageEvent::Skipped(backend));
    }

    fn warn(&self, message: &str) {
        self.push(StageEvent::Warned(message.to_string()));
    }
}
