// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Browser print backend.
//
// Three mutually exclusive paths, chosen by content:
//   - no content  -> native print of the current document
//   - html        -> printable document in a hidden frame or popup
//   - url         -> popup, same-origin hidden frame, or (cross-origin) a new
//                    tab the user prints by hand
//
// Printing happens after the surface loads, on a detached task. The call
// itself only reports setup failures; post-load print and teardown errors are
// logged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use printroute_bridge::{BrowserPlatform, SurfaceContent, SurfaceId, SurfaceKind};
use printroute_core::error::{PrintRouteError, Result};
use printroute_core::types::{Backend, BrowserOptions, PrintOutcome};
use printroute_document::{PageStyle, build_print_document};

use crate::observer::DispatchObserver;

/// Render path selected for one call.
#[derive(Debug, Clone, PartialEq)]
enum BrowserPlan {
    NativePrint,
    Document { html: String, kind: SurfaceKind },
    PopupUrl { url: String, kind: SurfaceKind },
    FrameUrl { url: String },
}

fn popup_kind(options: &BrowserOptions) -> SurfaceKind {
    SurfaceKind::Popup {
        width: options.popup_width,
        height: options.popup_height,
    }
}

/// Pick the render path. HTML wins when both html and url are present.
fn plan(options: Option<&BrowserOptions>) -> BrowserPlan {
    let Some(options) = options else {
        return BrowserPlan::NativePrint;
    };

    if let Some(html) = options.html() {
        let kind = if options.popup {
            popup_kind(options)
        } else {
            SurfaceKind::HiddenFrame
        };
        let document = build_print_document(html, &PageStyle::from_options(options));
        return BrowserPlan::Document {
            html: document,
            kind,
        };
    }

    match options.url() {
        Some(url) if options.popup => BrowserPlan::PopupUrl {
            url: url.to_string(),
            kind: popup_kind(options),
        },
        Some(url) => BrowserPlan::FrameUrl {
            url: url.to_string(),
        },
        None => BrowserPlan::NativePrint,
    }
}

/// Drives a `BrowserPlatform` to print one job.
#[derive(Clone)]
pub struct BrowserPrinter {
    platform: Arc<dyn BrowserPlatform>,
    cleanup_delay: Duration,
}

impl BrowserPrinter {
    pub fn new(platform: Arc<dyn BrowserPlatform>, cleanup_delay: Duration) -> Self {
        Self {
            platform,
            cleanup_delay,
        }
    }

    pub fn platform_name(&self) -> &str {
        self.platform.platform_name()
    }

    /// Resolve `raw` against the current origin (so relative URLs work).
    fn resolve(&self, raw: &str) -> Result<Url> {
        let parsed = match self.platform.current_origin() {
            Some(origin) => origin.join(raw),
            None => Url::parse(raw),
        };
        parsed.map_err(|e| PrintRouteError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })
    }

    fn is_same_origin(&self, url: &Url) -> bool {
        self.platform
            .current_origin()
            .is_some_and(|current| current.origin() == url.origin())
    }

    /// Print through the browsing context.
    pub async fn browser_print(
        &self,
        options: Option<&BrowserOptions>,
        observer: &dyn DispatchObserver,
    ) -> Result<PrintOutcome> {
        let accepted = PrintOutcome::accepted(Backend::Browser);

        match plan(options) {
            BrowserPlan::NativePrint => {
                debug!(platform = self.platform_name(), "no content; using native print");
                self.platform.native_print()?;
                Ok(accepted)
            }
            BrowserPlan::Document { html, kind } => {
                let surface = self
                    .platform
                    .open_surface(&kind, &SurfaceContent::Document(html))?;
                debug!(%surface, ?kind, "printable document written");
                self.print_when_loaded(surface, true);
                Ok(accepted)
            }
            BrowserPlan::PopupUrl { url, kind } => {
                let target = self.resolve(&url)?;
                let surface = self
                    .platform
                    .open_surface(&kind, &SurfaceContent::Url(target))?;
                debug!(%surface, "popup opened for URL");
                self.print_when_loaded(surface, false);
                Ok(accepted)
            }
            BrowserPlan::FrameUrl { url } => {
                let target = self.resolve(&url)?;
                if self.is_same_origin(&target) {
                    let surface = self
                        .platform
                        .open_surface(&SurfaceKind::HiddenFrame, &SurfaceContent::Url(target))?;
                    debug!(%surface, "same-origin URL loading in hidden frame");
                    self.print_when_loaded(surface, true);
                    Ok(accepted)
                } else {
                    self.platform.open_tab(&target)?;
                    observer.warn(&format!(
                        "{target} is cross-origin and cannot be printed programmatically; opened in a new tab, print it manually"
                    ));
                    Ok(PrintOutcome::ManualPrintRequired {
                        url: target.to_string(),
                    })
                }
            }
        }
    }

    /// Print `surface` once loaded, then optionally tear it down after the
    /// cleanup delay. Runs detached; nothing here reaches the caller.
    fn print_when_loaded(&self, surface: SurfaceId, teardown: bool) {
        let platform = Arc::clone(&self.platform);
        let delay = self.cleanup_delay;

        tokio::spawn(async move {
            match platform.wait_until_loaded(surface).await {
                Ok(()) => match platform.print_surface(surface) {
                    Ok(()) => info!(%surface, "print dialog triggered"),
                    Err(e) => warn!(%surface, error = %e, "print after load failed"),
                },
                Err(e) => warn!(%surface, error = %e, "surface failed to load"),
            }

            if teardown {
                tokio::time::sleep(delay).await;
                if let Err(e) = platform.close_surface(surface) {
                    debug!(%surface, error = %e, "surface cleanup failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PlatformCall, RecordingObserver, RecordingPlatform};
    use printroute_core::ErrorKind;

    fn printer(platform: &Arc<RecordingPlatform>) -> BrowserPrinter {
        BrowserPrinter::new(platform.clone(), Duration::from_millis(1000))
    }

    #[test]
    fn no_options_means_native_print() {
        assert_eq!(plan(None), BrowserPlan::NativePrint);
        assert_eq!(plan(Some(&BrowserOptions::default())), BrowserPlan::NativePrint);
    }

    #[test]
    fn html_builds_receipt_document() {
        let options = BrowserOptions {
            html: Some("<div>x</div>".into()),
            page_width_mm: Some(80.0),
            margin_mm: Some(0.0),
            ..Default::default()
        };
        match plan(Some(&options)) {
            BrowserPlan::Document { html, kind } => {
                assert_eq!(kind, SurfaceKind::HiddenFrame);
                assert!(html.contains("@page { size: 80mm; margin: 0mm; }"));
                assert!(html.contains("<body>\n<div>x</div>\n</body>"));
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn html_beats_url() {
        let options = BrowserOptions {
            html: Some("<p>a</p>".into()),
            url: Some("https://shop.example/r".into()),
            ..Default::default()
        };
        assert!(matches!(plan(Some(&options)), BrowserPlan::Document { .. }));
    }

    #[test]
    fn popup_flag_sizes_the_window() {
        let options = BrowserOptions {
            url: Some("/r/1".into()),
            popup: true,
            popup_width: Some(400),
            popup_height: Some(600),
            ..Default::default()
        };
        assert_eq!(
            plan(Some(&options)),
            BrowserPlan::PopupUrl {
                url: "/r/1".into(),
                kind: SurfaceKind::Popup {
                    width: Some(400),
                    height: Some(600),
                },
            }
        );
    }

    #[tokio::test]
    async fn native_print_unavailable_is_environment_error() {
        let platform = Arc::new(RecordingPlatform::headless());
        let err = printer(&platform)
            .browser_print(None, &RecordingObserver::default())
            .await
            .expect_err("no native print");
        assert_eq!(err.kind(), ErrorKind::Environment);
    }

    #[tokio::test]
    async fn native_print_when_no_content() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/checkout"));
        let outcome = printer(&platform)
            .browser_print(Some(&BrowserOptions::default()), &RecordingObserver::default())
            .await
            .expect("print");
        assert_eq!(outcome, PrintOutcome::accepted(Backend::Browser));
        assert_eq!(platform.calls(), vec![PlatformCall::NativePrint]);
    }

    #[tokio::test]
    async fn same_origin_url_uses_hidden_frame() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/checkout"));
        let options = BrowserOptions {
            url: Some("/receipts/7".into()),
            ..Default::default()
        };
        let outcome = printer(&platform)
            .browser_print(Some(&options), &RecordingObserver::default())
            .await
            .expect("print");

        assert_eq!(outcome, PrintOutcome::accepted(Backend::Browser));
        let expected = Url::parse("https://shop.example/receipts/7").expect("url");
        assert_eq!(
            platform.calls()[0],
            PlatformCall::Open(SurfaceKind::HiddenFrame, SurfaceContent::Url(expected))
        );
    }

    #[tokio::test]
    async fn cross_origin_url_opens_tab_and_warns() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/checkout"));
        let observer = RecordingObserver::default();
        let options = BrowserOptions {
            url: Some("https://cdn.other.example/r.html".into()),
            ..Default::default()
        };
        let outcome = printer(&platform)
            .browser_print(Some(&options), &observer)
            .await
            .expect("cross-origin resolves");

        assert_eq!(
            outcome,
            PrintOutcome::ManualPrintRequired {
                url: "https://cdn.other.example/r.html".into()
            }
        );
        let tab = Url::parse("https://cdn.other.example/r.html").expect("url");
        assert_eq!(platform.calls(), vec![PlatformCall::OpenTab(tab)]);
        assert_eq!(observer.warnings().len(), 1);
    }

    #[tokio::test]
    async fn blocked_popup_rejects() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/").blocking_popups());
        let options = BrowserOptions {
            html: Some("<p>x</p>".into()),
            popup: true,
            ..Default::default()
        };
        let err = printer(&platform)
            .browser_print(Some(&options), &RecordingObserver::default())
            .await
            .expect_err("blocked");
        assert!(matches!(err, PrintRouteError::PopupBlocked));
    }

    #[tokio::test(start_paused = true)]
    async fn frame_is_printed_then_removed_after_delay() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/"));
        let options = BrowserOptions {
            html: Some("<p>x</p>".into()),
            ..Default::default()
        };
        printer(&platform)
            .browser_print(Some(&options), &RecordingObserver::default())
            .await
            .expect("print");

        tokio::time::sleep(Duration::from_millis(500)).await;
        let calls = platform.calls();
        assert!(calls.contains(&PlatformCall::Print(SurfaceId(1))));
        assert!(!calls.contains(&PlatformCall::Close(SurfaceId(1))));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(platform.calls().contains(&PlatformCall::Close(SurfaceId(1))));
    }

    #[tokio::test(start_paused = true)]
    async fn url_popup_is_not_closed() {
        let platform = Arc::new(RecordingPlatform::at("https://shop.example/"));
        let options = BrowserOptions {
            url: Some("https://shop.example/r/1".into()),
            popup: true,
            ..Default::default()
        };
        printer(&platform)
            .browser_print(Some(&options), &RecordingObserver::default())
            .await
            .expect("print");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        let calls = platform.calls();
        assert!(calls.contains(&PlatformCall::Print(SurfaceId(1))));
        assert!(!calls.contains(&PlatformCall::Close(SurfaceId(1))));
    }
}
