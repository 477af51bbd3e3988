// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strategy resolution and fallback engine.
//
// `dispatch` normalizes the request once, then either runs one explicit
// backend (with an optional single browser fallback) or the fixed
// cloud -> agent -> browser chain. Backends run strictly one at a time. The
// cloud template is rendered at most once per call and shared by every stage
// that needs HTML.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{Instrument, debug, info_span};

use printroute_bridge::BrowserPlatform;
use printroute_core::config::DispatcherConfig;
use printroute_core::error::{ErrorKind, PrintRouteError, Result};
use printroute_core::types::{Backend, DispatchId, PrintOutcome, PrintRequest, Strategy};

use crate::agent::AgentClient;
use crate::browser::BrowserPrinter;
use crate::cloud::CloudClient;
use crate::http;
use crate::normalize::ResolvedOptions;
use crate::observer::{DispatchObserver, TracingObserver};
use crate::template::TemplateRenderer;

/// When a stage borrows the rendered template as its HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateFill {
    /// Only when the backend has neither html nor url (explicit strategies).
    WhenNoContent,
    /// Whenever the backend has no html (auto chain agent/browser stages).
    WhenNoHtml,
}

/// State of one `dispatch` call.
struct Call<'a> {
    request: &'a PrintRequest,
    options: ResolvedOptions,
    template: OnceCell<std::result::Result<String, Arc<PrintRouteError>>>,
    observer: &'a dyn DispatchObserver,
}

impl<'a> Call<'a> {
    fn new(request: &'a PrintRequest, observer: &'a dyn DispatchObserver) -> Self {
        Self {
            request,
            options: ResolvedOptions::from_request(request),
            template: OnceCell::new(),
            observer,
        }
    }
}

/// Routes print requests to the browser, cloud and agent backends.
pub struct Dispatcher {
    config: DispatcherConfig,
    renderer: TemplateRenderer,
    cloud: CloudClient,
    agent: AgentClient,
    browser: BrowserPrinter,
}

impl Dispatcher {
    /// Build a dispatcher whose browser backend drives `platform`.
    pub fn new(config: DispatcherConfig, platform: Arc<dyn BrowserPlatform>) -> Result<Self> {
        let client = http::build_client(&config.user_agent)?;
        Ok(Self {
            renderer: TemplateRenderer::new(client.clone(), config.cloud_render_url.clone()),
            cloud: CloudClient::new(client.clone(), config.cloud_print_url.clone()),
            agent: AgentClient::new(client, config.agent_url.clone()),
            browser: BrowserPrinter::new(platform, Duration::from_millis(config.cleanup_delay_ms)),
            config,
        })
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Renderer bound to the configured render endpoint.
    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// The ambient debug flag. Never changed by a dispatch.
    pub fn debug_enabled(&self) -> bool {
        self.config.debug
    }

    /// Dispatch with the default tracing observer. `debugOverride` applies to
    /// this call only.
    pub async fn dispatch(&self, request: &PrintRequest) -> Result<PrintOutcome> {
        self.dispatch_with(request, &self.observer_for(request))
            .await
    }

    /// The observer `dispatch` uses for `request`: its `debugOverride` when
    /// set, otherwise the configured flag.
    pub fn observer_for(&self, request: &PrintRequest) -> TracingObserver {
        TracingObserver::new(request.debug_override.unwrap_or(self.config.debug))
    }

    /// Dispatch reporting stage events to `observer`.
    pub async fn dispatch_with(
        &self,
        request: &PrintRequest,
        observer: &dyn DispatchObserver,
    ) -> Result<PrintOutcome> {
        let id = DispatchId::new();
        let span = info_span!(
            "dispatch",
            %id,
            strategy = %request.strategy,
            debug = observer.debug_enabled()
        );

        async {
            let call = Call::new(request, observer);
            match request.strategy {
                Strategy::Auto => self.run_auto(&call).await,
                Strategy::Browser => self.attempt(&call, Backend::Browser, TemplateFill::WhenNoContent).await,
                Strategy::Cloud => self.run_explicit(&call, Backend::Cloud).await,
                Strategy::Agent => self.run_explicit(&call, Backend::Agent).await,
            }
        }
        .instrument(span)
        .await
    }

    /// One non-browser backend, with the optional browser fallback. Only
    /// network failures fall back; anything else surfaces as is.
    async fn run_explicit(&self, call: &Call<'_>, backend: Backend) -> Result<PrintOutcome> {
        let err = match self.attempt(call, backend, TemplateFill::WhenNoContent).await {
            Ok(outcome) => return Ok(outcome),
            Err(err) => err,
        };

        if call.request.fallback_to_browser_on_error
            && err.kind() == ErrorKind::Network
            && call.options.browser_usable()
        {
            debug!(%backend, "falling back to browser");
            return self
                .attempt(call, Backend::Browser, TemplateFill::WhenNoContent)
                .await;
        }
        Err(err)
    }

    /// The fixed cloud -> agent -> browser chain.
    async fn run_auto(&self, call: &Call<'_>) -> Result<PrintOutcome> {
        let mut last_error = None;

        if call.options.cloud_configured() {
            match self.attempt(call, Backend::Cloud, TemplateFill::WhenNoHtml).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) => last_error = Some(err),
            }
        } else {
            call.observer
                .stage_skipped(Backend::Cloud, "no cloudOptions.printer.key");
        }

        if call.options.agent_configured() {
            match self.attempt(call, Backend::Agent, TemplateFill::WhenNoHtml).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) => last_error = Some(err),
            }
        } else {
            call.observer
                .stage_skipped(Backend::Agent, "no agent html or url");
        }

        if call.options.browser_usable() {
            return self
                .attempt(call, Backend::Browser, TemplateFill::WhenNoHtml)
                .await;
        }
        call.observer
            .stage_skipped(Backend::Browser, "no browser options or shared content");

        // Every configured stage failed and there is no browser to finish on.
        Err(last_error.unwrap_or(PrintRouteError::NoUsableConfiguration))
    }

    /// Run one backend and report the result to the observer.
    async fn attempt(
        &self,
        call: &Call<'_>,
        backend: Backend,
        fill: TemplateFill,
    ) -> Result<PrintOutcome> {
        call.observer.stage_started(backend);
        let result = self.invoke(call, backend, fill).await;
        match &result {
            Ok(_) => call.observer.stage_succeeded(backend),
            Err(err) => call.observer.stage_failed(backend, err),
        }
        result
    }

    async fn invoke(
        &self,
        call: &Call<'_>,
        backend: Backend,
        fill: TemplateFill,
    ) -> Result<PrintOutcome> {
        let options = &call.options;
        match backend {
            // A template id already puts the cloud job in template mode.
            Backend::Cloud => {
                self.cloud.cloud_print(options.cloud.as_ref()).await?;
                Ok(PrintOutcome::accepted(Backend::Cloud))
            }
            Backend::Agent => {
                let mut agent = options.agent.clone();
                let (html, url) = agent
                    .as_ref()
                    .map(|a| (a.html(), a.url()))
                    .unwrap_or((None, None));
                if needs_template(html, url, fill) {
                    if let Some(rendered) = self.template_html(call).await? {
                        agent.get_or_insert_with(Default::default).html = Some(rendered);
                    }
                }
                self.agent.agent_print(agent.as_ref()).await?;
                Ok(PrintOutcome::accepted(Backend::Agent))
            }
            Backend::Browser => {
                let mut browser = options.browser.clone();
                let (html, url) = browser
                    .as_ref()
                    .map(|b| (b.html(), b.url()))
                    .unwrap_or((None, None));
                if needs_template(html, url, fill) {
                    if let Some(rendered) = self.template_html(call).await? {
                        browser.get_or_insert_with(Default::default).html = Some(rendered);
                    }
                }
                self.browser
                    .browser_print(browser.as_ref(), call.observer)
                    .await
            }
        }
    }

    /// The call's rendered template, or `None` without a template id.
    /// Success and failure are both memoized.
    async fn template_html(&self, call: &Call<'_>) -> Result<Option<String>> {
        let Some(cloud) = call.request.cloud_options.as_ref() else {
            return Ok(None);
        };
        let Some(template_id) = cloud.template_id() else {
            return Ok(None);
        };

        let rendered = call
            .template
            .get_or_init(|| async {
                self.renderer
                    .render_template(template_id, cloud.width_mm, Some(&cloud.data))
                    .await
                    .map_err(Arc::new)
            })
            .await;

        match rendered {
            Ok(html) => Ok(Some(html.clone())),
            Err(err) => Err(PrintRouteError::Memoized(Arc::clone(err))),
        }
    }
}

fn needs_template(html: Option<&str>, url: Option<&str>, fill: TemplateFill) -> bool {
    match fill {
        TemplateFill::WhenNoHtml => html.is_none(),
        TemplateFill::WhenNoContent => html.is_none() && url.is_none(),
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
