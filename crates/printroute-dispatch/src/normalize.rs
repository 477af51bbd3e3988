// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Option normalization.
//
// Every dispatch starts by turning the caller's request into three
// per-backend option values. A backend's html and url form one content slot,
// filled from an ordered list of sources: the backend's own content, then the
// request's shared content. The rendered-template fallback is applied later,
// lazily, by the dispatcher.

use printroute_core::types::{
    AgentOptions, BrowserOptions, CloudMode, CloudOptions, PrintRequest, non_empty,
};

/// Renderable content of one backend: html and url, either may be absent.
type Content = (Option<String>, Option<String>);

/// The first source in `sources` carrying html or url, taken whole.
///
/// Sources are never mixed: own url plus shared html stays a url job.
fn first_content(sources: &[(Option<&str>, Option<&str>)]) -> Content {
    sources
        .iter()
        .map(|(html, url)| (non_empty(*html), non_empty(*url)))
        .find(|(html, url)| html.is_some() || url.is_some())
        .map(|(html, url)| (html.map(str::to_string), url.map(str::to_string)))
        .unwrap_or_default()
}

/// Per-backend options derived from one request. Never mutated after
/// construction; stages clone what they need to adjust.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedOptions {
    /// Present when browser options were given or shared content exists.
    pub browser: Option<BrowserOptions>,
    /// Present only when cloud options were given.
    pub cloud: Option<CloudOptions>,
    /// Present when agent options were given or shared content exists.
    pub agent: Option<AgentOptions>,
}

impl ResolvedOptions {
    pub fn from_request(request: &PrintRequest) -> Self {
        let shared = (request.shared_html(), request.shared_url());
        let derived = request.has_shared_content();

        let browser = match (&request.browser_options, derived) {
            (Some(own), _) => {
                let (html, url) = first_content(&[(own.html(), own.url()), shared]);
                Some(BrowserOptions {
                    html,
                    url,
                    ..own.clone()
                })
            }
            (None, true) => {
                let (html, url) = first_content(&[shared]);
                Some(BrowserOptions {
                    html,
                    url,
                    ..Default::default()
                })
            }
            (None, false) => None,
        };

        let cloud = request.cloud_options.as_ref().map(|own| {
            // Shared content only matters to an html-mode job.
            if matches!(own.effective_mode(), Ok(CloudMode::Html)) {
                let (html, url) = first_content(&[(own.html(), own.url()), shared]);
                CloudOptions {
                    html,
                    url,
                    ..own.clone()
                }
            } else {
                own.clone()
            }
        });

        let agent = match (&request.agent_options, derived) {
            (Some(own), _) => {
                let (html, url) = first_content(&[(own.html(), own.url()), shared]);
                Some(AgentOptions {
                    html,
                    url,
                    ..own.clone()
                })
            }
            (None, true) => {
                let (html, url) = first_content(&[shared]);
                Some(AgentOptions {
                    html,
                    url,
                    ..Default::default()
                })
            }
            (None, false) => None,
        };

        Self {
            browser,
            cloud,
            agent,
        }
    }

    /// Cloud stage is configured iff a non-empty printer key exists.
    pub fn cloud_configured(&self) -> bool {
        self.cloud
            .as_ref()
            .is_some_and(|c| c.printer_key().is_some())
    }

    /// Agent stage is configured iff it has html or url after injection.
    pub fn agent_configured(&self) -> bool {
        self.agent.as_ref().is_some_and(AgentOptions::has_content)
    }

    pub fn browser_usable(&self) -> bool {
        self.browser.is_some()
    }
}
