// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local print-agent backend.
//
// The agent is an HTTP service on the loopback interface that renders HTML
// to PDF and sends it to an installed printer. The response body is ignored;
// only the status matters.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument};

use printroute_core::error::{PrintRouteError, Result};
use printroute_core::types::{AgentOptions, AgentPrinter, PdfOptions};

use crate::http;

#[derive(Debug, Serialize)]
struct AgentJob<'a> {
    payload: AgentPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentPayload<'a> {
    html: String,
    pdf_options: PdfOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    printer: Option<&'a AgentPrinter>,
}

/// Client for the local print agent.
#[derive(Clone)]
pub struct AgentClient {
    client: Client,
    default_url: String,
}

impl AgentClient {
    /// `default_url` is used for requests that do not set `localUrl`.
    pub fn new(client: Client, default_url: impl Into<String>) -> Self {
        Self {
            client,
            default_url: default_url.into(),
        }
    }

    /// Send one job to the agent.
    #[instrument(skip(self, options))]
    pub async fn agent_print(&self, options: Option<&AgentOptions>) -> Result<()> {
        let options =
            options.ok_or_else(|| PrintRouteError::configuration("agentOptions are required"))?;

        let html = match (options.html(), options.url()) {
            (Some(html), _) => html.to_string(),
            (None, Some(url)) => http::fetch_text(&self.client, url).await?,
            (None, None) => {
                return Err(PrintRouteError::configuration(
                    "agentOptions: html or url required",
                ));
            }
        };

        let target = options
            .local_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.default_url);

        let job = AgentJob {
            payload: AgentPayload {
                html,
                pdf_options: PdfOptions::merged(options.pdf_options.as_ref()),
                printer: options.printer.as_ref(),
            },
        };
        debug!(
            target_url = target,
            printer = options.printer.as_ref().map(|p| p.name.as_str()),
            "posting job to local agent"
        );

        http::post_json(&self.client, target, &job, "print agent").await?;
        info!(target_url = target, "print agent accepted job");
        Ok(())
    }
}
