// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cloud template renderer: turns a server-stored layout plus data into HTML.

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use printroute_core::error::{PrintRouteError, Result};
use printroute_core::types::DEFAULT_CLOUD_WIDTH_MM;

use crate::http;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderBody<'a> {
    mode: &'static str,
    template_id: &'a str,
    width_mm: u32,
    data: &'a Map<String, Value>,
}

/// Client for the cloud render endpoint.
#[derive(Clone)]
pub struct TemplateRenderer {
    client: Client,
    render_url: String,
}

impl TemplateRenderer {
    pub fn new(client: Client, render_url: impl Into<String>) -> Self {
        Self {
            client,
            render_url: render_url.into(),
        }
    }

    /// Render `template_id` to HTML with one remote call.
    #[instrument(skip(self, data), fields(url = %self.render_url))]
    pub async fn render_template(
        &self,
        template_id: &str,
        width_mm: Option<u32>,
        data: Option<&Map<String, Value>>,
    ) -> Result<String> {
        let empty = Map::new();
        let body = RenderBody {
            mode: "template",
            template_id,
            width_mm: width_mm.unwrap_or(DEFAULT_CLOUD_WIDTH_MM),
            data: data.unwrap_or(&empty),
        };

        let response = http::post_json(&self.client, &self.render_url, &body, "template render").await?;
        let html = response.text().await.map_err(|e| PrintRouteError::Transport {
            context: "template render".into(),
            detail: e.to_string(),
        })?;

        info!(bytes = html.len(), "template rendered");
        Ok(html)
    }
}
