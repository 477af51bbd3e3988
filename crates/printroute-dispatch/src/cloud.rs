// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cloud print backend.
//
// Submits either a template job (server renders the layout) or an HTML job
// (content supplied inline or fetched from a URL). All option validation
// happens before any network call.

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use printroute_core::error::{PrintRouteError, Result};
use printroute_core::types::{CloudMode, CloudOptions, CloudPrinter};

use crate::http;

/// JSON body of a cloud print job.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
enum CloudJob<'a> {
    #[serde(rename_all = "camelCase")]
    Template {
        template_id: &'a str,
        width_mm: u32,
        data: &'a Map<String, Value>,
        printer: &'a CloudPrinter,
    },
    #[serde(rename_all = "camelCase")]
    Html {
        content: String,
        width_mm: u32,
        printer: &'a CloudPrinter,
    },
}

/// Where html-mode content comes from.
#[derive(Debug, PartialEq)]
enum HtmlSource<'a> {
    Inline(&'a str),
    Fetch(&'a str),
}

/// Validated job, before any content has been fetched.
#[derive(Debug)]
enum CloudPlan<'a> {
    Template {
        template_id: &'a str,
        width_mm: u32,
        data: &'a Map<String, Value>,
        printer: &'a CloudPrinter,
    },
    Html {
        source: HtmlSource<'a>,
        width_mm: u32,
        printer: &'a CloudPrinter,
    },
}

/// Validate options and pick the job shape.
fn plan(options: Option<&CloudOptions>) -> Result<CloudPlan<'_>> {
    let options =
        options.ok_or_else(|| PrintRouteError::configuration("cloudOptions are required"))?;
    let printer = options
        .printer
        .as_ref()
        .filter(|p| !p.key.is_empty())
        .ok_or_else(|| PrintRouteError::configuration("cloudOptions.printer.key is required"))?;

    let width_mm = options.width_mm();
    match options.effective_mode()? {
        CloudMode::Template => {
            let template_id = options.template_id().ok_or_else(|| {
                PrintRouteError::configuration("cloudOptions.templateId is required in template mode")
            })?;
            Ok(CloudPlan::Template {
                template_id,
                width_mm,
                data: &options.data,
                printer,
            })
        }
        CloudMode::Html => {
            let source = match (options.html(), options.url()) {
                (Some(html), _) => HtmlSource::Inline(html),
                (None, Some(url)) => HtmlSource::Fetch(url),
                (None, None) => {
                    return Err(PrintRouteError::configuration(
                        "cloudOptions.html or cloudOptions.url is required in html mode",
                    ));
                }
            };
            Ok(CloudPlan::Html {
                source,
                width_mm,
                printer,
            })
        }
    }
}

/// Client for the cloud print-job endpoint.
#[derive(Clone)]
pub struct CloudClient {
    client: Client,
    print_url: String,
}

impl CloudClient {
    pub fn new(client: Client, print_url: impl Into<String>) -> Self {
        Self {
            client,
            print_url: print_url.into(),
        }
    }

    /// Submit a print job to the cloud API.
    #[instrument(skip(self, options), fields(url = %self.print_url))]
    pub async fn cloud_print(&self, options: Option<&CloudOptions>) -> Result<()> {
        let job = match plan(options)? {
            CloudPlan::Template {
                template_id,
                width_mm,
                data,
                printer,
            } => CloudJob::Template {
                template_id,
                width_mm,
                data,
                printer,
            },
            CloudPlan::Html {
                source,
                width_mm,
                printer,
            } => {
                let content = match source {
                    HtmlSource::Inline(html) => html.to_string(),
                    HtmlSource::Fetch(url) => http::fetch_text(&self.client, url).await?,
                };
                CloudJob::Html {
                    content,
                    width_mm,
                    printer,
                }
            }
        };

        http::post_json(&self.client, &self.print_url, &job, "cloud print").await?;
        info!("cloud print job accepted");
        Ok(())
    }
}
