// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print request model shared by the dispatcher and every backend.
//
// Field names serialize in camelCase so request files written for the
// browser-side API deserialize unchanged.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::PrintRouteError;

/// Default cloud paper width in millimetres.
pub const DEFAULT_CLOUD_WIDTH_MM: u32 = 80;

/// Treat `Some("")` the same as `None`.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Unique identifier for one `dispatch` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub Uuid);

impl DispatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the dispatcher picks a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Cloud, then agent, then browser; first success wins.
    #[default]
    Auto,
    Browser,
    Cloud,
    Agent,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Browser => "browser",
            Self::Cloud => "cloud",
            Self::Agent => "agent",
        })
    }
}

impl FromStr for Strategy {
    type Err = PrintRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "browser" => Ok(Self::Browser),
            "cloud" => Ok(Self::Cloud),
            "agent" => Ok(Self::Agent),
            other => Err(PrintRouteError::configuration(format!(
                "unknown strategy '{other}' (expected auto, browser, cloud or agent)"
            ))),
        }
    }
}

/// A concrete print path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Browser,
    Cloud,
    Agent,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Browser => "browser",
            Self::Cloud => "cloud",
            Self::Agent => "agent",
        })
    }
}

/// What a successful dispatch achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum PrintOutcome {
    /// The backend (platform print call, cloud API or agent) accepted the job.
    Accepted { backend: Backend },
    /// A cross-origin URL was opened in a new tab; the user has to print it.
    ManualPrintRequired { url: String },
}

impl PrintOutcome {
    pub fn accepted(backend: Backend) -> Self {
        Self::Accepted { backend }
    }

    /// The backend that produced this outcome.
    pub fn backend(&self) -> Backend {
        match self {
            Self::Accepted { backend } => *backend,
            Self::ManualPrintRequired { .. } => Backend::Browser,
        }
    }
}

/// Top-level input to `dispatch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    #[serde(default)]
    pub strategy: Strategy,
    /// HTML reused by any backend without its own.
    pub shared_html: Option<String>,
    /// URL reused by any backend without its own.
    pub shared_url: Option<String>,
    pub browser_options: Option<BrowserOptions>,
    pub cloud_options: Option<CloudOptions>,
    pub agent_options: Option<AgentOptions>,
    /// Debug flag for this call only.
    pub debug_override: Option<bool>,
    /// Retry a failed non-browser strategy through the browser.
    #[serde(default)]
    pub fallback_to_browser_on_error: bool,
}

impl PrintRequest {
    pub fn shared_html(&self) -> Option<&str> {
        non_empty(self.shared_html.as_deref())
    }

    pub fn shared_url(&self) -> Option<&str> {
        non_empty(self.shared_url.as_deref())
    }

    /// Whether any shared content is available.
    pub fn has_shared_content(&self) -> bool {
        self.shared_html().is_some() || self.shared_url().is_some()
    }

    /// The cloud template id, when one is configured.
    pub fn template_id(&self) -> Option<&str> {
        self.cloud_options.as_ref().and_then(CloudOptions::template_id)
    }
}

fn default_true() -> bool {
    true
}

/// Options for the browser print path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserOptions {
    pub html: Option<String>,
    pub url: Option<String>,
    pub page_width_mm: Option<f64>,
    pub page_height_mm: Option<f64>,
    /// Page margin; 0 when unset.
    pub margin_mm: Option<f64>,
    /// Hide headers, footers and navigation while printing.
    #[serde(default = "default_true")]
    pub hide_app_chrome: bool,
    /// Print through a popup window instead of a hidden frame.
    #[serde(default)]
    pub popup: bool,
    pub popup_width: Option<u32>,
    pub popup_height: Option<u32>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            html: None,
            url: None,
            page_width_mm: None,
            page_height_mm: None,
            margin_mm: None,
            hide_app_chrome: true,
            popup: false,
            popup_width: None,
            popup_height: None,
        }
    }
}

impl BrowserOptions {
    pub fn html(&self) -> Option<&str> {
        non_empty(self.html.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }
}

/// Cloud printer selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudPrinter {
    #[serde(default)]
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_key: Option<String>,
}

/// Body mode accepted by the cloud print API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudMode {
    Template,
    Html,
}

impl FromStr for CloudMode {
    type Err = PrintRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template" => Ok(Self::Template),
            "html" => Ok(Self::Html),
            other => Err(PrintRouteError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Options for the cloud print API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudOptions {
    /// `template` or `html`; inferred when absent.
    pub mode: Option<String>,
    pub template_id: Option<String>,
    pub width_mm: Option<u32>,
    /// Opaque template payload.
    #[serde(default)]
    pub data: Map<String, Value>,
    pub printer: Option<CloudPrinter>,
    pub html: Option<String>,
    pub url: Option<String>,
}

impl CloudOptions {
    pub fn template_id(&self) -> Option<&str> {
        non_empty(self.template_id.as_deref())
    }

    pub fn printer_key(&self) -> Option<&str> {
        self.printer
            .as_ref()
            .and_then(|p| non_empty(Some(p.key.as_str())))
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm.unwrap_or(DEFAULT_CLOUD_WIDTH_MM)
    }

    pub fn html(&self) -> Option<&str> {
        non_empty(self.html.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    /// The mode the API call will use. A template id always wins over the
    /// declared mode; an undeclared mode means template.
    pub fn effective_mode(&self) -> Result<CloudMode, PrintRouteError> {
        if self.template_id().is_some() {
            return Ok(CloudMode::Template);
        }
        match self.mode.as_deref() {
            None => Ok(CloudMode::Template),
            Some(mode) => mode.parse(),
        }
    }
}

/// Printer selector understood by the local agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPrinter {
    pub name: String,
}

/// Options for the local print agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOptions {
    pub html: Option<String>,
    pub url: Option<String>,
    /// Agent endpoint; the dispatcher's configured agent URL when unset.
    pub local_url: Option<String>,
    pub pdf_options: Option<PdfOptionsOverride>,
    pub printer: Option<AgentPrinter>,
}

impl AgentOptions {
    pub fn html(&self) -> Option<&str> {
        non_empty(self.html.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    pub fn has_content(&self) -> bool {
        self.html().is_some() || self.url().is_some()
    }
}

/// PDF margins as understood by the agent's renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfMargins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

impl Default for PdfMargins {
    fn default() -> Self {
        Self {
            margin_type: Some(0),
            top: None,
            bottom: None,
            left: None,
            right: None,
        }
    }
}

/// Either a named size (`"A4"`) or explicit micron dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PdfPageSize {
    Named(String),
    Dimensions { height: String, width: String },
}

impl Default for PdfPageSize {
    fn default() -> Self {
        Self::Dimensions {
            height: "90000".into(),
            width: "90000".into(),
        }
    }
}

/// Fully resolved PDF options sent to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub margins: PdfMargins,
    pub page_size: PdfPageSize,
    pub color: bool,
    pub copies: u32,
    pub scale_factor: String,
    pub landscape: bool,
    pub dpi: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margins: PdfMargins::default(),
            page_size: PdfPageSize::default(),
            color: false,
            copies: 1,
            scale_factor: "100".into(),
            landscape: false,
            dpi: "300".into(),
        }
    }
}

/// Caller-supplied PDF options; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptionsOverride {
    pub margins: Option<PdfMargins>,
    pub page_size: Option<PdfPageSize>,
    pub color: Option<bool>,
    pub copies: Option<u32>,
    pub scale_factor: Option<String>,
    pub landscape: Option<bool>,
    pub dpi: Option<String>,
}

impl PdfOptions {
    /// Apply `overrides` key by key. A supplied nested value (margins, page
    /// size) replaces the default wholesale.
    pub fn merged(overrides: Option<&PdfOptionsOverride>) -> Self {
        let defaults = Self::default();
        let Some(o) = overrides else {
            return defaults;
        };
        Self {
            margins: o.margins.clone().unwrap_or(defaults.margins),
            page_size: o.page_size.clone().unwrap_or(defaults.page_size),
            color: o.color.unwrap_or(defaults.color),
            copies: o.copies.unwrap_or(defaults.copies),
            scale_factor: o.scale_factor.clone().unwrap_or(defaults.scale_factor),
            landscape: o.landscape.unwrap_or(defaults.landscape),
            dpi: o.dpi.clone().unwrap_or(defaults.dpi),
        }
    }
}
