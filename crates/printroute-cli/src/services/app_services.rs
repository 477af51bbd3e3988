// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — resolves configuration and owns the dispatcher the
// commands call into.
//
// Configuration precedence, lowest first: built-in defaults, the JSON config
// file, then command line flags and their environment variables.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use printroute_core::error::{PrintRouteError, Result};
use printroute_core::types::{PrintOutcome, PrintRequest};
use printroute_core::DispatcherConfig;
use printroute_dispatch::Dispatcher;

use super::config_dir;
use crate::cli::EndpointArgs;

/// Services shared by every command of one invocation.
pub struct AppServices {
    dispatcher: Dispatcher,
}

impl AppServices {
    /// Resolve configuration and build the dispatcher.
    pub fn init(config_path: Option<&Path>, endpoints: &EndpointArgs, debug: bool) -> Result<Self> {
        let config = resolve_config(config_path, endpoints, debug)?;
        info!(
            cloud = %config.cloud_print_url,
            agent = %config.agent_url,
            "app services initialised"
        );
        let dispatcher = Dispatcher::new(config, printroute_bridge::platform_bridge())?;
        Ok(Self { dispatcher })
    }

    pub async fn dispatch(&self, request: &PrintRequest) -> Result<PrintOutcome> {
        self.dispatcher.dispatch(request).await
    }

    pub async fn render(
        &self,
        template_id: &str,
        width_mm: Option<u32>,
        data: Option<&Map<String, Value>>,
    ) -> Result<String> {
        self.dispatcher
            .renderer()
            .render_template(template_id, width_mm, data)
            .await
    }
}

/// Merge defaults, the config file and flag overrides.
///
/// An explicit path must load. The default path is optional.
pub fn resolve_config(
    config_path: Option<&Path>,
    endpoints: &EndpointArgs,
    debug: bool,
) -> Result<DispatcherConfig> {
    let mut config = match config_path {
        Some(path) => DispatcherConfig::load(path)?,
        None => {
            let path = config_dir::default_config_path();
            if path.is_file() {
                DispatcherConfig::load(&path)?
            } else {
                debug!(path = %path.display(), "no config file; using defaults");
                DispatcherConfig::default()
            }
        }
    };

    if let Some(url) = &endpoints.cloud_print_url {
        config.cloud_print_url = url.clone();
    }
    if let Some(url) = &endpoints.cloud_render_url {
        config.cloud_render_url = url.clone();
    }
    if let Some(url) = &endpoints.agent_url {
        config.agent_url = url.clone();
    }
    config.debug |= debug;
    Ok(config)
}

/// Parse `--data`: inline JSON, or `@path` naming a JSON file.
pub fn parse_template_data(raw: &str) -> Result<Map<String, Value>> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => raw.to_string(),
    };
    match serde_json::from_str(&text)? {
        Value::Object(map) => Ok(map),
        _ => Err(PrintRouteError::configuration(
            "template data must be a JSON object",
        )),
    }
}
