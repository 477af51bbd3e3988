// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printroute — print job router
//
// Entry point. Initialises logging, parses the command line and runs one
// command against the backend services.

mod cli;
mod services;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use printroute_core::error::Result;
use printroute_core::types::{BrowserOptions, PrintRequest};
use printroute_document::{PageStyle, build_print_document};

use cli::{Cli, Commands};
use services::app_services::{self, AppServices};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), error = %e, "command failed");
            eprintln!("printroute: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dispatch {
            request,
            strategy,
            fallback,
        } => {
            let mut request = read_request(&request)?;
            if let Some(strategy) = strategy {
                request.strategy = strategy;
            }
            request.fallback_to_browser_on_error |= fallback;
            if cli.debug {
                request.debug_override = Some(true);
            }

            let services = AppServices::init(cli.config.as_deref(), &cli.endpoints, cli.debug)?;
            let outcome = services.dispatch(&request).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Render {
            template_id,
            width_mm,
            data,
        } => {
            let data = data
                .as_deref()
                .map(app_services::parse_template_data)
                .transpose()?;
            let services = AppServices::init(cli.config.as_deref(), &cli.endpoints, cli.debug)?;
            let html = services
                .render(&template_id, width_mm, data.as_ref())
                .await?;
            println!("{html}");
        }
        Commands::Preview {
            html,
            page_width_mm,
            page_height_mm,
            margin_mm,
            keep_app_chrome,
        } => {
            let markup = std::fs::read_to_string(&html)?;
            let style = PageStyle::from_options(&BrowserOptions {
                page_width_mm,
                page_height_mm,
                margin_mm,
                hide_app_chrome: !keep_app_chrome,
                ..Default::default()
            });
            println!("{}", build_print_document(&markup, &style));
        }
    }
    Ok(())
}

/// Read a JSON `PrintRequest` from `path`, or stdin for `-`.
fn read_request(path: &Path) -> Result<PrintRequest> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}
