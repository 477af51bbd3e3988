// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use printroute_core::types::Strategy;

/// printroute command line.
#[derive(Debug, Parser)]
#[command(name = "printroute")]
#[command(about = "Route print jobs to a cloud service, a local agent or the browser")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file (JSON). Defaults to the user config directory.
    #[arg(short, long, env = "PRINTROUTE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging and per-stage dispatch traces
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub endpoints: EndpointArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint overrides applied on top of the configuration file.
#[derive(Debug, Default, Args)]
pub(crate) struct EndpointArgs {
    /// Cloud print-job endpoint
    #[arg(long, env = "PRINTROUTE_CLOUD_PRINT_URL", global = true)]
    pub cloud_print_url: Option<String>,

    /// Cloud template-render endpoint
    #[arg(long, env = "PRINTROUTE_CLOUD_RENDER_URL", global = true)]
    pub cloud_render_url: Option<String>,

    /// Local print agent endpoint
    #[arg(long, env = "PRINTROUTE_AGENT_URL", global = true)]
    pub agent_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Dispatch a print request read from a JSON file ("-" for stdin)
    Dispatch {
        /// Request file
        request: PathBuf,

        /// Override the request's strategy
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Retry through the browser when the chosen backend fails
        #[arg(long)]
        fallback: bool,
    },

    /// Render a cloud template and print the HTML to stdout
    Render {
        /// Template identifier
        #[arg(long)]
        template_id: String,

        /// Paper width in millimetres
        #[arg(long)]
        width_mm: Option<u32>,

        /// Template data: a JSON object, or @path to read one from a file
        #[arg(long)]
        data: Option<String>,
    },

    /// Print the printable document generated for an HTML file
    Preview {
        /// HTML fragment or full document
        #[arg(long)]
        html: PathBuf,

        #[arg(long)]
        page_width_mm: Option<f64>,

        #[arg(long)]
        page_height_mm: Option<f64>,

        #[arg(long)]
        margin_mm: Option<f64>,

        /// Leave headers, footers and navigation visible when printing
        #[arg(long)]
        keep_app_chrome: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_parses_strategy_and_flags() {
        let cli = Cli::try_parse_from([
            "printroute",
            "--debug",
            "dispatch",
            "job.json",
            "--strategy",
            "agent",
            "--fallback",
        ])
        .expect("valid args");
        assert!(cli.debug);
        match cli.command {
            Commands::Dispatch {
                request,
                strategy,
                fallback,
            } => {
                assert_eq!(request, PathBuf::from("job.json"));
                assert_eq!(strategy, Some(Strategy::Agent));
                assert!(fallback);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = Cli::try_parse_from(["printroute", "dispatch", "job.json", "--strategy", "fax"]);
        assert!(result.is_err());
    }

    #[test]
    fn endpoint_flags_are_global() {
        let cli = Cli::try_parse_from([
            "printroute",
            "render",
            "--template-id",
            "receipt",
            "--agent-url",
            "http://127.0.0.1:9000/print",
        ])
        .expect("valid args");
        assert_eq!(
            cli.endpoints.agent_url.as_deref(),
            Some("http://127.0.0.1:9000/print")
        );
    }
}
