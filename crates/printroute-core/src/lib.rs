// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printroute — Print request model, errors and configuration shared across
// all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::DispatcherConfig;
pub use error::{ErrorKind, PrintRouteError};
pub use types::*;
