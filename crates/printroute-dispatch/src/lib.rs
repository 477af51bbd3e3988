// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printroute Dispatch — strategy resolution, the cloud -> agent -> browser
// fallback chain, and the three print backends.  Request types live in
// `printroute-core`; the browsing context sits behind `printroute-bridge`.

pub mod agent;
pub mod browser;
pub mod cloud;
pub mod dispatcher;
pub mod http;
pub mod normalize;
pub mod observer;
pub mod template;

#[cfg(test)]
mod testing;

pub use agent::AgentClient;
pub use browser::BrowserPrinter;
pub use cloud::CloudClient;
pub use dispatcher::Dispatcher;
pub use normalize::ResolvedOptions;
pub use observer::{DispatchObserver, TracingObserver};
pub use template::TemplateRenderer;
