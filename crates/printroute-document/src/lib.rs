// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printroute-document — Turns caller HTML into a standalone printable
// document sized for the target paper.

pub mod html;

pub use html::{PageStyle, build_print_document, is_full_document};
