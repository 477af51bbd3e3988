// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printable HTML document builder.
//
// Takes caller markup (either a fragment or a complete document) and returns a
// standalone document carrying an `@page` rule for the paper size plus
// optional rules that hide application chrome while printing.

use tracing::debug;

use printroute_core::types::BrowserOptions;

/// Selectors hidden when `hide_app_chrome` is on.
const CHROME_SELECTORS: &[&str] = &[
    "header",
    "footer",
    "nav",
    ".header",
    ".footer",
    ".app-header",
    ".app-footer",
    ".site-header",
    ".site-footer",
    ".navbar",
];

/// Page geometry and chrome handling for one printable document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub margin_mm: f64,
    pub hide_app_chrome: bool,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            width_mm: None,
            height_mm: None,
            margin_mm: 0.0,
            hide_app_chrome: true,
        }
    }
}

impl PageStyle {
    pub fn from_options(options: &BrowserOptions) -> Self {
        Self {
            width_mm: options.page_width_mm,
            height_mm: options.page_height_mm,
            margin_mm: options.margin_mm.unwrap_or(0.0),
            hide_app_chrome: options.hide_app_chrome,
        }
    }

    /// The `@page` rule. `size` is only emitted when a width is known.
    pub fn page_rule(&self) -> String {
        let size = match (self.width_mm, self.height_mm) {
            (Some(w), Some(h)) => format!("size: {w}mm {h}mm; "),
            (Some(w), None) => format!("size: {w}mm; "),
            _ => String::new(),
        };
        format!("@page {{ {size}margin: {}mm; }}", self.margin_mm)
    }

    /// The complete `<style>` element injected into the document.
    pub fn style_block(&self) -> String {
        let mut css = String::new();
        css.push_str(&self.page_rule());
        css.push_str("\nhtml, body { margin: 0; padding: 0; }");
        if self.hide_app_chrome {
            css.push_str("\n@media print { ");
            css.push_str(&CHROME_SELECTORS.join(", "));
            css.push_str(" { display: none !important; } }");
        }
        format!("<style>\n{css}\n</style>")
    }
}

/// Build a standalone printable document from `markup`.
///
/// A complete document gets the style block inserted at the start of its
/// `<head>` (or a new `<head>` right after `<html>` when it has none). A
/// fragment is wrapped in a minimal document.
pub fn build_print_document(markup: &str, style: &PageStyle) -> String {
    let block = style.style_block();
    let lower = markup.to_ascii_lowercase();

    let Some(html_at) = find_tag(&lower, "html") else {
        debug!("wrapping HTML fragment in a printable document");
        return format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{block}\n</head>\n<body>\n{markup}\n</body>\n</html>"
        );
    };

    if let Some(head_at) = find_tag(&lower, "head") {
        if let Some(end) = tag_end(&lower, head_at) {
            debug!("injecting print styles into existing <head>");
            return splice(markup, end, &format!("\n{block}"));
        }
    }

    match tag_end(&lower, html_at) {
        Some(end) => {
            debug!("document has no <head>; inserting one");
            splice(markup, end, &format!("\n<head>\n{block}\n</head>"))
        }
        None => format!("{block}\n{markup}"),
    }
}

/// Whether `markup` already is a complete document.
pub fn is_full_document(markup: &str) -> bool {
    find_tag(&markup.to_ascii_lowercase(), "html").is_some()
}

/// Byte offset of the first `<name` opening tag (not `<names...`).
fn find_tag(lower: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    let mut from = 0;
    while let Some(rel) = lower[from..].find(&needle) {
        let at = from + rel;
        let next = lower[at + needle.len()..].chars().next();
        match next {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => return Some(at),
            _ => from = at + needle.len(),
        }
    }
    None
}

/// Offset just past the `>` closing the tag that starts at `start`.
fn tag_end(lower: &str, start: usize) -> Option<usize> {
    lower[start..].find('>').map(|rel| start + rel + 1)
}

fn splice(markup: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(markup.len() + insert.len());
    out.push_str(&markup[..at]);
    out.push_str(insert);
    out.push_str(&markup[at..]);
    out
}
