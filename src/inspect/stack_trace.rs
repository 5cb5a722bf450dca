//! Stack-trace normalization for error rendering.
//!
//! Frames already in `    at symbol (location)` form pass through
//! unchanged. Frames in the `symbol@location` shape are rebuilt into that
//! form: the location's URL prefix is dropped, a configured root prefix is
//! stripped, a configured module directory is rewritten into a scheme
//! prefix with its script extension removed, and a frame with neither
//! symbol nor resolvable context renders as `    at <anonymous>`.
//!
//! Only one platform's frame shape is recognized; other platforms are a
//! matter of configuration, not code.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Location rewriting configuration. Defaults rewrite nothing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StackTraceConfig {
    /// Path prefix stripped from frame contexts (the project root).
    pub root: Option<String>,
    /// Directory prefix rewritten into `module_scheme`.
    pub module_root: Option<String>,
    /// Scheme-style replacement for `module_root`, e.g. `app:`.
    pub module_scheme: Option<String>,
    /// Script extension dropped after the module rewrite, e.g. `.js`.
    pub strip_extension: Option<String>,
}

fn at_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*at\s").expect("frame pattern"))
}

fn url_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^/]*").expect("url pattern"))
}

/// Normalize a whole stack text. `header` is the error's `Name: message`
/// line; lines carrying it pass through untouched.
pub(crate) fn render_stack(stack: &str, header: &str, config: &StackTraceConfig) -> String {
    let lines: Vec<String> = stack
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if (!header.is_empty() && line.contains(header)) || at_line().is_match(line) {
                line.to_string()
            } else {
                rebuild_frame(line, config)
            }
        })
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

/// Rebuild one `symbol@location` frame.
fn rebuild_frame(line: &str, config: &StackTraceConfig) -> String {
    let (symbol, location) = if let Some(stripped) = line.strip_suffix('@') {
        (stripped, "")
    } else if let Some(stripped) = line.strip_prefix('@') {
        ("", stripped)
    } else {
        match line.split_once('@') {
            Some((symbol, location)) => (symbol, location),
            None => (line, ""),
        }
    };

    // Reduce a URL location to its path before splitting off line/column.
    let path = match url_prefix().find(location) {
        Some(m) => &location[m.end()..],
        None => location,
    };
    let mut parts = path.split(':');
    let context = parts.next().unwrap_or("");
    let lineno = parts.next().filter(|s| !s.is_empty());
    let colno = parts.next().filter(|s| !s.is_empty());

    let context = rewrite_context(context, config);
    let symbol = symbol.trim();

    let mut pieces: Vec<String> = Vec::new();
    if !symbol.is_empty() {
        pieces.push(symbol.to_string());
    }
    if !context.is_empty() {
        match (lineno, colno) {
            (Some(l), Some(c)) => pieces.push(format!("({}:{}:{})", context, l, c)),
            (Some(l), None) => pieces.push(format!("({}:{})", context, l)),
            _ => pieces.push(context),
        }
    } else if symbol.is_empty() {
        pieces.push("<anonymous>".to_string());
    }

    if pieces.is_empty() {
        return String::new();
    }
    format!("    at {}", pieces.join(" "))
}

fn rewrite_context(context: &str, config: &StackTraceConfig) -> String {
    let mut context = context.to_string();
    if context.is_empty() {
        return context;
    }
    if let Some(root) = &config.root {
        if !root.is_empty() {
            context = context.replacen(root.as_str(), "", 1);
        }
    }
    if let (Some(dir), Some(scheme)) = (&config.module_root, &config.module_scheme) {
        if !dir.is_empty() && context.contains(dir.as_str()) {
            context = context.replacen(dir.as_str(), scheme.as_str(), 1);
            if let Some(ext) = &config.strip_extension {
                if !ext.is_empty() && context.ends_with(ext.as_str()) {
                    context.truncate(context.len() - ext.len());
                }
            }
        }
    }
    context
}
