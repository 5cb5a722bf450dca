//! Recursive value inspection.
//!
//! `inspect` walks a value graph bounded by a depth budget, classifies each
//! node, renders it through kind-specific rules, detects cycles by reference
//! identity, and decides between inline and indented layout. It never fails:
//! hostile values degrade their own rendering, nothing else's.

use serde::{Deserialize, Serialize};

use crate::value::Value;

pub mod classify;
pub mod hook;
pub mod stack_trace;

mod context;
mod format;
mod property;
mod quote;

pub use classify::{classify, Kind};
pub use stack_trace::StackTraceConfig;


/// Remaining recursion budget. `Limited(d)` with a negative `d` is
/// exhausted; `Unlimited` never decrements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    Limited(i64),
    Unlimited,
}

impl Depth {
    pub fn exhausted(self) -> bool {
        matches!(self, Depth::Limited(d) if d < 0)
    }

    /// One level deeper. Unlimited stays unlimited.
    pub fn next(self) -> Depth {
        match self {
            Depth::Limited(d) => Depth::Limited(d - 1),
            Depth::Unlimited => Depth::Unlimited,
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Limited(2)
    }
}

/// Layout constants, configurable with the observed defaults: properties
/// whose rendered lengths sum past `max_inline_width` go one-per-line at
/// `indent` spaces (nested keyed members continue at twice that).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub max_inline_width: usize,
    pub indent: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            max_inline_width: 80,
            indent: 2,
        }
    }
}

/// Options for one inspection call.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    pub depth: Depth,
    /// Include non-enumerable keys, rendered bracketed.
    pub show_hidden: bool,
    /// Honor values' self-describing inspection hooks.
    pub custom_inspect: bool,
    pub layout: LayoutConfig,
    pub stack_trace: StackTraceConfig,
}

impl Default for InspectOptions {
    fn default() -> Self {
        InspectOptions {
            depth: Depth::default(),
            show_hidden: false,
            custom_inspect: true,
            layout: LayoutConfig::default(),
            stack_trace: StackTraceConfig::default(),
        }
    }
}

impl InspectOptions {
    /// Read options off an options-shaped object value: one carrying both a
    /// truthy `seen` and a truthy `depth` property. Used by the template
    /// formatter's trailing-argument rule. Returns `None` for anything else.
    pub fn from_value(value: &Value) -> Option<InspectOptions> {
        let obj = match value {
            Value::Object(obj) => obj.try_borrow().ok()?,
            _ => return None,
        };
        let seen = obj.get_data("seen")?;
        let depth = obj.get_data("depth")?;
        if !seen.is_truthy() || !depth.is_truthy() {
            return None;
        }
        let mut options = InspectOptions::default();
        if let Value::Int(d) = depth {
            options.depth = Depth::Limited(*d);
        }
        if let Some(v) = obj.get_data("showHidden") {
            options.show_hidden = v.is_truthy();
        }
        if let Some(v) = obj.get_data("customInspect") {
            options.custom_inspect = v.is_truthy();
        }
        Some(options)
    }
}

/// Render a value with default options.
pub fn inspect(value: &Value) -> String {
    inspect_with(value, &InspectOptions::default())
}

/// Render a value. Pure; concurrent calls never share state.
pub fn inspect_with(value: &Value, options: &InspectOptions) -> String {
    let mut ctx = context::InspectContext::new(options);
    format::format_value(&mut ctx, value, options.depth)
}
