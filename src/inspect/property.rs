//! Per-property rendering.

use std::rc::Rc;

use crate::inspect::context::InspectContext;
use crate::inspect::format::format_value;
use crate::inspect::quote::{is_index_key, key_label};
use crate::inspect::Depth;
use crate::value::object::{Property, PropertyValue};
use crate::value::Value;

/// One property to render: an optional key (positional entries have none)
/// and either a data value or an accessor placeholder. Produced while
/// rendering a container, consumed immediately.
pub(crate) struct PropertyEntry {
    pub key: Option<Rc<str>>,
    pub value: PropertyValue,
    pub enumerable: bool,
}

impl PropertyEntry {
    pub fn positional(value: Value) -> Self {
        PropertyEntry {
            key: None,
            value: PropertyValue::Data(value),
            enumerable: true,
        }
    }

    pub fn keyed(key: Rc<str>, property: &Property) -> Self {
        PropertyEntry {
            key: Some(key),
            value: property.value.clone(),
            enumerable: property.enumerable,
        }
    }

    pub fn data(key: Rc<str>, value: Value) -> Self {
        PropertyEntry {
            key: Some(key),
            value: PropertyValue::Data(value),
            enumerable: true,
        }
    }
}

/// Render one property line. `indexed` selects the array-style multi-line
/// re-indent (two spaces, leading pair trimmed so the opening bracket does
/// not double-indent); keyed members continue on a new line at twice the
/// indent. `map_style` joins key and value with `=>`.
pub(crate) fn format_property(
    ctx: &mut InspectContext<'_>,
    entry: &PropertyEntry,
    depth: Depth,
    indexed: bool,
    map_style: bool,
) -> String {
    let indent = ctx.opts.layout.indent;

    let rendered = match &entry.value {
        PropertyValue::Accessor { get: true, set: true } => "[Getter/Setter]".to_string(),
        PropertyValue::Accessor { get: true, set: false } => "[Getter]".to_string(),
        PropertyValue::Accessor { get: false, set: true } => "[Setter]".to_string(),
        PropertyValue::Accessor { get: false, set: false } => "undefined".to_string(),
        PropertyValue::Data(value) => {
            if ctx.has_seen(value) {
                "[Circular]".to_string()
            } else {
                let child = format_value(ctx, value, depth.next());
                if child.contains('\n') {
                    reindent(&child, indent, indexed)
                } else {
                    child
                }
            }
        }
    };

    let label = match &entry.key {
        None => return rendered,
        Some(key) => {
            if !entry.enumerable {
                format!("[{}]", key)
            } else if indexed && is_index_key(key) {
                return rendered;
            } else {
                key_label(key)
            }
        }
    };

    let separator = if map_style { " => " } else { ": " };
    format!("{}{}{}", label, separator, rendered)
}

fn reindent(child: &str, indent: usize, indexed: bool) -> String {
    let pad = " ".repeat(indent);
    if indexed {
        let shifted: Vec<String> = child
            .split('\n')
            .map(|line| format!("{}{}", pad, line))
            .collect();
        let joined = shifted.join("\n");
        joined.chars().skip(indent).collect()
    } else {
        let pad = " ".repeat(indent * 2);
        let shifted: Vec<String> = child
            .split('\n')
            .map(|line| format!("{}{}", pad, line))
            .collect();
        format!("\n{}", shifted.join("\n"))
    }
}
