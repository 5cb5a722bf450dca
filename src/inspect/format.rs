//! The recursive formatter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::inspect::classify::{classify, Kind};
use crate::inspect::context::InspectContext;
use crate::inspect::hook::{HookArgs, HookOutput};
use crate::inspect::property::{format_property, PropertyEntry};
use crate::inspect::quote::quote_string;
use crate::inspect::stack_trace::render_stack;
use crate::inspect::{Depth, InspectOptions};
use crate::value::coerce::number_to_display;
use crate::value::{ErrorValue, Value};

/// Render one node. Classification happens once per node; the result drives
/// every rule below it. This function never fails: unreadable values render
/// their empty form.
pub(crate) fn format_value(ctx: &mut InspectContext<'_>, value: &Value, depth: Depth) -> String {
    if let Value::Symbol(symbol) = value {
        return symbol.to_display();
    }

    if let Some(out) = try_custom_hook(ctx, value, depth) {
        return out;
    }

    match value {
        Value::Undefined => return "undefined".to_string(),
        Value::Null => return "null".to_string(),
        Value::Str(s) => return quote_string(s),
        Value::Bool(b) => return b.to_string(),
        Value::Int(i) => return i.to_string(),
        Value::Float(f) => return number_to_display(*f),
        Value::BigInt(i) => return format!("{}n", i),
        Value::WeakSet => return "WeakSet { <items unknown> }".to_string(),
        Value::WeakMap => return "WeakMap { <items unknown> }".to_string(),
        _ => {}
    }

    let kind = classify(value);

    let (open, close) = match kind {
        Kind::ArrayLike => ("[", "]"),
        Kind::Error => ("", ""),
        _ => ("{", "}"),
    };
    let prefix = chrome_prefix(value);
    let label = inner_label(value);

    if depth.exhausted() {
        if let Value::RegExp(r) = value {
            return r.literal();
        }
    }

    let entries = collect_entries(value, ctx.opts.show_hidden);

    if entries.is_empty() && kind != Kind::Error {
        if matches!(value, Value::Function(_)) {
            return label;
        }
        return format!("{}{}{}{}", prefix, open, label, close);
    }

    if depth.exhausted() {
        return "[Object]".to_string();
    }

    let indexed = matches!(value, Value::Array(_) | Value::Bytes(_) | Value::Set(_));
    let map_style = matches!(value, Value::Map(_));

    let rendered: Vec<String> = ctx.enter(value, |ctx| {
        entries
            .iter()
            .map(|entry| format_property(ctx, entry, depth, indexed, map_style))
            .collect()
    });

    if let Value::Error(err) = value {
        return render_error(ctx.opts, err, &rendered);
    }

    let layout = &ctx.opts.layout;
    let total: usize = rendered.iter().map(|line| line.len() + 1).sum();
    if total > layout.max_inline_width {
        let pad = " ".repeat(layout.indent);
        let body = rendered.join(&format!(",\n{}", pad));
        format!("{}{}\n{}{}\n{}", prefix, open, pad, body, close)
    } else {
        format!("{}{} {} {}", prefix, open, rendered.join(", "), close)
    }
}

fn try_custom_hook(ctx: &mut InspectContext<'_>, value: &Value, depth: Depth) -> Option<String> {
    if !ctx.opts.custom_inspect {
        return None;
    }
    if value.well_known().is_some() {
        return None;
    }
    let hook = value.inspect_hook()?;
    if hook.ignore {
        return None;
    }
    let opts: &InspectOptions = ctx.opts;
    let output = (hook.call)(HookArgs {
        depth,
        options: opts,
        inspect: crate::inspect::inspect_with,
    });
    match output {
        HookOutput::Text(text) => Some(text),
        HookOutput::Value(replacement) => Some(format_value(ctx, &replacement, depth)),
    }
}

/// Everything printed before the opening brace.
fn chrome_prefix(value: &Value) -> String {
    match value {
        Value::Map(m) => format!("Map({}) ", m.try_borrow().map_or(0, |m| m.len())),
        Value::Set(s) => format!("Set({}) ", s.try_borrow().map_or(0, |s| s.items.len())),
        Value::Arguments(_) => "Arguments ".to_string(),
        Value::Iterator(it) => format!("{} ", it.flavor.tag()),
        Value::Bytes(b) => format!("{} ", b.tag),
        Value::Date(_) => "Date ".to_string(),
        Value::RegExp(_) => "RegExp ".to_string(),
        Value::Function(f) => format!("{} ", f.tag()),
        Value::Object(o) => match o.try_borrow() {
            Ok(o) => {
                if o.null_prototype {
                    "[Object: null prototype] ".to_string()
                } else {
                    match &o.class_name {
                        Some(name) if !name.is_empty() && name.as_ref() != "Object" => {
                            format!("{} ", name)
                        }
                        _ => String::new(),
                    }
                }
            }
            Err(_) => String::new(),
        },
        _ => String::new(),
    }
}

/// Content rendered between empty braces: the function tag, the regexp
/// literal, the date string.
fn inner_label(value: &Value) -> String {
    match value {
        Value::Function(f) => f.tag(),
        Value::RegExp(r) => r.literal(),
        Value::Date(d) => d.repr.to_string(),
        _ => String::new(),
    }
}

fn collect_entries(value: &Value, show_hidden: bool) -> Vec<PropertyEntry> {
    match value {
        Value::Array(items) => items.try_borrow().map_or_else(
            |_| Vec::new(),
            |items| {
                items
                    .iter()
                    .map(|item| PropertyEntry::positional(item.clone()))
                    .collect()
            },
        ),
        Value::Bytes(b) => b
            .data
            .iter()
            .map(|byte| PropertyEntry::positional(Value::Int(*byte as i64)))
            .collect(),
        Value::Set(s) => s.try_borrow().map_or_else(
            |_| Vec::new(),
            |s| {
                s.items
                    .iter()
                    .map(|item| PropertyEntry::positional(item.clone()))
                    .collect()
            },
        ),
        Value::Arguments(items) => items.try_borrow().map_or_else(
            |_| Vec::new(),
            |items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| PropertyEntry::data(Rc::from(i.to_string()), item.clone()))
                    .collect()
            },
        ),
        Value::Map(m) => m.try_borrow().map_or_else(
            |_| Vec::new(),
            |m| {
                m.entries
                    .iter()
                    .map(|(key, v)| PropertyEntry::data(Rc::from(key.label()), v.clone()))
                    .collect()
            },
        ),
        Value::Object(obj) => obj.try_borrow().map_or_else(
            |_| Vec::new(),
            |obj| {
                obj.properties
                    .iter()
                    .filter(|(_, prop)| prop.enumerable || show_hidden)
                    .map(|(key, prop)| PropertyEntry::keyed(key.clone(), prop))
                    .collect()
            },
        ),
        Value::Function(f) => f.properties.try_borrow().map_or_else(
            |_| Vec::new(),
            |props| {
                props
                    .iter()
                    .filter(|(key, _)| {
                        !matches!(key.as_ref(), "name" | "length" | "prototype" | "constructor")
                    })
                    .filter(|(_, prop)| prop.enumerable || show_hidden)
                    .map(|(key, prop)| PropertyEntry::keyed(key.clone(), prop))
                    .collect()
            },
        ),
        Value::Error(err) => err.try_borrow().map_or_else(
            |_| Vec::new(),
            |err| {
                let mut entries: Vec<PropertyEntry> = err
                    .properties
                    .iter()
                    .filter(|(_, prop)| prop.enumerable || show_hidden)
                    .map(|(key, prop)| PropertyEntry::keyed(key.clone(), prop))
                    .collect();
                if let Some(cause) = &err.cause {
                    if cause.is_truthy() {
                        entries.push(PropertyEntry::data(Rc::from("cause"), cause.clone()));
                    }
                }
                if let Some(code) = &err.code {
                    if code.is_truthy() {
                        entries.push(PropertyEntry::data(Rc::from("code"), code.clone()));
                    }
                }
                entries
            },
        ),
        _ => Vec::new(),
    }
}

/// Errors render as header + normalized stack + an optional appended key
/// block, outside any braces.
fn render_error(
    opts: &InspectOptions,
    err: &Rc<RefCell<ErrorValue>>,
    rendered: &[String],
) -> String {
    let err = match err.try_borrow() {
        Ok(err) => err,
        Err(_) => return "[Error]".to_string(),
    };
    let header = err.header();
    let stack_text = err.stack.as_deref().unwrap_or("");

    let mut out = String::new();
    if !stack_text.starts_with(&header) {
        out.push_str(&header);
        out.push('\n');
    }
    out.push_str(&render_stack(stack_text, &header, &opts.stack_trace));

    if !rendered.is_empty() {
        out.push_str(" {\n");
    }
    out.push_str("  ");
    out.push_str(&rendered.join(",\n  "));
    if !rendered.is_empty() {
        out.push_str("\n}");
    }
    out.trim().to_string()
}
