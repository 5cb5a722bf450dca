//! Printf-style template formatting.
//!
//! `format` scans a template for two-character directives, substitutes the
//! positional arguments, and appends whatever arguments remain. A value
//! used as a plain argument falls back to space-joined inspector output.

use std::sync::OnceLock;

use regex::Regex;

use crate::inspect::{inspect_with, InspectOptions};
use crate::value::coerce::{coerce_number, coerce_string, number_to_display, parse_float_prefix,
    parse_int_prefix};
use crate::value::json::{to_json, to_json_string_pretty};
use crate::value::{Value, WellKnown};


fn directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The recognized token set, ASCII case-insensitive. Only a subset has a
    // conversion rule; the rest stay literal.
    RE.get_or_init(|| Regex::new(r"(?i)%[dfijlosuxz%]").expect("directive pattern"))
}

/// Format a template against positional arguments.
///
/// A trailing object argument carrying both a truthy `seen` and a truthy
/// `depth` property is consumed as inspector options rather than rendered.
/// A non-string template renders every value (template included) through
/// the inspector, space-joined.
pub fn format(template: &Value, args: &[Value]) -> String {
    let mut args: Vec<Value> = args.to_vec();
    let options = extract_options(&mut args);

    let template = match template {
        Value::Str(s) => s.clone(),
        other => {
            let opts = options.unwrap_or_default();
            let mut parts = vec![inspect_with(other, &opts)];
            parts.extend(args.iter().map(|arg| inspect_with(arg, &opts)));
            return parts.join(" ");
        }
    };

    format_template(&template, &args, &options.unwrap_or_default())
}

/// Convenience wrapper over [`format`] for string templates.
pub fn format_str(template: &str, args: &[Value]) -> String {
    format(&Value::string(template), args)
}

fn extract_options(args: &mut Vec<Value>) -> Option<InspectOptions> {
    let last = args.last()?;
    let options = InspectOptions::from_value(last)?;
    args.pop();
    Some(options)
}

fn format_template(template: &str, args: &[Value], opts: &InspectOptions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    let mut next = 0usize;

    for m in directive().find_iter(template) {
        out.push_str(&template[cursor..m.start()]);
        cursor = m.end();
        let token = m.as_str();

        if token == "%%" {
            out.push('%');
            continue;
        }
        if next >= args.len() {
            out.push_str(token);
            continue;
        }

        // The global-scope sentinel is skipped outright; the system
        // sentinel consumes the slot and renders a fixed token.
        if args[next].well_known() == Some(WellKnown::GlobalScope) {
            next += 1;
        }
        if next < args.len() && args[next].well_known() == Some(WellKnown::System) {
            next += 1;
            out.push_str("[System]");
            continue;
        }

        let arg = args.get(next).cloned().unwrap_or(Value::Undefined);
        let converted = match token {
            "%d" | "%u" | "%l" => Some(number_to_display(coerce_number(&arg))),
            "%f" => Some(number_to_display(parse_float_prefix(&coerce_string(&arg)))),
            "%i" => Some(number_to_display(parse_int_prefix(&coerce_string(&arg)))),
            "%o" => Some(inspect_with(
                &arg,
                &InspectOptions {
                    show_hidden: true,
                    ..InspectOptions::default()
                },
            )),
            "%O" => Some(inspect_with(&arg, &InspectOptions::default())),
            "%j" => Some(json_directive(&arg, false)),
            "%J" => Some(json_directive(&arg, true)),
            "%s" | "%S" => Some(coerce_string(&arg)),
            _ => None,
        };
        match converted {
            Some(text) => {
                out.push_str(&text);
                next += 1;
            }
            None => out.push_str(token),
        }
    }
    out.push_str(&template[cursor..]);

    for arg in args.iter().skip(next) {
        out.push(' ');
        if arg.is_object_like() {
            out.push_str(&inspect_with(arg, opts));
        } else {
            out.push_str(&coerce_string(arg));
        }
    }

    out
}

fn json_directive(arg: &Value, pretty: bool) -> String {
    match to_json(arg) {
        Ok(Some(json)) => {
            if pretty {
                to_json_string_pretty(&json)
            } else {
                serde_json::to_string(&json).unwrap_or_else(|_| "[Circular]".to_string())
            }
        }
        Ok(None) => "undefined".to_string(),
        Err(_) => "[Circular]".to_string(),
    }
}
