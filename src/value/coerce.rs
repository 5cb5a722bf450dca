//! String and number coercion used by the template formatter.
//!
//! These mirror the loose conversion rules of the source runtime: string
//! coercion is quoteless (unlike the inspector's quoted rendering), numeric
//! coercion never fails — it degrades to NaN.

use crate::value::{FnFlavor, Value};

/// Quoteless string coercion, the `%s` rule.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => number_to_display(*f),
        Value::BigInt(i) => i.to_string(),
        Value::Str(s) => s.to_string(),
        Value::Symbol(s) => s.to_display(),
        Value::Bytes(b) => {
            let parts: Vec<String> = b.data.iter().map(|byte| byte.to_string()).collect();
            parts.join(",")
        }
        Value::Array(items) => match items.try_borrow() {
            Ok(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        // Holes, null, and undefined stringify empty inside
                        // a joined array.
                        Value::Undefined | Value::Null => String::new(),
                        other => coerce_string(other),
                    })
                    .collect();
                parts.join(",")
            }
            Err(_) => String::new(),
        },
        Value::Arguments(_) => "[object Arguments]".to_string(),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Map(_) => "[object Map]".to_string(),
        Value::Set(_) => "[object Set]".to_string(),
        Value::WeakMap => "[object WeakMap]".to_string(),
        Value::WeakSet => "[object WeakSet]".to_string(),
        Value::Date(d) => d.repr.to_string(),
        Value::RegExp(r) => r.literal(),
        Value::Error(e) => match e.try_borrow() {
            Ok(e) => e.header(),
            Err(_) => String::new(),
        },
        Value::Function(f) => {
            let name = f.name.as_deref().unwrap_or("");
            match f.flavor {
                FnFlavor::Plain => format!("function {}() {{ [native code] }}", name),
                FnFlavor::Async => format!("async function {}() {{ [native code] }}", name),
                FnFlavor::Generator => format!("function* {}() {{ [native code] }}", name),
                FnFlavor::AsyncGenerator => {
                    format!("async function* {}() {{ [native code] }}", name)
                }
                FnFlavor::Class => format!("class {} {{ [native code] }}", name),
            }
        }
        Value::Iterator(it) => format!("[object {}]", it.flavor.tag()),
    }
}

/// Loose numeric coercion, the `%d` rule. Never fails; degrades to NaN.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::BigInt(i) => *i as f64,
        Value::Str(s) => number_from_str(s),
        Value::Symbol(_) => f64::NAN,
        // Arrays coerce through their joined string form: [] is 0, [5] is 5.
        Value::Array(_) => number_from_str(&coerce_string(value)),
        _ => f64::NAN,
    }
}

fn number_from_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return i64::from_str_radix(rest, 16).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        return i64::from_str_radix(rest, 8).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        return i64::from_str_radix(rest, 2).map_or(f64::NAN, |v| v as f64);
    }
    // Rust's float parser accepts spellings like "inf" and "nan" that the
    // loose rules reject; anything alphabetic beyond an exponent marker is
    // not a number here.
    if s.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Integer-prefix parse, the `%i` rule.
pub fn parse_int_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let (sign, rest) = split_sign(s);
    if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
        if digits.is_empty() {
            return f64::NAN;
        }
        return sign * i64::from_str_radix(&digits, 16).map_or(f64::NAN, |v| v as f64);
    }
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

/// Float-prefix parse, the `%f` rule.
pub fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let (sign, rest) = split_sign(s);
    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    let bytes = rest.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == 0 || rest[..end] == *"." {
        return f64::NAN;
    }
    // Optional exponent, only when digits follow it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digit_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digit_start {
            end = exp_end;
        }
    }
    rest[..end].parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, s)
    }
}

/// Render a number the way the source runtime spells it: integral floats
/// collapse to their integer digits, NaN and the infinities by name.
pub fn number_to_display(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
        return (f as i64).to_string();
    }
    format!("{}", f)
}
