//! Small text and numeric helpers shipped beside the formatter.

use std::sync::OnceLock;

use regex::Regex;

/// Upper-case the first character.
pub fn to_proper_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Clamp into `[min, max]`; non-finite input collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let value = if value.is_finite() { value } else { min };
    value.max(min).min(max)
}

/// Parse raw header text into lowercased `(name, value)` pairs. Lines
/// without a `:` or with an empty side are dropped; a value keeps any
/// further colons it contains.
pub fn parse_headers(input: &str) -> Vec<(String, String)> {
    input
        .lines()
        .filter_map(|line| {
            let (name, value) = line.trim().split_once(':')?;
            let name = name.trim().to_lowercase();
            let value = value.trim().to_lowercase();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value))
        })
        .collect()
}

fn percentage() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(100(\.0+)?|[1-9]?\d(\.\d+)?)%$").expect("percentage pattern")
    })
}

/// Whether the input is a percentage between 0% and 100%.
pub fn is_valid_percentage_value(input: &str) -> bool {
    percentage().is_match(input)
}
