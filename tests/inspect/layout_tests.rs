use loupe::inspect::{inspect, inspect_with, InspectOptions, LayoutConfig};
use loupe::value::Value;

fn with_layout(max_inline_width: usize, indent: usize) -> InspectOptions {
    InspectOptions {
        layout: LayoutConfig {
            max_inline_width,
            indent,
        },
        ..InspectOptions::default()
    }
}

/// One property whose rendered form is exactly `len` characters:
/// `a: '<padding>'`.
fn single_prop_object(len: usize) -> Value {
    let padding = "x".repeat(len - 5);
    Value::object_of(vec![("a", Value::string(padding))])
}

#[test]
fn inline_up_to_the_width_threshold() {
    // Rendered property length 79 makes the total (with separator) exactly
    // 80, the inline limit.
    let value = single_prop_object(79);
    let out = inspect(&value);
    assert!(!out.contains('\n'));
    assert!(out.starts_with("{ a: 'xxx"));
    assert!(out.ends_with("' }"));
}

#[test]
fn multi_line_past_the_width_threshold() {
    let value = single_prop_object(80);
    let out = inspect(&value);
    assert!(out.starts_with("{\n  a: 'xxx"));
    assert!(out.ends_with("'\n}"));
}

#[test]
fn multi_line_properties_one_per_line_with_trailing_commas() {
    let value = Value::object_of(vec![
        ("alpha", Value::string("a".repeat(40))),
        ("beta", Value::string("b".repeat(40))),
        ("gamma", Value::Int(3)),
    ]);
    let out = inspect(&value);
    let expected = format!(
        "{{\n  alpha: '{}',\n  beta: '{}',\n  gamma: 3\n}}",
        "a".repeat(40),
        "b".repeat(40)
    );
    assert_eq!(out, expected);
}

#[test]
fn nested_multi_line_children_reindent_for_keyed_members() {
    let inner = Value::object_of(vec![
        ("left", Value::string("l".repeat(45))),
        ("right", Value::string("r".repeat(45))),
    ]);
    let value = Value::object_of(vec![("inner", inner)]);
    let out = inspect(&value);
    let expected = format!(
        "{{\n  inner: \n    {{\n      left: '{}',\n      right: '{}'\n    }}\n}}",
        "l".repeat(45),
        "r".repeat(45)
    );
    assert_eq!(out, expected);
}

#[test]
fn nested_multi_line_children_trim_leading_indent_for_indexed_members() {
    let inner = Value::object_of(vec![
        ("left", Value::string("l".repeat(45))),
        ("right", Value::string("r".repeat(45))),
    ]);
    let value = Value::array(vec![inner]);
    let out = inspect(&value);
    let expected = format!(
        "[\n  {{\n    left: '{}',\n    right: '{}'\n  }}\n]",
        "l".repeat(45),
        "r".repeat(45)
    );
    assert_eq!(out, expected);
}

#[test]
fn thresholds_are_configurable() {
    let value = Value::object_of(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert_eq!(inspect(&value), "{ a: 1, b: 2 }");

    let out = inspect_with(&value, &with_layout(8, 4));
    assert_eq!(out, "{\n    a: 1,\n    b: 2\n}");
}
