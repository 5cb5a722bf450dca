use loupe::inspect::{inspect, inspect_with, InspectOptions, StackTraceConfig};
use loupe::value::{ErrorValue, Value};

fn with_stack_config(config: StackTraceConfig) -> InspectOptions {
    InspectOptions {
        stack_trace: config,
        ..InspectOptions::default()
    }
}

#[test]
fn stackless_errors_render_their_header() {
    assert_eq!(
        inspect(&Value::error(ErrorValue::new("Error", "boom"))),
        "Error: boom"
    );
    assert_eq!(
        inspect(&Value::error(ErrorValue::new("RangeError", ""))),
        "RangeError"
    );
}

#[test]
fn header_not_duplicated_when_stack_carries_it() {
    let err = ErrorValue::new("Error", "boom")
        .with_stack("Error: boom\n    at go (main.js:1:2)");
    assert_eq!(
        inspect(&Value::error(err)),
        "Error: boom\n    at go (main.js:1:2)"
    );
}

#[test]
fn header_prepended_when_stack_lacks_it() {
    let err = ErrorValue::new("Error", "boom").with_stack("    at go (main.js:1:2)");
    assert_eq!(
        inspect(&Value::error(err)),
        "Error: boom\n    at go (main.js:1:2)"
    );
}

#[test]
fn platform_frames_are_rebuilt() {
    let err = ErrorValue::new("TypeError", "bad input")
        .with_stack("handler@http://host/app/routes.js:10:3\n@http://host/app/main.js:2:1\n@");
    let config = StackTraceConfig {
        root: Some("/app/".to_string()),
        ..StackTraceConfig::default()
    };
    assert_eq!(
        inspect_with(&Value::error(err), &with_stack_config(config)),
        "TypeError: bad input\n    at handler (routes.js:10:3)\n    at (main.js:2:1)\n    at <anonymous>"
    );
}

#[test]
fn module_paths_rewrite_into_scheme_form() {
    let err = ErrorValue::new("Error", "x").with_stack("init@/root/app/util.js:4:2");
    let config = StackTraceConfig {
        root: Some("/root/".to_string()),
        module_root: Some("app/".to_string()),
        module_scheme: Some("app:".to_string()),
        strip_extension: Some(".js".to_string()),
    };
    assert_eq!(
        inspect_with(&Value::error(err), &with_stack_config(config)),
        "Error: x\n    at init (app:util:4:2)"
    );
}

#[test]
fn cause_and_code_merge_into_the_key_block() {
    let err = ErrorValue::new("Error", "boom")
        .with_stack("Error: boom\n    at go (main.js:1:2)")
        .with_cause(Value::string("disk full"))
        .with_code(Value::string("E_DISK"));
    assert_eq!(
        inspect(&Value::error(err)),
        "Error: boom\n    at go (main.js:1:2) {\n  cause: 'disk full',\n  code: 'E_DISK'\n}"
    );
}

#[test]
fn falsy_cause_and_code_stay_out() {
    let err = ErrorValue::new("Error", "boom")
        .with_cause(Value::Null)
        .with_code(Value::Int(0));
    assert_eq!(inspect(&Value::error(err)), "Error: boom");
}

#[test]
fn extra_enumerable_keys_render() {
    let mut err = ErrorValue::new("Error", "refused");
    err.set("port", Value::Int(443));
    err.set("host", Value::string("example.com"));
    assert_eq!(
        inspect(&Value::error(err)),
        "Error: refused\n {\n  port: 443,\n  host: 'example.com'\n}"
    );
}

#[test]
fn hidden_error_keys_only_under_show_hidden() {
    let mut err = ErrorValue::new("Error", "x");
    err.set_hidden("internal", Value::Int(1));
    let value = Value::error(err);
    assert_eq!(inspect(&value), "Error: x");

    let options = InspectOptions {
        show_hidden: true,
        ..InspectOptions::default()
    };
    assert_eq!(
        inspect_with(&value, &options),
        "Error: x\n {\n  [internal]: 1\n}"
    );
}

#[test]
fn error_cause_values_render_recursively() {
    let cause = Value::error(ErrorValue::new("Error", "root"));
    let err = ErrorValue::new("Error", "outer").with_cause(cause);
    assert_eq!(
        inspect(&Value::error(err)),
        "Error: outer\n {\n  cause: Error: root\n}"
    );
}
