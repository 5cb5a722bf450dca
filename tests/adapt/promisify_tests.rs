use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use loupe::adapt::{promisify, AdaptError, Deferred};
use loupe::inspect::inspect;
use loupe::value::{ErrorValue, FunctionValue, ObjectInstance, Value};

fn callback_fn(
    name: &str,
    behavior: impl Fn(Vec<Value>) -> (Value, Vec<Value>) + 'static,
) -> Value {
    Value::function(FunctionValue::with_callback(
        Some(name),
        Rc::new(move |args, done| {
            let (err, results) = behavior(args);
            done(err, results);
        }),
    ))
}

fn call(adapted: &Value, args: Vec<Value>) -> Deferred {
    match adapted {
        Value::Function(f) => f.call_deferred(args).expect("promised callable"),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[tokio::test]
async fn resolves_with_the_first_result() {
    let original = callback_fn("answer", |_args| (Value::Null, vec![Value::Int(42)]));
    let adapted = promisify(&original).expect("adapted");
    assert_eq!(call(&adapted, vec![]).await, Ok(Value::Int(42)));
}

#[tokio::test]
async fn resolves_undefined_without_results() {
    let original = callback_fn("fire", |_args| (Value::Null, vec![]));
    let adapted = promisify(&original).expect("adapted");
    assert_eq!(call(&adapted, vec![]).await, Ok(Value::Undefined));
}

#[tokio::test]
async fn rejects_with_the_error_argument() {
    let failure = Value::error(ErrorValue::new("Error", "nope"));
    let original = {
        let failure = failure.clone();
        callback_fn("fail", move |_args| (failure.clone(), vec![]))
    };
    let adapted = promisify(&original).expect("adapted");
    let err = call(&adapted, vec![]).await.expect_err("rejected");
    assert_eq!(err, failure);
}

#[tokio::test]
async fn falsy_error_arguments_resolve() {
    let original = callback_fn("ok", |_args| (Value::Undefined, vec![Value::Int(7)]));
    let adapted = promisify(&original).expect("adapted");
    assert_eq!(call(&adapted, vec![]).await, Ok(Value::Int(7)));
}

#[tokio::test]
async fn arguments_pass_through_to_the_original() {
    let original = callback_fn("sum", |args| {
        let total: i64 = args
            .iter()
            .map(|v| match v {
                Value::Int(i) => *i,
                _ => 0,
            })
            .sum();
        (Value::Null, vec![Value::Int(total)])
    });
    let adapted = promisify(&original).expect("adapted");
    let result = call(&adapted, vec![Value::Int(2), Value::Int(3)]).await;
    assert_eq!(result, Ok(Value::Int(5)));
}

#[tokio::test]
async fn named_result_slots_build_an_object() {
    let original = Value::function(
        FunctionValue::with_callback(
            Some("stat"),
            Rc::new(|_args, done| done(Value::Null, vec![Value::Int(1), Value::Int(2)])),
        )
        .with_result_names(&["x", "y"]),
    );
    let adapted = promisify(&original).expect("adapted");
    let result = call(&adapted, vec![]).await.expect("resolved");
    assert_eq!(inspect(&result), "{ x: 1, y: 2 }");
}

#[tokio::test]
async fn missing_named_results_fill_with_undefined() {
    let original = Value::function(
        FunctionValue::with_callback(
            Some("stat"),
            Rc::new(|_args, done| done(Value::Null, vec![Value::Int(1)])),
        )
        .with_result_names(&["x", "y"]),
    );
    let adapted = promisify(&original).expect("adapted");
    let result = call(&adapted, vec![]).await.expect("resolved");
    assert_eq!(inspect(&result), "{ x: 1, y: undefined }");
}

#[tokio::test]
async fn namespace_mode_adapts_methods_and_keeps_data() {
    let mut ns = ObjectInstance::new();
    ns.set(
        "read",
        callback_fn("read", |_args| (Value::Null, vec![Value::string("data")])),
    );
    ns.set("version", Value::string("2.0"));
    let adapted = promisify(&Value::object(ns)).expect("adapted");

    let (read, version) = match &adapted {
        Value::Object(obj) => {
            let obj = obj.borrow();
            (
                obj.get_data("read").cloned().expect("read member"),
                obj.get_data("version").cloned().expect("version member"),
            )
        }
        other => panic!("expected object, got {:?}", other),
    };
    assert_eq!(version, Value::string("2.0"));
    assert_eq!(call(&read, vec![]).await, Ok(Value::string("data")));
}

#[tokio::test]
async fn adapting_twice_is_stable() {
    let mut ns = ObjectInstance::new();
    ns.set(
        "read",
        callback_fn("read", |_args| (Value::Null, vec![Value::Int(1)])),
    );
    let once = promisify(&Value::object(ns)).expect("first");
    let twice = promisify(&once).expect("second");
    assert_eq!(once, twice);

    let read = match &twice {
        Value::Object(obj) => obj.borrow().get_data("read").cloned().expect("read"),
        other => panic!("expected object, got {:?}", other),
    };
    assert_eq!(call(&read, vec![]).await, Ok(Value::Int(1)));
}

#[test]
fn invalid_inputs_fail_synchronously() {
    for value in [Value::Int(1), Value::Bool(true), Value::Undefined, Value::Null] {
        assert!(matches!(
            promisify(&value),
            Err(AdaptError::InvalidArgument)
        ));
    }
}

#[test]
fn unfired_callback_leaves_the_deferred_pending() {
    // The original never invokes (and drops) its completion.
    let original = Value::function(FunctionValue::with_callback(
        Some("never"),
        Rc::new(|_args, _done| {}),
    ));
    let adapted = promisify(&original).expect("adapted");
    let mut deferred = call(&adapted, vec![]);

    let waker = Waker::noop();
    let mut cx = Context::from_waker(waker);
    assert!(matches!(
        Pin::new(&mut deferred).poll(&mut cx),
        Poll::Pending
    ));
    assert!(matches!(
        Pin::new(&mut deferred).poll(&mut cx),
        Poll::Pending
    ));
}

#[tokio::test]
async fn completion_can_fire_after_the_call_returns() {
    // The original stashes its completion; the deferred settles only when
    // the stored callback finally fires.
    let slot: Rc<RefCell<Option<loupe::value::Completion>>> = Rc::new(RefCell::new(None));
    let original = {
        let slot = slot.clone();
        Value::function(FunctionValue::with_callback(
            Some("later"),
            Rc::new(move |_args, done| {
                *slot.borrow_mut() = Some(done);
            }),
        ))
    };
    let adapted = promisify(&original).expect("adapted");
    let deferred = call(&adapted, vec![]);

    let done = slot.borrow_mut().take().expect("stored completion");
    done(Value::Null, vec![Value::string("late")]);
    assert_eq!(deferred.await, Ok(Value::string("late")));
}
