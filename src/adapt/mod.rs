//! Callback-to-deferred adaptation.
//!
//! `promisify` wraps a function following the `(error, ...results)`
//! callback convention into a function returning a [`Deferred`], and in
//! namespace mode adapts every member of an object.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tokio::sync::oneshot;

use crate::value::function::{Callable, Completion, PromisedFn};
use crate::value::object::PropertyValue;
use crate::value::{ErrorValue, FnFlavor, FunctionValue, ObjectInstance, Value};

pub mod deferred;

pub use deferred::Deferred;


#[derive(Debug, Error)]
pub enum AdaptError {
    /// `promisify` requires a function or an object.
    #[error("expecting original to be a function or object")]
    InvalidArgument,
}

/// Adapt a callback-convention function — or, in namespace mode, every
/// member of an object — into deferred-returning form.
///
/// - An object with an object-valued custom-adapter marker reuses that
///   object as the adaptation target; an object-valued `promises` member
///   is the fallback target; otherwise a fresh null-prototype object is
///   built. Function and object members adapt recursively, everything
///   else copies through. The result carries a custom-adapter marker
///   pointing at itself, so adapting twice is stable.
/// - A function with a function-valued custom-adapter marker returns that
///   override directly, tagged the same way.
/// - Any other function gets a synthesized async wrapper: invoking it
///   calls the original with an appended one-shot completion and returns
///   the [`Deferred`]. A truthy error argument rejects; declared named
///   result slots resolve to an object mapping each name to its
///   positional result; otherwise the first positional result resolves.
/// - Anything else fails fast with [`AdaptError::InvalidArgument`].
pub fn promisify(original: &Value) -> Result<Value, AdaptError> {
    match original {
        Value::Object(obj) => promisify_namespace(obj),
        Value::Function(f) => promisify_function(f),
        _ => Err(AdaptError::InvalidArgument),
    }
}

fn promisify_namespace(obj: &Rc<RefCell<ObjectInstance>>) -> Result<Value, AdaptError> {
    let (override_target, promises_target, members) = {
        let source = match obj.try_borrow() {
            Ok(source) => source,
            Err(_) => return Err(AdaptError::InvalidArgument),
        };
        let override_target = match &source.adapter {
            Some(Value::Object(target)) => Some(target.clone()),
            _ => None,
        };
        let promises_target = match source.get_data("promises") {
            Some(Value::Object(target)) => Some(target.clone()),
            _ => None,
        };
        let members: Vec<(Rc<str>, PropertyValue)> = source
            .properties
            .iter()
            .filter(|(_, prop)| prop.enumerable)
            .map(|(key, prop)| (key.clone(), prop.value.clone()))
            .collect();
        (override_target, promises_target, members)
    };

    let target = override_target
        .or(promises_target)
        .unwrap_or_else(|| Rc::new(RefCell::new(ObjectInstance::null_proto())));

    for (key, member) in members {
        let value = match member {
            PropertyValue::Data(value) => value,
            PropertyValue::Accessor { .. } => continue,
        };
        let adapted = match &value {
            Value::Function(_) | Value::Object(_) => promisify(&value)?,
            _ => value,
        };
        target.borrow_mut().set(key, adapted);
    }

    // Self-referential marker: adapting the result again reuses it.
    target.borrow_mut().adapter = Some(Value::Object(target.clone()));
    Ok(Value::Object(target))
}

fn promisify_function(f: &Rc<FunctionValue>) -> Result<Value, AdaptError> {
    let override_fn = match &*f.adapter.borrow() {
        Some(Value::Function(override_fn)) => Some(override_fn.clone()),
        _ => None,
    };
    if let Some(override_fn) = override_fn {
        let tagged = Value::Function(override_fn.clone());
        *override_fn.adapter.borrow_mut() = Some(tagged.clone());
        return Ok(tagged);
    }

    let promised: PromisedFn = match &f.callable {
        // Already deferred-returning: reuse rather than double-wrap.
        Callable::Promised(p) => p.clone(),
        Callable::Callback(callback) => {
            let callback = callback.clone();
            let names = f.result_names.clone();
            Rc::new(move |args: Vec<Value>| {
                let (tx, rx) = oneshot::channel();
                let names = names.clone();
                let completion: Completion = Box::new(move |err: Value, results: Vec<Value>| {
                    let _ = tx.send(settle(err, results, names));
                });
                callback(args, completion);
                Deferred::new(rx)
            })
        }
        Callable::Opaque => Rc::new(move |_args: Vec<Value>| {
            Deferred::rejected(Value::error(ErrorValue::new(
                "TypeError",
                "original is not a function",
            )))
        }),
    };

    Ok(Value::function(FunctionValue::new(
        f.name.as_deref(),
        FnFlavor::Async,
        Callable::Promised(promised),
    )))
}

fn settle(err: Value, results: Vec<Value>, names: Option<Vec<Rc<str>>>) -> Result<Value, Value> {
    if err.is_truthy() {
        return Err(err);
    }
    match names {
        Some(names) if !names.is_empty() => {
            let mut object = ObjectInstance::new();
            for (index, name) in names.iter().enumerate() {
                object.set(
                    name.clone(),
                    results.get(index).cloned().unwrap_or(Value::Undefined),
                );
            }
            Ok(Value::object(object))
        }
        _ => Ok(results.into_iter().next().unwrap_or(Value::Undefined)),
    }
}
