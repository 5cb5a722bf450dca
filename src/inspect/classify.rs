//! Value classification.
//!
//! Kinds are not mutually exclusive by shape alone (an array is also
//! iterable; a class is also callable), so classification is an ordered
//! early-return chain: the first matching probe wins. The chain is
//! deterministic, side-effect-free, and never panics — a probe that cannot
//! read its value falls back to the plain-object tag.

use crate::value::{FnFlavor, Value};

/// Classification tag driving a value's rendering rule. Recomputed per
/// node, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Symbol,
    String,
    Number,
    Boolean,
    BigInt,
    Null,
    Undefined,
    Function,
    AsyncFunction,
    GeneratorFunction,
    Class,
    Date,
    RegExp,
    Error,
    Map,
    Set,
    WeakMap,
    WeakSet,
    Arguments,
    ArrayLike,
    Iterator,
    PlainObject,
    NullPrototypeObject,
}

/// Classify a value. Precedence, highest first: symbol, primitive scalars,
/// weak collections before keyed collections, regular expressions, dates,
/// errors, arguments objects, the iterator family, array-likes (arrays and
/// binary views), the function family, then plain objects with the
/// null-prototype sub-case.
pub fn classify(value: &Value) -> Kind {
    if matches!(value, Value::Symbol(_)) {
        return Kind::Symbol;
    }
    if matches!(value, Value::Str(_)) {
        return Kind::String;
    }
    if matches!(value, Value::Int(_) | Value::Float(_)) {
        return Kind::Number;
    }
    if matches!(value, Value::Bool(_)) {
        return Kind::Boolean;
    }
    if matches!(value, Value::BigInt(_)) {
        return Kind::BigInt;
    }
    if matches!(value, Value::Null) {
        return Kind::Null;
    }
    if matches!(value, Value::Undefined) {
        return Kind::Undefined;
    }
    if matches!(value, Value::WeakSet) {
        return Kind::WeakSet;
    }
    if matches!(value, Value::WeakMap) {
        return Kind::WeakMap;
    }
    if matches!(value, Value::Map(_)) {
        return Kind::Map;
    }
    if matches!(value, Value::Set(_)) {
        return Kind::Set;
    }
    if matches!(value, Value::RegExp(_)) {
        return Kind::RegExp;
    }
    if matches!(value, Value::Date(_)) {
        return Kind::Date;
    }
    if matches!(value, Value::Error(_)) {
        return Kind::Error;
    }
    if matches!(value, Value::Arguments(_)) {
        return Kind::Arguments;
    }
    if matches!(value, Value::Iterator(_)) {
        return Kind::Iterator;
    }
    if matches!(value, Value::Array(_) | Value::Bytes(_)) {
        return Kind::ArrayLike;
    }
    if let Value::Function(f) = value {
        return match f.flavor {
            FnFlavor::Class => Kind::Class,
            FnFlavor::Async => Kind::AsyncFunction,
            FnFlavor::Generator | FnFlavor::AsyncGenerator => Kind::GeneratorFunction,
            FnFlavor::Plain => Kind::Function,
        };
    }
    if let Value::Object(obj) = value {
        // An unreadable object still classifies; degrade to plain.
        return match obj.try_borrow() {
            Ok(obj) if obj.null_prototype => Kind::NullPrototypeObject,
            _ => Kind::PlainObject,
        };
    }
    Kind::PlainObject
}
