//! Function values: flavor, own properties, the callable behind the value,
//! and the markers consumed by the callback adapter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::adapt::Deferred;
use crate::inspect::hook::InspectHook;
use crate::value::object::Property;
use crate::value::Value;

/// Completion continuation appended by promisified wrappers. `FnOnce` is
/// load-bearing: a callback can be fired at most once by construction.
pub type Completion = Box<dyn FnOnce(Value, Vec<Value>)>;

/// A native function following the `(args, callback)` convention.
pub type CallbackFn = Rc<dyn Fn(Vec<Value>, Completion)>;

/// A function already returning a deferred result.
pub type PromisedFn = Rc<dyn Fn(Vec<Value>) -> Deferred>;

pub enum Callable {
    /// Invokable with a trailing completion callback.
    Callback(CallbackFn),
    /// Invokable directly into a deferred result.
    Promised(PromisedFn),
    /// Not invokable from this crate; display-only.
    Opaque,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Callback(_) => write!(f, "Callback"),
            Callable::Promised(_) => write!(f, "Promised"),
            Callable::Opaque => write!(f, "Opaque"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnFlavor {
    Plain,
    Async,
    Generator,
    AsyncGenerator,
    Class,
}

pub struct FunctionValue {
    pub name: Option<Rc<str>>,
    pub flavor: FnFlavor,
    pub properties: RefCell<IndexMap<Rc<str>, Property>>,
    pub callable: Callable,
    /// Custom-adapter override; when set, `promisify` returns it directly.
    pub adapter: RefCell<Option<Value>>,
    /// Declared named result slots for the callback's positional results.
    pub result_names: Option<Vec<Rc<str>>>,
    pub inspect_hook: Option<InspectHook>,
}

impl FunctionValue {
    pub fn new(name: Option<&str>, flavor: FnFlavor, callable: Callable) -> Self {
        FunctionValue {
            name: name.map(Rc::from),
            flavor,
            properties: RefCell::new(IndexMap::new()),
            callable,
            adapter: RefCell::new(None),
            result_names: None,
            inspect_hook: None,
        }
    }

    pub fn plain(name: Option<&str>) -> Self {
        FunctionValue::new(name, FnFlavor::Plain, Callable::Opaque)
    }

    pub fn with_callback(name: Option<&str>, callback: CallbackFn) -> Self {
        FunctionValue::new(name, FnFlavor::Plain, Callable::Callback(callback))
    }

    pub fn with_result_names(mut self, names: &[&str]) -> Self {
        self.result_names = Some(names.iter().map(|n| Rc::from(*n)).collect());
        self
    }

    /// The rendering tag, e.g. `[Function: run]` or `[AsyncFunction]`.
    pub fn tag(&self) -> String {
        let label = match self.flavor {
            FnFlavor::Plain => "Function",
            FnFlavor::Async => "AsyncFunction",
            FnFlavor::Generator => "GeneratorFunction",
            FnFlavor::AsyncGenerator => "AsyncGeneratorFunction",
            FnFlavor::Class => "Class",
        };
        match &self.name {
            Some(name) => format!("[{}: {}]", label, name),
            None => format!("[{}]", label),
        }
    }

    /// Invoke a callback-convention callable. Returns false when the
    /// function is not invokable that way.
    pub fn call_with_callback(&self, args: Vec<Value>, completion: Completion) -> bool {
        match &self.callable {
            Callable::Callback(f) => {
                f(args, completion);
                true
            }
            _ => false,
        }
    }

    /// Invoke a promised callable; `None` when the function is not one.
    pub fn call_deferred(&self, args: Vec<Value>) -> Option<Deferred> {
        match &self.callable {
            Callable::Promised(f) => Some(f(args)),
            _ => None,
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("flavor", &self.flavor)
            .field("callable", &self.callable)
            .finish_non_exhaustive()
    }
}
