//! Object instances: insertion-ordered property tables with the metadata the
//! inspector and the callback adapter read off a value.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::inspect::hook::InspectHook;
use crate::value::Value;

/// Well-known singletons that get special treatment: the inspector never
/// invokes their inspection hooks, and the template formatter skips them
/// (the system singleton rendering as a fixed `[System]` token).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WellKnown {
    GlobalScope,
    System,
}

/// One own property. Accessor properties carry no value; the inspector
/// renders their placeholder without ever invoking them.
#[derive(Clone, Debug)]
pub enum PropertyValue {
    Data(Value),
    Accessor { get: bool, set: bool },
}

#[derive(Clone, Debug)]
pub struct Property {
    pub value: PropertyValue,
    pub enumerable: bool,
}

impl Property {
    pub fn data(value: Value) -> Self {
        Property {
            value: PropertyValue::Data(value),
            enumerable: true,
        }
    }

    pub fn hidden(value: Value) -> Self {
        Property {
            value: PropertyValue::Data(value),
            enumerable: false,
        }
    }
}

/// An object: ordered own properties plus the flags that drive rendering
/// and adaptation.
#[derive(Clone, Debug, Default)]
pub struct ObjectInstance {
    /// Constructor or string-tag name; `None` for a plain `{}`.
    pub class_name: Option<Rc<str>>,
    /// True when the prototype chain is empty.
    pub null_prototype: bool,
    pub properties: IndexMap<Rc<str>, Property>,
    pub inspect_hook: Option<InspectHook>,
    pub well_known: Option<WellKnown>,
    /// Custom-adapter marker consumed and produced by `promisify`.
    pub adapter: Option<Value>,
}

impl ObjectInstance {
    pub fn new() -> Self {
        ObjectInstance::default()
    }

    pub fn with_class(name: &str) -> Self {
        ObjectInstance {
            class_name: Some(Rc::from(name)),
            ..ObjectInstance::default()
        }
    }

    pub fn null_proto() -> Self {
        ObjectInstance {
            null_prototype: true,
            ..ObjectInstance::default()
        }
    }

    pub fn singleton(kind: WellKnown) -> Self {
        ObjectInstance {
            well_known: Some(kind),
            ..ObjectInstance::default()
        }
    }

    pub fn set(&mut self, key: impl Into<Rc<str>>, value: Value) {
        self.properties.insert(key.into(), Property::data(value));
    }

    pub fn set_hidden(&mut self, key: impl Into<Rc<str>>, value: Value) {
        self.properties.insert(key.into(), Property::hidden(value));
    }

    pub fn set_accessor(&mut self, key: impl Into<Rc<str>>, get: bool, set: bool) {
        self.properties.insert(
            key.into(),
            Property {
                value: PropertyValue::Accessor { get, set },
                enumerable: true,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// The data value under `key`, if it is a data property.
    pub fn get_data(&self, key: &str) -> Option<&Value> {
        match self.properties.get(key) {
            Some(Property {
                value: PropertyValue::Data(v),
                ..
            }) => Some(v),
            _ => None,
        }
    }
}
