//! Error values: name, message, raw stack text, and the extra keys the
//! inspector merges after the stack.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::object::Property;
use crate::value::Value;

#[derive(Clone, Debug)]
pub struct ErrorValue {
    pub name: Rc<str>,
    pub message: Rc<str>,
    /// Raw platform stack text, one frame per line.
    pub stack: Option<Rc<str>>,
    pub cause: Option<Value>,
    pub code: Option<Value>,
    /// Extra own properties beyond name/message/stack.
    pub properties: IndexMap<Rc<str>, Property>,
}

impl ErrorValue {
    pub fn new(name: &str, message: &str) -> Self {
        ErrorValue {
            name: Rc::from(name),
            message: Rc::from(message),
            stack: None,
            cause: None,
            code: None,
            properties: IndexMap::new(),
        }
    }

    pub fn with_stack(mut self, stack: &str) -> Self {
        self.stack = Some(Rc::from(stack));
        self
    }

    pub fn with_cause(mut self, cause: Value) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_code(mut self, code: Value) -> Self {
        self.code = Some(code);
        self
    }

    pub fn set(&mut self, key: impl Into<Rc<str>>, value: Value) {
        self.properties.insert(key.into(), Property::data(value));
    }

    pub fn set_hidden(&mut self, key: impl Into<Rc<str>>, value: Value) {
        self.properties.insert(key.into(), Property::hidden(value));
    }

    /// `Name: message`, or just the name when the message is empty.
    pub fn header(&self) -> String {
        if self.message.is_empty() {
            self.name.to_string()
        } else {
            format!("{}: {}", self.name, self.message)
        }
    }
}
