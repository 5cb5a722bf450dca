//! Per-call inspection context.

use crate::inspect::InspectOptions;
use crate::value::{Value, ValueId};

/// Mutable state threaded through one top-level inspection: the options and
/// the identity-ordered stack of values currently being rendered. Owned by
/// exactly one call; never shared.
pub(crate) struct InspectContext<'a> {
    pub opts: &'a InspectOptions,
    seen: Vec<ValueId>,
}

impl<'a> InspectContext<'a> {
    pub fn new(opts: &'a InspectOptions) -> Self {
        InspectContext {
            opts,
            seen: Vec::new(),
        }
    }

    pub fn has_seen(&self, value: &Value) -> bool {
        match value.identity() {
            Some(id) => self.seen.contains(&id),
            None => false,
        }
    }

    /// Run `f` with `value` on the seen stack. The pop happens on every
    /// exit path out of `f`, so early returns cannot leak a stale entry.
    pub fn enter<R>(&mut self, value: &Value, f: impl FnOnce(&mut Self) -> R) -> R {
        let pushed = match value.identity() {
            Some(id) => {
                self.seen.push(id);
                true
            }
            None => false,
        };
        let out = f(self);
        if pushed {
            self.seen.pop();
        }
        out
    }
}
