// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

struct Inner {
    store: HashMap<String, Value>,
    outer: Option<Environment>,
}

/// A lexical scope: a name-to-value mapping plus an optional parent
/// scope (§3.4). Cheap to clone — clones share the same underlying
/// scope, which is exactly what closure capture needs (§9, "Closure
/// environment lifetime").
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Inner>>);

impl Environment {
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Inner { store: HashMap::new(), outer: None })))
    }

    /// A fresh, empty scope whose parent is `outer` — used for function
    /// call frames (§4.6 "Call").
    pub fn enclosed(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Inner { store: HashMap::new(), outer: Some(outer.clone()) })))
    }

    /// Walks the chain from innermost to outermost (§3.4, §4.4).
    pub fn get(&self, name: &str) -> Option<Value> {
        let inner = self.0.borrow();
        if let Some(value) = inner.store.get(name) {
            return Some(value.clone());
        }
        match &inner.outer {
            Some(outer) => outer.get(name),
            None => None,
        }
    }

    /// Binds in the innermost scope only; never writes through to an
    /// outer scope (§3.4, §4.4).
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().store.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_the_outer_chain() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(5));
        let inner = Environment::enclosed(&outer);
        assert!(matches!(inner.get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn set_never_leaks_into_the_outer_scope() {
        let outer = Environment::new();
        let inner = Environment::enclosed(&outer);
        inner.set("y", Value::Integer(1));
        assert!(outer.get("y").is_none());
    }

    #[test]
    fn inner_binding_shadows_outer_binding() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));
        let inner = Environment::enclosed(&outer);
        inner.set("x", Value::Integer(2));
        assert!(matches!(inner.get("x"), Some(Value::Integer(2))));
        assert!(matches!(outer.get("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn missing_name_returns_none() {
        let env = Environment::new();
        assert!(env.get("nope").is_none());
    }
}
